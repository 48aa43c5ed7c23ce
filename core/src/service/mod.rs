pub mod budget_engine;
pub mod dto;
pub mod tracker_service;
