pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod notification;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use config::AppConfig;
pub use error::TrackerError;
pub use input::{accept_input, parse_field, InputVerdict};
pub use model::budget::DailyBudget;
pub use model::field::{Field, MacroTotals, PerField};
pub use model::week::{DayEntry, WeeklyEntries, WEEK};
pub use notification::{Notification, Notifier, NullNotifier, Permission};
pub use repository::{FileStore, KeyValueStore, MemoryStore};
pub use service::dto::{DaySummary, WeeklySummary};
pub use service::tracker_service::MacroTracker;
pub use time::{parse_day, weekday_name};
pub use usecase::reminder::{ReminderScheduler, ReminderState};
