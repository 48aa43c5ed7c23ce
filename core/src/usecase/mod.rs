pub mod reminder;
mod reminder_test;
