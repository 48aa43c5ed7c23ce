use anyhow::Result;
use chrono::Weekday;

use crate::time::weekday_name;

pub const REMINDER_TITLE: &str = "Macro Tracker Reminder";
pub const REMINDER_ICON: &str = "icons/icon-192x192.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
    /// Notifications sharing a tag replace each other instead of stacking.
    pub tag: String,
}

impl Notification {
    pub fn missing_entry(day: Weekday) -> Self {
        let name = weekday_name(day);
        Self {
            title: REMINDER_TITLE.to_string(),
            body: format!("You haven't logged your macros for {name} yet."),
            icon: REMINDER_ICON.to_string(),
            tag: format!("macro-reminder-{name}"),
        }
    }
}

/// Platform notification surface.
pub trait Notifier {
    /// Asked at most once per session.
    fn request_permission(&mut self) -> Permission;
    fn notify(&mut self, notification: &Notification) -> Result<()>;
}

/// For platforms without notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn request_permission(&mut self) -> Permission {
        Permission::Unsupported
    }

    fn notify(&mut self, _notification: &Notification) -> Result<()> {
        Ok(())
    }
}
