use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::usecase::reminder::DEFAULT_REMINDER_HOUR;

pub const DATA_DIR_NAME: &str = ".macrobudget";
pub const LOG_FILE_NAME: &str = "macrobudget.log";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// Local hour at which the daily reminder window opens.
    pub reminder_hour: u32,
    pub reminders_enabled: bool,
}

impl AppConfig {
    pub fn resolve(
        data_dir: Option<PathBuf>,
        reminder_hour: Option<u32>,
        reminders_enabled: bool,
    ) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };

        let reminder_hour = reminder_hour.unwrap_or(DEFAULT_REMINDER_HOUR);
        if reminder_hour > 23 {
            return Err(anyhow!(
                "Reminder hour must be between 0 and 23, got {}",
                reminder_hour
            ));
        }

        Ok(Self {
            data_dir,
            reminder_hour,
            reminders_enabled,
        })
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}

/// `~/.macrobudget`
pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(DATA_DIR_NAME))
}
