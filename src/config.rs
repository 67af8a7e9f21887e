//! Application configuration constants
//!
//! Centralized configuration for the reminder app.

use crate::error::{AppError, AppResult};
use std::path::PathBuf;
use std::time::Duration;

/// Storage key holding the JSON array of reminders
pub const REMINDERS_KEY: &str = "dadapp-reminders";

/// Storage key holding the notification settings object
pub const SETTINGS_KEY: &str = "dadapp-notification-settings";

/// Suffix of the key an unreadable entry is copied to before it is replaced.
pub const BACKUP_SUFFIX: &str = "-backup";

/// Folder created under the platform's local data directory
pub const DATA_DIR_NAME: &str = "DadApp";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "DADAPP_DATA_DIR";

/// Title shown on every reminder notification
pub const NOTIFICATION_TITLE: &str = "🧠 DadApp Reminder";

/// Prefix of the notification tag; the reminder id follows it
pub const NOTIFICATION_TAG_PREFIX: &str = "reminder-";

/// Delay before the "just added" confirmation notification
pub const ADDED_CONFIRMATION_DELAY: Duration = Duration::from_secs(1);

/// Polling interval used when the stored value is missing or unusable
pub const DEFAULT_INTERVAL_MINUTES: u64 = 15;

/// Default quiet-hours window
pub const DEFAULT_QUIET_START: &str = "22:00";
pub const DEFAULT_QUIET_END: &str = "07:00";

/// Snooze length offered by the notification action
pub const SNOOZE_MINUTES: u32 = 10;

/// Category given to reminders created through quick add
pub const DEFAULT_CATEGORY: &str = "general";

/// Offline asset cache name
pub const CACHE_NAME: &str = "dadapp-v1";

/// Assets precached for offline use
pub const PRECACHE_URLS: [&str; 5] = [
    "./",
    "./index.html",
    "./style.css",
    "./script.js",
    "./manifest.json",
];

/// Runtime configuration resolved from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            let dir = dir.trim();
            if !dir.is_empty() {
                return Ok(Self {
                    data_dir: PathBuf::from(dir),
                });
            }
        }

        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| AppError::config("Failed to get local data dir"))?
            .join(DATA_DIR_NAME);

        Ok(Self { data_dir })
    }
}
