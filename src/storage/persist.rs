//! Whole-entry JSON encoding of the reminder list and notification settings.

use super::KeyValueStore;
use crate::config::{BACKUP_SUFFIX, REMINDERS_KEY, SETTINGS_KEY};
use crate::error::AppResult;
use crate::reminder::Reminder;
use crate::settings::NotificationSettings;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Load the reminder collection; missing or unreadable data yields an empty list.
///
/// Records that cannot be read are skipped. Whenever anything is dropped the
/// raw entry is first copied to its backup key.
pub fn load_reminders(store: &dyn KeyValueStore) -> Vec<Reminder> {
    let Some(content) = read_entry(store, REMINDERS_KEY) else {
        return Vec::new();
    };

    let records: Vec<Value> = match serde_json::from_str(&content) {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(key = REMINDERS_KEY, %err, "stored data is corrupt, using defaults");
            back_up(store, REMINDERS_KEY, &content);
            return Vec::new();
        }
    };

    let total = records.len();
    let reminders: Vec<Reminder> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(reminder) => Some(reminder),
            Err(err) => {
                tracing::warn!(index, %err, "skipping unreadable reminder");
                None
            }
        })
        .collect();

    if reminders.len() < total {
        back_up(store, REMINDERS_KEY, &content);
    }
    reminders
}

pub fn save_reminders(store: &dyn KeyValueStore, reminders: &[Reminder]) -> AppResult<()> {
    let content = serde_json::to_string(reminders)?;
    store.set(REMINDERS_KEY, &content)
}

/// Load notification settings; missing or unreadable data yields the defaults.
pub fn load_settings(store: &dyn KeyValueStore) -> NotificationSettings {
    load_or_default(store, SETTINGS_KEY)
}

pub fn save_settings(store: &dyn KeyValueStore, settings: &NotificationSettings) -> AppResult<()> {
    let content = serde_json::to_string(settings)?;
    store.set(SETTINGS_KEY, &content)
}

/// Key the raw content of `key` is preserved under when it cannot be read.
pub fn backup_key(key: &str) -> String {
    format!("{}{}", key, BACKUP_SUFFIX)
}

fn read_entry(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(key, %err, "storage unavailable, using defaults");
            None
        }
    }
}

fn back_up(store: &dyn KeyValueStore, key: &str, content: &str) {
    let backup = backup_key(key);
    match store.set(&backup, content) {
        Ok(()) => tracing::info!(key, %backup, "kept unreadable data aside"),
        Err(err) => tracing::warn!(key, %err, "failed to back up unreadable data"),
    }
}

fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    let Some(content) = read_entry(store, key) else {
        return T::default();
    };

    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, %err, "stored data is corrupt, using defaults");
            back_up(store, key, &content);
            T::default()
        }
    }
}
