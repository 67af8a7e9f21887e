mod local;
mod memory;
pub mod persist;

use crate::error::{AppError, AppResult};
use crate::reminder::{NewReminder, Reminder, ReminderFilter};
use std::sync::Arc;

pub use local::FileStore;
pub use memory::MemoryStore;

/// Minimal string key-value backend behind the persistence adapter.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
}

/// Ordered reminder collection, newest first, flushed to the backend after
/// every mutation.
pub struct Storage {
    reminders: Vec<Reminder>,
    backend: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn open(backend: Arc<dyn KeyValueStore>) -> Self {
        let reminders = persist::load_reminders(backend.as_ref());
        tracing::info!(count = reminders.len(), "loaded reminders");
        Self { reminders, backend }
    }

    // Write failures are not retried; the in-memory state stays authoritative.
    fn save(&self) {
        if let Err(err) = persist::save_reminders(self.backend.as_ref(), &self.reminders) {
            tracing::warn!(%err, "failed to persist reminders");
        }
    }

    // ============ Public API ============

    /// Create a reminder at the head of the collection.
    ///
    /// Blank text is rejected and leaves the collection untouched.
    pub fn add(&mut self, draft: NewReminder) -> AppResult<Reminder> {
        let text = draft.text.trim();
        if text.is_empty() {
            return Err(AppError::validation("Reminder text must not be empty"));
        }

        let reminder = Reminder::new(
            text.to_string(),
            draft.category,
            draft.priority,
            draft.notifications_enabled,
        );
        self.reminders.insert(0, reminder.clone());
        self.save();
        tracing::debug!(id = %reminder.id, "reminder added");
        Ok(reminder)
    }

    /// Flip completion of `id`. Returns the new completed state, or `None`
    /// when no such reminder exists.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let reminder = self.reminders.iter_mut().find(|r| r.id == id)?;
        reminder.toggle();
        let completed = reminder.completed;
        self.save();
        tracing::debug!(id, completed, "reminder toggled");
        Some(completed)
    }

    /// Remove `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.reminders.len();
        self.reminders.retain(|r| r.id != id);
        let removed = self.reminders.len() != before;
        self.save();
        if removed {
            tracing::debug!(id, "reminder deleted");
        }
        removed
    }

    pub fn list(&self, filter: ReminderFilter) -> impl Iterator<Item = &Reminder> + '_ {
        self.reminders.iter().filter(move |r| filter.matches(r))
    }

    /// `(total, active)` counts.
    pub fn stats(&self) -> (usize, usize) {
        let total = self.reminders.len();
        let active = self.reminders.iter().filter(|r| !r.completed).count();
        (total, active)
    }

    pub fn get(&self, id: &str) -> Option<&Reminder> {
        self.reminders.iter().find(|r| r.id == id)
    }

    /// Still present and not completed.
    pub fn is_live(&self, id: &str) -> bool {
        self.get(id).map(|r| !r.completed).unwrap_or(false)
    }

    /// Reminders the recurring sweep should surface, in collection order.
    pub fn notifiable(&self) -> impl Iterator<Item = &Reminder> + '_ {
        self.reminders.iter().filter(|r| r.is_notifiable())
    }
}
