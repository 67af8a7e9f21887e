use crate::config::DEFAULT_CATEGORY;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Lenient parse used for form input; anything unrecognised is medium.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Priority::Low,
            "high" => Priority::High,
            _ => Priority::Medium,
        }
    }
}

/// Which slice of the collection a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl ReminderFilter {
    pub fn matches(self, reminder: &Reminder) -> bool {
        match self {
            ReminderFilter::All => true,
            ReminderFilter::Active => !reminder.completed,
            ReminderFilter::Completed => reminder.completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredReminder")]
pub struct Reminder {
    pub id: String,
    pub text: String,
    pub category: String,
    pub priority: Priority,
    pub active: bool,
    pub notifications_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub completed: bool,
}

/// Persisted record as older or hand-edited data may hold it: every field
/// except the text may be missing.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredReminder {
    id: Option<String>,
    text: String,
    category: Option<String>,
    #[serde(default)]
    priority: Priority,
    active: Option<bool>,
    notifications_enabled: Option<bool>,
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    completed: bool,
}

impl From<StoredReminder> for Reminder {
    fn from(stored: StoredReminder) -> Self {
        Self {
            id: stored.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            text: stored.text,
            category: stored
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            priority: stored.priority,
            active: stored.active.unwrap_or(!stored.completed),
            notifications_enabled: stored.notifications_enabled.unwrap_or(true),
            created_at: stored.created_at.unwrap_or_else(Utc::now),
            completed: stored.completed,
        }
    }
}

impl Reminder {
    pub fn new(
        text: String,
        category: String,
        priority: Priority,
        notifications_enabled: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            category,
            priority,
            active: true,
            notifications_enabled,
            created_at: Utc::now(),
            completed: false,
        }
    }

    /// Flip completion, keeping `active` as its inverse.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
        self.active = !self.completed;
    }

    /// Eligible for the recurring notification sweep.
    pub fn is_notifiable(&self) -> bool {
        self.active && self.notifications_enabled && !self.completed
    }
}

/// Input for creating a reminder; defaults match the quick-add form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewReminder {
    pub text: String,
    pub category: String,
    pub priority: Priority,
    pub notifications_enabled: bool,
}

impl NewReminder {
    pub fn quick(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

impl Default for NewReminder {
    fn default() -> Self {
        Self {
            text: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            priority: Priority::Medium,
            notifications_enabled: true,
        }
    }
}
