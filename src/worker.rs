//! Messages relayed from the background worker to the foreground app.
//!
//! Notification action taps arrive as an action id plus the notification tag
//! (`reminder-<id>`) and are turned into [`WorkerMessage`]s.

use crate::config::{NOTIFICATION_TAG_PREFIX, SNOOZE_MINUTES};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerMessage {
    MarkReminderDone {
        #[serde(rename = "reminderId")]
        reminder_id: String,
    },
    SnoozeReminder {
        #[serde(rename = "reminderId")]
        reminder_id: String,
        #[serde(rename = "snoozeMinutes")]
        snooze_minutes: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    MarkDone,
    Snooze,
}

impl NotificationAction {
    pub fn id(self) -> &'static str {
        match self {
            NotificationAction::MarkDone => "mark-done",
            NotificationAction::Snooze => "snooze",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "mark-done" => Some(NotificationAction::MarkDone),
            "snooze" => Some(NotificationAction::Snooze),
            _ => None,
        }
    }
}

/// Reminder id carried by a notification tag.
pub fn reminder_id_from_tag(tag: &str) -> Option<&str> {
    tag.strip_prefix(NOTIFICATION_TAG_PREFIX)
        .filter(|id| !id.is_empty())
}

/// Map a tapped action to the message the foreground app should receive.
/// Plain clicks and dismissals carry no message.
pub fn relay(action_id: &str, tag: &str) -> Option<WorkerMessage> {
    let action = NotificationAction::from_id(action_id)?;
    let reminder_id = reminder_id_from_tag(tag)?.to_string();
    Some(match action {
        NotificationAction::MarkDone => WorkerMessage::MarkReminderDone { reminder_id },
        NotificationAction::Snooze => WorkerMessage::SnoozeReminder {
            reminder_id,
            snooze_minutes: SNOOZE_MINUTES,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_done_wire_format() {
        let json = r#"{"type":"MARK_REMINDER_DONE","reminderId":"abc"}"#;
        let message: WorkerMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            message,
            WorkerMessage::MarkReminderDone {
                reminder_id: "abc".into()
            }
        );
        assert_eq!(serde_json::to_string(&message).unwrap(), json);
    }

    #[test]
    fn test_snooze_wire_format() {
        let json = r#"{"type":"SNOOZE_REMINDER","reminderId":"abc","snoozeMinutes":10}"#;
        let message: WorkerMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            message,
            WorkerMessage::SnoozeReminder {
                reminder_id: "abc".into(),
                snooze_minutes: 10
            }
        );
    }

    #[test]
    fn test_relay_actions() {
        assert_eq!(
            relay("mark-done", "reminder-42"),
            Some(WorkerMessage::MarkReminderDone {
                reminder_id: "42".into()
            })
        );
        assert_eq!(
            relay("snooze", "reminder-42"),
            Some(WorkerMessage::SnoozeReminder {
                reminder_id: "42".into(),
                snooze_minutes: SNOOZE_MINUTES
            })
        );
    }

    #[test]
    fn test_relay_ignores_other_actions_and_tags() {
        assert_eq!(relay("default", "reminder-42"), None);
        assert_eq!(relay("__closed", "reminder-42"), None);
        assert_eq!(relay("mark-done", "something-else"), None);
        assert_eq!(relay("mark-done", "reminder-"), None);
    }
}
