use crate::config::{NOTIFICATION_TAG_PREFIX, NOTIFICATION_TITLE, SNOOZE_MINUTES};
use crate::reminder::Reminder;
use crate::timer::AppEvent;
use crate::worker::{self, NotificationAction};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub tag: String,
    pub require_interaction: bool,
}

impl Notification {
    pub fn for_reminder(reminder: &Reminder) -> Self {
        Self {
            title: NOTIFICATION_TITLE.to_string(),
            body: reminder.text.clone(),
            tag: format!("{}{}", NOTIFICATION_TAG_PREFIX, reminder.id),
            require_interaction: true,
        }
    }
}

/// Outcome of asking the platform for notification rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Granted,
    Denied,
    /// Not asked yet.
    Prompt,
    Unsupported,
}

/// Platform notification surface; implementations must treat `display` as a
/// no-op when permission is missing.
pub trait NotificationSink {
    fn permission(&self) -> Permission;
    fn request_permission(&mut self) -> Permission;
    fn display(&self, notification: &Notification);
}

/// Sink for systems without a notification surface.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedSink;

impl NotificationSink for UnsupportedSink {
    fn permission(&self) -> Permission {
        Permission::Unsupported
    }

    fn request_permission(&mut self) -> Permission {
        Permission::Unsupported
    }

    fn display(&self, _notification: &Notification) {}
}

/// Server ids of notifications still on screen, keyed by tag.
///
/// Showing a tag that is already on screen replaces that notification in
/// place instead of stacking another one.
#[derive(Debug, Default)]
struct OnScreen {
    ids: HashMap<String, u32>,
}

impl OnScreen {
    fn replaces(&self, tag: &str) -> Option<u32> {
        self.ids.get(tag).copied()
    }

    fn shown(&mut self, tag: &str, id: u32) {
        self.ids.insert(tag.to_string(), id);
    }

    /// Forget `tag` unless it has since moved to a different server id.
    fn dismissed(&mut self, tag: &str, id: u32) {
        if self.ids.get(tag) == Some(&id) {
            self.ids.remove(tag);
        }
    }
}

fn lock_on_screen(on_screen: &Mutex<OnScreen>) -> MutexGuard<'_, OnScreen> {
    on_screen.lock().unwrap_or_else(|e| e.into_inner())
}

/// Desktop notifications through the session's notification server.
///
/// On XDG desktops the "Mark Done" and "Snooze" actions are relayed back to
/// the foreground loop as worker messages, one waiting thread per
/// notification on screen.
pub struct DesktopSink {
    appname: String,
    events: Sender<AppEvent>,
    permission: Permission,
    on_screen: Arc<Mutex<OnScreen>>,
}

impl DesktopSink {
    pub fn new(appname: impl Into<String>, events: Sender<AppEvent>) -> Self {
        Self {
            appname: appname.into(),
            events,
            permission: Self::probe(),
            on_screen: Arc::default(),
        }
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    fn probe() -> Permission {
        match notify_rust::get_server_information() {
            Ok(info) => {
                tracing::debug!(server = %info.name, "notification server available");
                Permission::Granted
            }
            Err(err) => {
                tracing::debug!(%err, "no notification server");
                Permission::Unsupported
            }
        }
    }

    #[cfg(not(all(unix, not(target_os = "macos"))))]
    fn probe() -> Permission {
        Permission::Granted
    }
}

impl NotificationSink for DesktopSink {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) -> Permission {
        self.permission = Self::probe();
        tracing::info!(permission = ?self.permission, "notification permission requested");
        self.permission
    }

    fn display(&self, notification: &Notification) {
        let snooze_label = format!("Snooze {}min", SNOOZE_MINUTES);
        let mut builder = notify_rust::Notification::new();
        builder
            .appname(&self.appname)
            .summary(&notification.title)
            .body(&notification.body)
            .action(NotificationAction::MarkDone.id(), "Mark Done")
            .action(NotificationAction::Snooze.id(), &snooze_label);
        if notification.require_interaction {
            builder.timeout(notify_rust::Timeout::Never);
        }

        #[cfg(all(unix, not(target_os = "macos")))]
        {
            let tag = notification.tag.clone();
            // Held across show() so a finishing waiter cannot race the replacement.
            let mut on_screen = lock_on_screen(&self.on_screen);
            let replaces = on_screen.replaces(&tag);
            if let Some(id) = replaces {
                builder.id(id);
            }

            let handle = match builder.show() {
                Ok(handle) => handle,
                Err(err) => {
                    tracing::warn!(%tag, %err, "failed to show notification");
                    return;
                }
            };
            let id = handle.id();
            if replaces == Some(id) {
                // The waiter for this id is still listening.
                tracing::debug!(%tag, id, "replaced notification on screen");
                return;
            }
            on_screen.shown(&tag, id);
            drop(on_screen);

            let events = self.events.clone();
            let on_screen = Arc::clone(&self.on_screen);
            std::thread::spawn(move || {
                handle.wait_for_action(|action| {
                    if let Some(message) = worker::relay(action, &tag) {
                        if events.send(AppEvent::Worker(message)).is_err() {
                            tracing::debug!(%tag, "event loop gone, dropping action");
                        }
                    }
                });
                lock_on_screen(&on_screen).dismissed(&tag, id);
            });
        }

        #[cfg(not(all(unix, not(target_os = "macos"))))]
        {
            if let Err(err) = builder.show() {
                tracing::warn!(tag = %notification.tag, %err, "failed to show notification");
            }
            let _ = (&self.events, &self.on_screen);
        }
    }
}
