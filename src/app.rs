use crate::notification::{NotificationSink, Permission};
use crate::reminder::{NewReminder, Reminder, ReminderFilter};
use crate::scheduler::Scheduler;
use crate::settings::NotificationSettings;
use crate::storage::{persist, KeyValueStore, Storage};
use crate::timer::{AppEvent, Clock, Timers};
use crate::worker::WorkerMessage;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// Short feedback message for the front end to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn success<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
        }
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
        }
    }

    pub fn info<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Info,
        }
    }
}

/// The application context: one reminder store, one settings object and
/// one scheduler, driven from a single thread.
pub struct App {
    storage: Storage,
    settings: NotificationSettings,
    scheduler: Scheduler,
    clock: Box<dyn Clock>,
    backend: Arc<dyn KeyValueStore>,
    filter: ReminderFilter,
}

impl App {
    /// Load persisted state and arm the notification timer.
    pub fn new(
        backend: Arc<dyn KeyValueStore>,
        sink: Box<dyn NotificationSink>,
        timers: Box<dyn Timers>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let storage = Storage::open(backend.clone());
        let settings = persist::load_settings(backend.as_ref());
        let mut scheduler = Scheduler::new(timers, sink);
        scheduler.reschedule(&settings);

        Self {
            storage,
            settings,
            scheduler,
            clock,
            backend,
            filter: ReminderFilter::All,
        }
    }

    // ============ Views ============

    /// Reminders under the current filter, newest first.
    pub fn reminders(&self) -> impl Iterator<Item = &Reminder> + '_ {
        self.storage.list(self.filter)
    }

    pub fn filter(&self) -> ReminderFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: ReminderFilter) {
        self.filter = filter;
    }

    /// `(total, active)` counts.
    pub fn stats(&self) -> (usize, usize) {
        self.storage.stats()
    }

    pub fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    // ============ Reminder actions ============

    pub fn quick_add(&mut self, text: &str) -> Option<Toast> {
        self.add_reminder(NewReminder::quick(text))
    }

    /// Blank text is skipped silently.
    pub fn add_reminder(&mut self, draft: NewReminder) -> Option<Toast> {
        let reminder = match self.storage.add(draft) {
            Ok(reminder) => reminder,
            Err(err) => {
                tracing::debug!(%err, "add skipped");
                return None;
            }
        };
        self.scheduler.on_reminder_added(&reminder, &self.settings);
        Some(Toast::success("Reminder added!"))
    }

    pub fn toggle_reminder(&mut self, id: &str) -> Option<Toast> {
        match self.storage.toggle(id) {
            Some(true) => {
                self.scheduler.cancel(id);
                Some(Toast::success("Reminder completed!"))
            }
            _ => None,
        }
    }

    pub fn delete_reminder(&mut self, id: &str) -> Option<Toast> {
        let removed = self.storage.delete(id);
        self.scheduler.cancel(id);
        removed.then(|| Toast::info("Reminder deleted!"))
    }

    // ============ Notification settings ============

    /// Explicit user request to turn notifications on.
    pub fn request_notification_permission(&mut self) -> Toast {
        match self.scheduler.request_permission() {
            Permission::Granted => {
                self.settings.enabled = true;
                self.apply_settings();
                Toast::success("Notifications enabled!")
            }
            Permission::Unsupported => {
                Toast::error("Notifications are not supported on this system.")
            }
            Permission::Denied | Permission::Prompt => {
                Toast::error("Notifications blocked. Please enable them in your system settings.")
            }
        }
    }

    /// Change the polling interval and quiet window, then reschedule.
    pub fn update_notification_settings(
        &mut self,
        interval: impl Into<String>,
        quiet_start: impl Into<String>,
        quiet_end: impl Into<String>,
    ) {
        self.settings.interval = interval.into();
        self.settings.quiet_start = quiet_start.into();
        self.settings.quiet_end = quiet_end.into();
        self.apply_settings();
    }

    fn apply_settings(&mut self) {
        if let Err(err) = persist::save_settings(self.backend.as_ref(), &self.settings) {
            tracing::warn!(%err, "failed to persist notification settings");
        }
        self.scheduler.reschedule(&self.settings);
    }

    // ============ Queued events ============

    pub fn handle_event(&mut self, event: AppEvent) -> Option<Toast> {
        match event {
            AppEvent::Tick { generation } => {
                let now = self.clock.now();
                self.scheduler
                    .on_tick(generation, now, &self.settings, &self.storage);
                None
            }
            AppEvent::Deferred { reminder_id } => {
                let now = self.clock.now();
                self.scheduler.on_deferred(&reminder_id, now, &self.storage);
                None
            }
            AppEvent::Worker(message) => self.handle_worker_message(message),
        }
    }

    pub fn handle_worker_message(&mut self, message: WorkerMessage) -> Option<Toast> {
        tracing::debug!(?message, "worker message");
        match message {
            WorkerMessage::MarkReminderDone { reminder_id } => self.toggle_reminder(&reminder_id),
            WorkerMessage::SnoozeReminder {
                reminder_id,
                snooze_minutes,
            } => {
                let now = self.clock.now();
                self.scheduler
                    .snooze(&reminder_id, snooze_minutes, now, &self.storage);
                Some(Toast::info(format!(
                    "Reminder snoozed for {} minutes",
                    snooze_minutes
                )))
            }
        }
    }
}
