use crate::config::ADDED_CONFIRMATION_DELAY;
use crate::notification::{Notification, NotificationSink, Permission};
use crate::quiet_hours::is_quiet;
use crate::reminder::Reminder;
use crate::settings::NotificationSettings;
use crate::storage::Storage;
use crate::timer::{TimerHandle, Timers};
use chrono::{DateTime, Duration as ChronoDuration, Local, Timelike};
use std::collections::HashMap;
use std::time::Duration;

/// Decides when reminders are surfaced.
///
/// Owns the single recurring timer. Every reschedule bumps `generation`, and
/// ticks carrying an older generation are dropped. A reminder that was
/// deleted or completed is never dispatched: liveness is checked right
/// before each individual dispatch.
pub struct Scheduler {
    timers: Box<dyn Timers>,
    sink: Box<dyn NotificationSink>,
    recurring: Option<Box<dyn TimerHandle>>,
    generation: u64,
    snoozed: HashMap<String, DateTime<Local>>,
}

impl Scheduler {
    pub fn new(timers: Box<dyn Timers>, sink: Box<dyn NotificationSink>) -> Self {
        Self {
            timers,
            sink,
            recurring: None,
            generation: 0,
            snoozed: HashMap::new(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.recurring.as_ref().map(|t| t.is_active()).unwrap_or(false)
    }

    pub fn permission(&self) -> Permission {
        self.sink.permission()
    }

    /// Ask the platform for notification rights. Only called on an explicit
    /// user action.
    pub fn request_permission(&mut self) -> Permission {
        self.sink.request_permission()
    }

    /// Replace the recurring timer to match `settings`.
    pub fn reschedule(&mut self, settings: &NotificationSettings) {
        if let Some(mut timer) = self.recurring.take() {
            timer.cancel();
        }
        self.generation += 1;

        if !settings.enabled {
            tracing::debug!("notifications disabled, scheduler idle");
            return;
        }
        if self.sink.permission() == Permission::Unsupported {
            tracing::debug!("notifications unsupported, scheduler idle");
            return;
        }

        let period = settings.interval_duration();
        self.recurring = Some(self.timers.start_recurring(period, self.generation));
        tracing::info!(
            generation = self.generation,
            interval_minutes = settings.interval_minutes(),
            "notification timer scheduled"
        );
    }

    /// Handle one recurring tick. Returns the number of notifications shown.
    pub fn on_tick(
        &mut self,
        generation: u64,
        now: DateTime<Local>,
        settings: &NotificationSettings,
        store: &Storage,
    ) -> usize {
        if generation != self.generation || !self.is_running() {
            tracing::debug!(generation, current = self.generation, "stale tick ignored");
            return 0;
        }
        if !settings.enabled || self.sink.permission() != Permission::Granted {
            return 0;
        }

        let hour = now.hour();
        if let Some((start, end)) = settings.quiet_hours() {
            if is_quiet(hour, start, end) {
                tracing::debug!(hour, start, end, "quiet hours, skipping tick");
                return 0;
            }
        }

        self.snoozed.retain(|_, until| *until > now);

        let mut dispatched = 0;
        for reminder in store.notifiable() {
            if self.snoozed.contains_key(&reminder.id) {
                continue;
            }
            if self.dispatch(reminder, store) {
                dispatched += 1;
            }
        }
        tracing::debug!(hour, dispatched, "tick processed");
        dispatched
    }

    /// Queue the "just added" confirmation ping. Returns whether one was queued.
    pub fn on_reminder_added(&mut self, reminder: &Reminder, settings: &NotificationSettings) -> bool {
        if !(reminder.notifications_enabled && settings.enabled) {
            return false;
        }
        self.timers.defer(ADDED_CONFIRMATION_DELAY, &reminder.id);
        true
    }

    /// Handle a one-shot dispatch coming due.
    pub fn on_deferred(&mut self, reminder_id: &str, now: DateTime<Local>, store: &Storage) -> bool {
        if let Some(until) = self.snoozed.get(reminder_id) {
            if *until > now {
                return false;
            }
            self.snoozed.remove(reminder_id);
        }
        match store.get(reminder_id) {
            Some(reminder) => self.dispatch(reminder, store),
            None => false,
        }
    }

    /// Hold `reminder_id` back from ticks for `minutes`, then ping it once.
    pub fn snooze(&mut self, reminder_id: &str, minutes: u32, now: DateTime<Local>, store: &Storage) -> bool {
        if !store.is_live(reminder_id) {
            return false;
        }
        let until = now + ChronoDuration::minutes(i64::from(minutes));
        self.snoozed.insert(reminder_id.to_string(), until);
        self.timers
            .defer(Duration::from_secs(u64::from(minutes) * 60), reminder_id);
        tracing::info!(reminder_id, minutes, "reminder snoozed");
        true
    }

    /// Drop everything pending for `reminder_id`.
    pub fn cancel(&mut self, reminder_id: &str) {
        self.snoozed.remove(reminder_id);
    }

    pub fn is_snoozed(&self, reminder_id: &str) -> bool {
        self.snoozed.contains_key(reminder_id)
    }

    fn dispatch(&self, reminder: &Reminder, store: &Storage) -> bool {
        if !store.is_live(&reminder.id) {
            tracing::debug!(id = %reminder.id, "reminder gone, dispatch skipped");
            return false;
        }
        if self.sink.permission() != Permission::Granted {
            return false;
        }
        self.sink.display(&Notification::for_reminder(reminder));
        true
    }
}
