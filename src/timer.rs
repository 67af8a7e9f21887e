//! Time sources for the scheduler.
//!
//! Timers never touch application state; they only post [`AppEvent`]s to the
//! single foreground queue, so tests can feed the same events by hand.

use crate::worker::WorkerMessage;
use chrono::{DateTime, Local};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Work queued for the foreground loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// One firing of the recurring timer started for `generation`.
    Tick { generation: u64 },
    /// A one-shot dispatch for a single reminder came due.
    Deferred { reminder_id: String },
    /// A message relayed from the background worker.
    Worker(WorkerMessage),
}

pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

pub trait TimerHandle {
    fn cancel(&mut self);
    fn is_active(&self) -> bool;
}

pub trait Timers {
    /// Start posting `Tick { generation }` every `period`.
    fn start_recurring(&mut self, period: Duration, generation: u64) -> Box<dyn TimerHandle>;
    /// Post `Deferred { reminder_id }` once after `delay`.
    fn defer(&mut self, delay: Duration, reminder_id: &str);
}

/// Thread-backed timers feeding an mpsc channel.
pub struct ThreadTimers {
    events: Sender<AppEvent>,
}

impl ThreadTimers {
    pub fn new(events: Sender<AppEvent>) -> Self {
        Self { events }
    }
}

struct ThreadTimerHandle {
    stopped: Arc<AtomicBool>,
}

impl TimerHandle for ThreadTimerHandle {
    fn cancel(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    fn is_active(&self) -> bool {
        !self.stopped.load(Ordering::SeqCst)
    }
}

// A dropped handle must not leave a timer thread behind.
impl Drop for ThreadTimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl Timers for ThreadTimers {
    fn start_recurring(&mut self, period: Duration, generation: u64) -> Box<dyn TimerHandle> {
        let stopped = Arc::new(AtomicBool::new(false));
        let flag = stopped.clone();
        let events = self.events.clone();

        thread::spawn(move || loop {
            thread::sleep(period);
            if flag.load(Ordering::SeqCst) {
                break;
            }
            if events.send(AppEvent::Tick { generation }).is_err() {
                break;
            }
        });

        tracing::debug!(generation, period_secs = period.as_secs(), "recurring timer started");
        Box::new(ThreadTimerHandle { stopped })
    }

    fn defer(&mut self, delay: Duration, reminder_id: &str) {
        let events = self.events.clone();
        let reminder_id = reminder_id.to_string();
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = events.send(AppEvent::Deferred { reminder_id });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_recurring_timer_posts_ticks() {
        let (tx, rx) = mpsc::channel();
        let mut timers = ThreadTimers::new(tx);
        let mut handle = timers.start_recurring(Duration::from_millis(10), 7);

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(event, AppEvent::Tick { generation: 7 });

        handle.cancel();
        assert!(!handle.is_active());
    }

    #[test]
    fn test_deferred_posts_once() {
        let (tx, rx) = mpsc::channel();
        let mut timers = ThreadTimers::new(tx);
        timers.defer(Duration::from_millis(5), "abc");

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(
            event,
            AppEvent::Deferred {
                reminder_id: "abc".into()
            }
        );
    }
}
