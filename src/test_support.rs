//! In-crate fakes for the injectable collaborators.

use crate::notification::{Notification, NotificationSink, Permission};
use crate::timer::{Clock, TimerHandle, Timers};
use chrono::{DateTime, Local, TimeZone};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub fn at_hour(hour: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 1, 15, hour, 0, 0)
        .earliest()
        .expect("valid local time")
}

#[derive(Default)]
struct TimerState {
    recurring: Vec<(Duration, u64, Rc<Cell<bool>>)>,
    deferred: Vec<(Duration, String)>,
}

#[derive(Clone, Default)]
pub struct FakeTimers {
    state: Rc<RefCell<TimerState>>,
}

impl FakeTimers {
    pub fn started(&self) -> usize {
        self.state.borrow().recurring.len()
    }

    pub fn live_recurring(&self) -> usize {
        self.state
            .borrow()
            .recurring
            .iter()
            .filter(|(_, _, live)| live.get())
            .count()
    }

    pub fn last_period(&self) -> Option<Duration> {
        self.state.borrow().recurring.last().map(|(period, _, _)| *period)
    }

    pub fn deferred(&self) -> Vec<(Duration, String)> {
        self.state.borrow().deferred.clone()
    }
}

struct FakeHandle {
    live: Rc<Cell<bool>>,
}

impl TimerHandle for FakeHandle {
    fn cancel(&mut self) {
        self.live.set(false);
    }

    fn is_active(&self) -> bool {
        self.live.get()
    }
}

impl Timers for FakeTimers {
    fn start_recurring(&mut self, period: Duration, generation: u64) -> Box<dyn TimerHandle> {
        let live = Rc::new(Cell::new(true));
        self.state
            .borrow_mut()
            .recurring
            .push((period, generation, live.clone()));
        Box::new(FakeHandle { live })
    }

    fn defer(&mut self, delay: Duration, reminder_id: &str) {
        self.state
            .borrow_mut()
            .deferred
            .push((delay, reminder_id.to_string()));
    }
}

struct SinkState {
    permission: Permission,
    on_request: Permission,
    requests: usize,
    shown: Vec<Notification>,
}

#[derive(Clone)]
pub struct RecordingSink {
    state: Rc<RefCell<SinkState>>,
}

impl RecordingSink {
    pub fn new(permission: Permission) -> Self {
        Self {
            state: Rc::new(RefCell::new(SinkState {
                permission,
                on_request: permission,
                requests: 0,
                shown: Vec::new(),
            })),
        }
    }

    /// Starts undecided and answers a request with `outcome`.
    pub fn answering(outcome: Permission) -> Self {
        let sink = Self::new(Permission::Prompt);
        sink.state.borrow_mut().on_request = outcome;
        sink
    }

    pub fn shown(&self) -> Vec<Notification> {
        self.state.borrow().shown.clone()
    }

    pub fn requests(&self) -> usize {
        self.state.borrow().requests
    }
}

impl NotificationSink for RecordingSink {
    fn permission(&self) -> Permission {
        self.state.borrow().permission
    }

    fn request_permission(&mut self) -> Permission {
        let mut state = self.state.borrow_mut();
        state.requests += 1;
        let outcome = state.on_request;
        state.permission = outcome;
        outcome
    }

    fn display(&self, notification: &Notification) {
        let mut state = self.state.borrow_mut();
        if state.permission == Permission::Granted {
            state.shown.push(notification.clone());
        }
    }
}

#[derive(Clone)]
pub struct FixedClock {
    now: Rc<Cell<DateTime<Local>>>,
}

impl FixedClock {
    pub fn at_hour(hour: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(at_hour(hour))),
        }
    }

    pub fn set_hour(&self, hour: u32) {
        self.now.set(at_hour(hour));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.now.get()
    }
}
