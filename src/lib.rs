pub mod app;
pub mod config;
pub mod error;
pub mod notification;
pub mod quiet_hours;
pub mod reminder;
pub mod scheduler;
pub mod settings;
pub mod storage;
pub mod timer;
pub mod worker;

#[cfg(test)]
mod test_support;

use std::sync::mpsc;
use std::sync::Arc;

pub use app::{App, Toast, ToastKind};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use notification::{DesktopSink, Notification, NotificationSink, Permission, UnsupportedSink};
pub use reminder::{NewReminder, Priority, Reminder, ReminderFilter};
pub use settings::NotificationSettings;
pub use storage::{FileStore, KeyValueStore, MemoryStore, Storage};
pub use timer::{AppEvent, Clock, SystemClock, ThreadTimers};
pub use worker::WorkerMessage;

/// Run the notification loop against the persisted reminders.
///
/// Launch arguments:
/// - `--enable-notifications` asks for notification rights and turns the
///   recurring reminders on when granted
/// - `--quick-add <text>` adds a reminder before the loop starts
pub fn run() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "failed to resolve configuration");
            return;
        }
    };

    let backend = match FileStore::open(config.data_dir.clone()) {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(%err, "failed to initialize storage");
            return;
        }
    };
    tracing::info!(path = %backend.root().display(), "using data directory");

    let (events_tx, events_rx) = mpsc::channel();
    let sink = DesktopSink::new("DadApp", events_tx.clone());
    let timers = ThreadTimers::new(events_tx);
    let mut app = App::new(
        Arc::new(backend),
        Box::new(sink),
        Box::new(timers),
        Box::new(SystemClock),
    );

    // Handle launch arguments
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--enable-notifications") {
        report(app.request_notification_permission());
    }
    if let Some(pos) = args.iter().position(|a| a == "--quick-add") {
        match args.get(pos + 1) {
            Some(text) => {
                if let Some(toast) = app.quick_add(text) {
                    report(toast);
                }
            }
            None => tracing::warn!("--quick-add needs the reminder text"),
        }
    }

    let (total, active) = app.stats();
    tracing::info!(
        total,
        active,
        notifications = app.settings().enabled,
        "reminder loop started"
    );

    for event in events_rx {
        if let Some(toast) = app.handle_event(event) {
            report(toast);
        }
    }
}

fn report(toast: Toast) {
    match toast.kind {
        ToastKind::Error => tracing::warn!(text = %toast.message, "toast"),
        _ => tracing::info!(text = %toast.message, "toast"),
    }
}
