use crate::config::{DEFAULT_INTERVAL_MINUTES, DEFAULT_QUIET_END, DEFAULT_QUIET_START};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Process-wide notification preferences.
///
/// The stored shape keeps the interval as a string of minutes and the quiet
/// window as `HH:MM` strings; only the hour part of each bound is consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub enabled: bool,
    pub interval: String,
    pub quiet_start: String,
    pub quiet_end: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            interval: DEFAULT_INTERVAL_MINUTES.to_string(),
            quiet_start: DEFAULT_QUIET_START.to_string(),
            quiet_end: DEFAULT_QUIET_END.to_string(),
        }
    }
}

impl NotificationSettings {
    /// Polling period in whole minutes. Falls back to the default when the
    /// stored value is not a positive integer.
    pub fn interval_minutes(&self) -> u64 {
        match leading_number(&self.interval) {
            Some(minutes) if minutes > 0 => minutes,
            _ => {
                tracing::warn!(
                    interval = %self.interval,
                    fallback = DEFAULT_INTERVAL_MINUTES,
                    "unusable notification interval"
                );
                DEFAULT_INTERVAL_MINUTES
            }
        }
    }

    pub fn interval_duration(&self) -> Duration {
        Duration::from_secs(self.interval_minutes().saturating_mul(60))
    }

    /// Hour parts of the quiet window, or `None` when either bound is
    /// unreadable (no quiet gating applies then).
    pub fn quiet_hours(&self) -> Option<(u32, u32)> {
        let start = hour_of(&self.quiet_start)?;
        let end = hour_of(&self.quiet_end)?;
        Some((start, end))
    }
}

fn hour_of(time: &str) -> Option<u32> {
    let hour = time.split(':').next()?;
    leading_number(hour).and_then(|h| u32::try_from(h).ok())
}

// Reads leading ASCII digits the way a form field's integer parse does:
// "15" and "15min" are 15, "abc" is nothing.
fn leading_number(value: &str) -> Option<u64> {
    let trimmed = value.trim();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = NotificationSettings::default();
        assert!(!settings.enabled);
        assert_eq!(settings.interval, "15");
        assert_eq!(settings.quiet_start, "22:00");
        assert_eq!(settings.quiet_end, "07:00");
    }

    #[test]
    fn test_interval_parsing() {
        let mut settings = NotificationSettings::default();
        assert_eq!(settings.interval_minutes(), 15);
        assert_eq!(settings.interval_duration(), Duration::from_secs(900));

        settings.interval = "60".to_string();
        assert_eq!(settings.interval_minutes(), 60);

        settings.interval = "30min".to_string();
        assert_eq!(settings.interval_minutes(), 30);
    }

    #[test]
    fn test_bad_interval_falls_back() {
        let mut settings = NotificationSettings::default();
        settings.interval = "soon".to_string();
        assert_eq!(settings.interval_minutes(), DEFAULT_INTERVAL_MINUTES);

        settings.interval = "0".to_string();
        assert_eq!(settings.interval_minutes(), DEFAULT_INTERVAL_MINUTES);
    }

    #[test]
    fn test_quiet_hours_use_hour_part_only() {
        let mut settings = NotificationSettings::default();
        assert_eq!(settings.quiet_hours(), Some((22, 7)));

        settings.quiet_start = "09:45".to_string();
        settings.quiet_end = "17:59".to_string();
        assert_eq!(settings.quiet_hours(), Some((9, 17)));
    }

    #[test]
    fn test_unreadable_quiet_bound_disables_gate() {
        let mut settings = NotificationSettings::default();
        settings.quiet_end = "".to_string();
        assert_eq!(settings.quiet_hours(), None);
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(NotificationSettings::default()).unwrap();
        assert_eq!(json["enabled"], false);
        assert_eq!(json["interval"], "15");
        assert_eq!(json["quietStart"], "22:00");
        assert_eq!(json["quietEnd"], "07:00");
    }

    #[test]
    fn test_partial_object_takes_defaults() {
        let settings: NotificationSettings =
            serde_json::from_str(r#"{"enabled":true,"interval":"30"}"#).unwrap();
        assert!(settings.enabled);
        assert_eq!(settings.interval, "30");
        assert_eq!(settings.quiet_start, "22:00");
    }
}
