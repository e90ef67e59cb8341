//! Compiled-in configuration.
//!
//! Keep Alive has no configuration file; every value here is a constant
//! collected into an immutable [`Config`] that is built once at startup and
//! shared with the evaluator and the controller.

use std::fmt;
use std::time::Duration;

/// Seconds between two loop ticks.
pub const UPDATE_PERIOD: Duration = Duration::from_secs(30);

/// Upper bound on waiting for the loop to finish after a stop.
pub const STOP_TIMEOUT: Duration = Duration::from_secs(1);

/// First local hour inside the work-hours window.
pub const WORK_HOURS_START: u32 = 8;

/// First local hour after the work-hours window.
pub const WORK_HOURS_END: u32 = 17;

/// Name shown in the tray tooltip, menu header and console title.
pub const APP_NAME: &str = "Keep Alive";

/// Tray icon edge length in pixels.
pub const ICON_SIZE: u32 = 64;

/// Interface name fragments that are never considered wired.
pub const SKIP_INTERFACES: &[&str] = &[
    "lo",
    "wifi",
    "wlan",
    "wireless",
    "bluetooth",
    "local area connection",
];

/// Interface name fragments that identify an ethernet adapter.
pub const ETHERNET_PATTERNS: &[&str] = &["ethernet", "eth", "en"];

/// Key pressed to reset the idle timer.
///
/// Scroll Lock is the least intrusive choice on most desktops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepAliveKey {
    ScrollLock,
    F15,
}

impl fmt::Display for KeepAliveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScrollLock => f.write_str("Scroll Lock"),
            Self::F15 => f.write_str("F15"),
        }
    }
}

/// Local-time window `[start, end)` in whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkHours {
    pub start: u32,
    pub end: u32,
}

impl WorkHours {
    /// Returns `true` if `hour` lies inside the window.
    ///
    /// The start hour is inclusive and the end hour exclusive.
    pub fn contains(&self, hour: u32) -> bool {
        self.start <= hour && hour < self.end
    }
}

impl fmt::Display for WorkHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:00-{}:00", self.start, self.end)
    }
}

/// Keep Alive configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Display name of the application.
    pub app_name: String,

    /// Delay between two loop ticks.
    pub update_period: Duration,

    /// Bounded wait for loop termination on stop.
    pub stop_timeout: Duration,

    /// Window during which keep-alive may activate.
    pub work_hours: WorkHours,

    /// Key used as the keep-alive signal.
    pub key: KeepAliveKey,

    /// Lowercase fragments; a matching interface name is skipped.
    pub skip_patterns: Vec<String>,

    /// Lowercase fragments; a matching interface name counts as ethernet.
    pub ethernet_patterns: Vec<String>,

    /// Tray icon edge length in pixels.
    pub icon_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.into(),
            update_period: UPDATE_PERIOD,
            stop_timeout: STOP_TIMEOUT,
            work_hours: WorkHours {
                start: WORK_HOURS_START,
                end: WORK_HOURS_END,
            },
            key: KeepAliveKey::ScrollLock,
            skip_patterns: SKIP_INTERFACES.iter().map(|s| s.to_string()).collect(),
            ethernet_patterns: ETHERNET_PATTERNS.iter().map(|s| s.to_string()).collect(),
            icon_size: ICON_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.app_name, "Keep Alive");
        assert_eq!(config.update_period, Duration::from_secs(30));
        assert_eq!(config.work_hours, WorkHours { start: 8, end: 17 });
        assert_eq!(config.key, KeepAliveKey::ScrollLock);
        assert_eq!(config.skip_patterns.len(), 6);
        assert_eq!(config.ethernet_patterns, vec!["ethernet", "eth", "en"]);
    }

    #[test]
    fn work_hours_boundaries() {
        let hours = WorkHours { start: 8, end: 17 };
        for h in 0..24 {
            assert_eq!(hours.contains(h), (8..17).contains(&h), "hour {h}");
        }
        assert!(hours.contains(8));
        assert!(!hours.contains(17));
    }

    #[test]
    fn work_hours_display() {
        assert_eq!(WorkHours { start: 8, end: 17 }.to_string(), "8:00-17:00");
    }

    #[test]
    fn key_display() {
        assert_eq!(KeepAliveKey::ScrollLock.to_string(), "Scroll Lock");
        assert_eq!(KeepAliveKey::F15.to_string(), "F15");
    }
}
