//! Human-readable status strings for the tray menu and the log.

use chrono::{NaiveTime, Timelike};

use crate::config::{Config, KeepAliveKey};
use crate::evaluator::Condition;
use crate::probe::BatteryReading;

/// Work-hours menu line.
pub fn work_hours_status(config: &Config, time: NaiveTime) -> String {
    let hours = config.work_hours;
    let hour = time.hour();

    if hours.contains(hour) {
        return format!("In work hours ({:02}:00 - {:02}:00)", hours.start, hours.end);
    }

    if hour < hours.start {
        format!("Outside work hours. Work hours start at {}:00", hours.start)
    } else {
        format!(
            "Outside work hours. Work hours resume tomorrow at {}:00",
            hours.start
        )
    }
}

/// Power menu line.
pub fn power_status(on_ac: bool, battery: Option<&BatteryReading>) -> String {
    if on_ac {
        return "Connected to AC power".into();
    }

    match battery.and_then(|b| b.percent) {
        Some(percent) => format!("On battery power ({percent}%)"),
        None => "On battery power".into(),
    }
}

/// Ethernet menu line.
pub fn ethernet_status(connected: bool) -> String {
    if connected {
        "Wired ethernet connected".into()
    } else {
        "No wired ethernet connection".into()
    }
}

/// Log line for a keep-alive press.
pub fn press_line(key: KeepAliveKey, time: NaiveTime) -> String {
    format!("Keep-alive: {key} key pressed at {}", time.format("%H:%M:%S"))
}

/// Log line for a skipped tick, naming the unmet condition.
pub fn skip_line(condition: Condition, config: &Config, time: NaiveTime) -> String {
    let reason = match condition {
        Condition::WorkHours => format!("Outside work hours ({})", config.work_hours),
        Condition::AcPower => "Running on battery power".into(),
        Condition::WiredEthernet => "No wired ethernet connection".into(),
    };
    format!("Keep-alive: {reason}, skipping at {}", time.format("%H:%M:%S"))
}
