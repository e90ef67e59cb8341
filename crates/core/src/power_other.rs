//! macOS and other platforms: parses `pmset -g batt`.
//!
//! ```text
//! Now drawing from 'Battery Power'
//!  -InternalBattery-0 (id=4653155)	76%; discharging; 5:12 remaining present: true
//! ```

use std::process::Command;

use crate::error::ProbeError;
use crate::probe::BatteryReading;

/// Reads the battery state via `pmset`.
pub fn read_battery() -> Result<Option<BatteryReading>, ProbeError> {
    let output = Command::new("pmset").args(["-g", "batt"]).output()?;
    if !output.status.success() {
        return Err(ProbeError::Platform(format!(
            "pmset exited with {}",
            output.status
        )));
    }
    Ok(parse_pmset(&String::from_utf8_lossy(&output.stdout)))
}

fn parse_pmset(output: &str) -> Option<BatteryReading> {
    let battery_line = output.lines().find(|l| l.contains("InternalBattery"))?;

    let percent = battery_line
        .split(|c: char| c.is_whitespace() || c == ';')
        .find_map(|token| token.strip_suffix('%'))
        .and_then(|p| p.parse::<u8>().ok())
        .map(|p| p.min(100));

    let plugged_in = !output.contains("'Battery Power'");

    Some(BatteryReading {
        percent,
        plugged_in,
    })
}
