//! Linux power source reader (`/sys/class/power_supply`).
//!
//! Each supply directory carries a `type` file. `Battery` entries expose
//! `capacity` and `status`; `Mains` and `USB` entries expose `online`.

use std::path::Path;

use crate::error::ProbeError;
use crate::probe::BatteryReading;

const POWER_SUPPLY_ROOT: &str = "/sys/class/power_supply";

/// Reads the battery state from sysfs.
pub fn read_battery() -> Result<Option<BatteryReading>, ProbeError> {
    read_battery_from(Path::new(POWER_SUPPLY_ROOT))
}

/// Reads the battery state from a `power_supply`-style directory.
pub(crate) fn read_battery_from(root: &Path) -> Result<Option<BatteryReading>, ProbeError> {
    let mut battery: Option<(Option<u8>, String)> = None;
    let mut mains_seen = false;
    let mut mains_online = false;

    let mut entries: Vec<_> = std::fs::read_dir(root)?.flatten().map(|e| e.path()).collect();
    entries.sort();

    for dir in entries {
        let kind = read_trimmed(&dir.join("type")).unwrap_or_default();
        match kind.as_str() {
            "Battery" => {
                // Peripheral batteries (mice, headsets) report scope "Device".
                if read_trimmed(&dir.join("scope")).as_deref() == Some("Device") {
                    continue;
                }
                if battery.is_none() {
                    let percent = read_trimmed(&dir.join("capacity"))
                        .and_then(|s| s.parse::<u8>().ok())
                        .map(|p| p.min(100));
                    let status =
                        read_trimmed(&dir.join("status")).unwrap_or_else(|| "Unknown".into());
                    battery = Some((percent, status));
                }
            }
            "Mains" => {
                if let Some(online) = read_trimmed(&dir.join("online")) {
                    mains_seen = true;
                    mains_online |= online == "1";
                }
            }
            // Idle USB-C ports report offline; only a live one is a source.
            "USB" => {
                if read_trimmed(&dir.join("online")).as_deref() == Some("1") {
                    mains_seen = true;
                    mains_online = true;
                }
            }
            _ => {}
        }
    }

    let Some((percent, status)) = battery else {
        return Ok(None);
    };

    let plugged_in = if mains_seen {
        mains_online
    } else {
        status != "Discharging"
    };

    Ok(Some(BatteryReading {
        percent,
        plugged_in,
    }))
}

/// Reads a file and trims whitespace.
fn read_trimmed(path: &Path) -> Option<String> {
    std::fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
}
