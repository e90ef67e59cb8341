//! Windows power source reader (`GetSystemPowerStatus`).

use windows_sys::Win32::System::Power::{GetSystemPowerStatus, SYSTEM_POWER_STATUS};

use crate::error::ProbeError;
use crate::probe::BatteryReading;

const AC_LINE_OFFLINE: u8 = 0;
const BATTERY_FLAG_NO_BATTERY: u8 = 128;
const BATTERY_PERCENT_UNKNOWN: u8 = 255;

/// Reads the battery state from the Win32 power API.
pub fn read_battery() -> Result<Option<BatteryReading>, ProbeError> {
    // SAFETY: SYSTEM_POWER_STATUS is plain data and the pointer is valid
    // for the duration of the call.
    let status = unsafe {
        let mut status: SYSTEM_POWER_STATUS = std::mem::zeroed();
        if GetSystemPowerStatus(&mut status) == 0 {
            return Err(ProbeError::Platform(
                std::io::Error::last_os_error().to_string(),
            ));
        }
        status
    };

    Ok(from_status(
        status.ACLineStatus,
        status.BatteryFlag,
        status.BatteryLifePercent,
    ))
}

/// An unknown AC line status (255) counts as plugged in.
fn from_status(ac_line: u8, battery_flag: u8, percent: u8) -> Option<BatteryReading> {
    if battery_flag == BATTERY_FLAG_NO_BATTERY {
        return None;
    }

    Some(BatteryReading {
        percent: (percent != BATTERY_PERCENT_UNKNOWN).then(|| percent.min(100)),
        plugged_in: ac_line != AC_LINE_OFFLINE,
    })
}
