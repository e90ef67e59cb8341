//! Platform access seam used by the condition evaluator.

use chrono::NaiveTime;

use crate::error::ProbeError;
use crate::network::{self, NetInterface};
use crate::power;

/// State of the system battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryReading {
    /// Charge level (0-100), if the platform reports one.
    pub percent: Option<u8>,
    /// Whether an external power source is connected.
    pub plugged_in: bool,
}

/// Read-only view of the host the evaluator needs.
///
/// Implementations must be cheap to call: every loop tick queries each
/// method once.
pub trait SystemProbe: Send + Sync {
    /// Current wall-clock time in the system's local timezone.
    fn local_time(&self) -> NaiveTime;

    /// Battery state, `Ok(None)` when the machine has no battery.
    fn battery(&self) -> Result<Option<BatteryReading>, ProbeError>;

    /// All network interfaces with their up-state and addresses.
    fn interfaces(&self) -> Result<Vec<NetInterface>, ProbeError>;
}

/// [`SystemProbe`] backed by the real operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostProbe;

impl SystemProbe for HostProbe {
    fn local_time(&self) -> NaiveTime {
        chrono::Local::now().time()
    }

    fn battery(&self) -> Result<Option<BatteryReading>, ProbeError> {
        power::read_battery()
    }

    fn interfaces(&self) -> Result<Vec<NetInterface>, ProbeError> {
        network::list_interfaces()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_probe_time_is_valid() {
        let time = HostProbe.local_time();
        assert!(chrono::Timelike::hour(&time) < 24);
    }

    #[test]
    fn host_probe_battery_does_not_panic() {
        // Containers may lack power_supply entirely; only the call matters.
        let _ = HostProbe.battery();
    }

    #[test]
    fn host_probe_lists_interfaces() {
        if let Ok(ifaces) = HostProbe.interfaces() {
            for iface in &ifaces {
                assert!(!iface.name.is_empty());
                assert!(!iface.addrs.is_empty());
            }
        }
    }
}
