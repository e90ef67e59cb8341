//! Condition evaluation.
//!
//! Power queries fail open (assume AC) so a flaky battery driver never
//! interrupts a desktop session. Network queries fail closed (assume no
//! wired link) so keep-alive never runs without a known wired connection.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveTime, Timelike};

use crate::config::Config;
use crate::network;
use crate::probe::{BatteryReading, SystemProbe};

/// One of the three keep-alive preconditions.
///
/// Variants are declared in reporting priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Condition {
    WorkHours,
    AcPower,
    WiredEthernet,
}

impl Condition {
    /// Label used in the tray tooltip when the condition is unmet.
    pub fn failed_label(&self) -> &'static str {
        match self {
            Self::WorkHours => "Outside Work Hours",
            Self::AcPower => "On Battery",
            Self::WiredEthernet => "No Ethernet",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.failed_label())
    }
}

/// Result of evaluating every condition once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionSnapshot {
    /// Local time the snapshot was taken at.
    pub time: NaiveTime,
    /// Battery reading, `None` without a battery or when the query failed.
    pub battery: Option<BatteryReading>,
    pub work_hours: bool,
    pub ac_power: bool,
    pub wired_ethernet: bool,
}

impl ConditionSnapshot {
    /// Returns `true` if keep-alive may fire.
    pub fn all_met(&self) -> bool {
        self.work_hours && self.ac_power && self.wired_ethernet
    }

    /// Unmet conditions in priority order.
    pub fn failed(&self) -> Vec<Condition> {
        let mut failed = Vec::new();
        if !self.work_hours {
            failed.push(Condition::WorkHours);
        }
        if !self.ac_power {
            failed.push(Condition::AcPower);
        }
        if !self.wired_ethernet {
            failed.push(Condition::WiredEthernet);
        }
        failed
    }

    /// Highest-priority unmet condition.
    pub fn first_failed(&self) -> Option<Condition> {
        self.failed().into_iter().next()
    }
}

/// Answers the three keep-alive questions against a [`SystemProbe`].
#[derive(Clone)]
pub struct ConditionEvaluator {
    config: Arc<Config>,
    probe: Arc<dyn SystemProbe>,
}

impl ConditionEvaluator {
    pub fn new(config: Arc<Config>, probe: Arc<dyn SystemProbe>) -> Self {
        Self { config, probe }
    }

    /// Returns `true` if the current local hour is inside work hours.
    pub fn is_work_hours(&self) -> bool {
        self.config.work_hours.contains(self.probe.local_time().hour())
    }

    /// Returns `true` if the machine runs on AC power.
    ///
    /// No battery, or a failed query, counts as AC.
    pub fn is_on_ac_power(&self) -> bool {
        ac_power_from(self.read_battery())
    }

    /// Returns `true` if a wired ethernet interface has a valid connection.
    pub fn has_wired_ethernet(&self) -> bool {
        match self.probe.interfaces() {
            Ok(interfaces) => match network::find_wired(&self.config, &interfaces) {
                Some(iface) => {
                    tracing::debug!(interface = %iface.name, "wired ethernet found");
                    true
                }
                None => false,
            },
            Err(e) => {
                tracing::warn!("error checking ethernet connection: {e}");
                false
            }
        }
    }

    /// Evaluates every condition once, querying the battery a single time.
    pub fn snapshot(&self) -> ConditionSnapshot {
        let time = self.probe.local_time();
        let battery = self.read_battery();

        ConditionSnapshot {
            time,
            battery: battery.flatten(),
            work_hours: self.config.work_hours.contains(time.hour()),
            ac_power: ac_power_from(battery),
            wired_ethernet: self.has_wired_ethernet(),
        }
    }

    /// `None` when the query failed, `Some(None)` without a battery.
    fn read_battery(&self) -> Option<Option<BatteryReading>> {
        match self.probe.battery() {
            Ok(reading) => Some(reading),
            Err(e) => {
                tracing::debug!("battery query failed, assuming AC power: {e}");
                None
            }
        }
    }
}

fn ac_power_from(battery: Option<Option<BatteryReading>>) -> bool {
    match battery {
        Some(Some(reading)) => reading.plugged_in,
        Some(None) | None => true,
    }
}
