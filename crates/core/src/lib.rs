//! Condition checks for the Keep Alive tray application.
//!
//! Keep-alive is only allowed while three conditions hold at once:
//! - the local time is inside the configured work-hours window
//! - the machine runs on AC power
//! - a wired ethernet interface is up with a routable IPv4 address
//!
//! Platform access (clock, power source, network interfaces) goes through
//! the [`SystemProbe`] trait so the decision logic can run against fakes.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod network;
pub mod probe;
pub mod status;

#[cfg(target_os = "linux")]
#[path = "power_linux.rs"]
mod power;

#[cfg(target_os = "windows")]
#[path = "power_windows.rs"]
mod power;

#[cfg(not(any(target_os = "linux", target_os = "windows")))]
#[path = "power_other.rs"]
mod power;

pub use config::{Config, KeepAliveKey, WorkHours};
pub use error::ProbeError;
pub use evaluator::{Condition, ConditionEvaluator, ConditionSnapshot};
pub use network::NetInterface;
pub use probe::{BatteryReading, HostProbe, SystemProbe};
