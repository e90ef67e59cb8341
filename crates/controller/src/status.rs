//! Controller state as seen by the presentation layer.

use keepalive_core::status;
use keepalive_core::{Condition, ConditionSnapshot, Config};

/// Controller run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Overall keep-alive status, mapped to the tray icon color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeepAliveStatus {
    /// Loop not running.
    Stopped,
    /// Loop running and every condition met.
    Active,
    /// Loop running but at least one condition unmet, in priority order.
    Paused(Vec<Condition>),
}

impl KeepAliveStatus {
    pub fn derive(state: RunState, snapshot: &ConditionSnapshot) -> Self {
        match state {
            RunState::Stopped => Self::Stopped,
            RunState::Running if snapshot.all_met() => Self::Active,
            RunState::Running => Self::Paused(snapshot.failed()),
        }
    }

    /// Short title, e.g. `Paused (On Battery, No Ethernet)`.
    pub fn title(&self) -> String {
        match self {
            Self::Stopped => "Stopped".into(),
            Self::Active => "Running (Active)".into(),
            Self::Paused(failed) => {
                let labels: Vec<&str> = failed.iter().map(Condition::failed_label).collect();
                format!("Paused ({})", labels.join(", "))
            }
        }
    }
}

/// Everything the presenter needs to render one refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub state: RunState,
    pub status: KeepAliveStatus,
    /// `"<app name> - <title>"`.
    pub tooltip: String,
    pub work_hours_line: String,
    pub power_line: String,
    pub ethernet_line: String,
}

impl StatusView {
    pub fn build(config: &Config, state: RunState, snapshot: &ConditionSnapshot) -> Self {
        let status = KeepAliveStatus::derive(state, snapshot);
        let tooltip = format!("{} - {}", config.app_name, status.title());

        Self {
            state,
            status,
            tooltip,
            work_hours_line: status::work_hours_status(config, snapshot.time),
            power_line: status::power_status(snapshot.ac_power, snapshot.battery.as_ref()),
            ethernet_line: status::ethernet_status(snapshot.wired_ethernet),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }
}

/// Renders controller state; implemented by the tray.
pub trait Presenter: Send + Sync {
    /// Redraws icon, tooltip and menu. Called from the loop task and from
    /// start/stop.
    fn refresh(&self, view: StatusView);

    /// Ends the tray event loop and with it the process.
    fn terminate(&self);
}
