//! Tray configuration, events, and update types.
//!
//! The actual system tray implementation depends on `tray-icon` and `tao`,
//! which require platform-specific system libraries. This module defines
//! the messages exchanged between the tray event loop and the controller,
//! independent of the GUI backend.

use crate::icon::IconColor;
use crate::menu::{MenuAction, MenuState};

/// Configuration for the system tray.
#[derive(Debug, Clone)]
pub struct TrayConfig {
    /// Application name shown in the menu header and tooltip.
    pub app_name: String,
    /// Icon edge length in pixels.
    pub icon_size: u32,
}

/// Events emitted by the tray to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayEvent {
    /// User clicked "Start".
    StartRequested,
    /// User clicked "Stop".
    StopRequested,
    /// User clicked "Quit".
    QuitRequested,
}

impl From<MenuAction> for TrayEvent {
    fn from(action: MenuAction) -> Self {
        match action {
            MenuAction::Start => Self::StartRequested,
            MenuAction::Stop => Self::StopRequested,
            MenuAction::Quit => Self::QuitRequested,
        }
    }
}

/// Everything needed to redraw the tray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayView {
    pub color: IconColor,
    pub tooltip: String,
    pub menu: MenuState,
}

impl TrayView {
    /// View shown before the first refresh arrives.
    pub fn initial(config: &TrayConfig) -> Self {
        Self {
            color: IconColor::Stopped,
            tooltip: format!("{} - Stopped", config.app_name),
            menu: MenuState {
                app_name: config.app_name.clone(),
                running: false,
                status_lines: Vec::new(),
            },
        }
    }
}

/// Updates sent from the controller to the tray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayUpdate {
    /// Redraw icon, tooltip and menu.
    Refresh(TrayView),
    /// Request tray shutdown.
    Shutdown,
}
