//! System tray model for Keep Alive.
//!
//! Backend-independent pieces of the tray:
//! - [`MenuState`] builds the context menu items from the current status
//! - [`render_icon`] rasterizes the status-colored circle icon
//! - [`TrayEvent`] / [`TrayUpdate`] are the messages exchanged between the
//!   tray event loop and the controller
//!
//! The toolkit binding (`tray-icon` + `tao`) lives in the application,
//! since it must run on the main thread.

mod icon;
mod menu;
mod tray;

pub use icon::{IconColor, render_icon};
pub use menu::{MenuAction, MenuItem, MenuState};
pub use tray::{TrayConfig, TrayEvent, TrayUpdate, TrayView};
