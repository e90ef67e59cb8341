//! Keep-alive controller.
//!
//! Owns the run/stop state and the periodic loop that presses the
//! keep-alive key while every condition holds. Presentation and key
//! synthesis are injected through the [`Presenter`] and [`KeySender`]
//! traits:
//! - [`EnigoKeySender`] synthesizes real key events
//! - the tray application implements [`Presenter`] on top of its event loop

mod controller;
mod error;
mod keys;
mod status;

pub use controller::KeepAliveController;
pub use error::KeyError;
pub use keys::{EnigoKeySender, KeySender};
pub use status::{KeepAliveStatus, Presenter, RunState, StatusView};
