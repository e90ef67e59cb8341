//! Keep-alive key synthesis.

use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use keepalive_core::KeepAliveKey;

use crate::error::KeyError;

/// Synthesizes a single key press (down + up).
pub trait KeySender: Send + Sync {
    fn press(&self, key: KeepAliveKey) -> Result<(), KeyError>;
}

/// [`KeySender`] backed by `enigo`.
///
/// macOS: Accessibility permission required.
/// Linux: an X11 session is required.
///
/// A fresh connection is opened per press; the loop only presses once per
/// update period.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnigoKeySender;

impl KeySender for EnigoKeySender {
    fn press(&self, key: KeepAliveKey) -> Result<(), KeyError> {
        let mut enigo =
            Enigo::new(&Settings::default()).map_err(|e| KeyError::Init(e.to_string()))?;
        enigo
            .key(enigo_key(key), Direction::Click)
            .map_err(|e| KeyError::Input(e.to_string()))
    }
}

/// macOS has no Scroll Lock key; F15 is the usual stand-in.
fn enigo_key(key: KeepAliveKey) -> Key {
    match key {
        #[cfg(not(target_os = "macos"))]
        KeepAliveKey::ScrollLock => Key::ScrollLock,
        #[cfg(target_os = "macos")]
        KeepAliveKey::ScrollLock => Key::F15,
        KeepAliveKey::F15 => Key::F15,
    }
}
