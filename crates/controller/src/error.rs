//! Key synthesis errors.

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("input backend unavailable: {0}")]
    Init(String),

    #[error("key event failed: {0}")]
    Input(String),
}
