//! Platform query errors.

/// Errors returned by [`SystemProbe`](crate::SystemProbe) queries.
///
/// None of these reach the user: the evaluator maps every error to the
/// conservative default for the condition being checked.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("platform error: {0}")]
    Platform(String),
}
