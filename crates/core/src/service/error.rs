//! Error types for the conversion service boundary.

use thiserror::Error;

/// The conversion service call failed.
///
/// Carries a human-readable message; the controller surfaces it verbatim
/// behind a fixed prefix and transitions the job to `Failed` without
/// corrupting prior state, so the user may resubmit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service rejected the request.
    #[error("{0}")]
    Rejected(String),

    /// The service did not answer within the configured deadline.
    #[error("conversion service timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// The service could not be reached at all.
    #[error("conversion service unavailable: {reason}")]
    Unavailable { reason: String },
}

impl ServiceError {
    /// Creates a rejection with the given message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Whether resubmitting the same request might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Unavailable { .. })
    }
}
