//! Cloud API error taxonomy and client seams.
//!
//! Remote calls fail with an [`ApiError`] carrying a discriminable `code`.
//! Each API documents the closed set of codes it knows about next to its
//! client trait (see [`autoscaling::AutoscalingErrorCode`]); classifiers map
//! those codes to retry dispositions.

pub mod autoscaling;
mod skip;

pub use skip::is_skip_sweep_error;

/// Error returned by a cloud API call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// True if the code matches and the message contains `message_fragment`
    /// (an empty fragment matches any message).
    pub fn matches(&self, code: &str, message_fragment: &str) -> bool {
        self.code == code && self.message.contains(message_fragment)
    }
}
