//! Typed errors from resource state checks, and helpers to recognise them
//! inside an `anyhow` chain.

/// Outcome of waiting on or reading a remote resource.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error("resource not found: {id}")]
    NotFound { id: String },
    #[error("timeout while waiting for {id}{}", last_error_suffix(.last_error))]
    Timeout {
        id: String,
        /// The last error seen while polling, if the wait failed for a reason
        /// other than running out of time.
        last_error: Option<String>,
    },
}

fn last_error_suffix(last_error: &Option<String>) -> String {
    match last_error {
        Some(e) => format!(" (last error: {})", e),
        None => String::new(),
    }
}

fn resource_errors(err: &anyhow::Error) -> impl Iterator<Item = &ResourceError> {
    err.chain().filter_map(|e| e.downcast_ref::<ResourceError>())
}

/// True if a [`ResourceError::NotFound`] appears anywhere in the chain.
pub fn is_resource_not_found_error(err: &anyhow::Error) -> bool {
    resource_errors(err).any(|e| matches!(e, ResourceError::NotFound { .. }))
}

/// True only for a pure timeout: a [`ResourceError::Timeout`] with no last
/// error recorded.
pub fn is_resource_timeout_error(err: &anyhow::Error) -> bool {
    resource_errors(err).any(|e| {
        matches!(
            e,
            ResourceError::Timeout {
                last_error: None,
                ..
            }
        )
    })
}
