//! Terminal outcomes of one execution.

use std::fmt;
use std::time::Duration;

/// Successful terminal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<T, E> {
    /// The operation returned a value.
    Value(T),
    /// The operation failed, but the classifier reported the error as
    /// [`Disposition::Success`](super::Disposition::Success): the desired end
    /// state already holds.
    Absorbed(E),
}

impl<T, E> Completion<T, E> {
    /// The operation's value, if it produced one.
    pub fn value(self) -> Option<T> {
        match self {
            Completion::Value(v) => Some(v),
            Completion::Absorbed(_) => None,
        }
    }

    pub fn is_absorbed(&self) -> bool {
        matches!(self, Completion::Absorbed(_))
    }
}

/// Failing terminal outcome. Never wraps an error that is still retryable
/// within the deadline.
#[derive(Debug)]
pub enum ExecutionError<E> {
    /// The classifier marked the error as permanent.
    Permanent { attempts: u32, source: E },
    /// Attempts kept failing with retryable errors until the deadline passed.
    DeadlineExceeded {
        attempts: u32,
        elapsed: Duration,
        last_error: E,
    },
    /// The abort token was set between attempts.
    Aborted { attempts: u32, last_error: E },
}

/// Result of [`execute`](super::execute) and friends.
pub type ExecutionResult<T, E> = Result<Completion<T, E>, ExecutionError<E>>;

impl<E> ExecutionError<E> {
    /// Number of times the operation was invoked.
    pub fn attempts(&self) -> u32 {
        match self {
            ExecutionError::Permanent { attempts, .. }
            | ExecutionError::DeadlineExceeded { attempts, .. }
            | ExecutionError::Aborted { attempts, .. } => *attempts,
        }
    }

    /// The last error the operation returned.
    pub fn last_error(&self) -> &E {
        match self {
            ExecutionError::Permanent { source, .. } => source,
            ExecutionError::DeadlineExceeded { last_error, .. }
            | ExecutionError::Aborted { last_error, .. } => last_error,
        }
    }

    pub fn into_last_error(self) -> E {
        match self {
            ExecutionError::Permanent { source, .. } => source,
            ExecutionError::DeadlineExceeded { last_error, .. }
            | ExecutionError::Aborted { last_error, .. } => last_error,
        }
    }

    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, ExecutionError::DeadlineExceeded { .. })
    }
}

impl<E: fmt::Display> fmt::Display for ExecutionError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::Permanent { attempts, source } => {
                write!(f, "permanent failure after {} attempt(s): {}", attempts, source)
            }
            ExecutionError::DeadlineExceeded {
                attempts,
                elapsed,
                last_error,
            } => write!(
                f,
                "timeout after {:?} ({} attempt(s)), last error: {}",
                elapsed, attempts, last_error
            ),
            ExecutionError::Aborted {
                attempts,
                last_error,
            } => write!(
                f,
                "aborted after {} attempt(s), last error: {}",
                attempts, last_error
            ),
        }
    }
}

impl<E> std::error::Error for ExecutionError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.last_error())
    }
}
