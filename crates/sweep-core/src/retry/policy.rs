use std::time::Duration;

/// Wait schedule between attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backoff {
    /// Retry immediately.
    None,
    /// Same delay before every retry.
    Constant(Duration),
    /// `base * 2^(n-1)` for the n-th retry, capped at `max`.
    Exponential { base: Duration, max: Duration },
    /// Caller-defined per-retry delays; the last entry repeats once exhausted.
    Schedule(Vec<Duration>),
}

impl Backoff {
    /// Delay before the next attempt, given how many attempts have failed so far
    /// (1 = after the first failure).
    pub fn delay(&self, failed_attempts: u32) -> Duration {
        let n = failed_attempts.max(1);
        match self {
            Backoff::None => Duration::ZERO,
            Backoff::Constant(d) => *d,
            Backoff::Exponential { base, max } => {
                let exp = 1u32 << (n - 1).min(16);
                base.saturating_mul(exp).min(*max)
            }
            Backoff::Schedule(steps) => {
                let idx = (n as usize - 1).min(steps.len().saturating_sub(1));
                steps.get(idx).copied().unwrap_or(Duration::ZERO)
            }
        }
    }
}

/// Invalid policy parameters, rejected before any attempt runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("deadline must be a positive duration")]
    ZeroDeadline,
    #[error("backoff schedule must contain at least one delay")]
    EmptySchedule,
}

/// Time-bounded retry configuration for one execution.
///
/// Built once by the caller and only read by the executor, so the same policy
/// can be shared between any number of executions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPolicy {
    deadline: Duration,
    backoff: Backoff,
}

impl ExecutionPolicy {
    pub fn new(deadline: Duration, backoff: Backoff) -> Result<Self, PolicyError> {
        if deadline.is_zero() {
            return Err(PolicyError::ZeroDeadline);
        }
        if matches!(&backoff, Backoff::Schedule(steps) if steps.is_empty()) {
            return Err(PolicyError::EmptySchedule);
        }
        Ok(Self { deadline, backoff })
    }

    /// Policy with a fixed delay between attempts.
    pub fn constant(deadline: Duration, delay: Duration) -> Result<Self, PolicyError> {
        Self::new(deadline, Backoff::Constant(delay))
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn backoff(&self) -> &Backoff {
        &self.backoff
    }

    /// Wait before the next attempt, clipped to what is left of the deadline.
    /// Returns `None` when the deadline has already been reached.
    pub(super) fn next_wait(&self, failed_attempts: u32, elapsed: Duration) -> Option<Duration> {
        let remaining = self.deadline.checked_sub(elapsed).filter(|r| !r.is_zero())?;
        Some(self.backoff.delay(failed_attempts).min(remaining))
    }
}

impl Default for ExecutionPolicy {
    /// Five minute deadline with exponential backoff from 500ms up to 10s.
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(5 * 60),
            backoff: Backoff::Exponential {
                base: Duration::from_millis(500),
                max: Duration::from_secs(10),
            },
        }
    }
}
