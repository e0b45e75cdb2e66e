//! Retry loop: run a closure until success, a permanent failure, or the deadline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::classify::{Classify, Disposition};
use super::error::{Completion, ExecutionError, ExecutionResult};
use super::policy::ExecutionPolicy;

/// What to do after one attempt.
pub(super) enum Step<T, E> {
    Done(ExecutionResult<T, E>),
    /// Sleep for the given duration, then try again. Carries the retryable error
    /// so an abort can still report it.
    Wait(Duration, E),
}

/// Per-execution state shared by the blocking and async loops.
pub(super) struct Tracker<'a> {
    policy: &'a ExecutionPolicy,
    started: Instant,
    attempts: u32,
}

impl<'a> Tracker<'a> {
    pub(super) fn new(policy: &'a ExecutionPolicy) -> Self {
        Self {
            policy,
            started: Instant::now(),
            attempts: 0,
        }
    }

    /// Turn one attempt's outcome into loop control.
    pub(super) fn settle<T, E, C>(&mut self, outcome: Result<T, E>, classify: &C) -> Step<T, E>
    where
        C: Classify<E>,
    {
        self.attempts += 1;
        let err = match outcome {
            Ok(v) => return Step::Done(Ok(Completion::Value(v))),
            Err(e) => e,
        };
        match classify.classify(&err) {
            Disposition::Success => return Step::Done(Ok(Completion::Absorbed(err))),
            Disposition::Permanent => {
                return Step::Done(Err(ExecutionError::Permanent {
                    attempts: self.attempts,
                    source: err,
                }))
            }
            Disposition::Retryable => {}
        }
        let elapsed = self.started.elapsed();
        match self.policy.next_wait(self.attempts, elapsed) {
            Some(wait) => Step::Wait(wait, err),
            None => Step::Done(Err(ExecutionError::DeadlineExceeded {
                attempts: self.attempts,
                elapsed,
                last_error: err,
            })),
        }
    }

    pub(super) fn aborted<E>(&self, last_error: E) -> ExecutionError<E> {
        ExecutionError::Aborted {
            attempts: self.attempts,
            last_error,
        }
    }
}

/// Runs `op` until it succeeds, `classify` says stop, or `policy`'s deadline passes.
///
/// `op` is always invoked at least once. Between retryable failures the
/// calling thread sleeps for the policy's backoff, clipped so the wait never
/// runs past the deadline. The caller owns idempotence of `op`.
pub fn execute<T, E, F, C>(policy: &ExecutionPolicy, mut op: F, classify: C) -> ExecutionResult<T, E>
where
    F: FnMut() -> Result<T, E>,
    C: Classify<E>,
{
    let mut tracker = Tracker::new(policy);
    loop {
        match tracker.settle(op(), &classify) {
            Step::Done(result) => return result,
            Step::Wait(wait, _) => std::thread::sleep(wait),
        }
    }
}

/// Like [`execute`], but also stops with [`ExecutionError::Aborted`] once
/// `abort` is set. The token is checked before and after every wait, never
/// while `op` is running.
pub fn execute_with_abort<T, E, F, C>(
    policy: &ExecutionPolicy,
    abort: &AtomicBool,
    mut op: F,
    classify: C,
) -> ExecutionResult<T, E>
where
    F: FnMut() -> Result<T, E>,
    C: Classify<E>,
{
    let mut tracker = Tracker::new(policy);
    loop {
        match tracker.settle(op(), &classify) {
            Step::Done(result) => return result,
            Step::Wait(wait, last) => {
                if abort.load(Ordering::Relaxed) {
                    return Err(tracker.aborted(last));
                }
                std::thread::sleep(wait);
                if abort.load(Ordering::Relaxed) {
                    return Err(tracker.aborted(last));
                }
            }
        }
    }
}
