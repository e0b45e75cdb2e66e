//! Async retry loop; same contract as the blocking one, with a suspending wait.

use std::future::Future;

use super::classify::Classify;
use super::error::ExecutionResult;
use super::policy::ExecutionPolicy;
use super::run::{Step, Tracker};

/// Async counterpart of [`execute`](super::execute). The wait between attempts
/// is a `tokio::time::sleep`, so the executor yields instead of blocking a
/// worker thread. Dropping the returned future cancels the execution.
pub async fn execute_async<T, E, F, Fut, C>(
    policy: &ExecutionPolicy,
    mut op: F,
    classify: C,
) -> ExecutionResult<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Classify<E>,
{
    let mut tracker = Tracker::new(policy);
    loop {
        let outcome = op().await;
        match tracker.settle(outcome, &classify) {
            Step::Done(result) => return result,
            Step::Wait(wait, _) => tokio::time::sleep(wait).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::{Completion, Disposition, ExecutionError};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::{Duration, Instant};

    fn classify_code(code: &String) -> Disposition {
        match code.as_str() {
            "ResourceInUse" | "ScalingActivityInProgress" => Disposition::Retryable,
            _ => Disposition::Permanent,
        }
    }

    #[tokio::test]
    async fn async_retries_until_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy =
            ExecutionPolicy::constant(Duration::from_secs(5), Duration::from_millis(20)).unwrap();
        let result = execute_async(
            &policy,
            || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err("ResourceInUse".to_string())
                } else {
                    Ok(n)
                }
            },
            classify_code,
        )
        .await;
        assert_eq!(result.unwrap(), Completion::Value(3));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn async_permanent_stops_immediately() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy =
            ExecutionPolicy::constant(Duration::from_secs(30), Duration::from_secs(1)).unwrap();
        let result = execute_async(
            &policy,
            || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>("ValidationError".to_string())
            },
            classify_code,
        )
        .await;
        assert!(matches!(
            result,
            Err(ExecutionError::Permanent { attempts: 1, .. })
        ));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn async_deadline_exceeded() {
        let policy =
            ExecutionPolicy::constant(Duration::from_millis(120), Duration::from_millis(40))
                .unwrap();
        let started = Instant::now();
        let result = execute_async(
            &policy,
            || async { Err::<(), _>("ScalingActivityInProgress".to_string()) },
            classify_code,
        )
        .await;
        let err = result.unwrap_err();
        assert!(err.is_deadline_exceeded());
        assert_eq!(err.last_error(), "ScalingActivityInProgress");
        assert!(started.elapsed() >= Duration::from_millis(120));
    }
}
