//! Generic task polling — drive a handle to a terminal status.
//!
//! The protocol is identical for every endpoint family; only the fetch
//! operation and the handle differ, so it lives here rather than in each
//! domain module.

use crate::error::{ApiError, SdkError};
use crate::task::{Task, TaskId, TaskStatus};
use futures_timer::Delay;
use std::future::Future;
use std::time::Duration;

/// Extra `NotFound` probes tolerated right after task creation, before the
/// task is visible remotely. Not charged against `max_attempts`.
const GRACE_PROBES: u32 = 3;

/// Base delay between grace probes; doubles per probe.
const GRACE_BASE_DELAY: Duration = Duration::from_millis(250);

/// Polling bounds.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Maximum non-terminal observations before giving up.
    pub max_attempts: u32,
    /// Suspension between observations.
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 150,
            interval: Duration::from_secs(2),
        }
    }
}

/// Repeatedly invoke `fetch` until the task reaches a terminal status.
///
/// - `Succeeded` returns the task.
/// - `Failed`/`Canceled`/`Expired` fail with [`SdkError::TaskFailed`].
/// - `Pending`/`InProgress` consume one attempt and suspend for
///   `config.interval`; once `max_attempts` is reached the call fails with
///   [`SdkError::PollTimeout`] carrying the last observed status.
///
/// A `NotFound` from `fetch` before the task has ever been seen is treated
/// as replication lag and re-probed on a short growing backoff, without
/// consuming an attempt. Any other fetch failure propagates immediately —
/// transient faults were already retried inside the executor.
pub async fn poll_until_terminal<F, Fut>(
    fetch: F,
    id: &TaskId,
    config: &PollConfig,
) -> Result<Task, SdkError>
where
    F: Fn(TaskId) -> Fut,
    Fut: Future<Output = Result<Task, ApiError>>,
{
    let mut seen = false;
    let mut grace_used = 0u32;
    let mut attempts = 0u32;

    loop {
        let task = match fetch(id.clone()).await {
            Ok(task) => task,
            Err(ApiError::NotFound { .. }) if !seen && grace_used < GRACE_PROBES => {
                let delay = GRACE_BASE_DELAY * 2u32.pow(grace_used);
                grace_used += 1;
                tracing::debug!(
                    task = %id,
                    probe = grace_used,
                    delay_ms = delay.as_millis() as u64,
                    "task not yet visible, re-probing"
                );
                Delay::new(delay).await;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        seen = true;

        match task.status {
            TaskStatus::Succeeded => return Ok(task),
            TaskStatus::Failed | TaskStatus::Canceled | TaskStatus::Expired => {
                return Err(SdkError::TaskFailed {
                    id: id.clone(),
                    status: task.status,
                    message: task.failure,
                });
            }
            TaskStatus::Pending | TaskStatus::InProgress => {
                attempts += 1;
                if attempts >= config.max_attempts {
                    return Err(SdkError::PollTimeout {
                        id: id.clone(),
                        last_status: task.status,
                        attempts,
                    });
                }
                tracing::debug!(
                    task = %id,
                    status = %task.status,
                    progress = task.progress,
                    attempt = attempts,
                    "task not yet terminal"
                );
                Delay::new(config.interval).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    fn task(id: &str, status: TaskStatus) -> Task {
        Task {
            id: TaskId::from(id),
            status,
            progress: None,
            created_at: None,
            started_at: None,
            finished_at: None,
            expires_at: None,
            result: None,
            failure: None,
        }
    }

    fn not_found() -> ApiError {
        ApiError::classify(404, "")
    }

    fn scripted(
        steps: Vec<Result<Task, ApiError>>,
    ) -> (
        impl Fn(TaskId) -> std::future::Ready<Result<Task, ApiError>>,
        Arc<Mutex<u32>>,
    ) {
        let calls = Arc::new(Mutex::new(0u32));
        let counter = calls.clone();
        let queue = Mutex::new(VecDeque::from(steps));
        let fetch = move |_id: TaskId| {
            *counter.lock().unwrap() += 1;
            let next = queue
                .lock()
                .unwrap()
                .pop_front()
                .expect("fetch script exhausted");
            std::future::ready(next)
        };
        (fetch, calls)
    }

    fn quick() -> PollConfig {
        PollConfig {
            max_attempts: 10,
            interval: Duration::from_millis(5),
        }
    }

    #[tokio::test]
    async fn grace_window_absorbs_initial_not_found() {
        let (fetch, calls) = scripted(vec![
            Err(not_found()),
            Err(not_found()),
            Ok(task("t1", TaskStatus::Pending)),
            Ok(task("t1", TaskStatus::Succeeded)),
        ]);
        let got = poll_until_terminal(fetch, &TaskId::from("t1"), &quick())
            .await
            .unwrap();
        assert_eq!(got.status, TaskStatus::Succeeded);
        assert_eq!(*calls.lock().unwrap(), 4);
    }

    #[tokio::test]
    async fn grace_window_is_bounded() {
        let steps: Vec<Result<Task, ApiError>> =
            (0..=GRACE_PROBES).map(|_| Err(not_found())).collect();
        let (fetch, calls) = scripted(steps);
        let err = poll_until_terminal(fetch, &TaskId::from("t2"), &quick())
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Api(ApiError::NotFound { .. })));
        assert_eq!(*calls.lock().unwrap(), GRACE_PROBES + 1);
    }

    #[tokio::test]
    async fn not_found_after_first_sighting_propagates() {
        let (fetch, calls) = scripted(vec![
            Ok(task("t3", TaskStatus::Pending)),
            Err(not_found()),
        ]);
        let err = poll_until_terminal(fetch, &TaskId::from("t3"), &quick())
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Api(ApiError::NotFound { .. })));
        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn non_404_fetch_errors_propagate_immediately() {
        let (fetch, calls) = scripted(vec![Err(ApiError::classify(401, ""))]);
        let err = poll_until_terminal(fetch, &TaskId::from("t4"), &quick())
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Api(ApiError::Unauthorized { .. })));
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn timeout_reports_last_observed_status() {
        let (fetch, _) = scripted(vec![
            Ok(task("t5", TaskStatus::Pending)),
            Ok(task("t5", TaskStatus::InProgress)),
            Ok(task("t5", TaskStatus::InProgress)),
        ]);
        let config = PollConfig {
            max_attempts: 3,
            interval: Duration::from_millis(5),
        };
        let err = poll_until_terminal(fetch, &TaskId::from("t5"), &config)
            .await
            .unwrap_err();
        match err {
            SdkError::PollTimeout {
                id,
                last_status,
                attempts,
            } => {
                assert_eq!(id.as_str(), "t5");
                assert_eq!(last_status, TaskStatus::InProgress);
                assert_eq!(attempts, 3);
            }
            other => panic!("expected PollTimeout, got {other:?}"),
        }
    }
}
