//! Task poller
//!
//! Watches a just-launched task until it leaves the starting state, racing
//! the invocation's remaining budget. Entered only when the launch response
//! reported the task as still starting.

use anyhow::{Result, bail};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::context::InvocationContext;
use crate::error::DispatchError;
use crate::repository::TaskOrchestrator;
use drover_core::domain::task::describe_failures;

/// Abort once fewer than this many milliseconds remain in the invocation.
const BUDGET_THRESHOLD_MILLIS: u64 = 10 * 1000;

/// Delay between describe calls while the task is still starting.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Poller that waits for a launched task to leave the starting state
pub struct TaskPoller {
    orchestrator: Arc<dyn TaskOrchestrator>,
}

impl TaskPoller {
    /// Creates a new task poller
    pub fn new(orchestrator: Arc<dyn TaskOrchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Polls the task until its status is no longer transitional
    ///
    /// Each iteration either settles, fails, times out against the budget,
    /// or sleeps one interval. The one exception is the `MISSING` sentinel:
    /// a just-created task the orchestrator cannot see yet is re-queried
    /// immediately, with no sleep and no budget check.
    pub async fn wait_until_started(
        &self,
        ctx: &dyn InvocationContext,
        cluster: &str,
        task_id: &str,
    ) -> Result<()> {
        loop {
            let response = self.orchestrator.describe_task(cluster, task_id).await?;
            debug!("Describe response: {:?}", response);

            if !response.failures.is_empty() {
                if response.failures.len() == 1 && response.failures[0].is_missing() {
                    debug!("Task {} not visible yet, retrying describe", task_id);
                    continue;
                }
                return Err(DispatchError::PollRejected {
                    task_id: task_id.to_string(),
                    detail: describe_failures(&response.failures),
                }
                .into());
            }

            let Some(task) = response.tasks.first() else {
                bail!(
                    "orchestrator returned neither tasks nor failures for task {}",
                    task_id
                );
            };

            if !task.last_status.is_starting() {
                info!("Task {} is now {}", task_id, task.last_status);
                return Ok(());
            }

            let remaining = ctx.remaining_millis();
            debug!(
                "{} remaining milliseconds until the invocation times out",
                remaining
            );
            if remaining < BUDGET_THRESHOLD_MILLIS {
                return Err(DispatchError::PollTimedOut {
                    task_id: task_id.to_string(),
                }
                .into());
            }

            debug!("Sleeping {:?} before the next describe", POLL_INTERVAL);
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use drover_core::domain::definition::TaskDefinition;
    use drover_core::domain::task::{Failure, Task, TaskStatus};
    use drover_core::dto::task::{RunTask, TaskListResponse};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedOrchestrator {
        responses: Mutex<VecDeque<TaskListResponse>>,
        describe_calls: Mutex<usize>,
    }

    impl ScriptedOrchestrator {
        fn new(responses: Vec<TaskListResponse>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                describe_calls: Mutex::new(0),
            })
        }

        fn describe_count(&self) -> usize {
            *self.describe_calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl TaskOrchestrator for ScriptedOrchestrator {
        async fn latest_definition(&self, _family: &str) -> Result<Option<TaskDefinition>> {
            unimplemented!("poller never resolves definitions")
        }

        async fn run_task(&self, _cluster: &str, _request: RunTask) -> Result<TaskListResponse> {
            unimplemented!("poller never launches")
        }

        async fn describe_task(&self, _cluster: &str, _task_id: &str) -> Result<TaskListResponse> {
            *self.describe_calls.lock().unwrap() += 1;
            let response = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected describe call");
            Ok(response)
        }
    }

    struct ScriptedContext {
        remaining: Mutex<VecDeque<u64>>,
    }

    impl ScriptedContext {
        fn new(remaining: Vec<u64>) -> Self {
            Self {
                remaining: Mutex::new(remaining.into()),
            }
        }
    }

    impl InvocationContext for ScriptedContext {
        fn invocation_id(&self) -> &str {
            "test-invocation"
        }

        fn remaining_millis(&self) -> u64 {
            self.remaining
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected budget check")
        }
    }

    fn pending(id: &str) -> TaskListResponse {
        status(id, TaskStatus::Pending)
    }

    fn running(id: &str) -> TaskListResponse {
        status(id, TaskStatus::Running)
    }

    fn status(id: &str, last_status: TaskStatus) -> TaskListResponse {
        TaskListResponse {
            tasks: vec![Task {
                id: id.to_string(),
                last_status,
                created_at: None,
            }],
            failures: vec![],
        }
    }

    fn failures(entries: &[(&str, &str)]) -> TaskListResponse {
        TaskListResponse {
            tasks: vec![],
            failures: entries
                .iter()
                .map(|(resource, reason)| Failure {
                    resource: resource.to_string(),
                    reason: reason.to_string(),
                })
                .collect(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_until_no_longer_starting() {
        let orchestrator =
            ScriptedOrchestrator::new(vec![pending("t-1"), pending("t-1"), running("t-1")]);
        let ctx = ScriptedContext::new(vec![60_000, 59_000]);
        let start = tokio::time::Instant::now();

        TaskPoller::new(Arc::clone(&orchestrator) as Arc<dyn TaskOrchestrator>)
            .wait_until_started(&ctx, "staging-cluster", "t-1")
            .await
            .unwrap();

        assert_eq!(orchestrator.describe_count(), 3);
        // One fixed-interval sleep per still-starting iteration.
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_sentinel_retries_without_sleep_or_budget_check() {
        let orchestrator = ScriptedOrchestrator::new(vec![
            failures(&[("t-1", "MISSING")]),
            running("t-1"),
        ]);
        // Panics on any budget check: the MISSING iteration must not consume
        // one.
        let ctx = ScriptedContext::new(vec![]);
        let start = tokio::time::Instant::now();

        TaskPoller::new(Arc::clone(&orchestrator) as Arc<dyn TaskOrchestrator>)
            .wait_until_started(&ctx, "staging-cluster", "t-1")
            .await
            .unwrap();

        assert_eq!(orchestrator.describe_count(), 2);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_low_budget_times_out_without_another_describe() {
        let orchestrator = ScriptedOrchestrator::new(vec![pending("t-1")]);
        let ctx = ScriptedContext::new(vec![5_000]);

        let err = TaskPoller::new(Arc::clone(&orchestrator) as Arc<dyn TaskOrchestrator>)
            .wait_until_started(&ctx, "staging-cluster", "t-1")
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DispatchError>(),
            Some(DispatchError::PollTimedOut { task_id }) if task_id == "t-1"
        ));
        assert!(err.to_string().contains("t-1"));
        assert_eq!(orchestrator.describe_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_describe_failures_are_fatal() {
        let orchestrator =
            ScriptedOrchestrator::new(vec![failures(&[("t-1", "RESOURCE:MEMORY")])]);
        let ctx = ScriptedContext::new(vec![]);

        let err = TaskPoller::new(Arc::clone(&orchestrator) as Arc<dyn TaskOrchestrator>)
            .wait_until_started(&ctx, "staging-cluster", "t-1")
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DispatchError>(),
            Some(DispatchError::PollRejected { .. })
        ));
        assert!(err.to_string().contains("t-1: RESOURCE:MEMORY"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_alongside_other_failures_is_fatal() {
        // The sentinel only exempts a response whose sole failure is MISSING.
        let orchestrator = ScriptedOrchestrator::new(vec![failures(&[
            ("t-1", "MISSING"),
            ("t-2", "AGENT"),
        ])]);
        let ctx = ScriptedContext::new(vec![]);

        let err = TaskPoller::new(Arc::clone(&orchestrator) as Arc<dyn TaskOrchestrator>)
            .wait_until_started(&ctx, "staging-cluster", "t-1")
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DispatchError>(),
            Some(DispatchError::PollRejected { .. })
        ));
        assert!(err.to_string().contains("t-2: AGENT"));
    }
}
