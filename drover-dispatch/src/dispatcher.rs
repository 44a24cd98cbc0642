//! Dispatcher
//!
//! Sequences one invocation: maintenance gate, definition resolution, the
//! launch call, and the handoff to the poller when the task is still
//! starting. At most one launch call is made per invocation.

use anyhow::{Result, bail};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::context::InvocationContext;
use crate::error::DispatchError;
use crate::poller::TaskPoller;
use crate::repository::{LockStore, TaskOrchestrator};
use drover_core::domain::task::describe_failures;
use drover_core::dto::task::{ContainerOverride, RunTask, TaskOverrides};

/// Wrapper script baked into every task image; drives the actual command.
const TASK_RUNNER_PATH: &str = "/usr/local/bin/scheduled_task_runner";

/// Wraps the user command so it runs with the task environment loaded.
const TASK_ENV_PATH: &str = "/usr/local/bin/with_task_env.sh";

/// The orchestrator caps the started-by field at this length.
const STARTED_BY_LIMIT: usize = 36;

/// Outcome of one dispatch invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The task settled, or was already past starting at launch
    Completed,
    /// Maintenance mode was on; nothing was launched
    Skipped,
}

/// Dispatcher for a single task launch
pub struct Dispatcher {
    config: Config,
    orchestrator: Arc<dyn TaskOrchestrator>,
    lock_store: Arc<dyn LockStore>,
}

impl Dispatcher {
    /// Creates a new dispatcher
    pub fn new(
        config: Config,
        orchestrator: Arc<dyn TaskOrchestrator>,
        lock_store: Arc<dyn LockStore>,
    ) -> Self {
        Self {
            config,
            orchestrator,
            lock_store,
        }
    }

    /// Runs one dispatch: gate, launch, poll until the task starts
    pub async fn dispatch(&self, ctx: &dyn InvocationContext) -> Result<DispatchOutcome> {
        let key = self.config.maintenance_key();
        if self
            .lock_store
            .lock_exists(&self.config.lock_table_name, &key)
            .await?
        {
            info!(
                "Maintenance mode ON. Skipping task {}",
                self.config.task_name
            );
            return Ok(DispatchOutcome::Skipped);
        }

        let definition = self
            .orchestrator
            .latest_definition(&self.config.task_definition_family)
            .await?
            .ok_or_else(|| {
                DispatchError::DefinitionNotFound(self.config.task_definition_family.clone())
            })?;

        let command = self.task_command();
        let started_by = started_by_tag(&self.config.function_name, ctx.invocation_id());

        info!(
            "Running task {} on cluster {} with command {}",
            definition.versioned(),
            self.config.cluster,
            command.join(" ")
        );

        let request = RunTask {
            task_definition: definition.versioned(),
            started_by,
            overrides: TaskOverrides {
                container_overrides: vec![ContainerOverride {
                    name: self.config.container_name.clone(),
                    command,
                }],
            },
        };

        let response = self
            .orchestrator
            .run_task(&self.config.cluster, request)
            .await?;
        debug!("Launch response: {:?}", response);

        if !response.failures.is_empty() {
            return Err(DispatchError::LaunchRejected {
                task_name: self.config.task_name.clone(),
                detail: describe_failures(&response.failures),
            }
            .into());
        }

        let Some(task) = response.tasks.first() else {
            bail!("orchestrator returned neither tasks nor failures for the launch");
        };

        if task.last_status.is_starting() {
            let poller = TaskPoller::new(Arc::clone(&self.orchestrator));
            poller
                .wait_until_started(ctx, &self.config.cluster, &task.id)
                .await?;
        } else {
            info!("Task {} already {} at launch", task.id, task.last_status);
        }

        Ok(DispatchOutcome::Completed)
    }

    /// Assembles the container command override
    ///
    /// The user command is wrapped by the env-loading script and passed as
    /// one trailing token, so it is never word-split by this layer.
    fn task_command(&self) -> Vec<String> {
        vec![
            TASK_RUNNER_PATH.to_string(),
            "--task_name".to_string(),
            self.config.task_name.clone(),
            "--env_name".to_string(),
            self.config.env_name.clone(),
            "--lock_table_name".to_string(),
            self.config.lock_table_name.clone(),
            "--region".to_string(),
            self.config.region.clone(),
            format!("{} {}", TASK_ENV_PATH, self.config.task_command),
        ]
    }
}

/// Builds the started-by tag from the function name and invocation id
fn started_by_tag(function_name: &str, invocation_id: &str) -> String {
    format!("{}/{}", function_name, invocation_id)
        .chars()
        .take(STARTED_BY_LIMIT)
        .collect()
}
