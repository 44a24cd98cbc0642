//! Orchestrator repository
//!
//! Launching tasks, describing them, and resolving task definitions.

use anyhow::{Context, Result};
use async_trait::async_trait;
use drover_client::OrchestratorClient;
use drover_core::domain::definition::TaskDefinition;
use drover_core::dto::task::{RunTask, TaskListResponse};

/// Repository trait for orchestrator operations
#[async_trait]
pub trait TaskOrchestrator: Send + Sync {
    /// Looks up the current definition for a family
    ///
    /// Returns `None` when the orchestrator knows no definition for it.
    async fn latest_definition(&self, family: &str) -> Result<Option<TaskDefinition>>;

    /// Launches a task on the given cluster
    ///
    /// The response may carry per-resource failures instead of (or alongside)
    /// launched tasks; interpretation is the caller's job.
    async fn run_task(&self, cluster: &str, request: RunTask) -> Result<TaskListResponse>;

    /// Describes a single task by id on the given cluster
    async fn describe_task(&self, cluster: &str, task_id: &str) -> Result<TaskListResponse>;
}

/// HTTP implementation of TaskOrchestrator
pub struct HttpTaskOrchestrator {
    client: OrchestratorClient,
}

impl HttpTaskOrchestrator {
    /// Creates a new HTTP orchestrator repository
    pub fn new(client: OrchestratorClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskOrchestrator for HttpTaskOrchestrator {
    async fn latest_definition(&self, family: &str) -> Result<Option<TaskDefinition>> {
        self.client
            .latest_definition(family)
            .await
            .with_context(|| format!("Failed to look up task definition for '{}'", family))
    }

    async fn run_task(&self, cluster: &str, request: RunTask) -> Result<TaskListResponse> {
        self.client
            .run_task(cluster, &request)
            .await
            .context("Failed to launch task")
    }

    async fn describe_task(&self, cluster: &str, task_id: &str) -> Result<TaskListResponse> {
        self.client
            .describe_tasks(cluster, &[task_id.to_string()])
            .await
            .with_context(|| format!("Failed to describe task {}", task_id))
    }
}
