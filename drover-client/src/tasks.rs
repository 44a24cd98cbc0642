//! Task launch and describe endpoints

use tracing::debug;

use crate::OrchestratorClient;
use crate::error::Result;
use drover_core::dto::task::{DescribeTasks, RunTask, TaskListResponse};

impl OrchestratorClient {
    // =============================================================================
    // Task Lifecycle
    // =============================================================================

    /// Launch a task on a cluster
    ///
    /// # Arguments
    /// * `cluster` - The cluster to run the task on
    /// * `request` - Task definition version, started-by tag, and overrides
    ///
    /// # Returns
    /// The launched tasks along with any per-resource failures. The caller
    /// decides how to interpret a response that carries failures.
    pub async fn run_task(&self, cluster: &str, request: &RunTask) -> Result<TaskListResponse> {
        let url = format!("{}/api/clusters/{}/tasks", self.base_url, cluster);
        debug!(
            "Launching {} on cluster {}",
            request.task_definition, cluster
        );
        let response = self.client.post(&url).json(request).send().await?;

        crate::handle_response(response).await
    }

    /// Describe tasks by id on a cluster
    ///
    /// # Arguments
    /// * `cluster` - The cluster the tasks run on
    /// * `task_ids` - Ids of the tasks to describe
    ///
    /// # Returns
    /// Current task records plus failures for any id the orchestrator could
    /// not resolve.
    pub async fn describe_tasks(
        &self,
        cluster: &str,
        task_ids: &[String],
    ) -> Result<TaskListResponse> {
        let url = format!("{}/api/clusters/{}/tasks/describe", self.base_url, cluster);
        let response = self
            .client
            .post(&url)
            .json(&DescribeTasks {
                tasks: task_ids.to_vec(),
            })
            .send()
            .await?;

        crate::handle_response(response).await
    }
}
