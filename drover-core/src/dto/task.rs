//! Task DTOs for orchestrator communication

use serde::{Deserialize, Serialize};

use crate::domain::task::{Failure, Task};

/// Request to launch a task on a cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunTask {
    /// Versioned task definition identifier (`family:revision`)
    pub task_definition: String,
    /// Who initiated the launch; capped by the orchestrator at 36 characters
    pub started_by: String,
    /// Per-container command replacements
    pub overrides: TaskOverrides,
}

/// Overrides applied on top of the task definition at launch time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOverrides {
    pub container_overrides: Vec<ContainerOverride>,
}

/// Replacement command for a single named container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerOverride {
    pub name: String,
    pub command: Vec<String>,
}

/// Request to describe tasks by id on a cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeTasks {
    pub tasks: Vec<String>,
}

/// Response shape shared by the launch and describe calls
///
/// Either list may be empty; a response can carry failures for some
/// resources and tasks for others.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListResponse {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub failures: Vec<Failure>,
}
