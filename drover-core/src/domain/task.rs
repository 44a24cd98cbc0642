//! Task domain types
//!
//! Lifecycle status and failure entries as reported by the cluster
//! orchestrator.

use serde::{Deserialize, Serialize};

/// Failure reason the orchestrator returns for a task id that was just
/// created but is not yet visible to a describe call.
pub const MISSING_REASON: &str = "MISSING";

/// Task lifecycle status as reported by the orchestrator.
///
/// The dispatcher only distinguishes one class: `Pending` means the task is
/// still starting; every other status counts as settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Provisioning,
    Pending,
    Activating,
    Running,
    Deactivating,
    Stopping,
    Deprovisioning,
    Stopped,
}

impl TaskStatus {
    /// Whether the task is still in the transitional "starting" state.
    pub fn is_starting(self) -> bool {
        matches!(self, TaskStatus::Pending)
    }

    /// Wire name of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Provisioning => "PROVISIONING",
            TaskStatus::Pending => "PENDING",
            TaskStatus::Activating => "ACTIVATING",
            TaskStatus::Running => "RUNNING",
            TaskStatus::Deactivating => "DEACTIVATING",
            TaskStatus::Stopping => "STOPPING",
            TaskStatus::Deprovisioning => "DEPROVISIONING",
            TaskStatus::Stopped => "STOPPED",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task record as reported by the orchestrator
///
/// Returned by both the launch and describe calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Orchestrator-assigned task id
    pub id: String,
    /// Status at the time of the response
    pub last_status: TaskStatus,
    /// When the orchestrator accepted the task
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// A failed resource entry from a launch or describe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Failure {
    /// Id of the resource the failure refers to
    pub resource: String,
    /// Orchestrator-supplied reason text
    pub reason: String,
}

impl Failure {
    /// Whether this entry is the transient not-yet-visible sentinel.
    pub fn is_missing(&self) -> bool {
        self.reason == MISSING_REASON
    }
}

/// Joins failure entries into a single `resource: reason` list for error
/// messages.
pub fn describe_failures(failures: &[Failure]) -> String {
    failures
        .iter()
        .map(|f| format!("{}: {}", f.resource, f.reason))
        .collect::<Vec<_>>()
        .join(", ")
}
