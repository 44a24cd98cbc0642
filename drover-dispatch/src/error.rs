//! Fatal dispatch errors
//!
//! Every variant unwinds the whole invocation. Nothing here is retried; a
//! scheduler that re-invokes the dispatcher owns any retry policy.

use thiserror::Error;

/// Fatal conditions a dispatch invocation can end in
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The task-definition family has no registered definition
    #[error("no task definition found for family '{0}'")]
    DefinitionNotFound(String),

    /// The orchestrator rejected the launch
    #[error("launch failed for task {task_name}; {detail}")]
    LaunchRejected { task_name: String, detail: String },

    /// The orchestrator reported failures while the task was starting
    #[error("describe failed for task {task_id}; {detail}")]
    PollRejected { task_id: String, detail: String },

    /// The invocation budget ran low before the task left the starting state
    #[error("task {task_id} never started before the invocation deadline")]
    PollTimedOut { task_id: String },
}
