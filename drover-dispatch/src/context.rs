//! Invocation context
//!
//! Identity and remaining-budget signal for a single invocation. The budget
//! is the dispatcher's only cancellation mechanism: the poller stops itself
//! once too little of it remains.

use std::time::{Duration, Instant};
use uuid::Uuid;

/// Identity and deadline signal for one invocation
///
/// `remaining_millis` is non-increasing within an invocation, so the poller
/// can use it as a guard without further bookkeeping.
pub trait InvocationContext: Send + Sync {
    /// Stable identifier for this invocation
    fn invocation_id(&self) -> &str;

    /// Milliseconds left until the invoker forcibly terminates us
    fn remaining_millis(&self) -> u64;
}

/// Context backed by a wall-clock deadline measured from construction
pub struct DeadlineContext {
    invocation_id: String,
    deadline: Instant,
}

impl DeadlineContext {
    /// Creates a context whose budget starts counting down immediately
    pub fn new(budget: Duration) -> Self {
        Self {
            invocation_id: Uuid::new_v4().to_string(),
            deadline: Instant::now() + budget,
        }
    }
}

impl InvocationContext for DeadlineContext {
    fn invocation_id(&self) -> &str {
        &self.invocation_id
    }

    fn remaining_millis(&self) -> u64 {
        self.deadline
            .saturating_duration_since(Instant::now())
            .as_millis() as u64
    }
}
