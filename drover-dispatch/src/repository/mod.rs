//! Repository layer
//!
//! Repositories abstract the two remote services behind traits so the
//! dispatcher and poller can be exercised against fabricated doubles.
//! The HTTP implementations delegate to the drover-client crate and carry
//! no business logic.

mod locks;
mod orchestrator;

// Re-export traits
pub use locks::LockStore;
pub use orchestrator::TaskOrchestrator;

// Re-export implementations
pub use locks::HttpLockStore;
pub use orchestrator::HttpTaskOrchestrator;
