//! Lock-store DTOs

use serde::{Deserialize, Serialize};

/// A lock record read from the lock store
///
/// Only its presence carries meaning for the maintenance gate; the payload
/// is never inspected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockRecord {
    pub key: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
