//! Lock-store repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use drover_client::LockStoreClient;

/// Repository trait for lock-store reads
#[async_trait]
pub trait LockStore: Send + Sync {
    /// Strongly-consistent presence check for a lock key
    ///
    /// A read failure propagates as an error; masking it could let a launch
    /// through during maintenance.
    async fn lock_exists(&self, table: &str, key: &str) -> Result<bool>;
}

/// HTTP implementation of LockStore
pub struct HttpLockStore {
    client: LockStoreClient,
}

impl HttpLockStore {
    /// Creates a new HTTP lock-store repository
    pub fn new(client: LockStoreClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LockStore for HttpLockStore {
    async fn lock_exists(&self, table: &str, key: &str) -> Result<bool> {
        let record = self
            .client
            .get_lock(table, key)
            .await
            .with_context(|| format!("Failed to read lock {} from table {}", key, table))?;

        Ok(record.is_some())
    }
}
