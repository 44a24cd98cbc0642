//! Lock-store client

use reqwest::Client;
use tracing::debug;

use crate::error::Result;
use drover_core::dto::lock::LockRecord;

/// HTTP client for the lock-store API
///
/// The dispatcher only ever reads from the lock store; lock writes are
/// owned by the operators' tooling.
#[derive(Debug, Clone)]
pub struct LockStoreClient {
    /// Base URL of the lock store (e.g., "http://localhost:8081")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl LockStoreClient {
    /// Create a new lock-store client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the lock-store API
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new lock-store client with a custom HTTP client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the lock store
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read a lock record with strong consistency
    ///
    /// # Arguments
    /// * `table` - The lock table to read from
    /// * `key` - The lock key
    ///
    /// # Returns
    /// The record if present, `None` otherwise. Absence is a normal answer,
    /// not an error.
    pub async fn get_lock(&self, table: &str, key: &str) -> Result<Option<LockRecord>> {
        let url = format!("{}/api/tables/{}/lock", self.base_url, table);
        debug!("Reading lock {} from table {}", key, table);
        let response = self
            .client
            .get(&url)
            .query(&[("key", key), ("consistent", "true")])
            .send()
            .await?;

        crate::handle_optional_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_client_creation() {
        let client = LockStoreClient::new("http://localhost:8081/");
        assert_eq!(client.base_url(), "http://localhost:8081");
    }
}
