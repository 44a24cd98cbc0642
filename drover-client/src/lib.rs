//! Drover HTTP Clients
//!
//! Type-safe HTTP clients for the two remote services the dispatcher depends
//! on: the cluster orchestrator (launch, describe, definition lookup) and
//! the lock store (maintenance-flag reads).
//!
//! # Example
//!
//! ```no_run
//! use drover_client::OrchestratorClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = OrchestratorClient::new("http://localhost:8080");
//!
//!     let definition = client.latest_definition("billing-report").await?;
//!     if let Some(definition) = definition {
//!         println!("Current revision: {}", definition.versioned());
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
mod definitions;
mod locks;
mod tasks;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use locks::LockStoreClient;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the cluster orchestrator API
///
/// Provides the three operations the dispatcher needs:
/// - Task launch with container command overrides
/// - Task describe by id
/// - Task definition lookup by family
#[derive(Debug, Clone)]
pub struct OrchestratorClient {
    /// Base URL of the orchestrator (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl OrchestratorClient {
    /// Create a new orchestrator client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the orchestrator API
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new orchestrator client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the orchestrator
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// =============================================================================
// Response Handlers
// =============================================================================

/// Handle an API response and deserialize JSON
///
/// Checks the status code and returns an appropriate error if the request
/// failed, or deserializes the response body if successful.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}

/// Handle an API response where 404 means "no such record"
///
/// Both the definition lookup and the lock read use absence as a normal
/// answer rather than an error.
pub(crate) async fn handle_optional_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Option<T>> {
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }

    handle_response(response).await.map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OrchestratorClient::new("http://localhost:8080");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = OrchestratorClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = OrchestratorClient::with_client("http://localhost:8080", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
