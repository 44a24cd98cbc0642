//! Dispatcher configuration
//!
//! Everything one invocation needs, resolved from the environment up front
//! and treated as immutable afterwards. Nothing reads process-wide state
//! past this point.

use std::time::Duration;

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Orchestrator base URL (e.g., "http://localhost:8080")
    pub orchestrator_url: String,

    /// Lock-store base URL
    pub lock_store_url: String,

    /// Cluster the task runs on
    pub cluster: String,

    /// Task-definition family, resolved to `family:revision` at launch time
    pub task_definition_family: String,

    /// Container whose command gets overridden
    pub container_name: String,

    /// Name of the scheduled task, used in logs and error messages
    pub task_name: String,

    /// Environment name (staging1, staging2, ...)
    pub env_name: String,

    /// Lock-store table holding the maintenance flag
    pub lock_table_name: String,

    /// User-supplied command the task should run
    pub task_command: String,

    /// Region handed through to the remote runner script
    pub region: String,

    /// Name of the invoking function, used in the started-by tag
    pub function_name: String,

    /// Total execution budget for this invocation
    pub invocation_budget: Duration,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - DROVER_ORCHESTRATOR_URL (required)
    /// - DROVER_LOCK_STORE_URL (required)
    /// - DROVER_CLUSTER (required)
    /// - DROVER_TASK_DEFINITION_FAMILY (required)
    /// - DROVER_CONTAINER_NAME (required)
    /// - DROVER_TASK_NAME (required)
    /// - DROVER_ENV_NAME (required)
    /// - DROVER_LOCK_TABLE_NAME (required)
    /// - DROVER_TASK_COMMAND (required)
    /// - DROVER_REGION (required)
    /// - DROVER_FUNCTION_NAME (required)
    /// - DROVER_INVOCATION_BUDGET_SECS (optional, default: 300)
    pub fn from_env() -> anyhow::Result<Self> {
        let invocation_budget = std::env::var("DROVER_INVOCATION_BUDGET_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(300));

        Ok(Self {
            orchestrator_url: required("DROVER_ORCHESTRATOR_URL")?,
            lock_store_url: required("DROVER_LOCK_STORE_URL")?,
            cluster: required("DROVER_CLUSTER")?,
            task_definition_family: required("DROVER_TASK_DEFINITION_FAMILY")?,
            container_name: required("DROVER_CONTAINER_NAME")?,
            task_name: required("DROVER_TASK_NAME")?,
            env_name: required("DROVER_ENV_NAME")?,
            lock_table_name: required("DROVER_LOCK_TABLE_NAME")?,
            task_command: required("DROVER_TASK_COMMAND")?,
            region: required("DROVER_REGION")?,
            function_name: required("DROVER_FUNCTION_NAME")?,
            invocation_budget,
        })
    }

    /// Composite key guarding all launches for this environment
    pub fn maintenance_key(&self) -> String {
        format!("{}|maintenance-mode", self.env_name)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in [
            ("cluster", &self.cluster),
            ("task_definition_family", &self.task_definition_family),
            ("container_name", &self.container_name),
            ("task_name", &self.task_name),
            ("env_name", &self.env_name),
            ("lock_table_name", &self.lock_table_name),
            ("task_command", &self.task_command),
            ("region", &self.region),
            ("function_name", &self.function_name),
        ] {
            if value.is_empty() {
                anyhow::bail!("{} cannot be empty", name);
            }
        }

        for (name, url) in [
            ("orchestrator_url", &self.orchestrator_url),
            ("lock_store_url", &self.lock_store_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
        }

        if self.invocation_budget.is_zero() {
            anyhow::bail!("invocation_budget must be greater than 0");
        }

        Ok(())
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    std::env::var(name).map_err(|_| anyhow::anyhow!("{} environment variable not set", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            orchestrator_url: "http://localhost:8080".to_string(),
            lock_store_url: "http://localhost:8081".to_string(),
            cluster: "staging-cluster".to_string(),
            task_definition_family: "svc".to_string(),
            container_name: "app".to_string(),
            task_name: "billing-report".to_string(),
            env_name: "staging1".to_string(),
            lock_table_name: "locks".to_string(),
            task_command: "generate_report --daily".to_string(),
            region: "eu-west-1".to_string(),
            function_name: "run-scheduled-task".to_string(),
            invocation_budget: Duration::from_secs(300),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_empty_cluster_fails() {
        let mut config = sample();
        config.cluster = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_url_fails() {
        let mut config = sample();
        config.orchestrator_url = "not-a-url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_budget_fails() {
        let mut config = sample();
        config.invocation_budget = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_maintenance_key_format() {
        assert_eq!(sample().maintenance_key(), "staging1|maintenance-mode");
    }
}
