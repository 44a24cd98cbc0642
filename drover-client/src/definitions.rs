//! Task definition endpoints

use crate::OrchestratorClient;
use crate::error::Result;
use drover_core::domain::definition::TaskDefinition;

impl OrchestratorClient {
    /// Look up the current definition for a family
    ///
    /// # Arguments
    /// * `family` - The task-definition family name
    ///
    /// # Returns
    /// The current definition, or `None` when the orchestrator knows no
    /// definition for the family.
    pub async fn latest_definition(&self, family: &str) -> Result<Option<TaskDefinition>> {
        let url = format!("{}/api/task-definitions/{}/latest", self.base_url, family);
        let response = self.client.get(&url).send().await?;

        crate::handle_optional_response(response).await
    }
}
