//! Task definition types

use serde::{Deserialize, Serialize};

/// Versioned task definition template
///
/// Referenced by family name; the orchestrator requires the exact
/// `family:revision` identifier at launch time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDefinition {
    pub family: String,
    pub revision: u32,
}

impl TaskDefinition {
    /// Renders the versioned identifier the launch call requires.
    pub fn versioned(&self) -> String {
        format!("{}:{}", self.family, self.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioned_identifier() {
        let definition = TaskDefinition {
            family: "svc".to_string(),
            revision: 7,
        };
        assert_eq!(definition.versioned(), "svc:7");
    }
}
