use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SAMPLE_NAME: &str = "Sample Item";
pub const SAMPLE_DESCRIPTION: &str = "This is a sample item in my Azure Cosmos DB exercise.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Product {
    /// Builds a product under a freshly generated id.
    pub fn new<N, D>(name: N, description: D) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn sample() -> Self {
        Self::new(SAMPLE_NAME, SAMPLE_DESCRIPTION)
    }

    pub fn partition_key(&self) -> &str {
        self.id.as_str()
    }
}
