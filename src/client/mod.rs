mod cosmos;
#[cfg(test)]
mod mock;

use crate::{error::Result, types::Product};

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    pub id: String,
}

impl Database {
    pub fn link(&self) -> String {
        format!("dbs/{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub database: String,
    pub id: String,
    pub partition_key_path: String,
}

impl Container {
    pub fn link(&self) -> String {
        format!("dbs/{}/colls/{}", self.database, self.id)
    }
}

/// A resource returned by an idempotent create call.
#[derive(Debug, Clone, PartialEq)]
pub struct Provisioned<T> {
    pub resource: T,
    /// `false` when the resource already existed.
    pub created: bool,
    pub request_charge: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemResponse<T> {
    pub resource: T,
    pub request_charge: f64,
}

#[async_trait]
pub trait Client: Send + Sync {
    async fn ensure_database(&self, id: &str) -> Result<Provisioned<Database>>;
    async fn ensure_container(
        &self,
        database: &Database,
        id: &str,
        partition_key_path: &str,
    ) -> Result<Provisioned<Container>>;
    async fn create_item(
        &self,
        container: &Container,
        partition_key: &str,
        item: &Product,
    ) -> Result<ItemResponse<Product>>;
}

pub use cosmos::{CosmosClient, CosmosClientBuilder};
#[cfg(test)]
pub use mock::{Call, MockClient, Operation};
