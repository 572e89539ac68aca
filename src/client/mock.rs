use super::{Client, Container, Database, ItemResponse, Product, Provisioned};
use crate::error::{Error, Result};

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    EnsureDatabase,
    EnsureContainer,
    CreateItem,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    EnsureDatabase {
        id: String,
    },
    EnsureContainer {
        database: String,
        id: String,
        partition_key_path: String,
    },
    CreateItem {
        container: String,
        partition_key: String,
        item: Product,
    },
}

impl Call {
    pub fn operation(&self) -> Operation {
        match self {
            Self::EnsureDatabase { .. } => Operation::EnsureDatabase,
            Self::EnsureContainer { .. } => Operation::EnsureContainer,
            Self::CreateItem { .. } => Operation::CreateItem,
        }
    }
}

#[derive(Debug, Clone)]
enum Failure {
    Service(StatusCode, String),
    Other(String),
}

impl From<Failure> for Error {
    fn from(failure: Failure) -> Self {
        match failure {
            Failure::Service(status, message) => Error::service(status, message),
            Failure::Other(message) => Error::from(anyhow::anyhow!(message)),
        }
    }
}

#[derive(Debug, Default)]
pub struct Store {
    pub databases: Vec<String>,
    pub containers: Vec<(String, String)>,
    pub items: Vec<Product>,
}

/// In-memory client. Clones share the call log, the store and the scripted
/// failures.
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    calls: Arc<Mutex<Vec<Call>>>,
    store: Arc<Mutex<Store>>,
    failures: Arc<Mutex<Vec<(Operation, Failure)>>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&self, operation: Operation, status: StatusCode, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .push((operation, Failure::Service(status, message.into())));
    }

    pub fn fail(&self, operation: Operation, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .push((operation, Failure::Other(message.into())));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn operations(&self) -> Vec<Operation> {
        self.calls().iter().map(Call::operation).collect()
    }

    pub fn with_store<T, F: FnOnce(&Store) -> T>(&self, f: F) -> T {
        f(&self.store.lock().unwrap())
    }

    fn record(&self, call: Call) -> Result<()> {
        let operation = call.operation();
        self.calls.lock().unwrap().push(call);

        let failures = self.failures.lock().unwrap();
        match failures.iter().find(|(op, _)| *op == operation) {
            Some((_, failure)) => Err(failure.clone().into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Client for MockClient {
    async fn ensure_database(&self, id: &str) -> Result<Provisioned<Database>> {
        self.record(Call::EnsureDatabase { id: id.into() })?;

        let mut store = self.store.lock().unwrap();
        let created = !store.databases.iter().any(|d| d == id);
        if created {
            store.databases.push(id.into());
        }

        Ok(Provisioned {
            resource: Database { id: id.into() },
            created,
            request_charge: 1.0,
        })
    }

    async fn ensure_container(
        &self,
        database: &Database,
        id: &str,
        partition_key_path: &str,
    ) -> Result<Provisioned<Container>> {
        self.record(Call::EnsureContainer {
            database: database.id.clone(),
            id: id.into(),
            partition_key_path: partition_key_path.into(),
        })?;

        let mut store = self.store.lock().unwrap();
        let key = (database.id.clone(), id.to_string());
        let created = !store.containers.contains(&key);
        if created {
            store.containers.push(key);
        }

        Ok(Provisioned {
            resource: Container {
                database: database.id.clone(),
                id: id.into(),
                partition_key_path: partition_key_path.into(),
            },
            created,
            request_charge: 1.0,
        })
    }

    async fn create_item(
        &self,
        container: &Container,
        partition_key: &str,
        item: &Product,
    ) -> Result<ItemResponse<Product>> {
        self.record(Call::CreateItem {
            container: container.link(),
            partition_key: partition_key.into(),
            item: item.clone(),
        })?;

        let mut store = self.store.lock().unwrap();
        if store.items.iter().any(|i| i.id == item.id) {
            return Err(Error::service(StatusCode::CONFLICT, "Resource already exists"));
        }
        store.items.push(item.clone());

        Ok(ItemResponse {
            resource: item.clone(),
            request_charge: 6.29,
        })
    }
}

#[tokio::test]
async fn mock_client_is_idempotent_on_provisioning() {
    let client = MockClient::new();

    let first = client.ensure_database("myDatabase").await.unwrap();
    let second = client.ensure_database("myDatabase").await.unwrap();
    assert!(first.created);
    assert!(!second.created);

    let database = second.resource;
    let first = client
        .ensure_container(&database, "myContainer", "/id")
        .await
        .unwrap();
    let second = client
        .ensure_container(&database, "myContainer", "/id")
        .await
        .unwrap();
    assert!(first.created);
    assert!(!second.created);

    client.with_store(|store| {
        assert_eq!(store.databases, vec!["myDatabase".to_string()]);
        assert_eq!(store.containers.len(), 1);
    });
}

#[tokio::test]
async fn mock_client_returns_scripted_failure() {
    let client = MockClient::new();
    client.reject(
        Operation::EnsureDatabase,
        StatusCode::TOO_MANY_REQUESTS,
        "Request rate is large",
    );

    let err = client.ensure_database("myDatabase").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::TOO_MANY_REQUESTS));
    assert_eq!(client.operations(), vec![Operation::EnsureDatabase]);
    client.with_store(|store| assert!(store.databases.is_empty()));
}
