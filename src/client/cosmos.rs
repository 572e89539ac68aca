use super::{Client, Container, Database, ItemResponse, Product, Provisioned};
use crate::{
    config::Config,
    error::{Error, Result},
};

use async_trait::async_trait;
use azure_core::{
    credentials::Secret,
    error::ErrorKind,
    http::{
        headers::{HeaderName, Headers},
        TransportOptions,
    },
};
use azure_data_cosmos::{
    models::ContainerProperties, CosmosClient as SdkClient, CosmosClientOptions, PartitionKey,
    PartitionKeyValue,
};
use reqwest::{StatusCode, Url};
use std::sync::Arc;
use tracing::{debug, warn};

const REQUEST_CHARGE: HeaderName = HeaderName::from_static("x-ms-request-charge");

const EMULATOR_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

pub struct CosmosClient {
    client: SdkClient,
}

#[derive(Debug)]
pub struct CosmosClientBuilder {
    endpoint_url: String,
    account_key: String,
}

impl CosmosClientBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            endpoint_url: config.endpoint_url().to_string(),
            account_key: config.account_key().to_string(),
        }
    }

    pub fn build(self) -> Result<CosmosClient> {
        let mut options = CosmosClientOptions::default();

        // The local emulator serves a self-signed certificate.
        if is_emulator(&self.endpoint_url) {
            debug!("accepting invalid certificates for {}", self.endpoint_url);
            let http_client = reqwest::ClientBuilder::new()
                .danger_accept_invalid_certs(true)
                .build()
                .map_err(anyhow::Error::from)?;
            options.client_options.transport = Some(TransportOptions::new(Arc::new(http_client)));
        }

        let client = SdkClient::with_key(
            &self.endpoint_url,
            Secret::from(self.account_key),
            Some(options),
        )
        .map_err(anyhow::Error::from)?;

        Ok(CosmosClient { client })
    }
}

#[async_trait]
impl Client for CosmosClient {
    async fn ensure_database(&self, id: &str) -> Result<Provisioned<Database>> {
        let (created, request_charge) = match self.client.create_database(id, None).await {
            Ok(response) => (true, request_charge(response.headers())),
            Err(err) if is_conflict(&err) => {
                debug!("database `{id}` already exists");
                (false, 0.0)
            }
            Err(err) => return Err(from_cosmos_err(err)),
        };

        Ok(Provisioned {
            resource: Database { id: id.into() },
            created,
            request_charge,
        })
    }

    async fn ensure_container(
        &self,
        database: &Database,
        id: &str,
        partition_key_path: &str,
    ) -> Result<Provisioned<Container>> {
        let properties = ContainerProperties {
            id: id.to_string().into(),
            partition_key: partition_key_path.into(),
            ..Default::default()
        };

        let (created, request_charge) = match self
            .client
            .database_client(&database.id)
            .create_container(properties, None)
            .await
        {
            Ok(response) => (true, request_charge(response.headers())),
            Err(err) if is_conflict(&err) => {
                debug!("container `{id}` already exists in `{}`", database.id);
                (false, 0.0)
            }
            Err(err) => return Err(from_cosmos_err(err)),
        };

        Ok(Provisioned {
            resource: Container {
                database: database.id.clone(),
                id: id.into(),
                partition_key_path: partition_key_path.into(),
            },
            created,
            request_charge,
        })
    }

    async fn create_item(
        &self,
        container: &Container,
        partition_key: &str,
        item: &Product,
    ) -> Result<ItemResponse<Product>> {
        let partition_key = partition_key.to_string();
        let response = self
            .client
            .database_client(&container.database)
            .container_client(&container.id)
            .create_item(
                PartitionKey::from(PartitionKeyValue::from(&partition_key)),
                item,
                None,
            )
            .await
            .map_err(from_cosmos_err)?;

        // Writes return no content by default; the persisted record is the one sent.
        Ok(ItemResponse {
            resource: item.clone(),
            request_charge: request_charge(response.headers()),
        })
    }
}

impl CosmosClient {
    pub fn builder(config: Config) -> CosmosClientBuilder {
        CosmosClientBuilder::new(config)
    }
}

fn is_emulator(endpoint_url: &str) -> bool {
    Url::parse(endpoint_url)
        .ok()
        .and_then(|url| url.host_str().map(|host| EMULATOR_HOSTS.contains(&host)))
        .unwrap_or(false)
}

fn request_charge(headers: &Headers) -> f64 {
    headers
        .get_optional_str(&REQUEST_CHARGE)
        .and_then(|value| value.parse::<f64>().ok())
        .unwrap_or_default()
}

fn status_code(err: &azure_core::Error) -> Option<u16> {
    match err.kind() {
        ErrorKind::HttpResponse { status, .. } => Some(u16::from(*status)),
        _ => None,
    }
}

fn is_conflict(err: &azure_core::Error) -> bool {
    status_code(err) == Some(StatusCode::CONFLICT.as_u16())
}

fn from_cosmos_err(err: azure_core::Error) -> Error {
    match status_code(&err).and_then(|code| StatusCode::from_u16(code).ok()) {
        Some(status) => {
            warn!("operation rejected with {status}");
            Error::service(status, err.to_string())
        }
        None => Error::from(anyhow::Error::from(err)),
    }
}
