use crate::{
    client::{Client, ItemResponse},
    config::{Config, ConfigError},
    error::{Error, Result},
    types::Product,
    CONTAINER_NAME, DATABASE_NAME, PARTITION_KEY_PATH,
};

use reqwest::StatusCode;
use std::{fmt, io::Write};
use tracing::{error, info, warn};

/// How a run ended. Rendered as the final console line(s).
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Created { id: String, request_charge: f64 },
    MissingConfiguration,
    Rejected { status: StatusCode, message: String },
    Failed { message: String },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created { id, request_charge } => {
                writeln!(f, "Created item with ID: {id}")?;
                write!(f, "Request charge: {request_charge} RUs")
            }
            Self::MissingConfiguration => write!(f, "{}", ConfigError::Missing),
            Self::Rejected { status, message } => write!(f, "Cosmos DB Error: {status} - {message}"),
            Self::Failed { message } => write!(f, "Error: {message}"),
        }
    }
}

impl From<ItemResponse<Product>> for Outcome {
    fn from(response: ItemResponse<Product>) -> Self {
        Self::Created {
            id: response.resource.id,
            request_charge: response.request_charge,
        }
    }
}

impl From<Error> for Outcome {
    fn from(err: Error) -> Self {
        match err {
            Error::Service { status, message } => Self::Rejected { status, message },
            Error::Other(err) => Self::Failed {
                message: format!("{err:#}"),
            },
        }
    }
}

impl From<ConfigError> for Outcome {
    fn from(_: ConfigError) -> Self {
        Self::MissingConfiguration
    }
}

/// Provisions the database and container, then inserts one sample product.
#[derive(Debug)]
pub struct Quickstart<C> {
    client: C,
}

impl<C: Client> Quickstart<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub async fn run<W: Write>(&self, out: &mut W) -> Result<ItemResponse<Product>> {
        let database = self.client.ensure_database(DATABASE_NAME).await?;
        info!(
            database = %database.resource.id,
            created = database.created,
            request_charge = database.request_charge,
            "database ready"
        );
        writeln!(out, "Created or retrieved database: {}", database.resource.id)
            .map_err(anyhow::Error::from)?;

        let container = self
            .client
            .ensure_container(&database.resource, CONTAINER_NAME, PARTITION_KEY_PATH)
            .await?;
        info!(
            container = %container.resource.id,
            created = container.created,
            request_charge = container.request_charge,
            "container ready"
        );
        writeln!(out, "Created or retrieved container: {}", container.resource.id)
            .map_err(anyhow::Error::from)?;

        let product = Product::sample();
        let response = self
            .client
            .create_item(&container.resource, product.partition_key(), &product)
            .await?;
        info!(
            id = %response.resource.id,
            request_charge = response.request_charge,
            "item created"
        );

        Ok(response)
    }
}

/// Runs once: builds the client through `connect` only when the
/// configuration is present, then prints the outcome to `out`.
pub async fn execute<C, F, W>(
    config: std::result::Result<Config, ConfigError>,
    connect: F,
    out: &mut W,
) -> Outcome
where
    C: Client,
    F: FnOnce(Config) -> Result<C>,
    W: Write,
{
    let outcome = match config {
        Ok(config) => match connect(config) {
            Ok(client) => match Quickstart::new(client).run(out).await {
                Ok(response) => Outcome::from(response),
                Err(err) => {
                    error!("{err:#}");
                    Outcome::from(err)
                }
            },
            Err(err) => {
                error!("failed to create client: {err:#}");
                Outcome::from(err)
            }
        },
        Err(err) => {
            warn!("{err}");
            Outcome::from(err)
        }
    };

    if let Err(err) = writeln!(out, "{outcome}") {
        error!("failed to write outcome: {err}");
    }

    outcome
}
