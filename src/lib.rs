pub mod client;
pub mod config;
pub mod error;
pub mod quickstart;
pub mod types;

pub use client::{Client, CosmosClient};
pub use config::{Config, ConfigError};
pub use error::{Error, Result};
pub use quickstart::{execute, Outcome, Quickstart};
pub use types::Product;

pub const ENV_DOCUMENT_ENDPOINT: &str = "DOCUMENT_ENDPOINT";
pub const ENV_ACCOUNT_KEY: &str = "ACCOUNT_KEY";

pub const DATABASE_NAME: &str = "myDatabase";
pub const CONTAINER_NAME: &str = "myContainer";
pub const PARTITION_KEY_PATH: &str = "/id";
