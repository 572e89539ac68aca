use crate::{ENV_ACCOUNT_KEY, ENV_DOCUMENT_ENDPOINT};

use std::{collections::HashMap, env, fmt, path::Path};
use thiserror::Error;
use tracing::{debug, warn};
use validator::Validate;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Please set the DOCUMENT_ENDPOINT and ACCOUNT_KEY environment variables.")]
    Missing,
}

/// Connection descriptor for the document service.
#[derive(Clone, Validate)]
pub struct Config {
    #[validate(length(min = 1))]
    endpoint_url: String,
    #[validate(length(min = 1))]
    account_key: String,
}

impl Config {
    pub fn new<E, K>(endpoint_url: E, account_key: K) -> Result<Self, ConfigError>
    where
        E: Into<String>,
        K: Into<String>,
    {
        let config = Self {
            endpoint_url: endpoint_url.into(),
            account_key: account_key.into(),
        };

        config.validate().map_err(|err| {
            warn!("{:#?}", err);
            ConfigError::Missing
        })?;

        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_dotenv(".env")
    }

    /// Entries of the dotenv file at `path` win over the process environment.
    /// A missing or unreadable file leaves only the process environment.
    pub fn from_dotenv<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let entries: HashMap<String, String> = match dotenvy::from_path_iter(path) {
            Ok(iter) => {
                debug!("loading environment from {}", path.display());
                iter.filter_map(|item| {
                    item.map_err(|err| warn!("skipping malformed entry: {err}"))
                        .ok()
                })
                .collect()
            }
            Err(err) => {
                debug!("no dotenv file loaded from {}: {err}", path.display());
                HashMap::new()
            }
        };

        Self::from_lookup(|key| entries.get(key).cloned().or_else(|| env::var(key).ok()))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint_url = lookup(ENV_DOCUMENT_ENDPOINT).unwrap_or_default();
        let account_key = lookup(ENV_ACCOUNT_KEY).unwrap_or_default();
        Self::new(endpoint_url, account_key)
    }

    pub fn endpoint_url(&self) -> &str {
        self.endpoint_url.as_str()
    }

    pub fn account_key(&self) -> &str {
        self.account_key.as_str()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("endpoint_url", &self.endpoint_url)
            .field("account_key", &"<redacted>")
            .finish()
    }
}
