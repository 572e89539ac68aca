use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The service answered with a non-success status.
    #[error("{status} - {message}")]
    Service { status: StatusCode, message: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn service<M: Into<String>>(status: StatusCode, message: M) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Service { status, .. } => Some(*status),
            Self::Other(_) => None,
        }
    }
}
