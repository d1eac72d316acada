use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Network,
    Remote,
    Parse,
    InvalidConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("remote error {status}: {message}")]
    Remote { status: u16, message: String },
    #[error("unexpected response shape: {0}")]
    Parse(String),
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl SearchError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Remote { .. } => ErrorKind::Remote,
            Self::Parse(_) => ErrorKind::Parse,
            Self::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }
}
