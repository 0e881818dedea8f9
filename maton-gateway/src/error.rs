//! Error types for gateway calls.

use crate::config::ConfigError;

/// Error types for gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Non-2xx answer from the gateway. `body` is kept verbatim.
    #[error("HTTP Error {status}: {body}")]
    Gateway { status: u16, body: String },

    /// 2xx answer whose payload reports a failure.
    #[error("Error: {error}")]
    Application { error: String },

    #[error("Gateway communication error: {0}")]
    Transport(String),

    #[error("Invalid gateway response: {0}")]
    InvalidResponse(String),

    #[error("Failed to encode request body: {0}")]
    Serialization(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    /// HTTP status of a gateway failure, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Gateway { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
