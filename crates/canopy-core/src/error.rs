use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use canopy_loader::LoadError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("server host must not be empty")]
    EmptyHost,

    #[error("port {port} is out of range (expected 1..=65535)")]
    PortOutOfRange { port: i64 },

    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse configuration {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to encode configuration: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("failed to write configuration {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Connection-establishment failures (`Resolve`, `Connect`) are kept
/// distinct from `Transfer`, which only occurs after the stream was up.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("could not resolve {endpoint}: {source}")]
    Resolve {
        endpoint: String,
        #[source]
        source: io::Error,
    },

    #[error("could not connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: io::Error,
    },

    #[error("transfer to {endpoint} failed after {bytes_sent} bytes: {source}")]
    Transfer {
        endpoint: String,
        bytes_sent: usize,
        #[source]
        source: io::Error,
    },
}

impl ConnectionError {
    /// True when the stream was never established.
    pub fn is_establishment_failure(&self) -> bool {
        matches!(
            self,
            ConnectionError::Resolve { .. } | ConnectionError::Connect { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("file error: {0}")]
    Load(#[from] LoadError),

    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),

    #[error("payload encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
