//! Error types for the Sterling B2Bi client

use thiserror::Error;

/// Result type alias for Sterling B2Bi operations
pub type SterlingResult<T> = Result<T, SterlingError>;

/// Sterling B2Bi client error types
#[derive(Debug, Error)]
pub enum SterlingError {
    #[error("Missing required configuration: {var} environment variable is not set.")]
    MissingConfig { var: &'static str },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid characters in trading partner search filter: {0:?}")]
    InvalidSearchFilter(String),

    #[error("Invalid trading partner id: {0:?}")]
    InvalidPartnerId(String),

    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("Transport failure calling {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl SterlingError {
    /// Error category used as a structured log field
    pub fn category(&self) -> &'static str {
        match self {
            SterlingError::MissingConfig { .. }
            | SterlingError::InvalidConfig(_)
            | SterlingError::Client(_) => "configuration",
            SterlingError::InvalidSearchFilter(_) | SterlingError::InvalidPartnerId(_) => {
                "validation"
            }
            SterlingError::Status { .. } => "remote",
            SterlingError::Transport { .. } => "transport",
            SterlingError::Decode { .. } => "decode",
        }
    }

    /// Whether this error should stop the process from starting
    pub fn is_config(&self) -> bool {
        self.category() == "configuration"
    }

    /// HTTP status of a remote failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            SterlingError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
