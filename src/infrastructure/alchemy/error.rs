use thiserror::Error;

/// Failures of a remote provider call
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("JSON-RPC error: {0}")]
    Rpc(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid endpoint URL: {0}")]
    Endpoint(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
