use thiserror::Error;

/// Errors from talking to the photo API
#[derive(Debug, Error)]
pub enum FetchError {
    /// No client id in the config file or the environment
    #[error("No API client id configured (set api.client_id or {env})")]
    MissingClientId { env: &'static str },

    /// Base URL could not be turned into a request URL
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connection, TLS or timeout failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not the expected JSON
    #[error("Unexpected API response: {0}")]
    Decode(#[from] serde_json::Error),
}
