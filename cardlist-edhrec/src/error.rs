/// Errors from setting up or talking to the card page service.
///
/// These never escape [`crate::ValidityOracle::check`]; they only describe
/// why a check came back negative, or why the client could not be built.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Response is not JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response is missing card fields")]
    MissingFields,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl OracleError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
