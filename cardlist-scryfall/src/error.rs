/// Errors that can occur while obtaining the bulk card catalog.
///
/// All of these are fatal for an update run: without a catalog there is
/// nothing to check.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Bulk dataset '{0}' not found in Scryfall bulk-data index")]
    MissingDataset(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn missing_dataset(kind: impl Into<String>) -> Self {
        Self::MissingDataset(kind.into())
    }
}
