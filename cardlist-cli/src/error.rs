use thiserror::Error;

/// Errors that end a CLI run with a non-zero exit status.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Settings file or overrides are invalid
    #[error("Config error: {0}")]
    Config(#[from] cardlist_lib::SettingsError),

    /// Catalog could not be downloaded or parsed
    #[error("Catalog error: {0}")]
    Catalog(#[from] cardlist_scryfall::CatalogError),

    /// Card page client could not be set up
    #[error("Oracle error: {0}")]
    Oracle(#[from] cardlist_edhrec::OracleError),

    /// The updated list could not be written
    #[error("Write error: {0}")]
    Artifact(#[from] cardlist_lib::ArtifactError),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
