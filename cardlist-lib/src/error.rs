use thiserror::Error;

/// Errors reading or writing the persisted card list.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// I/O error on the artifact file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required marker is absent from the script artifact
    #[error("Could not find {0:?} marker")]
    MissingMarker(&'static str),

    /// JSON artifact could not be parsed or written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors loading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

impl SettingsError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}
