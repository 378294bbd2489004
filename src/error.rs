//! Error types for streetplot.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreetError {
    /// The drawing surface was not available when the component initialized.
    #[error("street drawing surface is missing")]
    MissingSurface,

    #[error("street component is already initialized")]
    AlreadyInitialized,

    /// `init` after `teardown`; a torn-down component stays inert.
    #[error("street component was torn down")]
    TornDown,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StreetError>;
