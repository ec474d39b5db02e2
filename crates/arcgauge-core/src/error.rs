//! Error types for arcgauge.

use thiserror::Error;

/// Errors that can occur while building or updating a gauge.
#[derive(Debug, Error)]
pub enum GaugeError {
    /// The rendering surface rejected an operation.
    #[error("Surface error: {0}")]
    Surface(String),

    /// A node handle does not belong to the surface it was used with.
    #[error("Unknown node: {0}")]
    UnknownNode(usize),

    /// The mount element could not be found.
    #[error("Mount element not found: {0}")]
    MissingMount(String),

    /// JSON configuration could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GaugeError>;
