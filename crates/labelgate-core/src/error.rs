//! Error types for labelgate

/// Result type alias using labelgate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for labelgate operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid construction-time configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Failure reported by a classifier
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Operation intentionally not supported yet
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Filesystem errors while loading configuration
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML (de)serialization errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new unsupported-operation error
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Whether this error came from configuration validation
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Yaml(_) | Self::Serialization(_))
    }

    /// Whether this error marks an unimplemented extension point
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}
