//! Error types for tonecheck

/// Result type alias using tonecheck's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for tonecheck operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Caller supplied an unusable tone, threshold, or configuration file
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Classification runtime or model files are not available
    #[error("missing dependency: {0}")]
    MissingDependency(String),

    /// Classifier produced no prediction
    #[error("upstream failure: {0}")]
    UpstreamFailure(String),

    /// Classifier output fell outside its documented label set
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// Classifier execution errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML configuration errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a new invalid configuration error
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Create a new missing dependency error
    pub fn missing_dependency(msg: impl Into<String>) -> Self {
        Self::MissingDependency(msg.into())
    }

    /// Create a new upstream failure error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::UpstreamFailure(msg.into())
    }

    /// Create a new contract violation error
    pub fn contract_violation(msg: impl Into<String>) -> Self {
        Self::ContractViolation(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// True when the caller's own input caused the error.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }
}
