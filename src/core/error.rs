//! Error types for the GELF target

pub type Result<T> = std::result::Result<T, GelfError>;

#[derive(Debug, thiserror::Error)]
pub enum GelfError {
    /// Level is not one of the recognized internal levels
    #[error("Level \"{level}\" does not exist")]
    InvalidLevel { level: String },

    /// Level has no syslog severity mapping
    #[error("No syslog severity is mapped for level \"{level}\"")]
    UnknownLevel { level: String },

    /// Additional field key was empty
    #[error("Additional field key cannot be empty")]
    EmptyKey,

    /// Lookup of an additional field that was never set
    #[error("Additional key '{key}' is not defined")]
    UndefinedKey { key: String },

    /// Message rejected by the validator
    #[error("Message validation failed: {reason}")]
    ValidationFailed { reason: String },

    /// Transport could not deliver the payload
    #[error("Transport '{transport}' failed: {message}")]
    TransportFailed {
        transport: String,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Payload needs more UDP chunks than GELF allows
    #[error("Message too large: {chunks} chunks needed, at most {max} allowed")]
    ChunkLimitExceeded { chunks: usize, max: usize },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl GelfError {
    /// Create an invalid level error
    pub fn invalid_level(level: impl ToString) -> Self {
        GelfError::InvalidLevel {
            level: level.to_string(),
        }
    }

    /// Create an unknown level error
    pub fn unknown_level(level: impl ToString) -> Self {
        GelfError::UnknownLevel {
            level: level.to_string(),
        }
    }

    /// Create an undefined additional key error
    pub fn undefined_key(key: impl Into<String>) -> Self {
        GelfError::UndefinedKey { key: key.into() }
    }

    /// Create a validation error
    pub fn validation(reason: impl Into<String>) -> Self {
        GelfError::ValidationFailed {
            reason: reason.into(),
        }
    }

    /// Create a transport error without an underlying IO cause
    pub fn transport(transport: impl Into<String>, message: impl Into<String>) -> Self {
        GelfError::TransportFailed {
            transport: transport.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a transport error wrapping the IO error that caused it
    pub fn transport_io(
        transport: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        GelfError::TransportFailed {
            transport: transport.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        GelfError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Whether the error came from a delivery collaborator rather than the message model
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GelfError::TransportFailed { .. } | GelfError::ChunkLimitExceeded { .. }
        )
    }
}
