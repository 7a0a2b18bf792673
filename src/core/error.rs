//! Error types for the logger facade

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (configuration) error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Filter bitmask outside its valid range
    #[error("Invalid {kind} filter {value}: expected a value in [0, {max}]")]
    InvalidFilter {
        kind: &'static str,
        value: i64,
        max: u32,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Capability not available on this platform
    #[error("{capability} is not supported on this platform")]
    Unsupported { capability: &'static str },

    /// Destination failed to render or emit a message
    #[error("Destination '{name}' failed: {message}")]
    DestinationError { name: String, message: String },

    /// Time formatting or parsing failure
    #[error("Time format error ({format}): {message}")]
    TimeFormatError { format: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an out-of-range filter error
    pub fn invalid_filter(kind: &'static str, value: i64, max: u32) -> Self {
        LoggerError::InvalidFilter { kind, value, max }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported capability error
    pub fn unsupported(capability: &'static str) -> Self {
        LoggerError::Unsupported { capability }
    }

    /// Create a destination error
    pub fn destination(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::DestinationError {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a time format error
    pub fn time_format(format: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::TimeFormatError {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
