//! Error types for the property inspection core
//!
//! None of these cross the editing surface: entries match on them and
//! degrade to "no visible change". They are returned only by config
//! loading, text coercion, and [`Inspectable::set`](crate::Inspectable::set).

use thiserror::Error;

/// Errors raised while loading or saving inspector configuration
#[derive(Debug, Error)]
pub enum InspectorError {
    /// Config file could not be read or written
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`InspectorConfig`](crate::InspectorConfig)
    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Result type alias for inspector operations
pub type InspectorResult<T> = Result<T, InspectorError>;

/// Failure to turn display text into a property's native value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    /// Text is malformed for the target type
    #[error("Cannot convert {text:?} to {target}: {reason}")]
    Invalid {
        text: String,
        target: String,
        reason: String,
    },

    /// No string converter exists for the target type
    #[error("No string conversion available for {target}")]
    Unsupported { target: String },
}

/// Failure to write a property on an inspected instance
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccessError {
    /// The instance has no property with this name
    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    /// The property rejects writes
    #[error("Property {0} is read-only")]
    ReadOnly(String),

    /// The value does not fit the property's declared type
    #[error("Property {property} expects {expected}, got {actual}")]
    TypeMismatch {
        property: String,
        expected: String,
        actual: String,
    },
}
