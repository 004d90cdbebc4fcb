// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! Looking up a key that resolves to nothing is not an error: queries return
//! [`Property::Absent`](crate::domain::Property::Absent) instead. The variants
//! below cover conversions, builder failures and event type registration.

use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// It is marked as `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use hiercfg::domain::errors::ConfigError;
///
/// fn required_host() -> Result<String, ConfigError> {
///     Err(ConfigError::PropertyNotFound {
///         key: "database.host".to_string(),
///     })
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A typed getter was asked for a key that resolves to no value.
    #[error("Configuration property not found: {key}")]
    PropertyNotFound {
        /// The key that was not found
        key: String,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An error occurred while reading a configuration source.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse or serialize configuration text.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The factory behind a configuration builder failed to create a result.
    #[error("Failed to build configuration: {message}")]
    BuildError {
        /// The error message
        message: String,
        /// The underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Declaring event types produced a super-type cycle.
    #[error("Event type '{name}' is part of a super-type cycle")]
    EventTypeCycle {
        /// A type name on the cycle
        name: String,
    },

    /// An event type declaration refers to an unknown super-type.
    #[error("Unknown event type: {name}")]
    UnknownEventType {
        /// The name that could not be resolved
        name: String,
    },

    /// An event listener failed while handling an event.
    #[error("Event listener failed: {message}")]
    ListenerError {
        /// The error message
        message: String,
        /// The underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a TypeConversionError from a ParseIntError.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "integer".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseFloatError.
    pub fn from_parse_float_error(key: String, err: ParseFloatError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "float".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseBoolError.
    pub fn from_parse_bool_error(key: String, err: ParseBoolError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "boolean".to_string(),
            source: Box::new(err),
        }
    }

    /// Wraps a factory failure as a [`ConfigError::BuildError`].
    ///
    /// Errors that already are build errors are passed through untouched.
    pub fn build(message: impl Into<String>, err: ConfigError) -> Self {
        match err {
            e @ ConfigError::BuildError { .. } => e,
            other => ConfigError::BuildError {
                message: message.into(),
                source: Some(Box::new(other)),
            },
        }
    }

    /// Creates a ListenerError with a plain message.
    pub fn listener(message: impl Into<String>) -> Self {
        ConfigError::ListenerError {
            message: message.into(),
            source: None,
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
