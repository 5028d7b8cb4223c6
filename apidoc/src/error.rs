//! @ai:module:intent Define error types for the apidoc pipeline
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result, OptionsError
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent A configuration value failed validation
/// @ai:invariant field is a dotted path such as `inputs[1].lang` or `outputs.dir`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("config option [{field}] error: {message}")]
pub struct OptionsError {
    pub field: String,
    pub message: String,
}

impl OptionsError {
    /// @ai:intent Create an error for a field
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// @ai:intent Error for a missing required value
    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, "must not be empty")
    }

    /// @ai:intent Error for a value in the wrong format
    pub fn invalid_format(field: impl Into<String>) -> Self {
        Self::new(field, "invalid format")
    }

    /// @ai:intent Nest the field path under a parent path
    /// @ai:example ("inputs[0].") on field "lang" -> "inputs[0].lang"
    pub fn prefixed(mut self, prefix: &str) -> Self {
        self.field = format!("{}{}", prefix, self.field);
        self
    }
}

/// @ai:intent Unified error type for the apidoc pipeline
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Failed to write config file {path}: {message}")]
    ConfigWrite { path: PathBuf, message: String },

    #[error("Failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to publish static assets into {path}: {source}")]
    Assets {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Extract(#[from] apidoc_parser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
