//! @ai:module:intent Define error types for the apidoc parser
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result, SyntaxIssue
//! @ai:module:stateless true

use crate::api::Location;
use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for all parser operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Directory {0} contains no {1} files")]
    NoSourceFiles(PathBuf, String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// @ai:intent A malformed comment block; only that block is dropped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("syntax error at {location}: {message}")]
pub struct SyntaxIssue {
    pub location: Location,
    pub message: String,
}

impl SyntaxIssue {
    /// @ai:intent Create an issue for a line of a file
    pub fn new(file: PathBuf, line: usize, message: impl Into<String>) -> Self {
        Self {
            location: Location::new(file, line),
            message: message.into(),
        }
    }
}
