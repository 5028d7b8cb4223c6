//! @ai:module:intent Input source descriptors and the extraction seam
//! @ai:module:layer application
//! @ai:module:public_api InputOptions, Extractor, SourceExtractor, Extraction
//! @ai:module:depends_on diagnostics, error, vars

use crate::diagnostics::Diagnostics;
use crate::error::{Error, OptionsError, Result};
use crate::vars;
use apidoc_parser::{scan_directory, Language};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Records, metadata and syntax issues extracted from one input source.
pub type Extraction = apidoc_parser::FileExtraction;

/// @ai:intent One source tree to document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputOptions {
    #[serde(default)]
    pub dir: PathBuf,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default)]
    pub lang: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub encoding: String,

    /// Bound by the config loader, never read from the file.
    #[serde(skip)]
    pub diagnostics: Option<Diagnostics>,
}

impl InputOptions {
    /// @ai:intent Validate and normalize the descriptor
    /// @ai:post on success `encoding` is lowercase and non-empty
    /// @ai:effects fs:read
    pub fn sanitize(&mut self) -> std::result::Result<(), OptionsError> {
        if self.dir.as_os_str().is_empty() {
            return Err(OptionsError::required("dir"));
        }

        if !self.dir.is_dir() {
            return Err(OptionsError::new("dir", "directory does not exist"));
        }

        if self.lang.is_empty() {
            return Err(OptionsError::required("lang"));
        }

        if self.language().is_none() {
            return Err(OptionsError::new(
                "lang",
                format!("unsupported language: {}", self.lang),
            ));
        }

        if self.encoding.is_empty() {
            self.encoding = vars::SUPPORTED_ENCODINGS[0].to_string();
        }
        self.encoding = self.encoding.to_lowercase();

        if !vars::SUPPORTED_ENCODINGS.contains(&self.encoding.as_str()) {
            return Err(OptionsError::new(
                "encoding",
                format!("unsupported encoding: {}", self.encoding),
            ));
        }

        Ok(())
    }

    /// @ai:intent Resolve the configured language name
    /// @ai:effects pure
    pub fn language(&self) -> Option<Language> {
        Language::from_name(&self.lang)
    }

    /// @ai:intent Sinks bound by the loader, or tracing sinks for unbound descriptors
    /// @ai:effects pure
    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics.clone().unwrap_or_default()
    }
}

/// @ai:intent Pulls API records out of one input source
/// @ai:effects fs:read
pub trait Extractor: Send + Sync {
    /// @ai:intent Extract everything documented in the source
    /// @ai:pre input has been sanitized
    fn extract(&self, input: &InputOptions) -> Result<Extraction>;
}

/// @ai:intent Extractor scanning comment blocks on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceExtractor;

impl Extractor for SourceExtractor {
    /// @ai:effects fs:read
    fn extract(&self, input: &InputOptions) -> Result<Extraction> {
        let language = input.language().ok_or_else(|| {
            Error::Options(OptionsError::new(
                "lang",
                format!("unsupported language: {}", input.lang),
            ))
        })?;

        Ok(scan_directory(&input.dir, input.recursive, language)?)
    }
}
