//! @ai:module:intent The merged document all input sources contribute to
//! @ai:module:layer domain
//! @ai:module:public_api Doc
//! @ai:module:depends_on input, vars

use crate::input::Extraction;
use crate::vars;
use apidoc_parser::{Api, DocInfo};

/// @ai:intent Aggregate of every record and the document metadata
/// @ai:invariant only mutated by the dispatcher after all extraction tasks joined
#[derive(Debug, Clone, Default)]
pub struct Doc {
    pub info: DocInfo,
    pub apis: Vec<Api>,
}

impl Doc {
    /// @ai:intent Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Fold one source's extraction into the document
    /// @ai:post metadata fields set by an earlier merge are kept
    /// @ai:effects pure
    pub fn merge(&mut self, extraction: Extraction) {
        if let Some(info) = &extraction.doc {
            self.info.fill_from(info);
        }
        self.apis.extend(extraction.apis);
    }

    /// @ai:intent Apply defaults once aggregation is complete
    /// @ai:effects pure
    pub fn finalize(&mut self) {
        if self.info.title.is_empty() {
            self.info.title = vars::DEFAULT_TITLE.to_string();
        }
    }
}
