//! @ai:module:intent Walk a source tree and extract every file of one language
//! @ai:module:layer application
//! @ai:module:public_api scan_directory
//! @ai:module:depends_on extractor, language, error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::extractor::{extract_file, FileExtraction};
use crate::language::Language;
use std::path::Path;
use walkdir::WalkDir;

/// @ai:intent Extract records from all `language` files below `dir`
/// @ai:pre dir exists
/// @ai:post files are visited in file-name order, so record order is reproducible
/// @ai:post an unreadable file fails the whole directory; a file with invalid UTF-8 only adds an issue
/// @ai:effects fs:read
pub fn scan_directory(dir: &Path, recursive: bool, language: Language) -> Result<FileExtraction> {
    let mut walker = WalkDir::new(dir).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut result = FileExtraction::default();
    let mut files = 0usize;

    for entry in walker {
        let entry = entry.map_err(|e| Error::Walk {
            path: dir.to_path_buf(),
            source: e,
        })?;

        if !entry.file_type().is_file() || !language.matches(entry.path()) {
            continue;
        }

        result.merge(extract_file(entry.path(), language)?);
        files += 1;
    }

    if files == 0 {
        return Err(Error::NoSourceFiles(
            dir.to_path_buf(),
            language.name().to_string(),
        ));
    }

    Ok(result)
}
