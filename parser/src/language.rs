//! @ai:module:intent Source languages apidoc can read and how each writes comments
//! @ai:module:layer domain
//! @ai:module:public_api Language, CommentStyle, detect_language, detect_dir_language
//! @ai:module:stateless true

use std::collections::HashMap;
use std::path::Path;
use walkdir::WalkDir;

/// @ai:intent A source language whose comments may carry @api blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Rust,
    Go,
    C,
    Cpp,
    Java,
    JavaScript,
    TypeScript,
    Python,
    Php,
    Ruby,
}

/// @ai:intent Comment delimiters used to find doc blocks
#[derive(Debug, Clone)]
pub struct CommentStyle {
    pub single_line: Vec<&'static str>,
    pub block_start: Option<&'static str>,
    pub block_end: Option<&'static str>,
    pub block_line_prefix: Option<&'static str>,
}

const ALL: [Language; 10] = [
    Language::Rust,
    Language::Go,
    Language::C,
    Language::Cpp,
    Language::Java,
    Language::JavaScript,
    Language::TypeScript,
    Language::Python,
    Language::Php,
    Language::Ruby,
];

impl Language {
    /// @ai:intent List every supported language
    /// @ai:effects pure
    pub fn all() -> &'static [Language] {
        &ALL
    }

    /// @ai:intent Delimiters recognized when scanning this language
    /// @ai:effects pure
    pub fn comment_style(&self) -> CommentStyle {
        match self {
            Language::Rust => CommentStyle {
                single_line: vec!["///", "//!", "//"],
                block_start: Some("/*"),
                block_end: Some("*/"),
                block_line_prefix: Some("*"),
            },
            Language::Python => CommentStyle {
                single_line: vec!["#"],
                block_start: Some("\"\"\""),
                block_end: Some("\"\"\""),
                block_line_prefix: None,
            },
            Language::Ruby => CommentStyle {
                single_line: vec!["#"],
                block_start: Some("=begin"),
                block_end: Some("=end"),
                block_line_prefix: None,
            },
            Language::Php => CommentStyle {
                single_line: vec!["//", "#"],
                block_start: Some("/*"),
                block_end: Some("*/"),
                block_line_prefix: Some("*"),
            },
            Language::Go
            | Language::C
            | Language::Cpp
            | Language::Java
            | Language::JavaScript
            | Language::TypeScript => CommentStyle {
                single_line: vec!["//"],
                block_start: Some("/*"),
                block_end: Some("*/"),
                block_line_prefix: Some("*"),
            },
        }
    }

    /// @ai:intent File extensions belonging to this language
    /// @ai:effects pure
    pub fn extensions(&self) -> &[&str] {
        match self {
            Language::Rust => &["rs"],
            Language::Go => &["go"],
            Language::C => &["c", "h"],
            Language::Cpp => &["cpp", "cc", "cxx", "hpp", "hh", "hxx"],
            Language::Java => &["java"],
            Language::JavaScript => &["js", "jsx", "mjs"],
            Language::TypeScript => &["ts", "tsx"],
            Language::Python => &["py", "pyi"],
            Language::Php => &["php"],
            Language::Ruby => &["rb"],
        }
    }

    /// @ai:intent Name used in config files, lowercase
    /// @ai:effects pure
    pub fn name(&self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::Go => "go",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Java => "java",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Php => "php",
            Language::Ruby => "ruby",
        }
    }

    /// @ai:intent Look up a language by its configuration name
    /// @ai:example ("Rust") -> Some(Rust)
    /// @ai:example ("cobol") -> None
    /// @ai:effects pure
    pub fn from_name(name: &str) -> Option<Language> {
        let name = name.trim();
        ALL.into_iter().find(|l| l.name().eq_ignore_ascii_case(name))
    }

    /// @ai:intent Check whether a file belongs to this language
    /// @ai:effects pure
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions().contains(&ext))
            .unwrap_or(false)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// @ai:intent Language of a single file, by extension
/// @ai:pre path names a file
/// @ai:post None for unknown or missing extensions
/// @ai:example ("test.rs") -> Some(Rust)
/// @ai:example ("test.txt") -> None
/// @ai:effects pure
pub fn detect_language(path: &Path) -> Option<Language> {
    ALL.into_iter().find(|lang| lang.matches(path))
}

/// @ai:intent Detect the dominant language of a directory tree
/// @ai:post result is the language with the most files, ties broken by declaration order
/// @ai:effects fs:read
pub fn detect_dir_language(dir: &Path) -> Option<Language> {
    let mut counts: HashMap<Language, usize> = HashMap::new();

    for entry in WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        if let Some(lang) = detect_language(entry.path()) {
            *counts.entry(lang).or_default() += 1;
        }
    }

    // max_by_key keeps the last maximum, so walk in reverse to favour earlier languages
    ALL.iter()
        .rev()
        .filter_map(|lang| counts.get(lang).map(|count| (*lang, *count)))
        .max_by_key(|(_, count)| *count)
        .map(|(lang, _)| lang)
}
