//! @ai:module:intent Extract REST API records from @api comment blocks
//! @ai:module:layer infrastructure
//! @ai:module:public_api api, error, extractor, language, parser, scan
//! @ai:module:stateless true
//!
//! # apidoc parser
//!
//! Scans source trees for comment blocks tagged with `@api` / `@apidoc` and
//! turns them into [`Api`] records plus document-level [`DocInfo`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use apidoc_parser::{scan_directory, Language};
//! use std::path::Path;
//!
//! let extraction = scan_directory(Path::new("src"), true, Language::Rust).unwrap();
//! for api in &extraction.apis {
//!     println!("{} {} ({})", api.method, api.url, api.group);
//! }
//! for issue in &extraction.issues {
//!     eprintln!("{}", issue);
//! }
//! ```

pub mod api;
pub mod error;
pub mod extractor;
pub mod language;
pub mod parser;
pub mod scan;

pub use api::{Api, DocInfo, Location, Param, Request, Response, DEFAULT_GROUP};
pub use error::{Error, Result, SyntaxIssue};
pub use extractor::{extract_file, extract_source, FileExtraction};
pub use language::{detect_dir_language, detect_language, Language};
pub use scan::scan_directory;
