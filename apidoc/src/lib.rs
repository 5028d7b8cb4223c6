//! @ai:module:intent Generate browsable JSON documentation of a REST API from source comments
//! @ai:module:layer application
//! @ai:module:public_api app, config, diagnostics, dispatch, doc, error, input, output, vars
//!
//! # apidoc
//!
//! Reads a config file naming one or more source trees, extracts `@api`
//! comment blocks from each of them concurrently, merges the results into one
//! [`Doc`] and renders it as a directory of JSON files: `data/page.json`
//! indexes the groups and every group gets its own `data/group_<name>.json`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use apidoc::{app, Diagnostics};
//! use std::path::Path;
//!
//! # async fn example() -> apidoc::Result<()> {
//! let summary = app::run(Path::new("apidoc.toml"), &Diagnostics::tracing()).await?;
//! println!("{} APIs written to {}", summary.apis, summary.output_dir.display());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod dispatch;
pub mod doc;
pub mod error;
pub mod input;
pub mod output;
pub mod vars;

pub use app::{run, run_config, RunSummary};
pub use config::Config;
pub use diagnostics::{DiagnosticSink, Diagnostics, MemorySink, TracingSink};
pub use dispatch::dispatch;
pub use doc::Doc;
pub use error::{Error, OptionsError, Result};
pub use input::{Extraction, Extractor, InputOptions, SourceExtractor};
pub use output::{render, EmbeddedAssets, OutputOptions, StaticPublisher};
