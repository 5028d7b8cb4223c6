//! @ai:module:intent Wire the pipeline: config, extraction, aggregation, rendering
//! @ai:module:layer application
//! @ai:module:public_api run, run_config, RunSummary
//! @ai:module:depends_on config, dispatch, output

use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::dispatch::dispatch;
use crate::error::{OptionsError, Result};
use crate::input::{Extractor, SourceExtractor};
use crate::output::{render, EmbeddedAssets, StaticPublisher};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// @ai:intent What a finished run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_dir: PathBuf,
    pub apis: usize,
    pub elapsed: Duration,
}

/// @ai:intent Generate documentation as described by a config file
/// @ai:effects fs:read, fs:write, log
pub async fn run(config_path: &Path, diagnostics: &Diagnostics) -> Result<RunSummary> {
    let start = Instant::now();
    let config = Config::load(config_path, diagnostics)?;
    run_config(config, Arc::new(SourceExtractor), &EmbeddedAssets, start).await
}

/// @ai:intent Run the pipeline for an already validated config
/// @ai:pre config has been sanitized
/// @ai:effects fs:read, fs:write, log
pub async fn run_config<E>(
    config: Config,
    extractor: Arc<E>,
    assets: &dyn StaticPublisher,
    start: Instant,
) -> Result<RunSummary>
where
    E: Extractor + ?Sized + 'static,
{
    let mut output = config.output.ok_or_else(|| OptionsError::required("output"))?;

    let doc = dispatch(&config.inputs, extractor).await;

    output.elapsed = start.elapsed();
    output.date = Some(Utc::now());
    render(&doc, &output, assets)?;

    Ok(RunSummary {
        output_dir: output.dir,
        apis: doc.apis.len(),
        elapsed: start.elapsed(),
    })
}
