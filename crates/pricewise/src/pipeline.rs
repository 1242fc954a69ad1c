//! End-to-end feature preparation: load, resolve, normalize, engineer, write.

use std::path::PathBuf;

use polars::prelude::DataFrame;
use pricewise_dataset::{
    Dataset, DatasetError, NormalizeConfig, Normalizer, ResolverConfig, SchemaResolver, Summary,
};
use pricewise_features::{
    EngineConfig, FeatureEngine, FeatureError, WrittenFeatures, write_features,
};
use pricewise_ingest::{LoaderConfig, SmartLoader};
use tracing::info;

/// Errors from a preparation run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Loading or schema resolution failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Feature engineering or writing failed.
    #[error(transparent)]
    Feature(#[from] FeatureError),
}

/// Inputs of a preparation run.
#[derive(Debug, Clone)]
pub struct PrepareOptions {
    /// Raw export to read.
    pub input: PathBuf,
    /// Feature table to write; the manifest goes next to it.
    pub output: PathBuf,
    /// Loader strategies.
    pub loader: LoaderConfig,
    /// Column-name candidates.
    pub resolver: ResolverConfig,
    /// CPI deflation.
    pub normalize: NormalizeConfig,
    /// Feature engine settings.
    pub engine: EngineConfig,
}

impl PrepareOptions {
    /// Default options for reading `input` and writing `output`.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            loader: LoaderConfig::default(),
            resolver: ResolverConfig::features(),
            normalize: NormalizeConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

/// Outcome of a preparation run.
#[derive(Debug)]
pub struct PrepareReport {
    /// Resolved dataset description.
    pub summary: Summary,
    /// Engineered frame that was written.
    pub frame: DataFrame,
    /// Written paths, columns and manifest.
    pub written: WrittenFeatures,
}

/// Run the feature preparation pipeline.
///
/// # Errors
/// Returns `PipelineError::Dataset` when the input is unreadable or its
/// schema cannot be resolved, and `PipelineError::Feature` when engineering
/// or writing fails.
pub fn prepare(options: &PrepareOptions) -> Result<PrepareReport, PipelineError> {
    let loader = SmartLoader::with_config(options.loader.clone());
    let resolver = SchemaResolver::with_config(options.resolver.clone());
    let normalizer = Normalizer::with_config(options.normalize.clone());
    let engine = FeatureEngine::with_config(options.engine.clone())?;

    let dataset = Dataset::load(&loader, &options.input, &resolver, &normalizer)?;
    let mut frame = engine.run(dataset.rows())?;
    let written = write_features(&mut frame, &options.output)?;

    info!(path = %written.table.display(), "saved");
    info!(rows = written.rows, "rows");
    info!(columns = ?written.columns, "columns");
    info!(manifest = %written.manifest_path.display(), "features saved");

    Ok(PrepareReport { summary: dataset.summary(), frame, written })
}
