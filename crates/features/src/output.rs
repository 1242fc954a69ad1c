//! Feature table and manifest writer.

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use polars::prelude::*;
use tracing::info;

use crate::{FeatureError, FeatureManifest};

/// Paths and shape of a written feature table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFeatures {
    /// Feature table path.
    pub table: PathBuf,
    /// Manifest sidecar path.
    pub manifest_path: PathBuf,
    /// Manifest that was written.
    pub manifest: FeatureManifest,
    /// Data rows written.
    pub rows: usize,
    /// Column names written, in order.
    pub columns: Vec<String>,
}

/// Write `frame` as CSV at `path` and its manifest next to it.
///
/// Parent directories are created as needed.
///
/// # Errors
/// Returns `FeatureError` on I/O or CSV serialization failure.
pub fn write_features(frame: &mut DataFrame, path: &Path) -> Result<WrittenFeatures, FeatureError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(frame)?;

    let manifest = FeatureManifest::from_frame(frame);
    let manifest_path = FeatureManifest::sidecar_path(path);
    manifest.write(&manifest_path)?;

    let written = WrittenFeatures {
        table: path.to_path_buf(),
        manifest_path,
        manifest,
        rows: frame.height(),
        columns: frame.get_column_names().into_iter().map(|n| n.to_string()).collect(),
    };
    info!(
        path = %written.table.display(),
        rows = written.rows,
        features = written.manifest.len(),
        manifest = %written.manifest_path.display(),
        "wrote feature table"
    );
    Ok(written)
}
