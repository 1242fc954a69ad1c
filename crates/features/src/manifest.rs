//! Ordered list of model-ready feature columns.

use std::{
    fs,
    path::{Path, PathBuf},
};

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    FeatureError,
    columns::{IDENTIFIERS, PRICE_SMOOTHED, TARGET_PREFIX, is_dummy},
};

/// Extension appended to a feature table path for its manifest.
const SIDECAR_EXTENSION: &str = "features.json";

/// Feature columns, in the order a model was trained on.
///
/// Dummy columns depend on which months and markets a run saw, so inference
/// replays this list instead of re-deriving it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureManifest {
    columns: Vec<String>,
}

impl FeatureManifest {
    /// Manifest of `names`, dropping identifiers, targets and diagnostics.
    pub fn from_columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = names
            .into_iter()
            .map(|n| n.as_ref().to_string())
            .filter(|n| {
                !IDENTIFIERS.contains(&n.as_str())
                    && !n.starts_with(TARGET_PREFIX)
                    && n.as_str() != PRICE_SMOOTHED
            })
            .collect();
        Self { columns }
    }

    /// Manifest of an engineered frame.
    #[must_use]
    pub fn from_frame(frame: &DataFrame) -> Self {
        Self::from_columns(frame.get_column_names().into_iter().map(|n| n.as_str()))
    }

    /// Feature columns in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of feature columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the manifest is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Sidecar path for a feature table: `prices.csv` becomes `prices.features.json`.
    #[must_use]
    pub fn sidecar_path(table: &Path) -> PathBuf {
        table.with_extension(SIDECAR_EXTENSION)
    }

    /// Write the manifest as a pretty-printed JSON array.
    ///
    /// # Errors
    /// Returns `FeatureError` on serialization or I/O failure.
    pub fn write(&self, path: &Path) -> Result<(), FeatureError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Read a manifest written by [`write`](Self::write).
    ///
    /// # Errors
    /// Returns `FeatureError` on I/O failure or malformed JSON.
    pub fn read(path: &Path) -> Result<Self, FeatureError> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// Project `frame` onto the manifest columns, in manifest order.
    ///
    /// Dummy columns absent from `frame` are filled with zeros; any other
    /// absent column is an error.
    ///
    /// # Errors
    /// Returns `FeatureError::MissingColumn` for an absent non-dummy column.
    pub fn align(&self, frame: &DataFrame) -> Result<DataFrame, FeatureError> {
        let present: Vec<&str> = frame.get_column_names().into_iter().map(|n| n.as_str()).collect();
        let mut exprs = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            if present.contains(&name.as_str()) {
                exprs.push(col(name.as_str()));
            } else if is_dummy(name) {
                exprs.push(lit(0i32).alias(name.as_str()));
            } else {
                return Err(FeatureError::MissingColumn(name.clone()));
            }
        }
        Ok(frame.clone().lazy().select(exprs).collect()?)
    }
}
