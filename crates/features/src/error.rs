//! Error types for feature engineering.

use polars::prelude::PolarsError;
use pricewise_math::MathError;
use pricewise_traits::TransformError;

/// Errors that can occur while engineering or writing features.
#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    /// Transform error.
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),

    /// Math operation error.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest (de)serialization error.
    #[error("manifest error: {0}")]
    Json(#[from] serde_json::Error),

    /// A manifest column is absent and cannot be filled.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
