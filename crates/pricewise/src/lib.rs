//! # pricewise
//!
//! Schema inference and leakage-safe feature engineering for monthly
//! commodity price exports.
//!
//! This crate provides a unified interface to the pricewise crates.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Months, raw tables and normalized rows
//! - `traits`: Reader, transform and encoder abstractions
//! - `math`: Winsorization and CPI deflation
//! - `ingest`: Multi-strategy file loading
//! - `dataset`: Schema resolution, normalization and queries
//! - `features`: Feature engine and manifest
//! - `pipeline`: The end-to-end `prepare` run
//! - `cli`: The `prepare` and `inspect` binaries
//!
//! ## Example
//!
//! ```rust,ignore
//! use pricewise::pipeline::{PrepareOptions, prepare};
//!
//! let report = prepare(&PrepareOptions::new("prices.csv", "features.csv"))?;
//! println!("{} rows, manifest at {}", report.written.rows, report.written.manifest_path.display());
//! ```

#![doc(issue_tracker_base_url = "https://github.com/pricewise/pricewise/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use pricewise_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use pricewise_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use pricewise_math as math;
#[cfg(feature = "ingest")]
#[doc(inline)]
pub use pricewise_ingest as ingest;
#[cfg(feature = "dataset")]
#[doc(inline)]
pub use pricewise_dataset as dataset;
#[cfg(feature = "features")]
#[doc(inline)]
pub use pricewise_features as features;

#[cfg(feature = "pipeline")]
pub mod pipeline;

// Used only by the binaries.
#[cfg(feature = "cli")]
use anyhow as _;
#[cfg(feature = "cli")]
use clap as _;
#[cfg(feature = "cli")]
use serde_json as _;
#[cfg(feature = "cli")]
use tracing_subscriber as _;
