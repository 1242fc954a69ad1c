#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pricewise/pricewise/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod columns;

mod frame;
pub use frame::rows_to_frame;

mod lags;
pub use lags::{LagFeatures, RollingMean};

mod targets;
pub use targets::ForwardTargets;

mod encoders;
pub use encoders::{SeasonalEncoder, SpatialEncoder};

mod engine;
pub use engine::{EngineConfig, FeatureEngine, RetentionPolicy};

mod manifest;
pub use manifest::FeatureManifest;

mod output;
pub use output::{WrittenFeatures, write_features};

mod error;
pub use error::FeatureError;
