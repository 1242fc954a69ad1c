#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pricewise/pricewise/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod config;
pub use config::{NormalizeConfig, ResolverConfig};

mod date;
pub use date::{DateBinding, parse_month};

mod binding;
pub use binding::{
    CommodityBinding, Mode, RegionBinding, RegionFlag, SchemaBinding, WideCommodityMap,
    friendly_commodity,
};

mod resolver;
pub use resolver::SchemaResolver;

mod normalize;
pub use normalize::{DropCounts, Normalizer};

mod dataset;
pub use dataset::{Dataset, Options, Selection, SeriesPoint, Summary};

mod error;
pub use error::{DatasetError, Role, SchemaError};
