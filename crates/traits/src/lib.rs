#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pricewise/pricewise/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod transform;
pub use transform::{PartitionContext, PartitionTransform, TransformError};

mod encoder;
pub use encoder::CategoryEncoder;

mod source;
pub use source::{ReadError, TableReader};
