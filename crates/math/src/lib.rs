#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pricewise/pricewise/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod winsorize;
pub use winsorize::{Winsorizer, winsorize_over, winsorized_path};

mod deflate;
pub use deflate::{CpiBase, Deflator, median};

mod error;
pub use error::MathError;
