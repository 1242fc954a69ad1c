#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pricewise/pricewise/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod month;
pub use month::Month;

mod raw;
pub use raw::{RaggedColumns, RawColumn, RawTable, is_missing, is_truthy, parse_number};

mod row;
pub use row::NormalizedRow;

mod labels;
pub use labels::{
    CANONICAL_COMMODITIES, CANONICAL_REGIONS, SINGLE_SERIES_COMMODITY, UNKNOWN_COMMODITY,
    canonical_order, labels_match, normalize_label,
};
