#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pricewise/pricewise/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod encoding;
pub use encoding::TextEncoding;

mod sniff;
pub use sniff::sniff_delimiter;

mod delimited;
pub use delimited::DelimitedReader;

mod spreadsheet;
pub use spreadsheet::SpreadsheetReader;

mod loader;
pub use loader::{LoaderConfig, SmartLoader};

mod error;
pub use error::IngestError;
