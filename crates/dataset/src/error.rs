//! Error types for schema resolution and dataset queries.

use derive_more::Display;
use pricewise_ingest::IngestError;

/// A mandatory column role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Role {
    /// Observation date.
    #[display("date")]
    Date,
    /// Observed price.
    #[display("price")]
    Price,
    /// Market or region.
    #[display("region")]
    Region,
}

/// Errors raised while resolving a schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// No column could serve the role.
    #[error("could not detect a {0} column")]
    Undetected(Role),
}

impl SchemaError {
    /// The role that could not be resolved.
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Undetected(role) => *role,
        }
    }
}

/// Errors raised while building or querying a [`Dataset`](crate::Dataset).
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Schema detection failed.
    #[error("schema detection failed: {0}")]
    Schema(#[from] SchemaError),

    /// The input file could not be read.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// A query matched no rows.
    #[error("no data for commodity {commodity:?} in region {region:?}")]
    NoDataForSelection {
        /// Requested commodity.
        commodity: String,
        /// Requested region.
        region: String,
    },
}

impl DatasetError {
    /// Whether the caller can continue with another query.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::NoDataForSelection { .. })
    }
}
