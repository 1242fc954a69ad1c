//! Canonical normalized observation.

use serde::{Deserialize, Serialize};

use crate::Month;

/// One price observation after schema resolution and normalization.
///
/// `commodity` and `market` are trimmed and non-empty, `price` is finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
    /// Observation month.
    pub date: Month,
    /// Commodity label.
    pub commodity: String,
    /// Market or region label.
    pub market: String,
    /// Observed price.
    pub price: f64,
}

impl NormalizedRow {
    /// Create a new row.
    #[must_use]
    pub fn new(
        date: Month,
        commodity: impl Into<String>,
        market: impl Into<String>,
        price: f64,
    ) -> Self {
        Self { date, commodity: commodity.into(), market: market.into(), price }
    }

    /// The `(commodity, market)` partition key.
    #[must_use]
    pub fn partition(&self) -> (&str, &str) {
        (&self.commodity, &self.market)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_key() {
        let row = NormalizedRow::new(Month::new(2020, 1).unwrap(), "Rice (imported)", "Bo", 10.0);
        assert_eq!(row.partition(), ("Rice (imported)", "Bo"));
    }
}
