//! Consumer-price-index deflation of nominal prices.

/// Median CPI above which the index is read as "base = 100".
const BASE_HUNDRED_THRESHOLD: f64 = 10.0;

/// How CPI values are scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpiBase {
    /// Index around 100 at the base period.
    Hundred,
    /// Chain-linked index around 1.
    Unit,
}

/// Converts nominal prices into real prices using a CPI series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deflator {
    base: CpiBase,
}

impl Deflator {
    /// Create a deflator for a known CPI base.
    #[must_use]
    pub const fn new(base: CpiBase) -> Self {
        Self { base }
    }

    /// Infer the CPI base from the median of the observed (finite) values.
    ///
    /// An empty series is treated as chain-linked.
    pub fn fit<I>(cpi: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut values: Vec<f64> = cpi.into_iter().flatten().filter(|v| v.is_finite()).collect();
        let base = match median(&mut values) {
            Some(m) if m > BASE_HUNDRED_THRESHOLD => CpiBase::Hundred,
            _ => CpiBase::Unit,
        };
        Self { base }
    }

    /// Inferred CPI base.
    #[must_use]
    pub const fn base(&self) -> CpiBase {
        self.base
    }

    /// Real price for a nominal price and its CPI value.
    ///
    /// Returns `None` when the CPI is zero or the result is not finite.
    #[must_use]
    pub fn deflate(&self, price: f64, cpi: f64) -> Option<f64> {
        let divisor = match self.base {
            CpiBase::Hundred => cpi / 100.0,
            CpiBase::Unit => cpi,
        };
        if divisor == 0.0 {
            return None;
        }
        Some(price / divisor).filter(|v| v.is_finite())
    }
}

/// Median of a slice, reordering it in place.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(vec![Some(98.0), Some(101.0), Some(104.5)], CpiBase::Hundred)]
    #[case(vec![Some(1.0), Some(1.2), None, Some(1.4)], CpiBase::Unit)]
    #[case(vec![None, Some(f64::NAN)], CpiBase::Unit)]
    fn base_inferred_from_median(#[case] cpi: Vec<Option<f64>>, #[case] expected: CpiBase) {
        assert_eq!(Deflator::fit(cpi).base(), expected);
    }

    #[test]
    fn deflate_base_hundred() {
        let d = Deflator::new(CpiBase::Hundred);
        assert_relative_eq!(d.deflate(200.0, 125.0).unwrap(), 160.0, epsilon = 1e-10);
    }

    #[test]
    fn deflate_chain_linked() {
        let d = Deflator::new(CpiBase::Unit);
        assert_relative_eq!(d.deflate(200.0, 1.25).unwrap(), 160.0, epsilon = 1e-10);
        assert!(d.deflate(200.0, 0.0).is_none());
    }

    #[test]
    fn median_even_and_odd() {
        assert_eq!(median(&mut [3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&mut [4.0, 1.0, 2.0, 3.0]), Some(2.5));
        assert_eq!(median(&mut []), None);
    }
}
