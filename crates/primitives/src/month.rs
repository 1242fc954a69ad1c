//! Calendar month type.

use chrono::{Datelike, NaiveDate};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Days between 0001-01-01 (CE) and 1970-01-01.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// A calendar month, stored as the first day of that month.
///
/// Any date inside a month collapses to the same `Month`, and two months
/// compare in chronological order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(into = "NaiveDate", from = "NaiveDate")]
pub struct Month(NaiveDate);

impl Month {
    /// Create a month from a year and a month number (1-12).
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Collapse any date to the month containing it.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// Reconstruct a month from its [`period`](Self::period) index.
    #[must_use]
    pub fn from_period(period: i32) -> Option<Self> {
        let month = u32::try_from(period.rem_euclid(12)).ok()? + 1;
        Self::new(period.div_euclid(12), month)
    }

    /// Calendar year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month number, 1 through 12.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.0.month()
    }

    /// Continuous month index (`year * 12 + month - 1`).
    ///
    /// Consecutive calendar months differ by exactly one.
    #[must_use]
    pub fn period(&self) -> i32 {
        self.0.year() * 12 + self.0.month0() as i32
    }

    /// Shift by a signed number of months.
    #[must_use]
    pub fn offset(&self, months: i32) -> Option<Self> {
        Self::from_period(self.period().checked_add(months)?)
    }

    /// First day of the month.
    #[must_use]
    pub const fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// Days since 1970-01-01, the physical representation of a polars `Date`.
    #[must_use]
    pub fn epoch_days(&self) -> i32 {
        self.0.num_days_from_ce() - EPOCH_DAYS_FROM_CE
    }
}

impl From<NaiveDate> for Month {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl From<Month> for NaiveDate {
    fn from(month: Month) -> Self {
        month.0
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn intra_month_dates_collapse() {
        let a = Month::from_date(NaiveDate::from_ymd_opt(2021, 3, 1).unwrap());
        let b = Month::from_date(NaiveDate::from_ymd_opt(2021, 3, 31).unwrap());
        assert_eq!(a, b);
        assert_eq!(a.first_day().day(), 1);
        assert_eq!(a.to_string(), "2021-03-01");
    }

    #[rstest]
    #[case(0)]
    #[case(13)]
    fn invalid_month_number(#[case] month: u32) {
        assert!(Month::new(2020, month).is_none());
    }

    #[test]
    fn period_is_contiguous_across_years() {
        let dec = Month::new(2020, 12).unwrap();
        let jan = Month::new(2021, 1).unwrap();
        assert_eq!(jan.period() - dec.period(), 1);
        assert_eq!(dec.offset(1), Some(jan));
        assert_eq!(jan.offset(-1), Some(dec));
        assert_eq!(Month::from_period(jan.period()), Some(jan));
    }

    #[test]
    fn epoch_days_matches_unix_epoch() {
        assert_eq!(Month::new(1970, 1).unwrap().epoch_days(), 0);
        assert_eq!(Month::new(1970, 2).unwrap().epoch_days(), 31);
    }

    #[test]
    fn serde_uses_iso_date() {
        let m = Month::new(2019, 7).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"2019-07-01\"");
        let back: Month = serde_json::from_str("\"2019-07-15\"").unwrap();
        assert_eq!(back, m);
    }
}
