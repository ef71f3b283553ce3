//! Accounting periods (calendar months).

use crate::error::{Error, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, Month, OffsetDateTime};

/// A calendar month, the aggregation unit of the dashboard.
///
/// Rendered as `YYYY-MM`. Invariant: `month` is in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u8,
}

impl Period {
    /// Construct from explicit components.
    pub fn new(year: i32, month: u8) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidPeriod(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Parse a `YYYY-MM` string.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidPeriod(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }

    /// The period containing the given civil date.
    pub fn containing(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month() as u8,
        }
    }

    /// The period containing the given instant, in UTC.
    pub fn containing_utc(at: OffsetDateTime) -> Self {
        Self::containing(at.date())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    fn month_enum(&self) -> Month {
        Month::try_from(self.month).expect("month invariant holds")
    }

    /// First day of the month.
    pub fn first_day(&self) -> Date {
        Date::from_calendar_date(self.year, self.month_enum(), 1).expect("day 1 always exists")
    }

    /// Last day of the month.
    pub fn last_day(&self) -> Date {
        let last = time::util::days_in_year_month(self.year, self.month_enum());
        Date::from_calendar_date(self.year, self.month_enum(), last)
            .expect("month length is a valid day")
    }

    /// Whether the given date falls in this month.
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() as u8 == self.month
    }

    /// Signed number of whole months from `earlier` to `self`.
    pub fn months_since(&self, earlier: Period) -> i64 {
        (self.year as i64 - earlier.year as i64) * 12 + (self.month as i64 - earlier.month as i64)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Period::parse(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parse_and_display_round_trip() {
        let p = Period::parse("2026-08").unwrap();
        assert_eq!(p.year(), 2026);
        assert_eq!(p.month(), 8);
        assert_eq!(p.to_string(), "2026-08");
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for bad in ["2026", "2026-13", "2026-00", "26-08", "2026-8", "2026/08"] {
            assert!(Period::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn day_bounds_handle_month_lengths() {
        let feb = Period::parse("2024-02").unwrap();
        assert_eq!(feb.first_day(), date!(2024 - 02 - 01));
        assert_eq!(feb.last_day(), date!(2024 - 02 - 29));

        let apr = Period::parse("2026-04").unwrap();
        assert_eq!(apr.last_day(), date!(2026 - 04 - 30));
    }

    #[test]
    fn contains_is_exact_to_the_month() {
        let p = Period::parse("2026-08").unwrap();
        assert!(p.contains(date!(2026 - 08 - 01)));
        assert!(p.contains(date!(2026 - 08 - 31)));
        assert!(!p.contains(date!(2026 - 07 - 31)));
        assert!(!p.contains(date!(2027 - 08 - 15)));
    }

    #[test]
    fn months_since_crosses_year_boundaries() {
        let jan = Period::parse("2026-01").unwrap();
        let nov_prev = Period::parse("2025-11").unwrap();
        assert_eq!(jan.months_since(nov_prev), 2);
        assert_eq!(nov_prev.months_since(jan), -2);
        assert_eq!(jan.months_since(jan), 0);
    }
}
