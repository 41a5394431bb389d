//! Validated service period (the month a periodic task instance is generated
//! for).

use super::calendar::{first_of_month, last_of_month};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A service year/month pair accepted by the date rule engine.
///
/// Construction validates the range; everything downstream can rely on the
/// pair naming a real calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServicePeriod {
    year: i32,
    month: u32,
}

impl ServicePeriod {
    /// Earliest accepted service year.
    pub const MIN_YEAR: i32 = 2000;
    /// Latest accepted service year.
    pub const MAX_YEAR: i32 = 2100;

    /// Creates a validated service period.
    ///
    /// Returns `None` when the year is outside `[2000, 2100]` or the month is
    /// outside `[1, 12]`.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            return None;
        }
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// Returns the service year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Returns the service month.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Returns the first day of the service month.
    #[must_use]
    pub fn first_day(self) -> Option<NaiveDate> {
        first_of_month(self.year, self.month)
    }

    /// Returns the last day of the service month.
    #[must_use]
    pub fn last_day(self) -> Option<NaiveDate> {
        last_of_month(self.year, self.month)
    }
}
