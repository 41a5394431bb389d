//! Calendar month arithmetic shared by the rule vocabulary.

use chrono::{Datelike, Months, NaiveDate};

/// Returns the first day of the given month.
///
/// Returns `None` when the year/month pair is not a valid calendar month.
#[must_use]
pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Returns the last day of the given month.
///
/// Handles 28/29/30/31-day months and leap years by stepping to the first
/// day of the following month and back one day.
#[must_use]
pub fn last_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    first_of_month(year, month)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

/// Returns day `day` of the given month, clamped to `[1, month length]`.
#[must_use]
pub fn clamped_day_of_month(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let last = last_of_month(year, month)?;
    first_of_month(year, month)?.with_day(day.clamp(1, last.day()))
}

/// Shifts a date by a whole number of months, forwards or backwards.
#[must_use]
pub fn shift_months(date: NaiveDate, offset: i32) -> Option<NaiveDate> {
    if offset >= 0 {
        date.checked_add_months(Months::new(u32::try_from(offset).ok()?))
    } else {
        date.checked_sub_months(Months::new(u32::try_from(offset.checked_neg()?).ok()?))
    }
}
