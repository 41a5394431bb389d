//! Declarative generation and due-date rule vocabulary.
//!
//! Rules arrive as configuration data on client-service records; they are
//! deserialized into the tagged enums here and resolved against a validated
//! [`ServicePeriod`]. Resolution is pure calendar arithmetic: out-of-range
//! input produces `None`, never an error.

use super::calendar::{clamped_day_of_month, last_of_month, shift_months};
use super::period::ServicePeriod;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Rule deciding the day a periodic task instance is generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum GenerationRule {
    /// Day 1 of the service month.
    ServiceMonthStart,
    /// Start of the last `days`-day window of the previous month.
    ///
    /// The window start is the previous month's last day minus `days` plus
    /// one, clamped into the month.
    PrevMonthLastXDays {
        /// Window length in days.
        days: u32,
    },
    /// Day `day` of the previous month, clamped to its length.
    PrevMonthXDay {
        /// Day of month.
        day: u32,
    },
    /// Day 1 of the month after the service month; the year rolls over at
    /// December.
    NextMonthStart,
    /// Day `day` of the service month, clamped to its length.
    MonthlyXDay {
        /// Day of month.
        day: u32,
    },
}

impl GenerationRule {
    /// Resolves the generation date for the given service period.
    #[must_use]
    pub fn resolve(&self, period: ServicePeriod) -> Option<NaiveDate> {
        match *self {
            Self::ServiceMonthStart => period.first_day(),
            Self::PrevMonthLastXDays { days } => {
                let prev = shift_months(period.first_day()?, -1)?;
                let last = last_of_month(prev.year(), prev.month())?;
                let start = i64::from(last.day())
                    .checked_sub(i64::from(days))?
                    .checked_add(1)?
                    .max(1);
                clamped_day_of_month(prev.year(), prev.month(), u32::try_from(start).ok()?)
            }
            Self::PrevMonthXDay { day } => {
                let prev = shift_months(period.first_day()?, -1)?;
                clamped_day_of_month(prev.year(), prev.month(), day)
            }
            Self::NextMonthStart => shift_months(period.first_day()?, 1),
            Self::MonthlyXDay { day } => {
                clamped_day_of_month(period.year(), period.month(), day)
            }
        }
    }
}

/// Rule deciding a generated task's due date.
///
/// The variants mirror the configured rule names; an unrecognized name
/// deserializes to [`DueRule::Unknown`] and falls back to the end of the
/// service month.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum DueRule {
    /// Last day of the service month.
    #[serde(alias = "service_month_end")]
    EndOfMonth,
    /// Day `day` of the service month, clamped to its length.
    #[serde(alias = "fixed_date")]
    SpecificDay {
        /// Day of month.
        day: u32,
    },
    /// Day `day` of the month after the service month when given, otherwise
    /// that month's last day.
    #[serde(alias = "next_month_end")]
    NextMonthDay {
        /// Day of month; `None` means the end of the month.
        day: Option<u32>,
    },
    /// Last day of the month `months` months after the service month.
    NMonthsEnd {
        /// Number of months ahead.
        months: u32,
    },
    /// An explicit calendar date, with the day clamped to the month length.
    FixedDeadline {
        /// Deadline year.
        year: i32,
        /// Deadline month.
        month: u32,
        /// Deadline day of month.
        day: u32,
    },
    /// First day of the service month plus `days` days.
    DaysAfterStart {
        /// Offset in days.
        days: u32,
    },
    /// Unrecognized rule name; resolves to the end of the service month.
    #[serde(other)]
    Unknown,
}

impl DueRule {
    /// Resolves the due date for the given service period.
    #[must_use]
    pub fn resolve(&self, period: ServicePeriod) -> Option<NaiveDate> {
        match *self {
            Self::EndOfMonth | Self::Unknown => period.last_day(),
            Self::SpecificDay { day } => {
                clamped_day_of_month(period.year(), period.month(), day)
            }
            Self::NextMonthDay { day } => {
                let next = shift_months(period.first_day()?, 1)?;
                day.map_or_else(
                    || last_of_month(next.year(), next.month()),
                    |d| clamped_day_of_month(next.year(), next.month(), d),
                )
            }
            Self::NMonthsEnd { months } => {
                let target = shift_months(period.first_day()?, i32::try_from(months).ok()?)?;
                last_of_month(target.year(), target.month())
            }
            Self::FixedDeadline { year, month, day } => clamped_day_of_month(year, month, day),
            Self::DaysAfterStart { days } => period
                .first_day()?
                .checked_add_days(Days::new(u64::from(days))),
        }
    }
}

/// Returns the first day of the service month plus `days` days.
///
/// This is the resolution applied when a task carries an explicit days-due
/// override, which takes precedence over any configured [`DueRule`].
#[must_use]
pub fn days_due_date(period: ServicePeriod, days: u64) -> Option<NaiveDate> {
    period.first_day()?.checked_add_days(Days::new(days))
}
