//! Domain model for schedule computation.
//!
//! Service periods, calendar helpers, and the declarative rule vocabulary are
//! pure values: resolving a rule touches no infrastructure and signals
//! invalid input by returning `None` rather than an error.

mod calendar;
mod period;
mod rule;

pub use calendar::{clamped_day_of_month, first_of_month, last_of_month, shift_months};
pub use period::ServicePeriod;
pub use rule::{days_due_date, DueRule, GenerationRule};
