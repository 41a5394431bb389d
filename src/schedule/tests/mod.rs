//! Unit tests for schedule computation.
//!
//! Covers the rule vocabulary's calendar semantics and the memoizing engine's
//! validation, priority, and eviction behaviour.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

mod domain_tests;

use chrono::NaiveDate;

/// Builds a calendar date or panics; test input is always valid.
fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}
