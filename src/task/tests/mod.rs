//! Unit tests for the task module.
//!
//! Covers aggregate lifecycle behaviour, the in-memory repository's scan
//! queries, and the bounded prerequisite chain resolver.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]


use crate::task::domain::Task;
use chrono::NaiveDate;

/// Builds a calendar date or panics; test input is always valid.
fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Builds a pending task with a throwaway category.
fn pending_task(name: &str, due: NaiveDate) -> Task {
    Task::new("compliance", name, due).expect("valid task name")
}
