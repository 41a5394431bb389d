//! Unit tests for the notification module.
//!
//! Covers the throttle guard's ordered checks, dispatcher fan-out with
//! partial failures, and the four classifier scans end to end on the
//! in-memory adapters.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

mod dispatcher_tests;

use crate::notification::domain::{NotificationPayload, TaskSummary};
use crate::task::domain::Task;
use chrono::{NaiveDate, NaiveDateTime};

/// Builds a calendar date or panics; test input is always valid.
fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Nine in the morning on the given day, the scheduler's usual slot.
fn morning(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_opt(9, 0, 0).expect("valid test time")
}

/// Builds a pending task with a throwaway category.
fn pending_task(name: &str, due: NaiveDate) -> Task {
    Task::new("compliance", name, due).expect("valid task name")
}

/// Builds a minimal overdue payload for a task.
fn overdue_payload(task: &Task, delay_days: i64) -> NotificationPayload {
    NotificationPayload::Overdue {
        task: TaskSummary {
            id: task.id(),
            name: task.name().to_owned(),
            category: task.category().to_owned(),
            due_date: task.due_date(),
            client_name: None,
            service_name: None,
        },
        delay_days,
    }
}
