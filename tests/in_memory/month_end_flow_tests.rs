//! Month-end flow: the date engine feeds the generator, the scans follow up.

use crate::helpers::{date, morning, seed_engagement, seed_person, seed_task, world};
use praxis::notification::domain::{NotificationKind, NotificationPayload};
use praxis::schedule::domain::{DueRule, GenerationRule};
use praxis::schedule::services::DateRuleEngine;
use praxis::task::domain::Task;

#[tokio::test(flavor = "multi_thread")]
async fn computed_dates_flow_into_scans_and_alerts() {
    // The generator asks the engine for February 2024's dates: generation on
    // January's 31st day, due at the end of the service month.
    let engine = DateRuleEngine::new();
    let generated_on = engine
        .generation_date(&GenerationRule::PrevMonthXDay { day: 31 }, 2024, 2)
        .expect("valid period should resolve");
    assert_eq!(generated_on, date(2024, 1, 31));
    let due = engine
        .due_date(&DueRule::EndOfMonth, 2024, 2, None)
        .expect("valid period should resolve");
    assert_eq!(due, date(2024, 2, 29));

    // The generated task is overdue five days after its leap-day deadline.
    let w = world();
    let assignee = seed_person(&w, "Dana Whitfield");
    let contact = seed_person(&w, "Priya Shah");
    let engagement = seed_engagement(&w, "Acme Ltd", "Payroll", Some(&contact));
    let task = seed_task(
        &w,
        Task::new("payroll", "February payroll run", due)
            .expect("valid task name")
            .with_assignee(assignee.id())
            .with_client_service(engagement.id()),
    );

    let run_day = morning(date(2024, 3, 5));
    let summary = w
        .scans
        .run_overdue(run_day)
        .await
        .expect("scan should succeed");
    assert_eq!(summary.dispatched(), 1);

    let alerts = w.alerts.alerts().expect("alert read should succeed");
    assert_eq!(alerts.len(), 2);
    let alert = alerts.first().expect("alert should exist");
    assert_eq!(alert.kind(), NotificationKind::Overdue);
    let NotificationPayload::Overdue {
        task: summary_task,
        delay_days,
    } = alert.payload()
    else {
        panic!("unexpected payload kind");
    };
    assert_eq!(summary_task.id, task.id());
    assert_eq!(*delay_days, 5);

    let entries = w.history.entries().expect("history read should succeed");
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries.first().map(|entry| entry.sent_on()),
        Some(date(2024, 3, 5))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn the_day_after_a_throttled_day_notifies_again() {
    let w = world();
    let assignee = seed_person(&w, "Dana Whitfield");
    seed_task(
        &w,
        Task::new("compliance", "Monthly filing", date(2024, 3, 1))
            .expect("valid task name")
            .with_assignee(assignee.id()),
    );

    let first = w
        .scans
        .run_overdue(morning(date(2024, 3, 5)))
        .await
        .expect("scan should succeed");
    assert_eq!(first.dispatched(), 1);

    // Same day again: throttled. Next morning: the guard lets it through.
    let again = w
        .scans
        .run_overdue(morning(date(2024, 3, 5)))
        .await
        .expect("scan should succeed");
    assert_eq!(again.throttled(), 1);

    let next_day = w
        .scans
        .run_overdue(morning(date(2024, 3, 6)))
        .await
        .expect("scan should succeed");
    assert_eq!(next_day.dispatched(), 1);

    let entries = w.history.entries().expect("history read should succeed");
    assert_eq!(entries.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn run_all_covers_every_kind_in_one_pass() {
    let w = world();
    let assignee = seed_person(&w, "Dana Whitfield");
    let waiting_assignee = seed_person(&w, "Noah Park");

    // Overdue prerequisite with an open dependent, plus a task due tomorrow.
    let prerequisite = seed_task(
        &w,
        Task::new("bookkeeping", "Ledger close", date(2024, 3, 1))
            .expect("valid task name")
            .with_assignee(assignee.id()),
    );
    seed_task(
        &w,
        Task::new("compliance", "VAT return", date(2024, 3, 20))
            .expect("valid task name")
            .with_assignee(waiting_assignee.id())
            .with_prerequisite(prerequisite.id()),
    );
    seed_task(
        &w,
        Task::new("compliance", "Advance payment", date(2024, 3, 6))
            .expect("valid task name")
            .with_assignee(assignee.id()),
    );

    let summaries = w
        .scans
        .run_all(morning(date(2024, 3, 5)))
        .await
        .expect("run should succeed");
    assert_eq!(summaries.len(), 4);

    let dispatched: Vec<(NotificationKind, usize)> = summaries
        .iter()
        .map(|summary| (summary.kind(), summary.dispatched()))
        .collect();
    assert_eq!(
        dispatched,
        vec![
            (NotificationKind::Overdue, 1),
            (NotificationKind::Upcoming, 1),
            (NotificationKind::PredecessorDelay, 1),
            (NotificationKind::FixedDeadlineConflict, 0),
        ]
    );
}
