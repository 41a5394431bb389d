//! Fixed-deadline conflict flow: a delay propagates down a chain until an
//! adjustment lands, then the conflict alert fires.

use crate::helpers::{date, morning, seed_engagement, seed_person, seed_task, world};
use praxis::notification::domain::{NotificationKind, NotificationPayload};
use praxis::task::domain::Task;

#[tokio::test(flavor = "multi_thread")]
async fn an_adjustment_on_the_chain_arms_the_conflict_alert() {
    let w = world();
    let today = date(2024, 3, 15);
    let preparer = seed_person(&w, "Dana Whitfield");
    let reviewer = seed_person(&w, "Priya Shah");
    let contact = seed_person(&w, "Marta Cole");
    let engagement = seed_engagement(&w, "Acme Ltd", "Year-end accounts", Some(&contact));

    // Records -> bookkeeping -> statutory filing (fixed deadline).
    let records = seed_task(
        &w,
        Task::new("intake", "Records received", date(2024, 3, 1))
            .expect("valid task name")
            .with_assignee(preparer.id()),
    );
    let bookkeeping = seed_task(
        &w,
        Task::new("bookkeeping", "Ledger close", date(2024, 3, 10))
            .expect("valid task name")
            .with_assignee(preparer.id())
            .with_prerequisite(records.id()),
    );
    let filing = seed_task(
        &w,
        Task::new("compliance", "Statutory filing", date(2024, 3, 31))
            .expect("valid task name")
            .with_assignee(reviewer.id())
            .with_client_service(engagement.id())
            .with_prerequisite(bookkeeping.id())
            .with_fixed_deadline(),
    );

    // Before any adjustment the chain is merely late: no conflict yet.
    let silent = w
        .scans
        .run_fixed_deadline(morning(today))
        .await
        .expect("scan should succeed");
    assert_eq!(silent.dispatched(), 0);

    // The bookkeeping due date slips; the adjustment arms the conflict.
    let mut adjusted = bookkeeping;
    adjusted
        .adjust_due_date(date(2024, 3, 22), "records arrived two weeks late")
        .expect("open task should adjust");
    w.tasks
        .update_task(adjusted.clone())
        .expect("update should succeed");

    let armed = w
        .scans
        .run_fixed_deadline(morning(today))
        .await
        .expect("scan should succeed");
    assert_eq!(armed.dispatched(), 1);

    let report = armed.reports().first().expect("one report");
    assert_eq!(report.task(), filing.id());
    assert_eq!(report.kind(), NotificationKind::FixedDeadlineConflict);
    // Preparer (adjusted intermediate), reviewer, and client contact.
    assert_eq!(report.sent_count(), 3);

    let alerts = w.alerts.alerts().expect("alert read should succeed");
    let alert = alerts.first().expect("alert should exist");
    let NotificationPayload::FixedDeadlineConflict {
        fixed_task,
        overdue_predecessors,
        adjusted_intermediates,
    } = alert.payload()
    else {
        panic!("unexpected payload kind");
    };
    assert_eq!(fixed_task.id, filing.id());
    assert_eq!(
        overdue_predecessors.first().map(|p| p.id),
        Some(records.id())
    );
    assert_eq!(
        adjusted_intermediates.first().map(|a| a.id),
        Some(adjusted.id())
    );
    assert_eq!(
        adjusted_intermediates
            .first()
            .and_then(|a| a.adjustment_reason.as_deref()),
        Some("records arrived two weeks late")
    );
}
