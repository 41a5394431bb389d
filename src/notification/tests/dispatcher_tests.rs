//! Fan-out, partial failure, and batch history tests.

use super::{date, morning, overdue_payload, pending_task};
use crate::notification::adapters::memory::{InMemoryAlertRepository, InMemoryNotificationHistory};
use crate::notification::domain::{Alert, NotificationKind, Recipient};
use crate::notification::ports::{
    AlertRepository, NotificationStoreError, NotificationStoreResult,
};
use crate::notification::services::NotificationDispatcher;
use crate::task::adapters::memory::InMemoryTaskRepository;
use crate::task::domain::{PersonId, TaskDetail};
use mockall::mock;
use rstest::rstest;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

mock! {
    AlertSink {}

    #[async_trait::async_trait]
    impl AlertRepository for AlertSink {
        async fn insert(&self, alert: Alert) -> NotificationStoreResult<()>;
    }
}

fn detail_for(task: &crate::task::domain::Task) -> TaskDetail {
    TaskDetail::new(task.clone(), None, None, None, None)
}

fn recipients(count: usize) -> Vec<Recipient> {
    (0..count)
        .map(|index| Recipient::new(PersonId::new(), format!("Recipient {index}")))
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn successful_dispatch_writes_alerts_and_one_history_entry() {
    let tasks = InMemoryTaskRepository::new();
    let history = InMemoryNotificationHistory::new();
    let alerts = InMemoryAlertRepository::new();
    let task = pending_task("Monthly filing", date(2024, 3, 1));
    tasks.insert_task(task.clone()).expect("insert should succeed");

    let dispatcher = NotificationDispatcher::new(
        Arc::new(tasks),
        Arc::new(history.clone()),
        Arc::new(alerts.clone()),
    );
    let to = recipients(2);
    let report = dispatcher
        .send(
            &detail_for(&task),
            NotificationKind::Overdue,
            &to,
            overdue_payload(&task, 4),
            None,
            morning(date(2024, 3, 5)),
        )
        .await;

    assert!(report.success());
    assert_eq!(report.sent_count(), 2);

    let stored = alerts.alerts().expect("alert read should succeed");
    assert_eq!(stored.len(), 2);
    let first = stored.first().expect("alert should exist");
    assert_eq!(first.title(), "Task overdue");
    assert_eq!(first.link(), format!("/tasks/{}", task.id()));
    assert!(first.description().contains("4 day(s) overdue"));

    let entries = history.entries().expect("history read should succeed");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries.first().map(|e| e.recipients().len()), Some(2));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn one_failed_recipient_does_not_abort_the_batch() {
    let tasks = InMemoryTaskRepository::new();
    let history = InMemoryNotificationHistory::new();
    let task = pending_task("Monthly filing", date(2024, 3, 1));
    tasks.insert_task(task.clone()).expect("insert should succeed");

    let mut sink = MockAlertSink::new();
    let calls = AtomicUsize::new(0);
    sink.expect_insert().times(3).returning(move |_alert| {
        // The second recipient's write fails; the rest go through.
        if calls.fetch_add(1, Ordering::SeqCst) == 1 {
            Err(NotificationStoreError::persistence(std::io::Error::other(
                "disk full",
            )))
        } else {
            Ok(())
        }
    });

    let dispatcher = NotificationDispatcher::new(
        Arc::new(tasks),
        Arc::new(history.clone()),
        Arc::new(sink),
    );
    let to = recipients(3);
    let report = dispatcher
        .send(
            &detail_for(&task),
            NotificationKind::Overdue,
            &to,
            overdue_payload(&task, 4),
            None,
            morning(date(2024, 3, 5)),
        )
        .await;

    assert_eq!(report.sent_count(), 2);
    assert_eq!(report.failures().len(), 1);
    let failed = report.failures().first().expect("one recorded failure");
    assert_eq!(Some(failed.recipient()), to.get(1).map(Recipient::id));
    assert!(!report.success());
    assert!(report.is_partial());

    // Exactly one history entry despite the partial failure.
    let entries = history.entries().expect("history read should succeed");
    assert_eq!(entries.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_partial_success_still_blocks_the_rest_of_the_day() {
    let tasks = InMemoryTaskRepository::new();
    let history = InMemoryNotificationHistory::new();
    let alerts = InMemoryAlertRepository::new();
    let task = pending_task("Monthly filing", date(2024, 3, 1));
    tasks.insert_task(task.clone()).expect("insert should succeed");

    let now = morning(date(2024, 3, 5));
    let dispatcher = NotificationDispatcher::new(
        Arc::new(tasks),
        Arc::new(history.clone()),
        Arc::new(alerts.clone()),
    );
    let first = dispatcher
        .send(
            &detail_for(&task),
            NotificationKind::Overdue,
            &recipients(1),
            overdue_payload(&task, 4),
            None,
            now,
        )
        .await;
    assert!(first.success());

    let second = dispatcher
        .send(
            &detail_for(&task),
            NotificationKind::Overdue,
            &recipients(1),
            overdue_payload(&task, 4),
            None,
            now,
        )
        .await;
    assert!(second.is_throttled());
    assert_eq!(second.sent_count(), 0);
    assert_eq!(
        alerts.alerts().expect("alert read should succeed").len(),
        1
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn an_empty_recipient_list_is_total_failure_without_history() {
    let tasks = InMemoryTaskRepository::new();
    let history = InMemoryNotificationHistory::new();
    let alerts = InMemoryAlertRepository::new();
    let task = pending_task("Monthly filing", date(2024, 3, 1));
    tasks.insert_task(task.clone()).expect("insert should succeed");

    let dispatcher = NotificationDispatcher::new(
        Arc::new(tasks),
        Arc::new(history.clone()),
        Arc::new(alerts.clone()),
    );
    let report = dispatcher
        .send(
            &detail_for(&task),
            NotificationKind::Overdue,
            &[],
            overdue_payload(&task, 4),
            None,
            morning(date(2024, 3, 5)),
        )
        .await;

    assert!(!report.success());
    assert_eq!(report.sent_count(), 0);
    assert!(history.entries().expect("history read should succeed").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_caller_supplied_description_overrides_the_template() {
    let tasks = InMemoryTaskRepository::new();
    let history = InMemoryNotificationHistory::new();
    let alerts = InMemoryAlertRepository::new();
    let task = pending_task("Monthly filing", date(2024, 3, 1));
    tasks.insert_task(task.clone()).expect("insert should succeed");

    let dispatcher = NotificationDispatcher::new(
        Arc::new(tasks),
        Arc::new(history.clone()),
        Arc::new(alerts.clone()),
    );
    let report = dispatcher
        .send(
            &detail_for(&task),
            NotificationKind::Overdue,
            &recipients(1),
            overdue_payload(&task, 4),
            Some("Chase the client before Friday.".to_owned()),
            morning(date(2024, 3, 5)),
        )
        .await;
    assert!(report.success());

    let stored = alerts.alerts().expect("alert read should succeed");
    assert_eq!(
        stored.first().map(Alert::description),
        Some("Chase the client before Friday.")
    );
}
