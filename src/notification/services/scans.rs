//! The four classifier scans an external scheduler runs once per day.

use super::dispatcher::{DispatchReport, NotificationDispatcher};
use crate::notification::domain::{
    dedup_recipients, AffectedDependent, DelayedPredecessor, NotificationKind,
    NotificationPayload, Recipient, TaskSummary,
};
use crate::notification::ports::{AlertRepository, NotificationHistoryRepository};
use crate::task::domain::TaskDetail;
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use crate::task::services::ChainResolver;
use chrono::NaiveDateTime;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort a scan.
///
/// A failed store read propagates: a scan that cannot see its candidates
/// must not report "nothing to send". Alert and history write failures never
/// surface here; the dispatcher degrades those per batch.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A task store read failed during classification.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result of one scan run.
#[derive(Debug, Clone)]
pub struct ScanSummary {
    kind: NotificationKind,
    matched: usize,
    reports: Vec<DispatchReport>,
}

impl ScanSummary {
    const fn new(kind: NotificationKind, matched: usize, reports: Vec<DispatchReport>) -> Self {
        Self {
            kind,
            matched,
            reports,
        }
    }

    /// Returns the notification kind this scan produces.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns how many candidate tasks the scan examined.
    #[must_use]
    pub const fn matched(&self) -> usize {
        self.matched
    }

    /// Returns the per-candidate dispatch reports.
    #[must_use]
    pub fn reports(&self) -> &[DispatchReport] {
        &self.reports
    }

    /// Returns how many batches reached at least one recipient.
    #[must_use]
    pub fn dispatched(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| report.sent_count() > 0)
            .count()
    }

    /// Returns how many batches the throttle guard blocked.
    #[must_use]
    pub fn throttled(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| report.is_throttled())
            .count()
    }

    /// Returns how many batches reached nobody without being throttled.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| report.sent_count() == 0 && !report.is_throttled())
            .count()
    }
}

/// Runs the overdue, upcoming, predecessor-delay, and fixed-deadline scans.
///
/// Each scan queries its candidates, computes recipients and payload per
/// task, and hands every candidate to the dispatcher, which re-checks the
/// throttle guard. Processing is sequential per task so fan-out stays
/// deterministic. Candidates whose recipients cannot be resolved are skipped.
#[derive(Clone)]
pub struct NotificationScanService<T, H, A>
where
    T: TaskRepository,
    H: NotificationHistoryRepository,
    A: AlertRepository,
{
    tasks: Arc<T>,
    resolver: ChainResolver<T>,
    dispatcher: NotificationDispatcher<T, H, A>,
}

impl<T, H, A> NotificationScanService<T, H, A>
where
    T: TaskRepository,
    H: NotificationHistoryRepository,
    A: AlertRepository,
{
    /// Creates the scan service over the given repositories.
    #[must_use]
    pub fn new(tasks: Arc<T>, history: Arc<H>, alerts: Arc<A>) -> Self {
        Self {
            resolver: ChainResolver::new(Arc::clone(&tasks)),
            dispatcher: NotificationDispatcher::new(Arc::clone(&tasks), history, alerts),
            tasks,
        }
    }

    /// Notifies assignees and client contacts about tasks past their due
    /// date.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] when the candidate query fails.
    pub async fn run_overdue(&self, now: NaiveDateTime) -> Result<ScanSummary, ScanError> {
        let today = now.date();
        let candidates = self.tasks.find_overdue(today).await?;
        let mut reports = Vec::new();
        for detail in &candidates {
            let recipients = dedup_recipients(direct_recipients(detail));
            if recipients.is_empty() {
                debug!(task = %detail.task().id(), "overdue task has no recipients");
                continue;
            }
            let payload = NotificationPayload::Overdue {
                task: TaskSummary::from_detail(detail),
                delay_days: detail.task().delay_days(today),
            };
            reports.push(
                self.dispatcher
                    .send(
                        detail,
                        NotificationKind::Overdue,
                        &recipients,
                        payload,
                        None,
                        now,
                    )
                    .await,
            );
        }
        Ok(finish_scan(NotificationKind::Overdue, candidates.len(), reports))
    }

    /// Notifies assignees and client contacts about tasks due tomorrow.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] when the candidate query fails.
    pub async fn run_upcoming(&self, now: NaiveDateTime) -> Result<ScanSummary, ScanError> {
        let Some(tomorrow) = now.date().succ_opt() else {
            return Ok(finish_scan(NotificationKind::Upcoming, 0, Vec::new()));
        };
        let candidates = self.tasks.find_due_on(tomorrow).await?;
        let mut reports = Vec::new();
        for detail in &candidates {
            let recipients = dedup_recipients(direct_recipients(detail));
            if recipients.is_empty() {
                debug!(task = %detail.task().id(), "upcoming task has no recipients");
                continue;
            }
            let payload = NotificationPayload::Upcoming {
                task: TaskSummary::from_detail(detail),
                remaining_days: 1,
            };
            reports.push(
                self.dispatcher
                    .send(
                        detail,
                        NotificationKind::Upcoming,
                        &recipients,
                        payload,
                        None,
                        now,
                    )
                    .await,
            );
        }
        Ok(finish_scan(
            NotificationKind::Upcoming,
            candidates.len(),
            reports,
        ))
    }

    /// Notifies the people waiting on overdue prerequisites.
    ///
    /// Overdue tasks with no open dependents are skipped; the plain overdue
    /// scan already covers them.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] when the candidate or dependent query fails.
    pub async fn run_predecessor_delay(
        &self,
        now: NaiveDateTime,
    ) -> Result<ScanSummary, ScanError> {
        let today = now.date();
        let overdue = self.tasks.find_overdue(today).await?;
        let mut reports = Vec::new();
        for predecessor in &overdue {
            let dependents = self.tasks.find_dependents(predecessor.task().id()).await?;
            if dependents.is_empty() {
                continue;
            }
            let mut collected = Vec::new();
            for dependent in &dependents {
                collected.extend(direct_recipients(dependent));
            }
            let recipients = dedup_recipients(collected);
            if recipients.is_empty() {
                debug!(
                    task = %predecessor.task().id(),
                    "delayed predecessor has no reachable dependents"
                );
                continue;
            }
            let payload = NotificationPayload::PredecessorDelay {
                predecessor: TaskSummary::from_detail(predecessor),
                delay_days: predecessor.task().delay_days(today),
                dependents: dependents.iter().map(AffectedDependent::from_detail).collect(),
            };
            reports.push(
                self.dispatcher
                    .send(
                        predecessor,
                        NotificationKind::PredecessorDelay,
                        &recipients,
                        payload,
                        None,
                        now,
                    )
                    .await,
            );
        }
        Ok(finish_scan(
            NotificationKind::PredecessorDelay,
            overdue.len(),
            reports,
        ))
    }

    /// Notifies the people around a fixed deadline whose chain is slipping.
    ///
    /// A conflict needs both an overdue predecessor and an intermediate whose
    /// due date was already adjusted; an overdue predecessor alone stays
    /// silent until an adjustment lands.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] when the candidate query or chain resolution
    /// fails.
    pub async fn run_fixed_deadline(&self, now: NaiveDateTime) -> Result<ScanSummary, ScanError> {
        let today = now.date();
        let candidates = self.tasks.find_fixed_deadline().await?;
        let mut reports = Vec::new();
        for detail in &candidates {
            let chain = self.resolver.resolve(detail.task(), today).await?;
            let overdue_links = chain.overdue_predecessors();
            let adjusted_links = chain.adjusted_intermediates();
            if overdue_links.is_empty() || adjusted_links.is_empty() {
                continue;
            }

            let mut collected = Vec::new();
            for link in &adjusted_links {
                if let Some(person) = link.detail().assignee() {
                    collected.push(Recipient::from_person(person));
                }
            }
            collected.extend(direct_recipients(detail));
            let recipients = dedup_recipients(collected);
            if recipients.is_empty() {
                debug!(task = %detail.task().id(), "fixed-deadline task has no recipients");
                continue;
            }

            let payload = NotificationPayload::FixedDeadlineConflict {
                fixed_task: TaskSummary::from_detail(detail),
                overdue_predecessors: overdue_links
                    .iter()
                    .map(|link| {
                        let member = link.detail().task();
                        DelayedPredecessor {
                            id: member.id(),
                            name: member.name().to_owned(),
                            due_date: member.due_date(),
                            delay_days: member.delay_days(today),
                        }
                    })
                    .collect(),
                adjusted_intermediates: adjusted_links
                    .iter()
                    .map(|link| AffectedDependent::from_detail(link.detail()))
                    .collect(),
            };
            reports.push(
                self.dispatcher
                    .send(
                        detail,
                        NotificationKind::FixedDeadlineConflict,
                        &recipients,
                        payload,
                        None,
                        now,
                    )
                    .await,
            );
        }
        Ok(finish_scan(
            NotificationKind::FixedDeadlineConflict,
            candidates.len(),
            reports,
        ))
    }

    /// Runs the four scans in order and returns their summaries.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScanError`]; later scans do not run after a
    /// failed one.
    pub async fn run_all(&self, now: NaiveDateTime) -> Result<Vec<ScanSummary>, ScanError> {
        Ok(vec![
            self.run_overdue(now).await?,
            self.run_upcoming(now).await?,
            self.run_predecessor_delay(now).await?,
            self.run_fixed_deadline(now).await?,
        ])
    }
}

/// Collects the task assignee and the client contact for one task.
fn direct_recipients(detail: &TaskDetail) -> Vec<Recipient> {
    let mut recipients = Vec::new();
    if let Some(person) = detail.assignee() {
        recipients.push(Recipient::from_person(person));
    }
    if let Some(person) = detail.client_assignee() {
        recipients.push(Recipient::from_person(person));
    }
    recipients
}

fn finish_scan(
    kind: NotificationKind,
    matched: usize,
    reports: Vec<DispatchReport>,
) -> ScanSummary {
    let summary = ScanSummary::new(kind, matched, reports);
    info!(
        kind = kind.as_str(),
        matched = summary.matched(),
        dispatched = summary.dispatched(),
        throttled = summary.throttled(),
        "scan finished"
    );
    summary
}
