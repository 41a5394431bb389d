//! Append-only dispatch history used for auditing and throttling.

use super::{NotificationKind, NotificationPayload, Recipient};
use crate::task::domain::TaskId;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Record of one dispatch batch.
///
/// Exactly one entry is written per batch with at least one delivered
/// recipient; the throttle guard compares entries by calendar day, so one
/// entry blocks every later same-day attempt for its (task, kind) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationHistoryEntry {
    task: TaskId,
    kind: NotificationKind,
    sent_at: NaiveDateTime,
    recipients: Vec<Recipient>,
    payload: NotificationPayload,
}

impl NotificationHistoryEntry {
    /// Creates a history entry for a completed dispatch batch.
    #[must_use]
    pub fn new(
        task: TaskId,
        kind: NotificationKind,
        sent_at: NaiveDateTime,
        recipients: Vec<Recipient>,
        payload: NotificationPayload,
    ) -> Self {
        Self {
            task,
            kind,
            sent_at,
            recipients,
            payload,
        }
    }

    /// Returns the task the batch was about.
    #[must_use]
    pub const fn task(&self) -> TaskId {
        self.task
    }

    /// Returns the notification kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns when the batch was dispatched (caller-localized).
    #[must_use]
    pub const fn sent_at(&self) -> NaiveDateTime {
        self.sent_at
    }

    /// Returns the calendar day the batch was dispatched on.
    #[must_use]
    pub const fn sent_on(&self) -> NaiveDate {
        self.sent_at.date()
    }

    /// Returns the recipients the batch was addressed to.
    #[must_use]
    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    /// Returns the structured payload that was sent.
    #[must_use]
    pub const fn payload(&self) -> &NotificationPayload {
        &self.payload
    }
}
