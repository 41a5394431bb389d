//! Per-recipient delivery records.

use super::{NotificationKind, NotificationPayload, Recipient};
use crate::task::domain::{PersonId, TaskId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an alert record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(Uuid);

impl AlertId {
    /// Creates a new random alert identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an alert identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for AlertId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One delivered notification: a single recipient's copy of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    id: AlertId,
    recipient: PersonId,
    kind: NotificationKind,
    title: String,
    description: String,
    link: String,
    payload: NotificationPayload,
    admin: bool,
    created_at: NaiveDateTime,
}

impl Alert {
    /// Creates an alert addressed to one recipient.
    #[must_use]
    pub fn new(
        recipient: &Recipient,
        kind: NotificationKind,
        title: impl Into<String>,
        description: impl Into<String>,
        link: impl Into<String>,
        payload: NotificationPayload,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: AlertId::new(),
            recipient: recipient.id(),
            kind,
            title: title.into(),
            description: description.into(),
            link: link.into(),
            payload,
            admin: recipient.is_admin(),
            created_at,
        }
    }

    /// Returns the alert identifier.
    #[must_use]
    pub const fn id(&self) -> AlertId {
        self.id
    }

    /// Returns the recipient.
    #[must_use]
    pub const fn recipient(&self) -> PersonId {
        self.recipient
    }

    /// Returns the notification kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the deep link into the task view.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Returns the structured payload.
    #[must_use]
    pub const fn payload(&self) -> &NotificationPayload {
        &self.payload
    }

    /// Returns true when the alert is flagged for the admin view.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.admin
    }

    /// Returns the creation timestamp (caller-localized).
    #[must_use]
    pub const fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }
}

/// Returns the deep link for a task.
#[must_use]
pub fn task_link(id: TaskId) -> String {
    format!("/tasks/{id}")
}
