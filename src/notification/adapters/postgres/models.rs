//! Diesel row models for notification persistence.

use super::schema::{alerts, notification_history};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde_json::Value;

/// Insert model for alert records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = alerts)]
pub struct NewAlertRow {
    /// Alert identifier.
    pub id: uuid::Uuid,
    /// Recipient person identifier.
    pub recipient_id: uuid::Uuid,
    /// Notification kind.
    pub kind: String,
    /// Alert title.
    pub title: String,
    /// Alert description text.
    pub description: String,
    /// Deep link into the task view.
    pub link: String,
    /// Structured payload.
    pub payload: Value,
    /// Whether the alert is flagged for the admin view.
    pub is_admin: bool,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

/// Query result row for history records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notification_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HistoryRow {
    /// History entry identifier.
    pub id: uuid::Uuid,
    /// Task the batch was about.
    pub task_id: uuid::Uuid,
    /// Notification kind.
    pub kind: String,
    /// Dispatch timestamp.
    pub sent_at: NaiveDateTime,
    /// Serialized recipient list.
    pub recipients: Value,
    /// Serialized payload.
    pub payload: Value,
}

/// Insert model for history records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notification_history)]
pub struct NewHistoryRow {
    /// History entry identifier.
    pub id: uuid::Uuid,
    /// Task the batch was about.
    pub task_id: uuid::Uuid,
    /// Notification kind.
    pub kind: String,
    /// Dispatch timestamp.
    pub sent_at: NaiveDateTime,
    /// Serialized recipient list.
    pub recipients: Value,
    /// Serialized payload.
    pub payload: Value,
}
