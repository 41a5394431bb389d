//! Diesel row models for task persistence.

use super::schema::{client_services, persons, tasks};
use chrono::NaiveDate;
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Category label.
    pub category: String,
    /// Task display name.
    pub name: String,
    /// Calendar due date.
    pub due_date: NaiveDate,
    /// Lifecycle status.
    pub status: String,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Optional assignee reference.
    pub assignee_id: Option<uuid::Uuid>,
    /// Optional prerequisite task reference.
    pub prerequisite_id: Option<uuid::Uuid>,
    /// Whether the due date must not move.
    pub is_fixed_deadline: bool,
    /// Whether the due date was adjusted along the chain.
    pub due_date_adjusted: bool,
    /// Why the due date was adjusted, if it was.
    pub adjustment_reason: Option<String>,
    /// Optional owning engagement.
    pub client_service_id: Option<uuid::Uuid>,
}

/// Query result row for person records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = persons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PersonRow {
    /// Person identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub full_name: String,
}

/// Query result row for client-service engagements.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = client_services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ClientServiceRow {
    /// Engagement identifier.
    pub id: uuid::Uuid,
    /// Client display name.
    pub client_name: String,
    /// Service display name.
    pub service_name: String,
    /// Person responsible for the client, if any.
    pub client_assignee_id: Option<uuid::Uuid>,
}
