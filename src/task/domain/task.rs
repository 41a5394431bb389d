//! Task aggregate root.

use super::{ClientServiceId, PersonId, TaskDomainError, TaskId, TaskStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A unit of client work with a due date and an optional prerequisite.
///
/// The prerequisite link is a weak self-reference: the schema does not
/// guarantee the resulting chain is acyclic, so traversal is always
/// depth-bounded (see [`crate::task::services::ChainResolver`]). Tasks are
/// soft-deleted only; this core never removes a task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    category: String,
    name: String,
    due_date: NaiveDate,
    status: TaskStatus,
    is_deleted: bool,
    assignee: Option<PersonId>,
    prerequisite: Option<TaskId>,
    is_fixed_deadline: bool,
    due_date_adjusted: bool,
    adjustment_reason: Option<String>,
    client_service: Option<ClientServiceId>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted category label.
    pub category: String,
    /// Persisted task name.
    pub name: String,
    /// Persisted due date.
    pub due_date: NaiveDate,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted soft-delete flag.
    pub is_deleted: bool,
    /// Persisted assignee reference, if any.
    pub assignee: Option<PersonId>,
    /// Persisted prerequisite reference, if any.
    pub prerequisite: Option<TaskId>,
    /// Persisted fixed-deadline flag.
    pub is_fixed_deadline: bool,
    /// Persisted adjustment flag.
    pub due_date_adjusted: bool,
    /// Persisted adjustment reason, if any.
    pub adjustment_reason: Option<String>,
    /// Persisted engagement reference, if any.
    pub client_service: Option<ClientServiceId>,
}

impl Task {
    /// Creates a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyName`] when the name is empty after
    /// trimming.
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        due_date: NaiveDate,
    ) -> Result<Self, TaskDomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TaskDomainError::EmptyName);
        }
        Ok(Self {
            id: TaskId::new(),
            category: category.into(),
            name,
            due_date,
            status: TaskStatus::Pending,
            is_deleted: false,
            assignee: None,
            prerequisite: None,
            is_fixed_deadline: false,
            due_date_adjusted: false,
            adjustment_reason: None,
            client_service: None,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            category: data.category,
            name: data.name,
            due_date: data.due_date,
            status: data.status,
            is_deleted: data.is_deleted,
            assignee: data.assignee,
            prerequisite: data.prerequisite,
            is_fixed_deadline: data.is_fixed_deadline,
            due_date_adjusted: data.due_date_adjusted,
            adjustment_reason: data.adjustment_reason,
            client_service: data.client_service,
        }
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: PersonId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the prerequisite task.
    #[must_use]
    pub const fn with_prerequisite(mut self, prerequisite: TaskId) -> Self {
        self.prerequisite = Some(prerequisite);
        self
    }

    /// Sets the owning engagement.
    #[must_use]
    pub const fn with_client_service(mut self, client_service: ClientServiceId) -> Self {
        self.client_service = Some(client_service);
        self
    }

    /// Marks the due date as immovable.
    #[must_use]
    pub const fn with_fixed_deadline(mut self) -> Self {
        self.is_fixed_deadline = true;
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the category label.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns true when the task has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<PersonId> {
        self.assignee
    }

    /// Returns the prerequisite task, if any.
    #[must_use]
    pub const fn prerequisite(&self) -> Option<TaskId> {
        self.prerequisite
    }

    /// Returns true when the due date must not move.
    #[must_use]
    pub const fn is_fixed_deadline(&self) -> bool {
        self.is_fixed_deadline
    }

    /// Returns true when the due date has been adjusted along the chain.
    #[must_use]
    pub const fn due_date_adjusted(&self) -> bool {
        self.due_date_adjusted
    }

    /// Returns the adjustment reason, if any.
    #[must_use]
    pub fn adjustment_reason(&self) -> Option<&str> {
        self.adjustment_reason.as_deref()
    }

    /// Returns the owning engagement, if any.
    #[must_use]
    pub const fn client_service(&self) -> Option<ClientServiceId> {
        self.client_service
    }

    /// Returns true while the task is pending or in progress and not deleted.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.status.is_open() && !self.is_deleted
    }

    /// Returns true when the task is open and past its due date.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_open() && self.due_date < today
    }

    /// Returns the number of whole calendar days the task is past due.
    #[must_use]
    pub fn delay_days(&self, today: NaiveDate) -> i64 {
        (today - self.due_date).num_days()
    }

    /// Moves a pending task into progress.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is
    /// pending.
    pub fn start(&mut self) -> Result<(), TaskDomainError> {
        self.transition(TaskStatus::Pending, TaskStatus::InProgress)
    }

    /// Completes an open task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskClosed`] when the task is already
    /// completed or cancelled.
    pub fn complete(&mut self) -> Result<(), TaskDomainError> {
        self.close(TaskStatus::Completed)
    }

    /// Cancels an open task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskClosed`] when the task is already
    /// completed or cancelled.
    pub fn cancel(&mut self) -> Result<(), TaskDomainError> {
        self.close(TaskStatus::Cancelled)
    }

    /// Moves the due date and records why.
    ///
    /// Sets the adjusted flag consumed by the fixed-deadline conflict scan.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskClosed`] when the task is already
    /// completed or cancelled.
    pub fn adjust_due_date(
        &mut self,
        due_date: NaiveDate,
        reason: impl Into<String>,
    ) -> Result<(), TaskDomainError> {
        if !self.status.is_open() {
            return Err(TaskDomainError::TaskClosed {
                id: self.id,
                status: self.status,
            });
        }
        self.due_date = due_date;
        self.due_date_adjusted = true;
        self.adjustment_reason = Some(reason.into());
        Ok(())
    }

    /// Soft-deletes the task. Idempotent.
    pub const fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    fn transition(&mut self, from: TaskStatus, to: TaskStatus) -> Result<(), TaskDomainError> {
        if self.status != from {
            return Err(TaskDomainError::InvalidTransition {
                id: self.id,
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    fn close(&mut self, to: TaskStatus) -> Result<(), TaskDomainError> {
        if !self.status.is_open() {
            return Err(TaskDomainError::TaskClosed {
                id: self.id,
                status: self.status,
            });
        }
        self.status = to;
        Ok(())
    }
}
