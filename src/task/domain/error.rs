//! Error types for task domain validation and lifecycle transitions.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyName,

    /// The requested status transition is not allowed.
    #[error("cannot move task {id} from {from:?} to {to:?}")]
    InvalidTransition {
        /// Task being mutated.
        id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// The task is already completed or cancelled.
    #[error("task {id} is closed ({status:?}) and cannot be adjusted")]
    TaskClosed {
        /// Task being mutated.
        id: TaskId,
        /// Closing status.
        status: TaskStatus,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
