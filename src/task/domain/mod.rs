//! Domain model for task management.
//!
//! Tasks carry a due date, a lifecycle status, a soft-delete flag, and a
//! weak prerequisite link to the task that must finish first. All
//! infrastructure concerns stay outside the domain boundary.

mod detail;
mod error;
mod ids;
mod people;
mod status;
mod task;

pub use detail::TaskDetail;
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{ClientServiceId, PersonId, TaskId};
pub use people::{ClientService, Person};
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task};
