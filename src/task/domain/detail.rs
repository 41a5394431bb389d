//! Joined read model shared by the notification scans.

use super::{Person, Task};

/// One task row joined with its client, service, and people names.
///
/// Every scan query (overdue, upcoming, dependents, fixed-deadline) returns
/// this shape so recipients and payload text can be built without further
/// round-trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetail {
    task: Task,
    client_name: Option<String>,
    service_name: Option<String>,
    assignee: Option<Person>,
    client_assignee: Option<Person>,
}

impl TaskDetail {
    /// Assembles the read model from a task and its resolved joins.
    #[must_use]
    pub const fn new(
        task: Task,
        client_name: Option<String>,
        service_name: Option<String>,
        assignee: Option<Person>,
        client_assignee: Option<Person>,
    ) -> Self {
        Self {
            task,
            client_name,
            service_name,
            assignee,
            client_assignee,
        }
    }

    /// Returns the underlying task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the client display name, if the task belongs to a client.
    #[must_use]
    pub fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }

    /// Returns the service display name, if the task belongs to a service.
    #[must_use]
    pub fn service_name(&self) -> Option<&str> {
        self.service_name.as_deref()
    }

    /// Returns the task assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&Person> {
        self.assignee.as_ref()
    }

    /// Returns the person responsible for the client, if any.
    #[must_use]
    pub const fn client_assignee(&self) -> Option<&Person> {
        self.client_assignee.as_ref()
    }

    /// Returns a "Client / Service" label for notification text, falling
    /// back to whichever half is known.
    #[must_use]
    pub fn engagement_label(&self) -> Option<String> {
        match (self.client_name(), self.service_name()) {
            (Some(client), Some(service)) => Some(format!("{client} / {service}")),
            (Some(client), None) => Some(client.to_owned()),
            (None, Some(service)) => Some(service.to_owned()),
            (None, None) => None,
        }
    }
}
