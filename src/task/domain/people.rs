//! People and client-service engagements referenced by tasks.

use super::{ClientServiceId, PersonId};
use serde::{Deserialize, Serialize};

/// A person who can receive notifications: a task assignee or the contact
/// responsible for a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    name: String,
}

impl Person {
    /// Creates a person record.
    #[must_use]
    pub fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the person identifier.
    #[must_use]
    pub const fn id(&self) -> PersonId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A client-service engagement: the client a task is performed for, the
/// service line it belongs to, and the person responsible for the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientService {
    id: ClientServiceId,
    client_name: String,
    service_name: String,
    client_assignee: Option<PersonId>,
}

impl ClientService {
    /// Creates an engagement record.
    #[must_use]
    pub fn new(
        id: ClientServiceId,
        client_name: impl Into<String>,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            client_name: client_name.into(),
            service_name: service_name.into(),
            client_assignee: None,
        }
    }

    /// Sets the person responsible for the client.
    #[must_use]
    pub const fn with_client_assignee(mut self, assignee: PersonId) -> Self {
        self.client_assignee = Some(assignee);
        self
    }

    /// Returns the engagement identifier.
    #[must_use]
    pub const fn id(&self) -> ClientServiceId {
        self.id
    }

    /// Returns the client display name.
    #[must_use]
    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    /// Returns the service display name.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Returns the person responsible for the client, if any.
    #[must_use]
    pub const fn client_assignee(&self) -> Option<PersonId> {
        self.client_assignee
    }
}
