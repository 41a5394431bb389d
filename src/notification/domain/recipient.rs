//! Notification recipients and fan-out deduplication.

use crate::task::domain::{Person, PersonId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A person an alert is delivered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    id: PersonId,
    name: String,
    admin: bool,
}

impl Recipient {
    /// Creates a regular recipient.
    #[must_use]
    pub fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            admin: false,
        }
    }

    /// Creates a recipient whose alerts are flagged for the admin view.
    #[must_use]
    pub fn admin(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            admin: true,
        }
    }

    /// Builds a recipient from a joined person record.
    #[must_use]
    pub fn from_person(person: &Person) -> Self {
        Self::new(person.id(), person.name())
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

    /// Returns true when alerts to this recipient carry the admin flag.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.admin
    }
}

/// Removes duplicate recipients by person id, preserving first-seen order.
///
/// The same person is often both a task assignee and the client contact;
/// they still get exactly one alert per dispatch.
#[must_use]
pub fn dedup_recipients(recipients: Vec<Recipient>) -> Vec<Recipient> {
    let mut seen = HashSet::new();
    recipients
        .into_iter()
        .filter(|recipient| seen.insert(recipient.id()))
        .collect()
}
