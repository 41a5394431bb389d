//! Notification kinds and their fixed titles.

use super::ParseNotificationKindError;
use serde::{Deserialize, Serialize};

/// The kind of a notification, one per scan.
///
/// The kind drives the alert title and the throttle key; adding a kind is a
/// checked extension because every lookup is an exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A task is past its due date.
    Overdue,
    /// A task is due tomorrow.
    Upcoming,
    /// A prerequisite of other tasks is running late.
    PredecessorDelay,
    /// A delayed chain threatens a task whose deadline cannot move.
    FixedDeadlineConflict,
}

impl NotificationKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::Upcoming => "upcoming",
            Self::PredecessorDelay => "predecessor_delay",
            Self::FixedDeadlineConflict => "fixed_deadline_conflict",
        }
    }

    /// Returns the alert title for this kind.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Overdue => "Task overdue",
            Self::Upcoming => "Task due tomorrow",
            Self::PredecessorDelay => "Prerequisite running late",
            Self::FixedDeadlineConflict => "Fixed deadline at risk",
        }
    }
}

impl TryFrom<&str> for NotificationKind {
    type Error = ParseNotificationKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "overdue" => Ok(Self::Overdue),
            "upcoming" => Ok(Self::Upcoming),
            "predecessor_delay" => Ok(Self::PredecessorDelay),
            "fixed_deadline_conflict" => Ok(Self::FixedDeadlineConflict),
            _ => Err(ParseNotificationKindError(value.to_owned())),
        }
    }
}
