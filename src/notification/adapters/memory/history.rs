//! In-memory dispatch history.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, RwLock};

use crate::notification::domain::{NotificationHistoryEntry, NotificationKind};
use crate::notification::ports::{
    NotificationHistoryRepository, NotificationStoreError, NotificationStoreResult,
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory history repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationHistory {
    entries: Arc<RwLock<Vec<NotificationHistoryEntry>>>,
}

impl InMemoryNotificationHistory {
    /// Creates an empty in-memory history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every stored entry, in append order.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the state lock is poisoned.
    pub fn entries(&self) -> NotificationStoreResult<Vec<NotificationHistoryEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|err| NotificationStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(entries.clone())
    }
}

#[async_trait]
impl NotificationHistoryRepository for InMemoryNotificationHistory {
    async fn find_on_day(
        &self,
        task: TaskId,
        kind: NotificationKind,
        day: NaiveDate,
    ) -> NotificationStoreResult<Option<NotificationHistoryEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|err| NotificationStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(entries
            .iter()
            .filter(|entry| {
                entry.task() == task && entry.kind() == kind && entry.sent_on() == day
            })
            .max_by_key(|entry| entry.sent_at())
            .cloned())
    }

    async fn append(&self, entry: NotificationHistoryEntry) -> NotificationStoreResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|err| NotificationStoreError::persistence(std::io::Error::other(err.to_string())))?;
        entries.push(entry);
        Ok(())
    }
}
