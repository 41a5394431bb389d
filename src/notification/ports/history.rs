//! Repository port for the dispatch history.

use super::NotificationStoreResult;
use crate::notification::domain::{NotificationHistoryEntry, NotificationKind};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Persistence contract for dispatch history entries.
///
/// The history is append-only; the single read is the throttle guard's
/// same-day lookup.
#[async_trait]
pub trait NotificationHistoryRepository: Send + Sync {
    /// Returns the most recent entry for (task, kind) dated on `day`.
    ///
    /// The comparison truncates `sent_at` to its calendar date.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationStoreError`] when the lookup fails.
    async fn find_on_day(
        &self,
        task: TaskId,
        kind: NotificationKind,
        day: NaiveDate,
    ) -> NotificationStoreResult<Option<NotificationHistoryEntry>>;

    /// Appends one entry for a completed dispatch batch.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationStoreError`] when the write fails.
    async fn append(&self, entry: NotificationHistoryEntry) -> NotificationStoreResult<()>;
}
