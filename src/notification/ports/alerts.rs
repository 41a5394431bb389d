//! Repository port for per-recipient alerts.

use super::NotificationStoreResult;
use crate::notification::domain::Alert;
use async_trait::async_trait;

/// Persistence contract for alert rows.
///
/// The dispatcher calls [`AlertRepository::insert`] once per recipient and
/// treats each write independently; one failure must not poison the rest of
/// the batch.
#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// Inserts one alert row.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationStoreError`] when the write fails.
    async fn insert(&self, alert: Alert) -> NotificationStoreResult<()>;
}
