//! In-memory alert store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::notification::domain::Alert;
use crate::notification::ports::{
    AlertRepository, NotificationStoreError, NotificationStoreResult,
};

/// Thread-safe in-memory alert repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAlertRepository {
    alerts: Arc<RwLock<Vec<Alert>>>,
}

impl InMemoryAlertRepository {
    /// Creates an empty in-memory alert store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every stored alert, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the state lock is poisoned.
    pub fn alerts(&self) -> NotificationStoreResult<Vec<Alert>> {
        let alerts = self
            .alerts
            .read()
            .map_err(|err| NotificationStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(alerts.clone())
    }
}

#[async_trait]
impl AlertRepository for InMemoryAlertRepository {
    async fn insert(&self, alert: Alert) -> NotificationStoreResult<()> {
        let mut alerts = self
            .alerts
            .write()
            .map_err(|err| NotificationStoreError::persistence(std::io::Error::other(err.to_string())))?;
        alerts.push(alert);
        Ok(())
    }
}
