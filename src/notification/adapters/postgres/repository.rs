//! `PostgreSQL` repository implementations for alerts and dispatch history.

use super::{
    models::{HistoryRow, NewAlertRow, NewHistoryRow},
    schema::{alerts, notification_history},
};
use crate::notification::domain::{
    Alert, NotificationHistoryEntry, NotificationKind, Recipient,
};
use crate::notification::ports::{
    AlertRepository, NotificationHistoryRepository, NotificationStoreError,
    NotificationStoreResult,
};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by notification adapters.
pub type NotificationPgPool = Pool<ConnectionManager<PgConnection>>;

async fn run_blocking<F, T>(pool: NotificationPgPool, f: F) -> NotificationStoreResult<T>
where
    F: FnOnce(&mut PgConnection) -> NotificationStoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(NotificationStoreError::persistence)?;
        f(&mut connection)
    })
    .await
    .map_err(NotificationStoreError::persistence)?
}

/// `PostgreSQL`-backed alert repository.
#[derive(Debug, Clone)]
pub struct PostgresAlertRepository {
    pool: NotificationPgPool,
}

impl PostgresAlertRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: NotificationPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlertRepository for PostgresAlertRepository {
    async fn insert(&self, alert: Alert) -> NotificationStoreResult<()> {
        let row = NewAlertRow {
            id: alert.id().into_inner(),
            recipient_id: alert.recipient().into_inner(),
            kind: alert.kind().as_str().to_owned(),
            title: alert.title().to_owned(),
            description: alert.description().to_owned(),
            link: alert.link().to_owned(),
            payload: serde_json::to_value(alert.payload())
                .map_err(NotificationStoreError::persistence)?,
            is_admin: alert.is_admin(),
            created_at: alert.created_at(),
        };
        run_blocking(self.pool.clone(), move |connection| {
            diesel::insert_into(alerts::table)
                .values(&row)
                .execute(connection)
                .map_err(NotificationStoreError::persistence)?;
            Ok(())
        })
        .await
    }
}

/// `PostgreSQL`-backed dispatch history repository.
#[derive(Debug, Clone)]
pub struct PostgresNotificationHistory {
    pool: NotificationPgPool,
}

impl PostgresNotificationHistory {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: NotificationPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationHistoryRepository for PostgresNotificationHistory {
    async fn find_on_day(
        &self,
        task: TaskId,
        kind: NotificationKind,
        day: NaiveDate,
    ) -> NotificationStoreResult<Option<NotificationHistoryEntry>> {
        let (start, end) = day_bounds(day)?;
        run_blocking(self.pool.clone(), move |connection| {
            let row = notification_history::table
                .filter(notification_history::task_id.eq(task.into_inner()))
                .filter(notification_history::kind.eq(kind.as_str()))
                .filter(notification_history::sent_at.ge(start))
                .filter(notification_history::sent_at.lt(end))
                .order(notification_history::sent_at.desc())
                .select(HistoryRow::as_select())
                .first::<HistoryRow>(connection)
                .optional()
                .map_err(NotificationStoreError::persistence)?;
            row.map(row_to_entry).transpose()
        })
        .await
    }

    async fn append(&self, entry: NotificationHistoryEntry) -> NotificationStoreResult<()> {
        let row = NewHistoryRow {
            id: uuid::Uuid::new_v4(),
            task_id: entry.task().into_inner(),
            kind: entry.kind().as_str().to_owned(),
            sent_at: entry.sent_at(),
            recipients: serde_json::to_value(entry.recipients())
                .map_err(NotificationStoreError::persistence)?,
            payload: serde_json::to_value(entry.payload())
                .map_err(NotificationStoreError::persistence)?,
        };
        run_blocking(self.pool.clone(), move |connection| {
            diesel::insert_into(notification_history::table)
                .values(&row)
                .execute(connection)
                .map_err(NotificationStoreError::persistence)?;
            Ok(())
        })
        .await
    }
}

/// Returns the half-open timestamp range covering one calendar day.
fn day_bounds(day: NaiveDate) -> NotificationStoreResult<(NaiveDateTime, NaiveDateTime)> {
    let start = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| out_of_range(day))?;
    let end = day
        .succ_opt()
        .and_then(|next| next.and_hms_opt(0, 0, 0))
        .ok_or_else(|| out_of_range(day))?;
    Ok((start, end))
}

fn out_of_range(day: NaiveDate) -> NotificationStoreError {
    NotificationStoreError::persistence(std::io::Error::other(format!(
        "day out of timestamp range: {day}"
    )))
}

fn row_to_entry(row: HistoryRow) -> NotificationStoreResult<NotificationHistoryEntry> {
    let kind = NotificationKind::try_from(row.kind.as_str())
        .map_err(NotificationStoreError::persistence)?;
    let recipients: Vec<Recipient> =
        serde_json::from_value(row.recipients).map_err(NotificationStoreError::persistence)?;
    let payload =
        serde_json::from_value(row.payload).map_err(NotificationStoreError::persistence)?;
    Ok(NotificationHistoryEntry::new(
        TaskId::from_uuid(row.task_id),
        kind,
        row.sent_at,
        recipients,
        payload,
    ))
}
