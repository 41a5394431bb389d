//! `PostgreSQL` repository implementation for the task scan queries.

use super::{
    models::{ClientServiceRow, PersonRow, TaskRow},
    schema::{client_services, persons, tasks},
};
use crate::task::domain::{
    ClientServiceId, PersistedTaskData, Person, PersonId, Task, TaskDetail, TaskId, TaskStatus,
};
use crate::task::ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use std::collections::HashMap;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Storage representations of the statuses a scan may still act on.
const OPEN_STATUSES: [&str; 2] = ["pending", "in_progress"];

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_detail_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskDetail>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map_or_else(
                || Ok(None),
                |found| Ok(load_details(connection, vec![found])?.into_iter().next()),
            )
        })
        .await
    }

    async fn find_overdue(&self, today: NaiveDate) -> TaskRepositoryResult<Vec<TaskDetail>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::is_deleted.eq(false))
                .filter(tasks::status.eq_any(OPEN_STATUSES))
                .filter(tasks::due_date.lt(today))
                .order((tasks::due_date.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            load_details(connection, rows)
        })
        .await
    }

    async fn find_due_on(&self, date: NaiveDate) -> TaskRepositoryResult<Vec<TaskDetail>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::is_deleted.eq(false))
                .filter(tasks::status.eq_any(OPEN_STATUSES))
                .filter(tasks::due_date.eq(date))
                .order((tasks::due_date.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            load_details(connection, rows)
        })
        .await
    }

    async fn find_dependents(&self, id: TaskId) -> TaskRepositoryResult<Vec<TaskDetail>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::is_deleted.eq(false))
                .filter(tasks::status.eq_any(OPEN_STATUSES))
                .filter(tasks::prerequisite_id.eq(id.into_inner()))
                .order((tasks::due_date.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            load_details(connection, rows)
        })
        .await
    }

    async fn find_fixed_deadline(&self) -> TaskRepositoryResult<Vec<TaskDetail>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::is_deleted.eq(false))
                .filter(tasks::status.eq_any(OPEN_STATUSES))
                .filter(tasks::is_fixed_deadline.eq(true))
                .order((tasks::due_date.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            load_details(connection, rows)
        })
        .await
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        category: row.category,
        name: row.name,
        due_date: row.due_date,
        status,
        is_deleted: row.is_deleted,
        assignee: row.assignee_id.map(PersonId::from_uuid),
        prerequisite: row.prerequisite_id.map(TaskId::from_uuid),
        is_fixed_deadline: row.is_fixed_deadline,
        due_date_adjusted: row.due_date_adjusted,
        adjustment_reason: row.adjustment_reason,
        client_service: row.client_service_id.map(ClientServiceId::from_uuid),
    }))
}

/// Resolves the joined names for a page of task rows.
///
/// Two follow-up queries (engagements, then people) keep the join logic off
/// the hot query and sidestep aliasing the persons table twice.
fn load_details(
    connection: &mut PgConnection,
    rows: Vec<TaskRow>,
) -> TaskRepositoryResult<Vec<TaskDetail>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let engagement_ids: Vec<uuid::Uuid> =
        rows.iter().filter_map(|row| row.client_service_id).collect();
    let engagements: HashMap<uuid::Uuid, ClientServiceRow> = client_services::table
        .filter(client_services::id.eq_any(&engagement_ids))
        .select(ClientServiceRow::as_select())
        .load::<ClientServiceRow>(connection)
        .map_err(TaskRepositoryError::persistence)?
        .into_iter()
        .map(|row| (row.id, row))
        .collect();

    let mut person_ids: Vec<uuid::Uuid> = rows.iter().filter_map(|row| row.assignee_id).collect();
    person_ids.extend(
        engagements
            .values()
            .filter_map(|engagement| engagement.client_assignee_id),
    );
    let people: HashMap<uuid::Uuid, PersonRow> = persons::table
        .filter(persons::id.eq_any(&person_ids))
        .select(PersonRow::as_select())
        .load::<PersonRow>(connection)
        .map_err(TaskRepositoryError::persistence)?
        .into_iter()
        .map(|row| (row.id, row))
        .collect();

    rows.into_iter()
        .map(|row| {
            let engagement = row.client_service_id.and_then(|id| engagements.get(&id));
            let assignee = row
                .assignee_id
                .and_then(|id| people.get(&id))
                .map(|person| Person::new(PersonId::from_uuid(person.id), person.full_name.clone()));
            let client_assignee = engagement
                .and_then(|found| found.client_assignee_id)
                .and_then(|id| people.get(&id))
                .map(|person| Person::new(PersonId::from_uuid(person.id), person.full_name.clone()));
            let client_name = engagement.map(|found| found.client_name.clone());
            let service_name = engagement.map(|found| found.service_name.clone());
            Ok(TaskDetail::new(
                row_to_task(row)?,
                client_name,
                service_name,
                assignee,
                client_assignee,
            ))
        })
        .collect()
}
