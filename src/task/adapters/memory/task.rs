//! In-memory repository backing the chain and scan tests.
//!
//! Tasks live in an arena keyed by id, with an id-to-dependents index so the
//! prerequisite queries do not trust the links to form a DAG.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::domain::{
    ClientService, ClientServiceId, Person, PersonId, Task, TaskDetail, TaskId,
};
use crate::task::ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    dependents: HashMap<TaskId, Vec<TaskId>>,
    persons: HashMap<PersonId, Person>,
    client_services: HashMap<ClientServiceId, ClientService>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a person so joins can resolve the name.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the state lock is poisoned.
    pub fn insert_person(&self, person: Person) -> TaskRepositoryResult<()> {
        let mut state = write_state(&self.state)?;
        state.persons.insert(person.id(), person);
        Ok(())
    }

    /// Registers a client-service engagement.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the state lock is poisoned.
    pub fn insert_client_service(&self, engagement: ClientService) -> TaskRepositoryResult<()> {
        let mut state = write_state(&self.state)?;
        state.client_services.insert(engagement.id(), engagement);
        Ok(())
    }

    /// Stores a new task and indexes its prerequisite link.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the id already
    /// exists, or a persistence error when the state lock is poisoned.
    pub fn insert_task(&self, task: Task) -> TaskRepositoryResult<()> {
        let mut state = write_state(&self.state)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        index_prerequisite(&mut state, &task);
        state.tasks.insert(task.id(), task);
        Ok(())
    }

    /// Replaces an existing task, reindexing its prerequisite link.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or a persistence error when the state lock is poisoned.
    pub fn update_task(&self, task: Task) -> TaskRepositoryResult<()> {
        let mut state = write_state(&self.state)?;
        let previous = state
            .tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?
            .clone();
        if let Some(old_prerequisite) = previous.prerequisite() {
            remove_from_index(&mut state.dependents, task.id(), old_prerequisite);
        }
        index_prerequisite(&mut state, &task);
        state.tasks.insert(task.id(), task);
        Ok(())
    }
}

fn write_state(
    state: &Arc<RwLock<InMemoryTaskState>>,
) -> TaskRepositoryResult<std::sync::RwLockWriteGuard<'_, InMemoryTaskState>> {
    state
        .write()
        .map_err(|err| TaskRepositoryError::persistence(std::io::Error::other(err.to_string())))
}

fn read_state(
    state: &Arc<RwLock<InMemoryTaskState>>,
) -> TaskRepositoryResult<std::sync::RwLockReadGuard<'_, InMemoryTaskState>> {
    state
        .read()
        .map_err(|err| TaskRepositoryError::persistence(std::io::Error::other(err.to_string())))
}

fn index_prerequisite(state: &mut InMemoryTaskState, task: &Task) {
    if let Some(prerequisite) = task.prerequisite() {
        state
            .dependents
            .entry(prerequisite)
            .or_default()
            .push(task.id());
    }
}

fn remove_from_index(index: &mut HashMap<TaskId, Vec<TaskId>>, task_id: TaskId, key: TaskId) {
    if let Some(ids) = index.get_mut(&key) {
        ids.retain(|id| *id != task_id);
        if ids.is_empty() {
            index.remove(&key);
        }
    }
}

/// Joins one task with its client, service, and people names.
fn detail_for(state: &InMemoryTaskState, task: &Task) -> TaskDetail {
    let engagement = task
        .client_service()
        .and_then(|id| state.client_services.get(&id));
    let assignee = task
        .assignee()
        .and_then(|id| state.persons.get(&id))
        .cloned();
    let client_assignee = engagement
        .and_then(ClientService::client_assignee)
        .and_then(|id| state.persons.get(&id))
        .cloned();
    TaskDetail::new(
        task.clone(),
        engagement.map(|e| e.client_name().to_owned()),
        engagement.map(|e| e.service_name().to_owned()),
        assignee,
        client_assignee,
    )
}

/// Collects matching open tasks as details, ordered by due date then id.
fn collect_details<F>(state: &InMemoryTaskState, filter: F) -> Vec<TaskDetail>
where
    F: Fn(&Task) -> bool,
{
    let mut matched: Vec<&Task> = state
        .tasks
        .values()
        .filter(|&task| task.is_open() && filter(task))
        .collect();
    matched.sort_by_key(|task| (task.due_date(), task.id().into_inner()));
    matched
        .into_iter()
        .map(|task| detail_for(state, task))
        .collect()
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = read_state(&self.state)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_detail_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskDetail>> {
        let state = read_state(&self.state)?;
        Ok(state.tasks.get(&id).map(|task| detail_for(&state, task)))
    }

    async fn find_overdue(&self, today: NaiveDate) -> TaskRepositoryResult<Vec<TaskDetail>> {
        let state = read_state(&self.state)?;
        Ok(collect_details(&state, |task| task.due_date() < today))
    }

    async fn find_due_on(&self, date: NaiveDate) -> TaskRepositoryResult<Vec<TaskDetail>> {
        let state = read_state(&self.state)?;
        Ok(collect_details(&state, |task| task.due_date() == date))
    }

    async fn find_dependents(&self, id: TaskId) -> TaskRepositoryResult<Vec<TaskDetail>> {
        let state = read_state(&self.state)?;
        let ids = state.dependents.get(&id).cloned().unwrap_or_default();
        let mut matched: Vec<&Task> = ids
            .iter()
            .filter_map(|dependent| state.tasks.get(dependent))
            .filter(|task| task.is_open())
            .collect();
        matched.sort_by_key(|task| (task.due_date(), task.id().into_inner()));
        Ok(matched
            .into_iter()
            .map(|task| detail_for(&state, task))
            .collect())
    }

    async fn find_fixed_deadline(&self) -> TaskRepositoryResult<Vec<TaskDetail>> {
        let state = read_state(&self.state)?;
        Ok(collect_details(&state, Task::is_fixed_deadline))
    }
}
