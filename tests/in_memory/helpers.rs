//! Shared fixtures for the behavioural tests.

use chrono::{NaiveDate, NaiveDateTime};
use praxis::notification::adapters::memory::{
    InMemoryAlertRepository, InMemoryNotificationHistory,
};
use praxis::notification::services::NotificationScanService;
use praxis::task::adapters::memory::InMemoryTaskRepository;
use praxis::task::domain::{ClientService, ClientServiceId, Person, PersonId, Task};
use std::sync::Arc;

/// The assembled in-memory world one test drives.
pub struct World {
    /// Task store.
    pub tasks: InMemoryTaskRepository,
    /// Dispatch history store.
    pub history: InMemoryNotificationHistory,
    /// Alert store.
    pub alerts: InMemoryAlertRepository,
    /// Scan service wired over the three stores.
    pub scans: NotificationScanService<
        InMemoryTaskRepository,
        InMemoryNotificationHistory,
        InMemoryAlertRepository,
    >,
}

/// Builds an empty world.
#[must_use]
pub fn world() -> World {
    let tasks = InMemoryTaskRepository::new();
    let history = InMemoryNotificationHistory::new();
    let alerts = InMemoryAlertRepository::new();
    let scans = NotificationScanService::new(
        Arc::new(tasks.clone()),
        Arc::new(history.clone()),
        Arc::new(alerts.clone()),
    );
    World {
        tasks,
        history,
        alerts,
        scans,
    }
}

/// Builds a calendar date or panics; test input is always valid.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Nine in the morning on the given day.
#[must_use]
pub fn morning(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_opt(9, 0, 0).expect("valid test time")
}

/// Seeds a person into the task store.
pub fn seed_person(world: &World, name: &str) -> Person {
    let person = Person::new(PersonId::new(), name);
    world
        .tasks
        .insert_person(person.clone())
        .expect("person insert should succeed");
    person
}

/// Seeds an engagement with an optional client contact.
pub fn seed_engagement(
    world: &World,
    client: &str,
    service: &str,
    contact: Option<&Person>,
) -> ClientService {
    let mut engagement = ClientService::new(ClientServiceId::new(), client, service);
    if let Some(person) = contact {
        engagement = engagement.with_client_assignee(person.id());
    }
    world
        .tasks
        .insert_client_service(engagement.clone())
        .expect("engagement insert should succeed");
    engagement
}

/// Seeds a task into the store and hands it back.
pub fn seed_task(world: &World, task: Task) -> Task {
    world
        .tasks
        .insert_task(task.clone())
        .expect("task insert should succeed");
    task
}
