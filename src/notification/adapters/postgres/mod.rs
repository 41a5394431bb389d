//! `PostgreSQL` adapter for notification persistence.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{NotificationPgPool, PostgresAlertRepository, PostgresNotificationHistory};
