//! Port contracts for notification persistence.

mod alerts;
mod error;
mod history;

pub use alerts::AlertRepository;
pub use error::{NotificationStoreError, NotificationStoreResult};
pub use history::NotificationHistoryRepository;
