//! Service layer for notifications: throttle guard, dispatcher, and the
//! classifier scans.

mod dispatcher;
mod scans;
mod throttle;

pub use dispatcher::{DeliveryFailure, DispatchReport, NotificationDispatcher};
pub use scans::{NotificationScanService, ScanError, ScanSummary};
pub use throttle::{ThrottleDecision, ThrottleGuard, ThrottleRefusal};
