//! Delay-propagation notifications for Praxis.
//!
//! Four scans classify tasks into notification candidates (overdue, upcoming,
//! predecessor delay, fixed-deadline conflict); a throttle guard enforces at
//! most one notification per task, kind, and calendar day; a dispatcher fans
//! each payload out to its recipients with partial-failure handling. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Guard, dispatcher, and scans in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
