//! Task management for Praxis.
//!
//! This module owns the work-item aggregate: lifecycle status, soft delete,
//! due-date adjustment, the weak prerequisite link between tasks, and the
//! joined read model the notification scans consume. It follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The prerequisite chain resolver in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
