//! Praxis: operations core for a professional-services firm.
//!
//! This crate implements the scheduling heart of a work-management backend:
//! computing generation and due dates for recurring client work, walking
//! prerequisite chains to detect cascading delays, and dispatching
//! at-most-once-per-day notifications with fan-out and partial-failure
//! handling. It is a library; an external scheduler drives the scans and an
//! external generator drives date computation.
//!
//! # Architecture
//!
//! Praxis follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the relational store
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`schedule`]: Declarative date rules and the memoizing date engine
//! - [`task`]: Work-item aggregate, scan queries, and chain resolution
//! - [`notification`]: Classifier scans, throttle guard, and dispatcher

pub mod notification;
pub mod schedule;
pub mod task;
