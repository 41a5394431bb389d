//! Recurring-task date computation for Praxis.
//!
//! The schedule context turns declarative generation and due-date rules into
//! concrete calendar dates for a service period. The rule vocabulary and the
//! calendar arithmetic live in [`domain`]; the memoizing engine that the task
//! generator calls lives in [`services`].

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
