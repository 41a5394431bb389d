//! Service layer for task management.

mod chain;

pub use chain::{ChainLink, ChainResolver, PrerequisiteChain, MAX_CHAIN_DEPTH};
