//! Bounded upward traversal of prerequisite links.

use crate::task::domain::{Task, TaskDetail};
use crate::task::ports::{TaskRepository, TaskRepositoryResult};
use chrono::NaiveDate;
use std::sync::Arc;

/// Maximum number of prerequisite hops a traversal will follow.
///
/// Prerequisite links are not guaranteed acyclic by the schema; the fixed
/// bound terminates traversal on a cycle without a separate detection pass.
pub const MAX_CHAIN_DEPTH: usize = 10;

/// One resolved member of a prerequisite chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLink {
    detail: TaskDetail,
    overdue: bool,
    adjusted: bool,
}

impl ChainLink {
    /// Returns the joined task detail for this link.
    #[must_use]
    pub const fn detail(&self) -> &TaskDetail {
        &self.detail
    }

    /// Returns true when this link is open and past its due date.
    #[must_use]
    pub const fn is_overdue(&self) -> bool {
        self.overdue
    }

    /// Returns true when this link's due date has already been adjusted.
    #[must_use]
    pub const fn is_adjusted(&self) -> bool {
        self.adjusted
    }
}

/// The ordered ancestors of a task, nearest prerequisite first.
///
/// The starting task itself is never part of the chain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrerequisiteChain {
    links: Vec<ChainLink>,
    truncated: bool,
}

impl PrerequisiteChain {
    /// Returns the chain links, nearest prerequisite first.
    #[must_use]
    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    /// Returns true when the depth bound cut the walk short.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Returns the links that are open and past their due date.
    #[must_use]
    pub fn overdue_predecessors(&self) -> Vec<&ChainLink> {
        self.links.iter().filter(|link| link.overdue).collect()
    }

    /// Returns the links whose due dates have already been adjusted.
    #[must_use]
    pub fn adjusted_intermediates(&self) -> Vec<&ChainLink> {
        self.links.iter().filter(|link| link.adjusted).collect()
    }
}

/// Walks prerequisite links upward, one store round-trip per hop.
#[derive(Clone)]
pub struct ChainResolver<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
}

impl<R> ChainResolver<R>
where
    R: TaskRepository,
{
    /// Creates a resolver over the given repository.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Resolves the ancestor chain of `task`.
    ///
    /// The walk follows `prerequisite` references for at most
    /// [`MAX_CHAIN_DEPTH`] hops, stopping early when a link points at a
    /// missing task. Each member is classified as overdue (open and past due
    /// relative to `today`) and as adjusted (its due date was already moved).
    ///
    /// # Errors
    ///
    /// Propagates repository failures; a partially fetched chain is never
    /// returned.
    pub async fn resolve(
        &self,
        task: &Task,
        today: NaiveDate,
    ) -> TaskRepositoryResult<PrerequisiteChain> {
        let mut links = Vec::new();
        let mut next = task.prerequisite();
        let mut truncated = false;

        while let Some(id) = next {
            if links.len() >= MAX_CHAIN_DEPTH {
                truncated = true;
                break;
            }
            let Some(detail) = self.repository.find_detail_by_id(id).await? else {
                // Dangling link: the chain ends here.
                break;
            };
            let member = detail.task();
            let overdue = member.is_overdue(today);
            let adjusted = member.due_date_adjusted();
            next = member.prerequisite();
            links.push(ChainLink {
                detail,
                overdue,
                adjusted,
            });
        }

        Ok(PrerequisiteChain { links, truncated })
    }
}
