//! Memoizing date rule engine.

use super::memo::MemoCache;
use crate::schedule::domain::{days_due_date, DueRule, GenerationRule, ServicePeriod};
use chrono::NaiveDate;
use std::sync::Mutex;

/// Default capacity of each memoization cache.
const MEMO_CAPACITY: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GenerationKey {
    rule: GenerationRule,
    year: i32,
    month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DueKey {
    rule: DueRule,
    year: i32,
    month: u32,
    days_due: Option<i64>,
}

/// Computes generation and due dates from declarative rules, memoizing
/// results per engine instance.
///
/// Invalid input (year outside `[2000, 2100]`, month outside `[1, 12]`)
/// yields `None`, never an error. The two caches are bounded; when full, the
/// oldest half of the entries is evicted by insertion order. The caches are
/// instance state so tests can construct a fresh engine or call
/// [`DateRuleEngine::reset`]; a poisoned cache lock degrades to plain
/// recomputation.
#[derive(Debug)]
pub struct DateRuleEngine {
    generation: Mutex<MemoCache<GenerationKey, Option<NaiveDate>>>,
    due: Mutex<MemoCache<DueKey, Option<NaiveDate>>>,
}

impl DateRuleEngine {
    /// Creates an engine with the default cache capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MEMO_CAPACITY)
    }

    /// Creates an engine whose caches hold at most `capacity` entries each.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            generation: Mutex::new(MemoCache::new(capacity)),
            due: Mutex::new(MemoCache::new(capacity)),
        }
    }

    /// Computes the generation date for a rule and service period.
    ///
    /// Returns `None` when the service year or month is out of range.
    #[must_use]
    pub fn generation_date(
        &self,
        rule: &GenerationRule,
        year: i32,
        month: u32,
    ) -> Option<NaiveDate> {
        let period = ServicePeriod::new(year, month)?;
        let key = GenerationKey {
            rule: rule.clone(),
            year,
            month,
        };
        self.generation.lock().map_or_else(
            |_poisoned| rule.resolve(period),
            |mut cache| {
                let hit = cache.get(&key).copied();
                hit.unwrap_or_else(|| {
                    let value = rule.resolve(period);
                    cache.insert(key, value);
                    value
                })
            },
        )
    }

    /// Computes the due date for a rule and service period.
    ///
    /// A finite non-negative `days_due` always wins over the rule: the result
    /// is the first day of the service month plus `days_due` days. A negative
    /// `days_due` is treated as absent. Returns `None` when the service year
    /// or month is out of range.
    #[must_use]
    pub fn due_date(
        &self,
        rule: &DueRule,
        year: i32,
        month: u32,
        days_due: Option<i64>,
    ) -> Option<NaiveDate> {
        let period = ServicePeriod::new(year, month)?;
        let days = days_due.filter(|d| *d >= 0);
        let key = DueKey {
            rule: rule.clone(),
            year,
            month,
            days_due: days,
        };
        self.due.lock().map_or_else(
            |_poisoned| resolve_due(rule, period, days),
            |mut cache| {
                let hit = cache.get(&key).copied();
                hit.unwrap_or_else(|| {
                    let value = resolve_due(rule, period, days);
                    cache.insert(key, value);
                    value
                })
            },
        )
    }

    /// Clears both memoization caches.
    pub fn reset(&self) {
        if let Ok(mut cache) = self.generation.lock() {
            cache.clear();
        }
        if let Ok(mut cache) = self.due.lock() {
            cache.clear();
        }
    }

    /// Returns the current sizes of the generation and due caches.
    #[must_use]
    pub fn cache_sizes(&self) -> (usize, usize) {
        let generation = self.generation.lock().map_or(0, |cache| cache.len());
        let due = self.due.lock().map_or(0, |cache| cache.len());
        (generation, due)
    }
}

impl Default for DateRuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_due(rule: &DueRule, period: ServicePeriod, days: Option<i64>) -> Option<NaiveDate> {
    days.map_or_else(
        || rule.resolve(period),
        |d| u64::try_from(d).ok().and_then(|n| days_due_date(period, n)),
    )
}
