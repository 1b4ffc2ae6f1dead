//! Counting structures and the merge reducer
//!
//! A [`HandlerCount`] always holds all five severities, so a handler that was
//! seen only at one level still reports zeros for the others. An
//! [`AggregateCount`] maps handler names to those records. Merging is plain
//! per-slot addition, which makes it associative and commutative: workers may
//! finish in any order and the folded result is the same.

use std::collections::HashMap;
use std::ops::{Add, AddAssign, Index};

use crate::severity::Severity;

/// Per-severity counters for one handler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HandlerCount {
    slots: [u64; Severity::COUNT],
}

impl HandlerCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from counts listed in column order
    pub fn from_slots(slots: [u64; Severity::COUNT]) -> Self {
        Self { slots }
    }

    pub fn get(&self, severity: Severity) -> u64 {
        self.slots[severity.index()]
    }

    pub fn increment(&mut self, severity: Severity) {
        self.add_count(severity, 1);
    }

    pub fn add_count(&mut self, severity: Severity, amount: u64) {
        self.slots[severity.index()] += amount;
    }

    /// (severity, count) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (Severity, u64)> + '_ {
        Severity::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    pub fn total(&self) -> u64 {
        self.slots.iter().sum()
    }

    /// Sum of the request-outcome levels only
    pub fn request_total(&self) -> u64 {
        self.iter()
            .filter(|(severity, _)| severity.counts_toward_requests())
            .map(|(_, count)| count)
            .sum()
    }

    pub fn max(&self) -> u64 {
        self.slots.iter().copied().max().unwrap_or(0)
    }
}

impl Index<Severity> for HandlerCount {
    type Output = u64;

    fn index(&self, severity: Severity) -> &u64 {
        &self.slots[severity.index()]
    }
}

impl AddAssign for HandlerCount {
    fn add_assign(&mut self, other: HandlerCount) {
        for (slot, value) in self.slots.iter_mut().zip(other.slots) {
            *slot += value;
        }
    }
}

impl Add for HandlerCount {
    type Output = HandlerCount;

    fn add(mut self, other: HandlerCount) -> HandlerCount {
        self += other;
        self
    }
}

/// Handler name to per-severity counts.
///
/// Iteration order is unspecified; use [`AggregateCount::sorted_handlers`] for
/// anything user visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateCount {
    handlers: HashMap<String, HandlerCount>,
}

impl AggregateCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one classified record
    pub fn record(&mut self, severity: Severity, handler: &str) {
        match self.handlers.get_mut(handler) {
            Some(counts) => counts.increment(severity),
            None => {
                let mut counts = HandlerCount::new();
                counts.increment(severity);
                self.handlers.insert(handler.to_string(), counts);
            }
        }
    }

    pub fn get(&self, handler: &str) -> Option<&HandlerCount> {
        self.handlers.get(handler)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HandlerCount)> {
        self.handlers
            .iter()
            .map(|(name, counts)| (name.as_str(), counts))
    }

    /// Handlers in lexicographic order of their name
    pub fn sorted_handlers(&self) -> Vec<(&str, &HandlerCount)> {
        let mut handlers: Vec<_> = self.iter().collect();
        handlers.sort_unstable_by(|a, b| a.0.cmp(b.0));
        handlers
    }

    /// Fold `other` into this aggregate, consuming it
    pub fn absorb(&mut self, other: AggregateCount) {
        if self.handlers.is_empty() {
            self.handlers = other.handlers;
            return;
        }
        for (handler, counts) in other.handlers {
            *self.handlers.entry(handler).or_default() += counts;
        }
    }

    /// Combine two aggregates without touching either operand
    pub fn merge(&self, other: &AggregateCount) -> AggregateCount {
        let mut merged = self.clone();
        for (handler, counts) in &other.handlers {
            *merged.handlers.entry(handler.clone()).or_default() += *counts;
        }
        merged
    }

    /// Cross-handler sum for each severity
    pub fn severity_totals(&self) -> HandlerCount {
        self.handlers
            .values()
            .fold(HandlerCount::new(), |acc, counts| acc + *counts)
    }

    /// Number of request-outcome records (DEBUG, INFO and ERROR)
    pub fn total_requests(&self) -> u64 {
        self.severity_totals().request_total()
    }
}

impl FromIterator<(String, HandlerCount)> for AggregateCount {
    /// Duplicate names are summed rather than overwritten
    fn from_iter<I: IntoIterator<Item = (String, HandlerCount)>>(iter: I) -> Self {
        let mut aggregate = AggregateCount::new();
        for (handler, counts) in iter {
            *aggregate.handlers.entry(handler).or_default() += counts;
        }
        aggregate
    }
}
