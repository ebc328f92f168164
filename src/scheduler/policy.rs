/*!
 * Ordering Policies
 * Comparison predicates that define ready-queue order per algorithm
 */

use super::types::SchedulingPolicy;
use crate::core::types::{Millis, Pid, Priority};
use crate::process::Process;
use std::cmp::Ordering;

/// Sort key captured from a queued process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderKey {
    pub pid: Pid,
    pub priority: Priority,
    pub remaining_ms: Millis,
}

impl OrderKey {
    pub fn of(process: &Process) -> Self {
        Self {
            pid: process.pid(),
            priority: process.priority(),
            remaining_ms: process.remaining_cpu_ms(),
        }
    }
}

/// Strict predicate: true when `a` must be placed after `b`
pub type Comparator = fn(&OrderKey, &OrderKey) -> bool;

/// Shortest remaining CPU time first
pub fn shortest_remaining_follows(a: &OrderKey, b: &OrderKey) -> bool {
    a.remaining_ms > b.remaining_ms
}

/// Numerically smaller priority first
pub fn priority_follows(a: &OrderKey, b: &OrderKey) -> bool {
    a.priority > b.priority
}

impl SchedulingPolicy {
    /// Comparator for policies that reorder the ready queue
    pub fn comparator(&self) -> Option<Comparator> {
        match self {
            Self::Fcfs | Self::RoundRobin => None,
            Self::ShortestRemainingTime => Some(shortest_remaining_follows),
            Self::PreemptivePriority => Some(priority_follows),
        }
    }
}

/// Turn a "follows" predicate into a total order for `sort_by`
#[inline]
pub fn ordering(follows: Comparator, a: &OrderKey, b: &OrderKey) -> Ordering {
    if follows(a, b) {
        Ordering::Greater
    } else if follows(b, a) {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

/// Stable ascending sort of `items` by `follows`; equal keys keep their
/// relative (arrival) order
pub fn sort_stable<T>(items: &mut [(OrderKey, T)], follows: Comparator) {
    items.sort_by(|(a, _), (b, _)| ordering(follows, a, b));
}
