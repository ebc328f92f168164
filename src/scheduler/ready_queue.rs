/*!
 * Ready Queue
 * FIFO of dispatchable processes, reorderable per scheduling policy
 */

use super::policy::{sort_stable, OrderKey};
use super::types::SchedulingPolicy;
use crate::core::types::{Pid, Priority};
use crate::process::{ProcessHandle, ProcessState};
use std::collections::VecDeque;
use tracing::warn;

/// Ready queue
///
/// Lives inside the coordinator lock; holding a handle here means the queue
/// owns the process until a core pops it.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    entries: VecDeque<ProcessHandle>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the tail
    ///
    /// A process already queued, or not in the `Ready` state, is refused.
    pub fn push(&mut self, handle: ProcessHandle) -> bool {
        if self.contains(handle.pid()) {
            warn!(pid = handle.pid(), "Process already in ready queue");
            return false;
        }
        let state = handle.lock().state();
        if state != ProcessState::Ready {
            warn!(pid = handle.pid(), state = %state, "Refusing to queue non-ready process");
            return false;
        }
        self.entries.push_back(handle);
        true
    }

    #[inline]
    pub fn pop(&mut self) -> Option<ProcessHandle> {
        self.entries.pop_front()
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.entries.iter().any(|h| h.pid() == pid)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most urgent (numerically smallest) priority waiting in the queue
    pub fn best_priority(&self) -> Option<Priority> {
        self.entries.iter().map(|h| h.priority()).min()
    }

    /// Queue order as pids, head first
    pub fn pids(&self) -> Vec<Pid> {
        self.entries.iter().map(|h| h.pid()).collect()
    }

    /// Reorder according to `policy`; no-op for FIFO policies
    pub fn sort(&mut self, policy: SchedulingPolicy) {
        let Some(follows) = policy.comparator() else {
            return;
        };
        if self.entries.len() < 2 {
            return;
        }

        let mut keyed: Vec<(OrderKey, ProcessHandle)> = self
            .entries
            .drain(..)
            .map(|h| {
                let key = OrderKey::of(&h.lock());
                (key, h)
            })
            .collect();
        sort_stable(&mut keyed, follows);
        self.entries.extend(keyed.into_iter().map(|(_, h)| h));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProcessDescriptor;
    use crate::core::types::Millis;
    use crate::process::SimProcess;
    use pretty_assertions::assert_eq;

    fn ready(pid: Pid, priority: Priority, burst: Millis) -> ProcessHandle {
        SimProcess::new(
            &ProcessDescriptor {
                pid,
                priority,
                start_time: 0,
                bursts: vec![burst],
            },
            0,
        )
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = ReadyQueue::new();
        queue.push(ready(1, 5, 100));
        queue.push(ready(2, 1, 10));

        queue.sort(SchedulingPolicy::Fcfs);
        assert_eq!(queue.pids(), vec![1, 2]);
        assert_eq!(queue.pop().map(|h| h.pid()), Some(1));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_duplicate_push_refused() {
        let mut queue = ReadyQueue::new();
        let handle = ready(1, 5, 100);

        assert!(queue.push(handle.clone()));
        assert!(!queue.push(handle));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_non_ready_push_refused() {
        let mut queue = ReadyQueue::new();
        let handle = SimProcess::new(
            &ProcessDescriptor {
                pid: 3,
                priority: 0,
                start_time: 100,
                bursts: vec![10],
            },
            0,
        );

        assert!(!queue.push(handle));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_shortest_remaining_sort() {
        let mut queue = ReadyQueue::new();
        queue.push(ready(1, 0, 100));
        queue.push(ready(2, 0, 20));
        queue.push(ready(3, 0, 100));
        queue.push(ready(4, 0, 50));

        queue.sort(SchedulingPolicy::ShortestRemainingTime);
        assert_eq!(queue.pids(), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_priority_sort_and_best() {
        let mut queue = ReadyQueue::new();
        queue.push(ready(1, 5, 10));
        queue.push(ready(2, 1, 10));
        queue.push(ready(3, 3, 10));

        assert_eq!(queue.best_priority(), Some(1));
        queue.sort(SchedulingPolicy::PreemptivePriority);
        assert_eq!(queue.pids(), vec![2, 3, 1]);
    }
}
