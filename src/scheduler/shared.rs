/*!
 * Shared Scheduler State
 * Ready queue and termination flag behind a single lock, shared by the
 * control loop and every core
 */

use super::atomic_stats::{AtomicSchedulerStats, SchedulerStats};
use super::ready_queue::ReadyQueue;
use super::types::SchedulerParams;
use crate::core::types::{CoreId, Millis, Pid, SimClock};
use crate::process::ProcessHandle;
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, error};

/// State guarded by the coordinator lock
#[derive(Debug, Default)]
pub struct SharedState {
    pub ready: ReadyQueue,
    pub all_terminated: bool,
    /// Pids in the order their last burst completed
    pub completion_order: Vec<Pid>,
}

/// A process a core has just taken ownership of
#[derive(Debug)]
pub struct Dispatch {
    pub handle: ProcessHandle,
    /// CPU time left in the burst under the cursor
    pub burst_ms: Millis,
    pub started_at: Millis,
}

/// Process-wide scheduler state
///
/// Created once per simulation and handed to every thread behind an `Arc`.
/// All ready-queue mutation funnels through `state`.
#[derive(Debug)]
pub struct SchedulerShared {
    state: Mutex<SharedState>,
    available: Condvar,
    params: SchedulerParams,
    clock: SimClock,
    stats: AtomicSchedulerStats,
}

impl SchedulerShared {
    pub fn new(params: SchedulerParams, clock: SimClock) -> Self {
        Self {
            state: Mutex::new(SharedState::default()),
            available: Condvar::new(),
            params,
            clock,
            stats: AtomicSchedulerStats::new(),
        }
    }

    #[inline]
    pub fn params(&self) -> &SchedulerParams {
        &self.params
    }

    #[inline]
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    #[inline]
    pub fn counters(&self) -> &AtomicSchedulerStats {
        &self.stats
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats.snapshot()
    }

    /// Acquire the coordinator lock
    #[inline]
    pub fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock()
    }

    /// Append a ready process to the tail and wake one idle core
    pub fn enqueue(&self, handle: ProcessHandle) -> bool {
        let pushed = self.state.lock().ready.push(handle);
        if pushed {
            self.available.notify_one();
        }
        pushed
    }

    /// Re-sort the ready queue per the active policy
    pub fn sort_ready(&self) {
        if self.params.policy.sorts_queue() {
            self.state.lock().ready.sort(self.params.policy);
        }
    }

    /// Pop the head of the ready queue and mark it running on `core`
    ///
    /// Blocks for at most `timeout` when the queue is empty. Returns `None`
    /// on timeout or once termination has been signalled.
    pub fn next_dispatch(&self, core: CoreId, timeout: Duration) -> Option<Dispatch> {
        let mut state = self.state.lock();
        if state.ready.is_empty() && !state.all_terminated {
            self.available.wait_for(&mut state, timeout);
        }
        if state.all_terminated {
            return None;
        }

        let handle = state.ready.pop()?;
        let now = self.clock.now_ms();
        let dispatched = handle.lock().dispatch(core, now);
        handle.clear_interrupt();

        match dispatched {
            Ok(burst_ms) => {
                self.stats.inc_dispatches();
                debug!(pid = handle.pid(), core, burst_ms, now, "Dispatched process");
                Some(Dispatch {
                    handle,
                    burst_ms,
                    started_at: now,
                })
            }
            Err(e) => {
                error!(core, error = %e, "Dequeued process could not be dispatched");
                None
            }
        }
    }

    pub fn record_completion(&self, pid: Pid) {
        self.state.lock().completion_order.push(pid);
        self.stats.inc_completed();
    }

    /// Signal every core and the control loop to exit
    pub fn terminate(&self) {
        self.state.lock().all_terminated = true;
        self.available.notify_all();
    }

    pub fn is_terminated(&self) -> bool {
        self.state.lock().all_terminated
    }

    pub fn completion_order(&self) -> Vec<Pid> {
        self.state.lock().completion_order.clone()
    }
}
