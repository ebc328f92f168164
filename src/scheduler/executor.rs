/*!
 * Core Executor
 *
 * One thread per simulated core. Each iteration takes the head of the ready
 * queue, spins until the CPU burst elapses or the process is interrupted,
 * reclassifies the process and pays the context-switch delay.
 */

use super::shared::{Dispatch, SchedulerShared};
use crate::core::types::{CoreId, Millis};
use crate::process::DispatchOutcome;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info};

/// Poll interval of the burst wait loop
pub const BURST_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Work done by one core over a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreSummary {
    pub core: CoreId,
    pub dispatches: u64,
    pub busy_ms: Millis,
}

pub struct CoreExecutor {
    id: CoreId,
    shared: Arc<SchedulerShared>,
    summary: CoreSummary,
}

impl CoreExecutor {
    pub fn new(id: CoreId, shared: Arc<SchedulerShared>) -> Self {
        Self {
            id,
            shared,
            summary: CoreSummary {
                core: id,
                ..CoreSummary::default()
            },
        }
    }

    /// Execute dispatches until global termination is signalled
    pub fn run(mut self) -> CoreSummary {
        info!(core = self.id, "Core started");
        let idle_wait = self.shared.params().tick;
        let context_switch = self.shared.params().context_switch;

        while !self.shared.is_terminated() {
            let Some(dispatch) = self.shared.next_dispatch(self.id, idle_wait) else {
                continue;
            };

            self.execute(dispatch);

            thread::sleep(context_switch);
            self.shared.counters().inc_context_switches();
        }

        info!(
            core = self.id,
            dispatches = self.summary.dispatches,
            busy_ms = self.summary.busy_ms,
            "Core stopped"
        );
        self.summary
    }

    fn execute(&mut self, dispatch: Dispatch) {
        let budget = self.budget(&dispatch);
        self.wait_for_burst(&dispatch, budget);

        // The dispatch never runs past its budget; clamping absorbs poll jitter
        let ended_at = self
            .shared
            .clock()
            .now_ms()
            .min(dispatch.started_at.saturating_add(budget));
        let handle = dispatch.handle;
        let outcome = handle.lock().complete_dispatch(ended_at);
        handle.clear_interrupt();

        self.summary.dispatches += 1;
        self.summary.busy_ms += ended_at.saturating_sub(dispatch.started_at);

        match outcome {
            Ok(DispatchOutcome::Preempted) => {
                debug!(pid = handle.pid(), core = self.id, ended_at, "Process preempted");
                self.shared.counters().inc_preemptions();
                self.shared.enqueue(handle);
            }
            Ok(DispatchOutcome::Io) => {
                debug!(pid = handle.pid(), core = self.id, ended_at, "Process entered I/O");
            }
            Ok(DispatchOutcome::Terminated) => {
                debug!(pid = handle.pid(), core = self.id, ended_at, "Process terminated");
                self.shared.record_completion(handle.pid());
            }
            Err(e) => error!(core = self.id, error = %e, "Dispatch completion failed"),
        }
    }

    /// Longest this dispatch may run: the burst, capped by the time slice
    /// under round-robin
    fn budget(&self, dispatch: &Dispatch) -> Millis {
        let params = self.shared.params();
        if params.policy.uses_time_slice() {
            dispatch.burst_ms.min(params.time_slice_ms)
        } else {
            dispatch.burst_ms
        }
    }

    /// Spin until `budget` has elapsed or the process is interrupted
    fn wait_for_burst(&self, dispatch: &Dispatch, budget: Millis) {
        let clock = self.shared.clock();
        loop {
            let elapsed = clock.now_ms().saturating_sub(dispatch.started_at);
            if elapsed >= budget || dispatch.handle.is_interrupted() {
                return;
            }
            let left = Duration::from_millis(budget - elapsed);
            thread::sleep(BURST_POLL_INTERVAL.min(left));
        }
    }
}
