/*!
 * Scheduler Coordinator
 *
 * Control loop that drives simulated time: admits arriving processes, returns
 * processes whose I/O finished to the ready queue, requests preemption of
 * running processes, re-sorts the queue and detects global completion.
 *
 * The coordinator lock is taken around individual queue operations only,
 * never across the whole per-process scan.
 */

use super::shared::SchedulerShared;
use super::traits::{SimulationSnapshot, TickObserver};
use super::types::SchedulingPolicy;
use crate::core::types::Millis;
use crate::process::{ProcessHandle, ProcessState};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info, instrument, trace};

pub struct Coordinator {
    shared: Arc<SchedulerShared>,
    processes: Vec<ProcessHandle>,
}

impl Coordinator {
    pub fn new(shared: Arc<SchedulerShared>, processes: Vec<ProcessHandle>) -> Self {
        Self { shared, processes }
    }

    /// Run ticks until every process has terminated
    #[instrument(skip_all, fields(policy = %self.shared.params().policy))]
    pub fn run<O: TickObserver + ?Sized>(&self, observer: &mut O) {
        let tick = self.shared.params().tick;
        info!(processes = self.processes.len(), ?tick, "Control loop started");

        loop {
            let done = self.tick();
            observer.on_tick(&self.snapshot());
            if done {
                break;
            }
            thread::sleep(tick);
        }

        info!(elapsed_ms = self.shared.clock().now_ms(), "Control loop finished");
    }

    /// One control-loop pass; returns true once every process has terminated
    pub fn tick(&self) -> bool {
        let now = self.shared.clock().now_ms();
        trace!(now, "Scheduler tick");

        for handle in &self.processes {
            self.step(handle, now);
        }

        self.shared.sort_ready();

        let done = self.processes.iter().all(|h| h.lock().is_terminated());
        if done {
            self.shared.terminate();
        }
        done
    }

    fn step(&self, handle: &ProcessHandle, now: Millis) {
        let state = handle.lock().state();
        match state {
            ProcessState::NotStarted => self.admit_if_arrived(handle, now),
            ProcessState::IO => self.finish_io_if_elapsed(handle, now),
            ProcessState::Running => self.check_preemption(handle, now),
            ProcessState::Ready | ProcessState::Terminated => {}
        }
    }

    fn admit_if_arrived(&self, handle: &ProcessHandle, now: Millis) {
        let admitted = {
            let mut process = handle.lock();
            if now < process.arrival_ms() {
                return;
            }
            process.admit(now)
        };

        match admitted {
            Ok(()) => {
                debug!(pid = handle.pid(), now, "Process arrived");
                self.shared.enqueue(Arc::clone(handle));
            }
            Err(e) => error!(error = %e, "Admission failed"),
        }
    }

    fn finish_io_if_elapsed(&self, handle: &ProcessHandle, now: Millis) {
        let finished = {
            let mut process = handle.lock();
            match process.io_deadline() {
                Some(deadline) if deadline <= now => process.finish_io(),
                _ => return,
            }
        };

        match finished {
            Ok(()) => {
                debug!(pid = handle.pid(), now, "I/O burst finished");
                self.shared.enqueue(Arc::clone(handle));
            }
            Err(e) => error!(error = %e, "I/O completion failed"),
        }
    }

    /// Raise the interrupt flag of a running process whose slice expired or
    /// that is outranked by a queued process
    fn check_preemption(&self, handle: &ProcessHandle, now: Millis) {
        let params = *self.shared.params();
        let shared = self.shared.lock();
        let process = handle.lock();
        if process.state() != ProcessState::Running {
            return;
        }

        let slice_expired = params.policy.uses_time_slice()
            && process.dispatch_elapsed(now) > params.time_slice_ms;
        let outranked = params.policy == SchedulingPolicy::PreemptivePriority
            && shared
                .ready
                .best_priority()
                .is_some_and(|best| best < process.priority());

        if (slice_expired || outranked) && handle.interrupt() {
            debug!(
                pid = handle.pid(),
                core = ?process.core(),
                slice_expired,
                outranked,
                "Preemption requested"
            );
        }
    }

    /// Snapshot of every arrived process, taken under the coordinator lock so
    /// no dispatch happens while it is assembled
    pub fn snapshot(&self) -> SimulationSnapshot {
        let shared = self.shared.lock();
        let now = self.shared.clock().now_ms();
        let processes = self
            .processes
            .iter()
            .filter_map(|h| {
                let process = h.lock();
                (process.state() != ProcessState::NotStarted).then(|| process.snapshot(now))
            })
            .collect();

        SimulationSnapshot {
            elapsed_ms: now,
            processes,
            ready_queue: shared.ready.pids(),
        }
    }
}
