/*!
 * Process Entity
 * Identity, burst cursor, timestamps and derived metrics of a simulated process
 */

use super::bursts::BurstSequence;
use super::types::{ProcessMetrics, ProcessSnapshot, ProcessState};
use crate::config::ProcessDescriptor;
use crate::core::types::{CoreId, Millis, Pid, Priority};

/// A simulated workload unit
///
/// Mutated only by whoever currently holds it: the control loop while it is
/// not started, ready or in I/O, a single core while it is running.
#[derive(Debug, Clone)]
pub struct Process {
    pub(super) pid: Pid,
    pub(super) priority: Priority,
    pub(super) arrival_ms: Millis,
    pub(super) bursts: BurstSequence,
    pub(super) cursor: usize,
    pub(super) state: ProcessState,
    pub(super) core: Option<CoreId>,
    /// When the process first became ready
    pub(super) launched_at: Option<Millis>,
    /// Start of the current CPU dispatch or I/O wait
    pub(super) burst_started_at: Millis,
    pub(super) finished_at: Option<Millis>,
    pub(super) cpu_time_ms: Millis,
    pub(super) dispatches: u32,
    pub(super) preemptions: u32,
}

impl Process {
    /// Create a process from its descriptor at simulation time `now`
    ///
    /// Processes arriving at offset zero start out `Ready`.
    pub fn new(descriptor: &ProcessDescriptor, now: Millis) -> Self {
        let ready = descriptor.start_time == 0;
        Self {
            pid: descriptor.pid,
            priority: descriptor.priority,
            arrival_ms: descriptor.start_time,
            bursts: BurstSequence::new(descriptor.bursts.clone()),
            cursor: 0,
            state: if ready {
                ProcessState::Ready
            } else {
                ProcessState::NotStarted
            },
            core: None,
            launched_at: ready.then_some(now),
            burst_started_at: now,
            finished_at: None,
            cpu_time_ms: 0,
            dispatches: 0,
            preemptions: 0,
        }
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    #[inline]
    pub fn arrival_ms(&self) -> Millis {
        self.arrival_ms
    }

    #[inline]
    pub fn state(&self) -> ProcessState {
        self.state
    }

    #[inline]
    pub fn core(&self) -> Option<CoreId> {
        self.core
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn launched_at(&self) -> Option<Millis> {
        self.launched_at
    }

    pub fn finished_at(&self) -> Option<Millis> {
        self.finished_at
    }

    pub fn dispatches(&self) -> u32 {
        self.dispatches
    }

    pub fn preemptions(&self) -> u32 {
        self.preemptions
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.state == ProcessState::Terminated
    }

    /// Sum of the CPU bursts not yet consumed
    #[inline]
    pub fn remaining_cpu_ms(&self) -> Millis {
        self.bursts.remaining_cpu()
    }

    /// Duration left in the burst under the cursor
    #[inline]
    pub fn current_burst_ms(&self) -> Millis {
        self.bursts.get(self.cursor)
    }

    /// Time spent on the core in the dispatch currently in progress
    pub fn dispatch_elapsed(&self, now: Millis) -> Millis {
        if self.state == ProcessState::Running {
            now.saturating_sub(self.burst_started_at)
        } else {
            0
        }
    }

    /// End of the I/O burst in progress
    pub fn io_deadline(&self) -> Option<Millis> {
        (self.state == ProcessState::IO)
            .then(|| self.burst_started_at.saturating_add(self.current_burst_ms()))
    }

    /// Derive turnaround, wait, CPU and remaining time as of `now`
    ///
    /// Pure: only reads stored timestamps and the burst array, so repeated
    /// calls with the same `now` agree. Time on the core in a dispatch still
    /// in progress counts as CPU time already spent.
    pub fn metrics_at(&self, now: Millis) -> ProcessMetrics {
        let turnaround_ms = match self.launched_at {
            Some(launched) => self.finished_at.unwrap_or(now).saturating_sub(launched),
            None => 0,
        };

        let in_flight = match self.state {
            ProcessState::Running => self
                .dispatch_elapsed(now)
                .min(self.current_burst_ms()),
            _ => 0,
        };

        let mut io_ms = self.bursts.io_before(self.cursor);
        if self.state == ProcessState::IO {
            io_ms += now
                .saturating_sub(self.burst_started_at)
                .min(self.current_burst_ms());
        }

        let cpu_ms = self.cpu_time_ms + in_flight;
        ProcessMetrics {
            turnaround_ms,
            wait_ms: turnaround_ms.saturating_sub(cpu_ms + io_ms),
            cpu_ms,
            remaining_ms: self.remaining_cpu_ms().saturating_sub(in_flight),
        }
    }

    pub fn snapshot(&self, now: Millis) -> ProcessSnapshot {
        ProcessSnapshot {
            pid: self.pid,
            priority: self.priority,
            state: self.state,
            core: self.core,
            metrics: self.metrics_at(now),
            dispatches: self.dispatches,
            preemptions: self.preemptions,
            finished_at: self.finished_at,
        }
    }
}
