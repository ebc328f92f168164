/*!
 * Process Types
 * Lifecycle states, errors, and per-process reporting types
 */

use crate::core::types::{millis_to_secs, CoreId, Millis, Pid, Priority};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
///
/// These only surface when a lifecycle invariant has been broken by a caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Invalid state transition for process {pid}: {from:?} -> {to:?}")]
    InvalidStateTransition {
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
    },
}

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Arrival offset has not been reached yet
    NotStarted,
    /// Eligible for dispatch, sitting in the ready queue
    Ready,
    /// Executing a CPU burst on a core
    Running,
    /// Waiting out an I/O burst
    IO,
    /// All bursts consumed
    Terminated,
}

impl ProcessState {
    /// Name used by the status table
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::Ready => "ready",
            Self::Running => "running",
            Self::IO => "i/o",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a dispatch ended, as decided when the process leaves `Running`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Last CPU burst finished
    Terminated,
    /// CPU burst finished; the process is now waiting on I/O
    Io,
    /// Interrupted before the burst finished; the process is `Ready` again
    Preempted,
}

/// Derived timing metrics in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    pub turnaround_ms: Millis,
    pub wait_ms: Millis,
    pub cpu_ms: Millis,
    pub remaining_ms: Millis,
}

impl ProcessMetrics {
    pub fn turnaround_secs(&self) -> f64 {
        millis_to_secs(self.turnaround_ms)
    }

    pub fn wait_secs(&self) -> f64 {
        millis_to_secs(self.wait_ms)
    }

    pub fn cpu_secs(&self) -> f64 {
        millis_to_secs(self.cpu_ms)
    }

    pub fn remaining_secs(&self) -> f64 {
        millis_to_secs(self.remaining_ms)
    }
}

/// Point-in-time view of a process for display and reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    pub pid: Pid,
    pub priority: Priority,
    pub state: ProcessState,
    pub core: Option<CoreId>,
    pub metrics: ProcessMetrics,
    pub dispatches: u32,
    pub preemptions: u32,
    pub finished_at: Option<Millis>,
}
