/*!
 * Scheduler Traits
 * Interface between the control loop and whoever consumes its per-tick view
 */

use crate::core::types::{Millis, Pid};
use crate::process::{ProcessSnapshot, ProcessState};
use serde::{Deserialize, Serialize};

/// Consistent view of the simulation taken once per control-loop tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub elapsed_ms: Millis,
    /// Every process that has arrived, in configuration order
    pub processes: Vec<ProcessSnapshot>,
    /// Ready queue order, head first
    pub ready_queue: Vec<Pid>,
}

impl SimulationSnapshot {
    pub fn count_in(&self, state: ProcessState) -> usize {
        self.processes.iter().filter(|p| p.state == state).count()
    }

    pub fn get(&self, pid: Pid) -> Option<&ProcessSnapshot> {
        self.processes.iter().find(|p| p.pid == pid)
    }
}

/// Receives a snapshot after every control-loop tick
pub trait TickObserver {
    fn on_tick(&mut self, snapshot: &SimulationSnapshot);

    /// Called once after the last tick
    fn on_finish(&mut self, _snapshot: &SimulationSnapshot) {}
}

/// Observer that discards every snapshot
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl TickObserver for NullObserver {
    fn on_tick(&mut self, _snapshot: &SimulationSnapshot) {}
}

/// Observer that keeps every snapshot, for inspection after a run
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub snapshots: Vec<SimulationSnapshot>,
}

impl TickObserver for RecordingObserver {
    fn on_tick(&mut self, snapshot: &SimulationSnapshot) {
        self.snapshots.push(snapshot.clone());
    }
}
