/*!
 * Simulation Report
 * Aggregate statistics computed once every process has terminated
 */

use super::atomic_stats::SchedulerStats;
use super::executor::CoreSummary;
use crate::core::types::{millis_to_secs, Millis, Pid};
use crate::process::ProcessSnapshot;
use serde::{Deserialize, Serialize};

/// Completion rate in processes per second
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Throughput {
    /// Over the first half of processes to finish
    pub first_half: f64,
    /// Over the second half of processes to finish
    pub second_half: f64,
    pub overall: f64,
}

impl Throughput {
    /// Compute from completion times (ms since simulation start)
    ///
    /// The first half holds ceil(n/2) processes.
    pub fn from_completion_times(times: &[Millis]) -> Self {
        let mut times = times.to_vec();
        times.sort_unstable();

        let n = times.len();
        if n == 0 {
            return Self::default();
        }
        let k = n.div_ceil(2);
        let t_k = times[k - 1];
        let t_n = times[n - 1];

        Self {
            first_half: rate(k, t_k),
            second_half: rate(n - k, t_n.saturating_sub(t_k)),
            overall: rate(n, t_n),
        }
    }
}

fn rate(count: usize, span_ms: Millis) -> f64 {
    if span_ms == 0 {
        0.0
    } else {
        count as f64 / millis_to_secs(span_ms)
    }
}

/// End-of-run statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Mean turnaround in seconds
    pub average_turnaround: f64,
    /// Mean wait in seconds
    pub average_wait: f64,
    /// Total CPU time divided by total turnaround time
    pub cpu_utilization: f64,
    pub throughput: Throughput,
    pub elapsed_ms: Millis,
    pub completion_order: Vec<Pid>,
    pub processes: Vec<ProcessSnapshot>,
    pub cores: Vec<CoreSummary>,
    pub scheduler: SchedulerStats,
}

impl SimulationReport {
    pub fn new(
        processes: Vec<ProcessSnapshot>,
        completion_order: Vec<Pid>,
        cores: Vec<CoreSummary>,
        scheduler: SchedulerStats,
        elapsed_ms: Millis,
    ) -> Self {
        let count = processes.len().max(1) as f64;
        let turnaround_ms: Millis = processes.iter().map(|p| p.metrics.turnaround_ms).sum();
        let wait_ms: Millis = processes.iter().map(|p| p.metrics.wait_ms).sum();
        let cpu_ms: Millis = processes.iter().map(|p| p.metrics.cpu_ms).sum();

        let completion_times: Vec<Millis> =
            processes.iter().filter_map(|p| p.finished_at).collect();

        Self {
            average_turnaround: millis_to_secs(turnaround_ms) / count,
            average_wait: millis_to_secs(wait_ms) / count,
            cpu_utilization: if turnaround_ms == 0 {
                0.0
            } else {
                cpu_ms as f64 / turnaround_ms as f64
            },
            throughput: Throughput::from_completion_times(&completion_times),
            elapsed_ms,
            completion_order,
            processes,
            cores,
            scheduler,
        }
    }

    pub fn process(&self, pid: Pid) -> Option<&ProcessSnapshot> {
        self.processes.iter().find(|p| p.pid == pid)
    }
}
