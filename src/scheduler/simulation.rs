/*!
 * Simulation Driver
 * Wires configuration, shared state, the control loop and core threads together
 */

use super::coordinator::Coordinator;
use super::executor::{CoreExecutor, CoreSummary};
use super::report::SimulationReport;
use super::shared::SchedulerShared;
use super::traits::TickObserver;
use super::types::SchedulerParams;
use crate::config::SimulationConfig;
use crate::core::errors::SimulationError;
use crate::core::types::{CoreId, SimClock, SimResult};
use crate::process::{ProcessHandle, ProcessState, SimProcess};
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

/// A configured, not yet started simulation
///
/// Simulated time starts when `run` is called, not at construction.
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    /// Validate the configuration and keep it for `run`
    pub fn new(config: &SimulationConfig) -> SimResult<Self> {
        config.validate()?;

        info!(
            cores = config.cores,
            policy = %config.algorithm,
            time_slice_ms = config.time_slice,
            context_switch_ms = config.context_switch,
            processes = config.processes.len(),
            "Simulation initialized"
        );

        Ok(Self {
            config: config.clone(),
        })
    }

    /// Start the clock and build processes plus shared state at time zero
    fn start(&self) -> (Arc<SchedulerShared>, Coordinator) {
        let config = &self.config;
        let params = SchedulerParams {
            policy: config.algorithm,
            time_slice_ms: config.time_slice,
            context_switch: config.context_switch_delay(),
            tick: config.tick_interval(),
        };
        let clock = SimClock::start();
        let shared = Arc::new(SchedulerShared::new(params, clock));

        let now = clock.now_ms();
        let processes: Vec<ProcessHandle> = config
            .processes
            .iter()
            .map(|descriptor| SimProcess::new(descriptor, now))
            .collect();

        for handle in &processes {
            if handle.lock().state() == ProcessState::Ready {
                shared.enqueue(Arc::clone(handle));
            }
        }

        let coordinator = Coordinator::new(Arc::clone(&shared), processes);
        (shared, coordinator)
    }

    /// Run to completion, feeding `observer` once per tick
    pub fn run<O: TickObserver + ?Sized>(self, observer: &mut O) -> SimResult<SimulationReport> {
        let (shared, coordinator) = self.start();

        // Order the initial queue before any core can dequeue from it
        coordinator.tick();

        let core_count = self.config.cores;
        let mut handles = Vec::with_capacity(core_count as usize);
        for core in 0..core_count {
            let executor = CoreExecutor::new(core, Arc::clone(&shared));
            let spawned = thread::Builder::new()
                .name(format!("core-{core}"))
                .spawn(move || executor.run());

            match spawned {
                Ok(handle) => handles.push((core, handle)),
                Err(source) => {
                    shared.terminate();
                    join_all(handles)?;
                    return Err(SimulationError::Spawn { core, source });
                }
            }
        }

        coordinator.run(observer);
        let cores = join_all(handles)?;

        let snapshot = coordinator.snapshot();
        observer.on_finish(&snapshot);

        let report = SimulationReport::new(
            snapshot.processes,
            shared.completion_order(),
            cores,
            shared.stats(),
            snapshot.elapsed_ms,
        );
        info!(
            elapsed_ms = report.elapsed_ms,
            average_turnaround = report.average_turnaround,
            average_wait = report.average_wait,
            cpu_utilization = report.cpu_utilization,
            "Simulation finished"
        );
        Ok(report)
    }
}

fn join_all(
    handles: Vec<(CoreId, thread::JoinHandle<CoreSummary>)>,
) -> SimResult<Vec<CoreSummary>> {
    let mut summaries = Vec::with_capacity(handles.len());
    for (core, handle) in handles {
        match handle.join() {
            Ok(summary) => summaries.push(summary),
            Err(_) => {
                warn!(core, "Core thread panicked");
                return Err(SimulationError::CorePanicked(core));
            }
        }
    }
    Ok(summaries)
}
