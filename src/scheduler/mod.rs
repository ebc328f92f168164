/*!
 * Scheduler Module
 * Ready-queue coordination between the control loop and core executors,
 * ordering policies and end-of-run statistics
 */

pub mod atomic_stats;
pub mod coordinator;
pub mod executor;
pub mod policy;
pub mod ready_queue;
pub mod report;
pub mod shared;
pub mod simulation;
pub mod traits;
pub mod types;

// Re-export public API
pub use atomic_stats::{AtomicSchedulerStats, SchedulerStats};
pub use coordinator::Coordinator;
pub use executor::{CoreExecutor, CoreSummary, BURST_POLL_INTERVAL};
pub use policy::{priority_follows, shortest_remaining_follows, Comparator, OrderKey};
pub use ready_queue::ReadyQueue;
pub use report::{SimulationReport, Throughput};
pub use shared::{Dispatch, SchedulerShared, SharedState};
pub use simulation::Simulation;
pub use traits::{NullObserver, RecordingObserver, SimulationSnapshot, TickObserver};
pub use types::{SchedulerParams, SchedulingPolicy};
