/*!
 * CPU Scheduling Simulator Library
 * Multi-core scheduling simulation exposed as a library
 */

pub mod config;
pub mod core;
pub mod display;
pub mod monitoring;
pub mod process;
pub mod scheduler;

// Re-exports
pub use crate::core::errors::{ConfigError, ProcessError, SimulationError};
pub use crate::core::types::{CoreId, Millis, Pid, Priority, SimClock, SimResult};
pub use config::{ProcessDescriptor, SimulationConfig};
pub use display::{render_report, LiveTable};
pub use monitoring::init_tracing;
pub use process::{ProcessSnapshot, ProcessState};
pub use scheduler::{
    NullObserver, RecordingObserver, SchedulingPolicy, Simulation, SimulationReport,
    SimulationSnapshot, TickObserver,
};
