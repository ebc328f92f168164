/*!
 * Process Module
 * Simulated process entity, burst accounting and lifecycle state machine
 */

pub mod bursts;
pub mod entity;
pub mod handle;
pub mod lifecycle;
pub mod types;

// Re-export for convenience
pub use bursts::BurstSequence;
pub use entity::Process;
pub use handle::{ProcessHandle, SimProcess};
pub use types::{
    DispatchOutcome, ProcessError, ProcessMetrics, ProcessResult, ProcessSnapshot, ProcessState,
};
