/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use super::types::{CoreId, Millis, Pid};
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

pub use crate::process::types::ProcessError;

/// Configuration loading and validation errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}")]
    #[diagnostic(
        code(config::io_error),
        help("Check that the file exists and is readable.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed configuration: {0}")]
    #[diagnostic(
        code(config::parse_error),
        help("The configuration must be a JSON object with cores, algorithm, time_slice, context_switch and processes.")
    )]
    Parse(#[from] serde_json::Error),

    #[error("Invalid scheduling algorithm: {0}")]
    #[diagnostic(
        code(config::invalid_algorithm),
        help("Use one of: fcfs, rr, sjf, pp.")
    )]
    InvalidAlgorithm(String),

    #[error("At least one core is required")]
    #[diagnostic(code(config::no_cores))]
    NoCores,

    #[error("At least one process is required")]
    #[diagnostic(code(config::no_processes))]
    NoProcesses,

    #[error("Duplicate process id {0}")]
    #[diagnostic(
        code(config::duplicate_pid),
        help("Every process descriptor needs a unique pid.")
    )]
    DuplicatePid(Pid),

    #[error("Process {pid} has {len} bursts; expected an odd, non-zero count")]
    #[diagnostic(
        code(config::burst_count),
        help("Bursts alternate CPU and I/O and must start and end with a CPU burst.")
    )]
    BurstCount { pid: Pid, len: usize },

    #[error("Process {pid} has a zero-length burst at index {index}")]
    #[diagnostic(code(config::zero_burst))]
    ZeroBurst { pid: Pid, index: usize },

    #[error("Process {pid} has a burst at index {index} longer than {max} ms")]
    #[diagnostic(
        code(config::burst_too_long),
        help("Burst durations are milliseconds; split very long work into several bursts.")
    )]
    BurstTooLong {
        pid: Pid,
        index: usize,
        max: Millis,
    },

    #[error("Time slice must be positive for round-robin scheduling")]
    #[diagnostic(code(config::time_slice))]
    InvalidTimeSlice,

    #[error("Control loop tick must be positive")]
    #[diagnostic(code(config::tick))]
    InvalidTick,
}

/// Configuration operation result
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Unified simulation error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to spawn thread for core {core}")]
    #[diagnostic(
        code(simulation::spawn_failed),
        help("The system may be out of threads. Reduce the core count.")
    )]
    Spawn {
        core: CoreId,
        #[source]
        source: std::io::Error,
    },

    #[error("Core {0} panicked")]
    #[diagnostic(
        code(simulation::core_panicked),
        help("An internal error occurred. Please report this issue.")
    )]
    CorePanicked(CoreId),

    #[error("Usage: cpu-sched-sim <config.json>")]
    #[diagnostic(
        code(simulation::usage),
        help("Pass the path of a JSON scheduling configuration.")
    )]
    MissingConfigPath,
}
