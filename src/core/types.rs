/*!
 * Core Types
 * Common types used across the simulator
 */

use std::time::Instant;

/// Process ID type
pub type Pid = u32;

/// Priority level (lower value is more urgent)
pub type Priority = u8;

/// Index of a simulated CPU core
pub type CoreId = u8;

/// Simulated time in milliseconds since the simulation started
pub type Millis = u64;

/// Common result type for simulation-level operations
pub type SimResult<T> = Result<T, super::errors::SimulationError>;

/// Wall-clock backed simulation clock
///
/// Simulated time advances 1:1 with real time; every timestamp a process
/// carries is expressed relative to the same origin.
#[derive(Debug, Clone, Copy)]
pub struct SimClock {
    origin: Instant,
}

impl SimClock {
    /// Start a clock at the current instant
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the clock started
    ///
    /// # Performance
    /// Hot path - sampled continuously by the burst wait loop
    #[inline]
    pub fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::start()
    }
}

/// Convert milliseconds to seconds for reporting
#[inline(always)]
pub fn millis_to_secs(ms: Millis) -> f64 {
    ms as f64 / 1000.0
}
