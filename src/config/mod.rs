/*!
 * Simulation Configuration
 * JSON-backed scheduler parameters and process descriptors
 */

use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::types::{CoreId, Millis, Pid, Priority};
use crate::scheduler::SchedulingPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Default control loop period
pub const DEFAULT_TICK_MS: Millis = 50;

/// Longest single burst accepted (one day)
pub const MAX_BURST_MS: Millis = 24 * 60 * 60 * 1000;

fn default_tick() -> Millis {
    DEFAULT_TICK_MS
}

/// One process as described by the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessDescriptor {
    pub pid: Pid,
    pub priority: Priority,
    /// Arrival offset from simulation start
    #[serde(default)]
    pub start_time: Millis,
    /// Alternating CPU / I/O burst durations, starting and ending with CPU
    pub bursts: Vec<Millis>,
}

/// Parameters of a whole simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    pub cores: CoreId,
    pub algorithm: SchedulingPolicy,
    /// Round-robin time slice
    #[serde(default)]
    pub time_slice: Millis,
    /// Delay a core pays between two dispatches
    #[serde(default)]
    pub context_switch: Millis,
    /// Control loop period
    #[serde(default = "default_tick")]
    pub tick: Millis,
    pub processes: Vec<ProcessDescriptor>,
}

impl SimulationConfig {
    /// Read, parse and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded configuration file");
        Self::from_json(&text)
    }

    /// Parse and validate a JSON document
    pub fn from_json(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant the scheduling core relies on
    pub fn validate(&self) -> ConfigResult<()> {
        if self.cores == 0 {
            return Err(ConfigError::NoCores);
        }
        if self.processes.is_empty() {
            return Err(ConfigError::NoProcesses);
        }
        if self.algorithm == SchedulingPolicy::RoundRobin && self.time_slice == 0 {
            return Err(ConfigError::InvalidTimeSlice);
        }
        if self.tick == 0 {
            return Err(ConfigError::InvalidTick);
        }

        let mut seen = HashSet::with_capacity(self.processes.len());
        for process in &self.processes {
            if !seen.insert(process.pid) {
                return Err(ConfigError::DuplicatePid(process.pid));
            }
            process.validate()?;
        }
        Ok(())
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick)
    }

    #[inline]
    pub fn context_switch_delay(&self) -> Duration {
        Duration::from_millis(self.context_switch)
    }
}

impl ProcessDescriptor {
    fn validate(&self) -> ConfigResult<()> {
        let len = self.bursts.len();
        if len % 2 == 0 {
            return Err(ConfigError::BurstCount { pid: self.pid, len });
        }
        if let Some(index) = self.bursts.iter().position(|&b| b == 0) {
            return Err(ConfigError::ZeroBurst {
                pid: self.pid,
                index,
            });
        }
        if let Some(index) = self.bursts.iter().position(|&b| b > MAX_BURST_MS) {
            return Err(ConfigError::BurstTooLong {
                pid: self.pid,
                index,
                max: MAX_BURST_MS,
            });
        }
        Ok(())
    }
}
