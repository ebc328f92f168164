/*!
 * Scheduler Types
 * Scheduling policy selection and scheduler parameters
 */

use crate::core::errors::ConfigError;
use crate::core::types::Millis;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Scheduling algorithm, chosen once at start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulingPolicy {
    /// First-come-first-served, pure FIFO
    Fcfs,
    /// FIFO with time-slice preemption
    RoundRobin,
    /// Ready queue ordered by remaining CPU time (non-preemptive)
    ShortestRemainingTime,
    /// Ready queue ordered by priority, with priority preemption
    PreemptivePriority,
}

impl SchedulingPolicy {
    /// Convert to string representation
    ///
    /// # Performance
    /// Hot path - frequently called for logging and serialization
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::RoundRobin => "round_robin",
            Self::ShortestRemainingTime => "shortest_remaining_time",
            Self::PreemptivePriority => "preemptive_priority",
        }
    }

    /// Whether the ready queue is re-sorted every tick
    #[inline]
    pub const fn sorts_queue(&self) -> bool {
        matches!(self, Self::ShortestRemainingTime | Self::PreemptivePriority)
    }

    /// Whether running processes are bounded by the time slice
    #[inline]
    pub const fn uses_time_slice(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }
}

impl FromStr for SchedulingPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fcfs" | "first_come_first_served" => Ok(Self::Fcfs),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            "sjf" | "srtf" | "shortest_remaining_time" => Ok(Self::ShortestRemainingTime),
            "pp" | "priority" | "preemptive_priority" => Ok(Self::PreemptivePriority),
            _ => Err(ConfigError::InvalidAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SchedulingPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SchedulingPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Fixed parameters shared by the control loop and every core
#[derive(Debug, Clone, Copy)]
pub struct SchedulerParams {
    pub policy: SchedulingPolicy,
    pub time_slice_ms: Millis,
    pub context_switch: Duration,
    pub tick: Duration,
}
