/*!
 * Shared Process Handle
 * Cross-thread wrapper around a process and its interrupt flag
 */

use super::entity::Process;
use super::types::ProcessSnapshot;
use crate::config::ProcessDescriptor;
use crate::core::types::{Millis, Pid, Priority};
use parking_lot::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Reference-counted handle shared by the control loop and the cores
pub type ProcessHandle = Arc<SimProcess>;

/// A process as seen across threads
///
/// Only one thread owns a process at a time. The mutex is held for the
/// duration of a single transition or read, never across a burst, so it is
/// uncontended apart from those short windows. The interrupt flag lives
/// outside the mutex: the control loop raises it, the owning core observes it
/// while spinning and clears it.
#[derive(Debug)]
pub struct SimProcess {
    pid: Pid,
    priority: Priority,
    interrupted: AtomicBool,
    inner: Mutex<Process>,
}

impl SimProcess {
    pub fn new(descriptor: &ProcessDescriptor, now: Millis) -> ProcessHandle {
        Arc::new(Self {
            pid: descriptor.pid,
            priority: descriptor.priority,
            interrupted: AtomicBool::new(false),
            inner: Mutex::new(Process::new(descriptor, now)),
        })
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Priority never changes after creation, so it is readable without the lock
    #[inline]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    #[inline]
    pub fn lock(&self) -> MutexGuard<'_, Process> {
        self.inner.lock()
    }

    /// Request preemption; returns true if the flag was not already raised
    #[inline]
    pub fn interrupt(&self) -> bool {
        !self.interrupted.swap(true, Ordering::AcqRel)
    }

    /// Hot path - polled by the burst wait loop
    #[inline(always)]
    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::Acquire)
    }

    #[inline]
    pub fn clear_interrupt(&self) {
        self.interrupted.store(false, Ordering::Release);
    }

    pub fn snapshot(&self, now: Millis) -> ProcessSnapshot {
        self.lock().snapshot(now)
    }
}
