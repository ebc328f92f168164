/*!
 * Process Lifecycle
 *
 * The only edges a process may take:
 *
 * - NotStarted → Ready      arrival offset reached
 * - Ready      → Running    dequeued by a core
 * - Running    → Terminated last CPU burst completed
 * - Running    → IO         CPU burst completed, more bursts remain
 * - Running    → Ready      interrupted before the CPU burst completed
 * - IO         → Ready      I/O burst elapsed
 *
 * Any other request is rejected without touching the process.
 */

use super::entity::Process;
use super::types::{DispatchOutcome, ProcessError, ProcessResult, ProcessState};
use crate::core::types::{CoreId, Millis};

impl Process {
    fn expect_state(&self, from: ProcessState, to: ProcessState) -> ProcessResult<()> {
        if self.state == from {
            Ok(())
        } else {
            Err(ProcessError::InvalidStateTransition {
                pid: self.pid,
                from: self.state,
                to,
            })
        }
    }

    /// NotStarted → Ready once the arrival offset has been reached
    pub fn admit(&mut self, now: Millis) -> ProcessResult<()> {
        self.expect_state(ProcessState::NotStarted, ProcessState::Ready)?;
        self.state = ProcessState::Ready;
        self.launched_at = Some(now);
        Ok(())
    }

    /// IO → Ready; the cursor moves on to the next CPU burst
    pub fn finish_io(&mut self) -> ProcessResult<()> {
        self.expect_state(ProcessState::IO, ProcessState::Ready)?;
        self.state = ProcessState::Ready;
        self.cursor += 1;
        Ok(())
    }

    /// Ready → Running on `core`; returns the CPU time left in the burst
    pub fn dispatch(&mut self, core: CoreId, now: Millis) -> ProcessResult<Millis> {
        self.expect_state(ProcessState::Ready, ProcessState::Running)?;
        self.state = ProcessState::Running;
        self.core = Some(core);
        self.burst_started_at = now;
        self.dispatches += 1;
        Ok(self.current_burst_ms())
    }

    /// Leave `Running`, charging the time spent on the core
    ///
    /// A fully consumed burst moves the process to I/O, or terminates it when
    /// it was the last one. Otherwise the process was interrupted and goes
    /// back to `Ready` with the shortened burst.
    pub fn complete_dispatch(&mut self, now: Millis) -> ProcessResult<DispatchOutcome> {
        if self.state != ProcessState::Running {
            return Err(ProcessError::InvalidStateTransition {
                pid: self.pid,
                from: self.state,
                to: ProcessState::Ready,
            });
        }

        let elapsed = now.saturating_sub(self.burst_started_at);
        self.cpu_time_ms += self.bursts.consume(self.cursor, elapsed);
        self.core = None;

        let outcome = if self.current_burst_ms() > 0 {
            self.state = ProcessState::Ready;
            self.preemptions += 1;
            DispatchOutcome::Preempted
        } else if self.bursts.is_last(self.cursor) {
            self.state = ProcessState::Terminated;
            self.finished_at = Some(now);
            DispatchOutcome::Terminated
        } else {
            self.cursor += 1;
            self.state = ProcessState::IO;
            self.burst_started_at = now;
            DispatchOutcome::Io
        };

        Ok(outcome)
    }
}
