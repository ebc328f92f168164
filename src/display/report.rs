/*!
 * Report Rendering
 * Human-readable end-of-run statistics
 */

use crate::core::types::millis_to_secs;
use crate::scheduler::SimulationReport;
use std::fmt::Write as _;

/// Format the final statistics block
pub fn render_report(report: &SimulationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "Simulation finished in {:.3} s", millis_to_secs(report.elapsed_ms));
    let _ = writeln!(out, "  Average turnaround time: {:.3} s", report.average_turnaround);
    let _ = writeln!(out, "  Average waiting time:    {:.3} s", report.average_wait);
    let _ = writeln!(out, "  CPU utilization:         {:.1}%", report.cpu_utilization * 100.0);
    let _ = writeln!(out, "  Throughput:");
    let _ = writeln!(
        out,
        "    First 50% of processes:  {:.3} processes/s",
        report.throughput.first_half
    );
    let _ = writeln!(
        out,
        "    Second 50% of processes: {:.3} processes/s",
        report.throughput.second_half
    );
    let _ = writeln!(
        out,
        "    Overall:                 {:.3} processes/s",
        report.throughput.overall
    );
    let _ = writeln!(
        out,
        "  Dispatches: {}, preemptions: {}, context switches: {}",
        report.scheduler.dispatches, report.scheduler.preemptions, report.scheduler.context_switches
    );
    for core in &report.cores {
        let _ = writeln!(
            out,
            "  Core {}: {} dispatches, busy {:.3} s",
            core.core,
            core.dispatches,
            millis_to_secs(core.busy_ms)
        );
    }
    out
}
