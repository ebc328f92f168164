/*!
 * CPU Scheduling Simulator - Main Entry Point
 *
 * Usage: cpu-sched-sim <config.json>
 */

use cpu_sched_sim::{
    init_tracing, render_report, LiveTable, Simulation, SimulationConfig, SimulationError,
};
use tracing::info;

fn main() -> miette::Result<()> {
    init_tracing();

    let path = std::env::args()
        .nth(1)
        .ok_or(SimulationError::MissingConfigPath)?;

    let config = SimulationConfig::load(&path).map_err(SimulationError::from)?;
    info!(path = %path, policy = %config.algorithm, "Starting simulation");

    let report = Simulation::new(&config)?.run(&mut LiveTable::stdout())?;
    print!("{}", render_report(&report));

    Ok(())
}
