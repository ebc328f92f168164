/*!
 * Status Table
 * Live per-process table redrawn in place every tick
 */

use crate::process::ProcessSnapshot;
use crate::scheduler::{SimulationSnapshot, TickObserver};
use std::fmt::Write as _;
use std::io::{self, Write};
use tracing::warn;

const HEADER: &str =
    "|   PID | Priority |      State | Core | Turn Time | Wait Time | CPU Time | Remain Time |";
const RULE: &str =
    "+-------+----------+------------+------+-----------+-----------+----------+-------------+";

/// Erase one line above the cursor
const CLEAR_LINE: &str = "\x1b[A\x1b[2K";

fn render_row(out: &mut String, process: &ProcessSnapshot) {
    let core = process
        .core
        .map(|c| c.to_string())
        .unwrap_or_else(|| "--".to_string());
    let m = &process.metrics;
    let _ = writeln!(
        out,
        "| {:>5} | {:>8} | {:>10} | {:>4} | {:>9.1} | {:>9.1} | {:>8.1} | {:>11.1} |",
        process.pid,
        process.priority,
        process.state.as_str(),
        core,
        m.turnaround_secs(),
        m.wait_secs(),
        m.cpu_secs(),
        m.remaining_secs(),
    );
}

/// Render the status table; returns the text and its line count
pub fn render_status_table(snapshot: &SimulationSnapshot) -> (String, usize) {
    let mut out = String::with_capacity((snapshot.processes.len() + 2) * (HEADER.len() + 1));
    out.push_str(HEADER);
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    for process in &snapshot.processes {
        render_row(&mut out, process);
    }
    (out, snapshot.processes.len() + 2)
}

/// Observer that redraws the status table in place on a terminal
pub struct LiveTable<W: Write> {
    out: W,
    lines: usize,
}

impl LiveTable<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LiveTable<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn redraw(&mut self, snapshot: &SimulationSnapshot) -> io::Result<()> {
        for _ in 0..self.lines {
            self.out.write_all(CLEAR_LINE.as_bytes())?;
        }
        let (table, lines) = render_status_table(snapshot);
        self.out.write_all(table.as_bytes())?;
        self.out.flush()?;
        self.lines = lines;
        Ok(())
    }
}

impl<W: Write> TickObserver for LiveTable<W> {
    fn on_tick(&mut self, snapshot: &SimulationSnapshot) {
        if let Err(e) = self.redraw(snapshot) {
            warn!(error = %e, "Failed to draw status table");
        }
    }

    fn on_finish(&mut self, snapshot: &SimulationSnapshot) {
        self.on_tick(snapshot);
    }
}
