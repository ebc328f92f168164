/*!
 * Display Module
 * Terminal rendering of the live status table and the final report
 */

pub mod report;
pub mod table;

pub use report::render_report;
pub use table::{render_status_table, LiveTable};
