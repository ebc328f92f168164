/*!
 * Monitoring
 * Tracing setup shared by the binary and tests
 */

mod tracer;

pub use tracer::{init_tracing, DEFAULT_FILTER};
