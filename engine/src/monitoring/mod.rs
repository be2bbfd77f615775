/*!
 * Monitoring
 * Tracing setup and spans
 */

mod tracer;

pub use tracer::{init_tracing, span_replay, ReplaySpan};
