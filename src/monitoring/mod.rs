/*!
 * Monitoring Module
 * Logging setup for the engine and its binary
 */

mod tracer;

pub use tracer::{init_tracing, TRACE_JSON_ENV};
