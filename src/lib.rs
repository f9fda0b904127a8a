/*!
 * Josephus Engine Library
 * Generalized Josephus elimination with sequential and concurrent engines
 */

pub mod config;
pub mod core;
pub mod engine;
pub mod monitoring;
pub mod ring;

// Re-exports
pub use config::EngineConfig;
pub use crate::core::errors::{EngineError, EngineResult};
pub use crate::core::types::{EliminationOrder, ParticipantId};
pub use engine::{run_concurrent_counter, run_concurrent_stream, run_sequential, Engine, Outcome, Strategy};
pub use monitoring::init_tracing;
pub use ring::Ring;
