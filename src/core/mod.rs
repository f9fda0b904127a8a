/*!
 * Core Module
 * Fundamental engine types and error handling
 */

pub mod errors;
pub mod sync;
pub mod types;

// Re-export for convenience
pub use errors::*;
pub use types::*;
