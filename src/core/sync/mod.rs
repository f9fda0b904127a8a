/*!
 * Synchronization Primitives
 *
 * Completion tracking for tasks dispatched onto the worker pool
 */

mod pending;

pub use pending::{PendingCounter, PendingGuard};
