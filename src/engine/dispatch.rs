/*!
 * Task Dispatcher
 * Multi-threaded tokio runtime that concurrent eliminations run on
 */

use crate::config::EngineConfig;
use crate::core::errors::EngineResult;
use tokio::runtime::{Builder, EnterGuard, Runtime};
use tracing::debug;

/// Owns the worker pool for the concurrent strategies
#[derive(Debug)]
pub(crate) struct Dispatcher {
    runtime: Runtime,
}

impl Dispatcher {
    pub(crate) fn new(config: &EngineConfig) -> EngineResult<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(config.worker_threads.max(1))
            .thread_name(config.thread_name)
            .build()?;
        debug!(workers = config.worker_threads, "Task dispatcher started");
        Ok(Self { runtime })
    }

    /// Make `tokio::spawn` on the calling thread land on this pool
    pub(crate) fn enter(&self) -> EnterGuard<'_> {
        self.runtime.enter()
    }
}
