/*!
 * Engine Configuration
 *
 * Worker pool sizing for the concurrent strategies
 */

use tracing::warn;

/// Environment variable overriding the worker pool size
pub const WORKER_THREADS_ENV: &str = "JOSEPHUS_WORKER_THREADS";

/// Worker count used when the platform cannot report its parallelism
pub const DEFAULT_WORKER_THREADS: usize = 4;

/// Runtime configuration for the concurrent engines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Threads in the task pool
    pub worker_threads: usize,
    /// Name given to pool threads
    pub thread_name: &'static str,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(DEFAULT_WORKER_THREADS),
            thread_name: "josephus-worker",
        }
    }
}

impl EngineConfig {
    /// One worker thread. Tasks still interleave, on a single core.
    pub const fn single_worker() -> Self {
        Self {
            worker_threads: 1,
            thread_name: "josephus-worker",
        }
    }

    pub const fn with_worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = worker_threads;
        self
    }

    /// Defaults, with `JOSEPHUS_WORKER_THREADS` applied when it is a positive integer
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(WORKER_THREADS_ENV) {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(threads) if threads > 0 => config.with_worker_threads(threads),
                _ => {
                    warn!(value = %raw, "Ignoring invalid {}", WORKER_THREADS_ENV);
                    config
                }
            },
            Err(_) => config,
        }
    }
}
