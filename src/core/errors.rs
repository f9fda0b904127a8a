/*!
 * Error Types
 * Engine errors with thiserror and miette diagnostics
 */

use miette::Diagnostic;
use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors reported by the elimination engines
#[derive(Error, Debug, Diagnostic)]
pub enum EngineError {
    #[error("Invalid configuration: n={n}, k={k}")]
    #[diagnostic(
        code(engine::invalid_configuration),
        help("Both the participant count n and the elimination step k must be at least 1.")
    )]
    InvalidConfiguration { n: usize, k: usize },

    #[error("Task runtime unavailable: {0}")]
    #[diagnostic(
        code(engine::runtime_unavailable),
        help("The worker pool could not be started. Check thread limits or lower JOSEPHUS_WORKER_THREADS.")
    )]
    Runtime(#[from] std::io::Error),

    #[error("Run finished without a survivor ({strategy})")]
    #[diagnostic(
        code(engine::incomplete_run),
        help("A dispatched task ended early. Check the logs for a panicking task.")
    )]
    Incomplete { strategy: &'static str },
}

impl EngineError {
    /// Whether this error was raised by input validation
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_message() {
        let err = EngineError::InvalidConfiguration { n: 0, k: 3 };
        assert_eq!(err.to_string(), "Invalid configuration: n=0, k=3");
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn test_runtime_error_from_io() {
        let err: EngineError = std::io::Error::new(std::io::ErrorKind::Other, "no threads").into();
        assert!(matches!(err, EngineError::Runtime(_)));
        assert!(!err.is_invalid_configuration());
    }
}
