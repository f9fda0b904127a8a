/*!
 * Elimination Engines
 *
 * Three interchangeable strategies over the same ring that must agree on
 * every result:
 * - `Sequential`: one thread, synchronous repair
 * - `Counter`: tasks per step and per repair hop, joined by a pending counter
 * - `Stream`: tasks per step, events delivered over a rendezvous channel
 *
 * The concurrent strategies block the calling thread while tokio workers do
 * the traversal, so they must not be called from inside an async context.
 */

mod counter;
mod dispatch;
mod sequential;
mod stream;

use crate::config::EngineConfig;
use crate::core::errors::{EngineError, EngineResult};
use crate::core::sync::PendingCounter;
use crate::core::types::{EliminationOrder, ParticipantId};
use crate::ring::Ring;
use dispatch::Dispatcher;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument};

/// Execution model for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Sequential,
    Counter,
    Stream,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Sequential, Strategy::Counter, Strategy::Stream];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::Counter => "counter",
            Strategy::Stream => "stream",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a run. `order` is only produced by the streaming strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub strategy: Strategy,
    pub survivor: ParticipantId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<EliminationOrder>,
}

/// Reusable engine holding the worker pool for the concurrent strategies
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    dispatcher: Dispatcher,
}

impl Engine {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        let dispatcher = Dispatcher::new(&config)?;
        Ok(Self { config, dispatcher })
    }

    pub fn with_defaults() -> EngineResult<Self> {
        Self::new(EngineConfig::from_env())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run any strategy
    pub fn run(&self, strategy: Strategy, n: usize, k: usize) -> EngineResult<Outcome> {
        let (survivor, order) = match strategy {
            Strategy::Sequential => (self.sequential(n, k)?, None),
            Strategy::Counter => (self.concurrent_counter(n, k)?, None),
            Strategy::Stream => {
                let (survivor, order) = self.concurrent_stream(n, k)?;
                (survivor, Some(order))
            }
        };
        Ok(Outcome {
            strategy,
            survivor,
            order,
        })
    }

    pub fn sequential(&self, n: usize, k: usize) -> EngineResult<ParticipantId> {
        run_sequential(n, k)
    }

    pub fn concurrent_counter(&self, n: usize, k: usize) -> EngineResult<ParticipantId> {
        let ring = Ring::build(n, k)?;
        self.counter_on(ring)
    }

    pub fn concurrent_stream(&self, n: usize, k: usize) -> EngineResult<(ParticipantId, EliminationOrder)> {
        let ring = Ring::build(n, k)?;
        self.stream_on(ring)
    }

    #[instrument(skip_all, fields(n = ring.len(), k = ring.step()))]
    fn counter_on(&self, ring: Ring) -> EngineResult<ParticipantId> {
        let ring = Arc::new(ring);
        let survivor = {
            let _ctx = self.dispatcher.enter();
            counter::eliminate(&ring)
        };
        let survivor = survivor.ok_or(EngineError::Incomplete {
            strategy: Strategy::Counter.name(),
        })?;
        info!(survivor, "Counter-synchronized run complete");
        Ok(survivor)
    }

    #[instrument(skip_all, fields(n = ring.len(), k = ring.step()))]
    fn stream_on(&self, ring: Ring) -> EngineResult<(ParticipantId, EliminationOrder)> {
        let ring = Arc::new(ring);
        let repairs = PendingCounter::new();
        let (survivor, order) = {
            let _ctx = self.dispatcher.enter();
            stream::eliminate(&ring, &repairs)
        };
        let survivor = survivor.ok_or(EngineError::Incomplete {
            strategy: Strategy::Stream.name(),
        })?;
        info!(survivor, eliminated = order.len(), "Streaming run complete");
        Ok((survivor, order))
    }
}

/// Survivor by sequential traversal.
///
/// # Errors
///
/// `InvalidConfiguration` if `n` or `k` is zero.
#[instrument]
pub fn run_sequential(n: usize, k: usize) -> EngineResult<ParticipantId> {
    let ring = Ring::build(n, k)?;
    let survivor = sequential::eliminate(&ring).ok_or(EngineError::Incomplete {
        strategy: Strategy::Sequential.name(),
    })?;
    info!(survivor, "Sequential run complete");
    Ok(survivor)
}

/// Survivor by counter-synchronized concurrent traversal. Blocks until every
/// dispatched task has finished.
///
/// # Errors
///
/// `InvalidConfiguration` if `n` or `k` is zero, `Runtime` if the worker
/// pool cannot start.
pub fn run_concurrent_counter(n: usize, k: usize) -> EngineResult<ParticipantId> {
    let ring = Ring::build(n, k)?;
    Engine::with_defaults()?.counter_on(ring)
}

/// Survivor and elimination order by streaming concurrent traversal.
///
/// # Errors
///
/// `InvalidConfiguration` if `n` or `k` is zero, `Runtime` if the worker
/// pool cannot start.
pub fn run_concurrent_stream(n: usize, k: usize) -> EngineResult<(ParticipantId, EliminationOrder)> {
    let ring = Ring::build(n, k)?;
    Engine::with_defaults()?.stream_on(ring)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_all_strategies() {
        let engine = Engine::new(EngineConfig::single_worker()).unwrap();
        for strategy in Strategy::ALL {
            let outcome = engine.run(strategy, 16, 3).unwrap();
            assert_eq!(outcome.strategy, strategy);
            assert_eq!(outcome.survivor, 8);
            assert_eq!(outcome.order.is_some(), strategy == Strategy::Stream);
        }
    }

    #[test]
    fn test_invalid_before_any_work() {
        let engine = Engine::new(EngineConfig::single_worker()).unwrap();
        for strategy in Strategy::ALL {
            let err = engine.run(strategy, 0, 2).unwrap_err();
            assert!(err.is_invalid_configuration(), "{}", strategy);
        }
    }

    #[test]
    fn test_outcome_json() {
        let engine = Engine::new(EngineConfig::single_worker()).unwrap();
        let outcome = engine.run(Strategy::Stream, 3, 2).unwrap();
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"strategy":"stream","survivor":3,"order":[2,1,3]}"#
        );

        let outcome = engine.run(Strategy::Counter, 3, 2).unwrap();
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"strategy":"counter","survivor":3}"#
        );
    }
}
