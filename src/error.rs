//! Engine error types.
//!
//! The engine performs no retries and no partial recovery: any strategy
//! failure aborts the current run and propagates to the caller.

use thiserror::Error;

/// Errors raised by the evolution engine.
#[derive(Debug, Error)]
pub enum EvolveError {
    /// A caller-supplied strategy hook failed.
    ///
    /// `strategy` names the hook that failed (`"fitness"`, `"crossover"`,
    /// `"mutate"`, `"random_candidate"`, or one of the extension hooks).
    /// The run is aborted; no partial population is returned.
    #[error("{strategy} strategy failed: {source}")]
    Strategy {
        strategy: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The configuration is invalid for the given population.
    ///
    /// Detected eagerly, before the first generation executes.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Selection was invoked against an empty weighted pool, or the
    /// population became empty before ranking.
    #[error("population is empty: no candidate carries a positive rank")]
    EmptyPopulation,
}

impl EvolveError {
    /// Wraps a strategy hook failure, naming the hook.
    pub(crate) fn strategy(
        name: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        EvolveError::Strategy {
            strategy: name,
            source,
        }
    }
}

/// Convenience alias for engine results.
pub type Result<T> = std::result::Result<T, EvolveError>;
