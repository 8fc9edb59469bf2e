//! Error types for the simulation engine and board service.
//!
//! [`SimulationError`] covers the deterministic failures of the engine
//! itself. [`ServiceError`] adds the store and request-limit failures
//! seen by callers of [`GameService`](crate::service::GameService).

use crate::repository::RepositoryError;

/// Errors produced by the simulation engine.
///
/// None of these are retried: the same input always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    /// An argument was outside its valid range (e.g. a negative step count).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The pattern repeats with a period greater than one, so it never
    /// settles into a single state.
    #[error("pattern oscillates with period {period} - no final stable state exists")]
    Oscillation {
        /// Number of generations between repeats.
        period: u64,
    },

    /// No state repeated within the generation budget.
    #[error("no stable state or oscillation detected after {max_generations} generations")]
    NoConvergence {
        /// The exhausted generation budget.
        max_generations: u64,
    },

    /// A generation would need more cells than the configured limit.
    #[error("{width}x{height} grid exceeds the limit of {max_cells} cells")]
    GridTooLarge {
        /// Columns of the refused grid.
        width: usize,
        /// Rows of the refused grid.
        height: usize,
        /// The configured cell limit.
        max_cells: usize,
    },
}

/// Errors returned by board service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The engine rejected the request or found no final state.
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// The board store failed or the board does not exist.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The blocking task running the engine panicked or was cancelled.
    #[error("simulation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
