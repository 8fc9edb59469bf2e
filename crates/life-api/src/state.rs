//! Shared application state for the board API.

use std::sync::Arc;

use life_core::config::SimulationConfig;
use life_core::{BoardRepository, GameService, InMemoryBoardRepository};

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
pub struct AppState<R> {
    /// Board operations over the configured store.
    pub service: GameService<R>,
}

impl<R: BoardRepository> AppState<R> {
    /// Create application state over an existing store.
    pub const fn new(repository: Arc<R>, limits: SimulationConfig) -> Self {
        Self {
            service: GameService::new(repository, limits),
        }
    }
}

impl AppState<InMemoryBoardRepository> {
    /// Create application state backed by a fresh in-memory store.
    pub fn in_memory(limits: SimulationConfig) -> Self {
        Self::new(Arc::new(InMemoryBoardRepository::new()), limits)
    }
}
