//! Board storage abstraction and the in-memory implementation.
//!
//! The [`BoardRepository`] trait is the seam between the board service
//! and persistence. `life-db` provides the `PostgreSQL` implementation;
//! [`InMemoryBoardRepository`] backs tests and database-less deployments.

use std::collections::BTreeMap;

use life_types::BoardId;
use tokio::sync::RwLock;

use crate::board::Board;

/// Errors returned by a board store.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// No board exists with the given identifier.
    #[error("board not found: {0}")]
    NotFound(BoardId),

    /// The underlying storage backend failed.
    #[error("storage backend error: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
    },
}

/// Loads and persists boards by identifier.
///
/// Concurrent saves to the same board are last-write-wins.
pub trait BoardRepository: Send + Sync {
    /// Load a board.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no board has this id.
    fn get_board(
        &self,
        id: BoardId,
    ) -> impl Future<Output = Result<Board, RepositoryError>> + Send;

    /// Insert a new board or replace the grid of an existing one.
    ///
    /// The stored creation timestamp of an existing board is kept.
    fn save_board(&self, board: &Board) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Process-local board store.
#[derive(Debug, Default)]
pub struct InMemoryBoardRepository {
    boards: RwLock<BTreeMap<BoardId, Board>>,
}

impl InMemoryBoardRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored boards.
    pub async fn len(&self) -> usize {
        self.boards.read().await.len()
    }

    /// Whether the store holds no boards.
    pub async fn is_empty(&self) -> bool {
        self.boards.read().await.is_empty()
    }
}

impl BoardRepository for InMemoryBoardRepository {
    async fn get_board(&self, id: BoardId) -> Result<Board, RepositoryError> {
        self.boards
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn save_board(&self, board: &Board) -> Result<(), RepositoryError> {
        let mut boards = self.boards.write().await;
        match boards.get_mut(&board.id) {
            Some(existing) => existing.grid = board.grid.clone(),
            None => {
                boards.insert(board.id, board.clone());
            }
        }
        tracing::debug!(board_id = %board.id, "Saved board in memory");
        Ok(())
    }
}
