//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`] which wraps the underlying
//! [`sqlx`] errors with additional context about which operation failed.
//! At the [`BoardRepository`](life_core::BoardRepository) boundary they
//! become [`RepositoryError::Backend`].

use life_core::RepositoryError;
use life_types::BoardId;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored board's cell data does not decode into a grid.
    #[error("corrupt cells for board {board_id}: {reason}")]
    CorruptCells {
        /// The affected board.
        board_id: BoardId,
        /// What is wrong with the stored data.
        reason: String,
    },

    /// Grid dimensions do not fit the storage column type.
    #[error("dimension out of range: {0}")]
    Dimension(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<DbError> for RepositoryError {
    fn from(err: DbError) -> Self {
        Self::Backend {
            message: err.to_string(),
        }
    }
}
