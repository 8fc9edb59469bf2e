//! Board persistence in the `boards` table.
//!
//! [`BoardStore`] implements [`BoardRepository`] on top of a [`PgPool`].
//! Saves are upserts keyed by board id, so concurrent writers to the same
//! board resolve as last-write-wins.

use chrono::{DateTime, Utc};
use life_core::{Board, BoardRepository, RepositoryError};
use life_types::BoardId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::cells::{decode_cells, encode_cells};
use crate::error::DbError;

/// Operations on the `boards` table.
#[derive(Clone)]
pub struct BoardStore {
    pool: PgPool,
}

impl BoardStore {
    /// Create a new board store bound to a connection pool.
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the raw row for a board.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn fetch_board(&self, id: BoardId) -> Result<Option<BoardRow>, DbError> {
        let row = sqlx::query_as::<_, BoardRow>(
            r"SELECT id, width, height, cells, created_at, updated_at
              FROM boards
              WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Insert a board or replace its grid.
    ///
    /// `created_at` is written only on insert.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Dimension`] if the grid is too large for the
    /// `INTEGER` columns, or [`DbError::Postgres`] if the upsert fails.
    pub async fn upsert_board(&self, board: &Board) -> Result<(), DbError> {
        let width = i32::try_from(board.grid.width())
            .map_err(|e| DbError::Dimension(format!("width {}: {e}", board.grid.width())))?;
        let height = i32::try_from(board.grid.height())
            .map_err(|e| DbError::Dimension(format!("height {}: {e}", board.grid.height())))?;

        sqlx::query(
            r"INSERT INTO boards (id, width, height, cells, created_at, updated_at)
              VALUES ($1, $2, $3, $4, $5, NOW())
              ON CONFLICT (id) DO UPDATE SET
                width = EXCLUDED.width,
                height = EXCLUDED.height,
                cells = EXCLUDED.cells,
                updated_at = NOW()",
        )
        .bind(board.id.into_inner())
        .bind(width)
        .bind(height)
        .bind(encode_cells(&board.grid))
        .bind(board.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(board_id = %board.id, width, height, "Upserted board");
        Ok(())
    }

    /// Delete a board by id. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the delete fails.
    pub async fn delete_board(&self, id: BoardId) -> Result<bool, DbError> {
        let result = sqlx::query(r"DELETE FROM boards WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl BoardRepository for BoardStore {
    async fn get_board(&self, id: BoardId) -> Result<Board, RepositoryError> {
        let row = self
            .fetch_board(id)
            .await?
            .ok_or(RepositoryError::NotFound(id))?;
        Ok(row.into_board()?)
    }

    async fn save_board(&self, board: &Board) -> Result<(), RepositoryError> {
        Ok(self.upsert_board(board).await?)
    }
}

/// A row from the `boards` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BoardRow {
    /// Board UUID.
    pub id: Uuid,
    /// Number of columns.
    pub width: i32,
    /// Number of rows.
    pub height: i32,
    /// Row-major `0`/`1` cell string.
    pub cells: String,
    /// When the board was created.
    pub created_at: DateTime<Utc>,
    /// When the board's grid was last replaced.
    pub updated_at: DateTime<Utc>,
}

impl BoardRow {
    /// Decode the row into a [`Board`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError::CorruptCells`] if the dimensions are negative or
    /// the cell string does not match them.
    pub fn into_board(self) -> Result<Board, DbError> {
        let board_id = BoardId::from(self.id);
        let corrupt = |reason: String| DbError::CorruptCells { board_id, reason };

        let width = usize::try_from(self.width)
            .map_err(|e| corrupt(format!("width {}: {e}", self.width)))?;
        let height = usize::try_from(self.height)
            .map_err(|e| corrupt(format!("height {}: {e}", self.height)))?;

        Ok(Board {
            id: board_id,
            grid: decode_cells(board_id, width, height, &self.cells)?,
            created_at: self.created_at,
        })
    }
}
