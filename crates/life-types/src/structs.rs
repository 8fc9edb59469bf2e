//! Wire types exchanged with board API clients.
//!
//! Grids travel as jagged arrays: a list of rows, each row a list of cell
//! states (`true` = alive). The outer index is the row (`y`), the inner
//! index the column (`x`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::BoardId;

/// A grid as it appears on the wire.
pub type JaggedState = Vec<Vec<bool>>;

/// Request body for `POST /api/boards`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BoardStateRequest {
    /// Initial cell states, row by row.
    pub state: JaggedState,
}

/// Response body for `POST /api/boards`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CreateBoardResponse {
    /// Identifier of the newly created board.
    pub id: BoardId,
}

/// Full view of a stored board returned by `GET /api/boards/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BoardView {
    /// Board identifier.
    pub id: BoardId,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Number of live cells.
    pub live_cells: usize,
    /// Current cell states, row by row.
    pub state: JaggedState,
    /// When the board was first created.
    pub created_at: DateTime<Utc>,
}
