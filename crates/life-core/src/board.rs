//! Board entity: a grid associated with an identifier.

use chrono::{DateTime, Utc};
use life_types::{BoardId, BoardView};

use crate::grid::Grid;

/// A stored Game of Life board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Board identifier.
    pub id: BoardId,
    /// Current generation.
    pub grid: Grid,
    /// When the board was first created.
    pub created_at: DateTime<Utc>,
}

impl Board {
    /// Create a new board with a fresh identifier.
    pub fn new(grid: Grid) -> Self {
        Self {
            id: BoardId::new(),
            grid,
            created_at: Utc::now(),
        }
    }

    /// Project the board into its API representation.
    pub fn to_view(&self) -> BoardView {
        BoardView {
            id: self.id,
            width: self.grid.width(),
            height: self.grid.height(),
            live_cells: self.grid.live_count(),
            state: self.grid.to_rows(),
            created_at: self.created_at,
        }
    }
}
