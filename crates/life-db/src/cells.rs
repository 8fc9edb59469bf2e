//! Text encoding of grid cells for the `boards.cells` column.
//!
//! Cells are written row-major, one character per cell: `1` for alive,
//! `0` for dead. Dimensions live in their own columns, so the string
//! alone never has to carry them.

use life_core::Grid;
use life_types::BoardId;

use crate::error::DbError;

/// Encode a grid's cells as a `0`/`1` string.
pub fn encode_cells(grid: &Grid) -> String {
    grid.cells()
        .iter()
        .map(|&alive| if alive { '1' } else { '0' })
        .collect()
}

/// Decode a stored cell string back into a grid.
///
/// # Errors
///
/// Returns [`DbError::CorruptCells`] if the string contains anything other
/// than `0`/`1` or its length does not match the dimensions.
pub fn decode_cells(
    board_id: BoardId,
    width: usize,
    height: usize,
    cells: &str,
) -> Result<Grid, DbError> {
    let parsed = cells
        .chars()
        .enumerate()
        .map(|(i, c)| match c {
            '1' => Ok(true),
            '0' => Ok(false),
            other => Err(DbError::CorruptCells {
                board_id,
                reason: format!("unexpected character {other:?} at position {i}"),
            }),
        })
        .collect::<Result<Vec<bool>, DbError>>()?;

    Grid::from_cells(width, height, parsed).map_err(|e| DbError::CorruptCells {
        board_id,
        reason: e.to_string(),
    })
}
