//! Conway's Game of Life (B3/S23) on a growable grid.
//!
//! All functions here are pure: they take a [`Grid`] by reference and
//! return a new one. Before each generation the grid is padded by one dead
//! cell on every side if any live cell touches its border, so patterns can
//! grow without being clipped. Cells outside the grid count as dead; there
//! is no wraparound.

use std::borrow::Cow;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use crate::error::SimulationError;
use crate::grid::Grid;

/// Relative positions of the eight Moore neighbors.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Compute the next generation of `grid`.
///
/// The result is one cell larger on every side than the input when the
/// input has a live cell on its border, and the same size otherwise.
pub fn next_generation(grid: &Grid) -> Grid {
    let current: Cow<'_, Grid> = if grid.needs_expansion() {
        Cow::Owned(grid.expand())
    } else {
        Cow::Borrowed(grid)
    };
    let current = current.as_ref();
    let width = current.width();

    let cells = (0..current.height())
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| next_cell_state(current.is_alive(x, y), live_neighbors(current, x, y)))
        .collect();

    Grid::from_parts(width, current.height(), cells)
}

/// Advance `grid` by `steps` generations.
///
/// Zero steps returns an identical grid.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidArgument`] if `steps` is negative.
/// The check happens before any generation is computed.
pub fn advance(grid: &Grid, steps: i64) -> Result<Grid, SimulationError> {
    advance_within(grid, steps, usize::MAX)
}

/// [`advance`] with every intermediate grid capped at `max_cells` cells.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidArgument`] if `steps` is negative, or
/// [`SimulationError::GridTooLarge`] as soon as a generation would need
/// more than `max_cells` cells. No oversized generation is computed.
pub fn advance_within(grid: &Grid, steps: i64, max_cells: usize) -> Result<Grid, SimulationError> {
    let steps = step_count(steps)?;
    ensure_within(grid, max_cells)?;

    let mut current = grid.clone();
    for _ in 0..steps {
        current = next_generation_within(&current, max_cells)?;
    }
    Ok(current)
}

/// [`next_generation`], refused if the result would exceed `max_cells`.
///
/// # Errors
///
/// Returns [`SimulationError::GridTooLarge`] if the expanded grid is over
/// the limit.
pub fn next_generation_within(grid: &Grid, max_cells: usize) -> Result<Grid, SimulationError> {
    let (width, height) = if grid.needs_expansion() {
        (grid.width().saturating_add(2), grid.height().saturating_add(2))
    } else {
        (grid.width(), grid.height())
    };
    check_cells(width, height, max_cells)?;
    Ok(next_generation(grid))
}

/// Check that `grid` holds at most `max_cells` cells.
///
/// # Errors
///
/// Returns [`SimulationError::GridTooLarge`] otherwise.
pub fn ensure_within(grid: &Grid, max_cells: usize) -> Result<(), SimulationError> {
    check_cells(grid.width(), grid.height(), max_cells)
}

fn check_cells(width: usize, height: usize, max_cells: usize) -> Result<(), SimulationError> {
    if width.saturating_mul(height) > max_cells {
        return Err(SimulationError::GridTooLarge {
            width,
            height,
            max_cells,
        });
    }
    Ok(())
}

/// Validate a requested step count.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidArgument`] if `steps` is negative.
pub fn step_count(steps: i64) -> Result<u64, SimulationError> {
    let Ok(count) = u64::try_from(steps) else {
        return Err(SimulationError::InvalidArgument(format!(
            "number of steps cannot be negative (got {steps})"
        )));
    };
    Ok(count)
}

/// Run `grid` forward until it stops changing.
///
/// Each generation's [`Grid::canonical_key`] is recorded with the
/// generation it was first seen at. When a key repeats, the distance to
/// its first sighting is the period: a period of 1 means the pattern is a
/// still life and the current grid is returned.
///
/// # Errors
///
/// - [`SimulationError::Oscillation`] if the pattern repeats with a
///   period greater than 1.
/// - [`SimulationError::NoConvergence`] if no state repeats within
///   `max_generations` generations. Patterns that keep growing never
///   repeat, because the key includes the grid dimensions.
pub fn find_final_state(grid: &Grid, max_generations: u64) -> Result<Grid, SimulationError> {
    find_final_state_within(grid, max_generations, usize::MAX)
}

/// [`find_final_state`] with every generation capped at `max_cells` cells.
///
/// The history holds one key per generation, each about `cells / 8`
/// bytes, so the cap also bounds its memory.
///
/// # Errors
///
/// As [`find_final_state`], plus [`SimulationError::GridTooLarge`] once
/// the pattern outgrows `max_cells`.
pub fn find_final_state_within(
    grid: &Grid,
    max_generations: u64,
    max_cells: usize,
) -> Result<Grid, SimulationError> {
    ensure_within(grid, max_cells)?;

    let mut history: HashMap<Vec<u8>, u64> = HashMap::new();
    let mut current = grid.clone();
    let mut generation: u64 = 0;

    while generation < max_generations {
        match history.entry(current.canonical_key()) {
            Entry::Occupied(seen) => {
                let period = generation.saturating_sub(*seen.get());
                if period == 1 {
                    debug!(generation, "Pattern reached a fixed point");
                    return Ok(current);
                }
                debug!(generation, period, "Pattern oscillates");
                return Err(SimulationError::Oscillation { period });
            }
            Entry::Vacant(slot) => {
                slot.insert(generation);
            }
        }

        current = next_generation_within(&current, max_cells)?;
        generation = generation.saturating_add(1);
    }

    debug!(max_generations, "No repeated state within budget");
    Err(SimulationError::NoConvergence { max_generations })
}

/// B3/S23: a live cell survives on 2 or 3 neighbors, a dead cell is
/// born on exactly 3.
const fn next_cell_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2 | 3) | (false, 3))
}

fn live_neighbors(grid: &Grid, x: usize, y: usize) -> u8 {
    let mut count: u8 = 0;
    for (dx, dy) in NEIGHBOR_OFFSETS {
        let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
            continue;
        };
        if grid.is_alive(nx, ny) {
            count = count.saturating_add(1);
        }
    }
    count
}
