//! Rectangular boolean cell matrix.
//!
//! A [`Grid`] is an immutable value: every transformation returns a new
//! grid. Cells are stored row-major in a single vector; `x` is the column
//! index and `y` the row index.
//!
//! Equality and hashing are structural (dimensions plus every cell), so
//! two grids with the same live pattern but different padding are
//! distinct.

/// Bit weights used when packing eight cells into one byte.
const BIT_WEIGHTS: [u8; 8] = [1, 2, 4, 8, 16, 32, 64, 128];

/// Errors that can occur when building a grid from external data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A row has a different length than the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// A flat cell list does not match the declared dimensions.
    #[error("{width}x{height} grid needs {expected} cells, got {found}")]
    CellCount {
        /// Declared number of columns.
        width: usize,
        /// Declared number of rows.
        height: usize,
        /// `width * height`, or `usize::MAX` if that overflows.
        expected: usize,
        /// Number of cells supplied.
        found: usize,
    },
}

/// A rectangular matrix of cell states (`true` = alive).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Row-major cell states; always `width * height` long.
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid of the given dimensions.
    pub fn dead(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width.saturating_mul(height)],
        }
    }

    /// Build a grid from a list of rows.
    ///
    /// The width is taken from the first row; an empty list yields a
    /// 0x0 grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Ragged`] if any row differs in length from
    /// the first.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(GridError::Ragged {
                row,
                expected: width,
                found,
            });
        }

        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Build a grid from row-major cells and explicit dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CellCount`] if `cells.len() != width * height`.
    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Result<Self, GridError> {
        let expected = width.checked_mul(height).unwrap_or(usize::MAX);
        if cells.len() != expected {
            return Err(GridError::CellCount {
                width,
                height,
                expected,
                found: cells.len(),
            });
        }
        Ok(Self::from_parts(width, height, cells))
    }

    /// Assemble a grid from already-validated row-major cells.
    ///
    /// Callers guarantee `cells.len() == width * height`.
    pub(crate) const fn from_parts(width: usize, height: usize, cells: Vec<bool>) -> Self {
        Self {
            width,
            height,
            cells,
        }
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether the grid has no cells at all.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Row-major cell states.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// State of the cell at column `x`, row `y`.
    ///
    /// Positions outside the grid are dead.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.index(x, y)
            .and_then(|i| self.cells.get(i).copied())
            .unwrap_or(false)
    }

    /// Number of live cells.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Iterate over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        (0..self.height).map(|y| self.row(y).unwrap_or(&[]))
    }

    /// Convert back into a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.rows().map(<[bool]>::to_vec).collect()
    }

    /// Whether any live cell sits on the outermost row or column.
    ///
    /// A zero-area grid has no border and reports `false`.
    pub fn needs_expansion(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        let last_x = self.width.saturating_sub(1);
        let last_y = self.height.saturating_sub(1);

        (0..self.width).any(|x| self.is_alive(x, 0) || self.is_alive(x, last_y))
            || (0..self.height).any(|y| self.is_alive(0, y) || self.is_alive(last_x, y))
    }

    /// Return a copy padded with one dead cell on every side.
    pub fn expand(&self) -> Self {
        let mut expanded = Self::dead(self.width.saturating_add(2), self.height.saturating_add(2));

        for (y, row) in self.rows().enumerate() {
            let start = y
                .saturating_add(1)
                .saturating_mul(expanded.width)
                .saturating_add(1);
            let end = start.saturating_add(row.len());
            if let Some(target) = expanded.cells.get_mut(start..end) {
                target.copy_from_slice(row);
            }
        }

        expanded
    }

    /// Collision-free byte encoding of dimensions and content.
    ///
    /// Layout: width and height as little-endian `usize`, followed by the
    /// row-major cells packed eight per byte (least significant bit
    /// first). Grids with different dimensions never share a key.
    pub fn canonical_key(&self) -> Vec<u8> {
        let packed_len = self.cells.len().div_ceil(8);
        let mut key = Vec::with_capacity(
            packed_len.saturating_add(2usize.saturating_mul(size_of::<usize>())),
        );
        key.extend_from_slice(&self.width.to_le_bytes());
        key.extend_from_slice(&self.height.to_le_bytes());
        key.extend(self.cells.chunks(8).map(|chunk| {
            chunk
                .iter()
                .zip(BIT_WEIGHTS)
                .filter(|&(&alive, _)| alive)
                .fold(0u8, |byte, (_, weight)| byte | weight)
        }));
        key
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        y.checked_mul(self.width)?.checked_add(x)
    }

    fn row(&self, y: usize) -> Option<&[bool]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.width)?;
        let end = start.checked_add(self.width)?;
        self.cells.get(start..end)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(
            rows.iter()
                .map(|row| row.chars().map(|c| c == '#').collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn from_rows_records_dimensions() {
        let g = grid(&["#..", "..."]);
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 2);
        assert!(g.is_alive(0, 0));
        assert!(!g.is_alive(1, 0));
        assert_eq!(g.live_count(), 1);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Grid::from_rows(vec![vec![true, false], vec![true]]).unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn from_cells_checks_length() {
        let g = Grid::from_cells(3, 2, vec![true, false, false, false, false, true]).unwrap();
        assert_eq!(g, grid(&["#..", "..#"]));
        assert_eq!(
            Grid::from_cells(3, 2, vec![true; 5]).unwrap_err(),
            GridError::CellCount {
                width: 3,
                height: 2,
                expected: 6,
                found: 5
            }
        );
        assert_eq!(Grid::from_cells(0, 4, Vec::new()).unwrap().height(), 4);
    }

    #[test]
    fn empty_input_is_zero_area() {
        let g = Grid::from_rows(Vec::new()).unwrap();
        assert_eq!((g.width(), g.height()), (0, 0));
        assert!(g.is_empty());
        assert!(!g.needs_expansion());
    }

    #[test]
    fn zero_width_rows_keep_height() {
        let g = Grid::from_rows(vec![Vec::new(), Vec::new()]).unwrap();
        assert_eq!((g.width(), g.height()), (0, 2));
        assert_eq!(g.to_rows(), vec![Vec::<bool>::new(), Vec::new()]);
        assert!(!g.needs_expansion());
    }

    #[test]
    fn out_of_bounds_cells_are_dead() {
        let g = grid(&["##", "##"]);
        assert!(!g.is_alive(2, 0));
        assert!(!g.is_alive(0, 2));
        assert!(!g.is_alive(usize::MAX, usize::MAX));
    }

    #[test]
    fn to_rows_roundtrips_non_square_grid() {
        let rows = vec![vec![true, false, false], vec![false, false, true]];
        let g = Grid::from_rows(rows.clone()).unwrap();
        assert_eq!(g.to_rows(), rows);
    }

    #[test]
    fn interior_pattern_does_not_need_expansion() {
        let g = grid(&["....", ".##.", ".##.", "...."]);
        assert!(!g.needs_expansion());
    }

    #[test]
    fn each_border_triggers_expansion() {
        assert!(grid(&[".#.", "...", "..."]).needs_expansion());
        assert!(grid(&["...", "...", ".#."]).needs_expansion());
        assert!(grid(&["...", "#..", "..."]).needs_expansion());
        assert!(grid(&["...", "..#", "..."]).needs_expansion());
    }

    #[test]
    fn single_row_and_column_are_all_border() {
        assert!(grid(&["..#.."]).needs_expansion());
        assert!(grid(&[".", "#", "."]).needs_expansion());
        assert!(!grid(&["....."]).needs_expansion());
    }

    #[test]
    fn expand_pads_with_dead_border() {
        let g = grid(&["#.", ".#", "##"]);
        let expanded = g.expand();
        assert_eq!(expanded, grid(&["....", ".#..", "..#.", ".##.", "...."]));
        assert_eq!(expanded.live_count(), g.live_count());
        // The source grid is untouched.
        assert_eq!(g.width(), 2);
    }

    #[test]
    fn expand_zero_area_grid() {
        let expanded = Grid::default().expand();
        assert_eq!(expanded, Grid::dead(2, 2));
    }

    #[test]
    fn equality_includes_dimensions() {
        assert_ne!(Grid::dead(2, 3), Grid::dead(3, 2));
        assert_eq!(grid(&["#.", ".."]), grid(&["#.", ".."]));
    }

    #[test]
    fn canonical_key_distinguishes_reshaped_grids() {
        // Same six cells, two different shapes.
        let wide = grid(&["#.#", ".#."]);
        let tall = grid(&["#.", "#.", "#."]);
        assert_eq!(wide.cells().len(), tall.cells().len());
        assert_ne!(wide.canonical_key(), tall.canonical_key());
        assert_ne!(Grid::dead(2, 3).canonical_key(), Grid::dead(3, 2).canonical_key());
    }

    #[test]
    fn canonical_key_matches_for_equal_grids() {
        let a = grid(&["#...#####", "........#"]);
        let b = a.clone();
        assert_eq!(a.canonical_key(), b.canonical_key());
        assert_ne!(a.canonical_key(), grid(&["#...####.", "........#"]).canonical_key());
    }
}
