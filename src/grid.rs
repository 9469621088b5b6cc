//! Fixed-size two-dimensional storage.
//!
//! `Grid<T>` holds an optional element per cell and has no game semantics of its own.
//! Cells are addressed by `(column, row)` and stored row-major.

/// A `columns x rows` grid of optional elements.
///
/// The dimensions are fixed at construction. Every accessor requires in-range
/// coordinates; an out-of-range access is a programming error and panics.
///
/// # Examples
/// ```
/// use match3_engine::grid::Grid;
/// let mut grid: Grid<u8> = Grid::new(3, 2);
/// grid.set(2, 1, Some(7));
/// assert_eq!(grid.get(2, 1), Some(&7));
/// assert_eq!(grid.get(0, 0), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    columns: usize,
    rows: usize,
    cells: Vec<Option<T>>,
}

impl<T> Grid<T> {
    /// Creates a grid with every cell empty.
    pub fn new(columns: usize, rows: usize) -> Self {
        let mut cells = Vec::with_capacity(columns * rows);
        cells.resize_with(columns * rows, || None);
        Grid {
            columns,
            rows,
            cells,
        }
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns `true` if `(column, row)` addresses a cell of this grid.
    ///
    /// Callers holding signed or computed coordinates check this before calling
    /// any accessor.
    pub fn contains(&self, column: isize, row: isize) -> bool {
        column >= 0 && row >= 0 && (column as usize) < self.columns && (row as usize) < self.rows
    }

    #[inline]
    fn index(&self, column: usize, row: usize) -> usize {
        assert!(
            column < self.columns && row < self.rows,
            "grid coordinate ({}, {}) out of range for {}x{} grid",
            column,
            row,
            self.columns,
            self.rows
        );
        row * self.columns + column
    }

    /// Returns the element at `(column, row)`, if any.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the grid.
    pub fn get(&self, column: usize, row: usize) -> Option<&T> {
        let idx = self.index(column, row);
        self.cells[idx].as_ref()
    }

    /// Stores `value` at `(column, row)`, replacing whatever was there.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the grid.
    pub fn set(&mut self, column: usize, row: usize, value: Option<T>) {
        let idx = self.index(column, row);
        self.cells[idx] = value;
    }

    /// Removes and returns the element at `(column, row)`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the grid.
    pub fn take(&mut self, column: usize, row: usize) -> Option<T> {
        let idx = self.index(column, row);
        self.cells[idx].take()
    }

    /// Returns `true` if the cell at `(column, row)` holds an element.
    pub fn is_occupied(&self, column: usize, row: usize) -> bool {
        self.get(column, row).is_some()
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid: Grid<u32> = Grid::new(9, 9);
        assert_eq!(grid.columns(), 9);
        assert_eq!(grid.rows(), 9);
        for row in 0..9 {
            for column in 0..9 {
                assert!(grid.get(column, row).is_none());
            }
        }
    }

    #[test]
    fn test_set_get_take() {
        let mut grid = Grid::new(4, 3);
        grid.set(3, 2, Some('x'));
        grid.set(0, 1, Some('y'));
        assert_eq!(grid.get(3, 2), Some(&'x'));
        assert_eq!(grid.get(0, 1), Some(&'y'));
        // Row-major layout: (0,1) and (3,2) are distinct cells, neighbours untouched.
        assert_eq!(grid.get(1, 1), None);

        assert_eq!(grid.take(3, 2), Some('x'));
        assert!(!grid.is_occupied(3, 2));
        assert_eq!(grid.take(3, 2), None);
    }

    #[test]
    fn test_non_square_indexing_is_distinct() {
        let mut grid = Grid::new(3, 5);
        let mut n = 0;
        for row in 0..5 {
            for column in 0..3 {
                grid.set(column, row, Some(n));
                n += 1;
            }
        }
        assert_eq!(grid.get(2, 0), Some(&2));
        assert_eq!(grid.get(0, 1), Some(&3));
        assert_eq!(grid.get(2, 4), Some(&14));
    }

    #[test]
    fn test_contains() {
        let grid: Grid<()> = Grid::new(9, 9);
        assert!(grid.contains(0, 0));
        assert!(grid.contains(8, 8));
        assert!(!grid.contains(-1, 0));
        assert!(!grid.contains(0, 9));
        assert!(!grid.contains(9, 0));
    }

    #[test]
    fn test_clear() {
        let mut grid = Grid::new(2, 2);
        grid.set(1, 1, Some(1));
        grid.clear();
        assert!(!grid.is_occupied(1, 1));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_get_panics() {
        let grid: Grid<u8> = Grid::new(9, 9);
        let _ = grid.get(9, 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_set_panics() {
        let mut grid: Grid<u8> = Grid::new(9, 9);
        grid.set(0, 9, Some(1));
    }
}
