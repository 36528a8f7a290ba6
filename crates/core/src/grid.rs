//! Grid module - fixed-size 2D storage for the board
//!
//! A grid is a `columns x rows` dense store where each cell is either empty or
//! holds one value. Uses a flat row-major slice for cache locality; the size is
//! fixed at construction.
//! Coordinates: (column, row) where column grows left to right and row 0 is the
//! bottom row.
//!
//! Indices are a precondition: out-of-range access panics. Callers holding
//! untrusted coordinates check them once with [`Grid::contains`].

/// Dense 2D grid of optional values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    columns: usize,
    rows: usize,
    /// Flat array of cells, row-major order (row * columns + column)
    cells: Box<[Option<T>]>,
}

impl<T> Grid<T> {
    /// Create a new empty grid
    pub fn new(columns: usize, rows: usize) -> Self {
        let cells = std::iter::repeat_with(|| None)
            .take(columns * rows)
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self {
            columns,
            rows,
            cells,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Calculate flat index from (column, row)
    #[inline(always)]
    fn index(&self, column: usize, row: usize) -> usize {
        assert!(
            column < self.columns && row < self.rows,
            "grid index ({}, {}) out of range for {}x{} grid",
            column,
            row,
            self.columns,
            self.rows
        );
        row * self.columns + column
    }

    /// Check whether signed coordinates fall inside the grid
    pub fn contains(&self, column: i32, row: i32) -> bool {
        column >= 0 && row >= 0 && (column as usize) < self.columns && (row as usize) < self.rows
    }

    /// Get the value at (column, row)
    pub fn get(&self, column: usize, row: usize) -> Option<&T> {
        self.cells[self.index(column, row)].as_ref()
    }

    /// Get a mutable reference to the value at (column, row)
    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut T> {
        let idx = self.index(column, row);
        self.cells[idx].as_mut()
    }

    /// Replace the cell at (column, row)
    pub fn set(&mut self, column: usize, row: usize, value: Option<T>) {
        let idx = self.index(column, row);
        self.cells[idx] = value;
    }

    /// Remove and return the value at (column, row)
    pub fn take(&mut self, column: usize, row: usize) -> Option<T> {
        let idx = self.index(column, row);
        self.cells[idx].take()
    }

    /// Exchange the contents of two cells
    pub fn swap(&mut self, a: (usize, usize), b: (usize, usize)) {
        let ia = self.index(a.0, a.1);
        let ib = self.index(b.0, b.1);
        self.cells.swap(ia, ib);
    }

    /// Whether (column, row) holds a value
    pub fn is_occupied(&self, column: usize, row: usize) -> bool {
        self.get(column, row).is_some()
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = None;
        }
    }

    /// Iterate over occupied cells as `(column, row, &value)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(idx, cell)| cell.as_ref().map(|v| (idx % columns, idx / columns, v)))
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}
