//! Fixed-size two-dimensional storage with optional cells.
//!
//! `Grid2D` backs both the token layer and the playable mask of a board.
//! Cells are addressed by `(col, row)` and stored row-major. Addressing a cell
//! outside the grid is a caller bug and panics.

/// A dense `cols x rows` grid where each cell may be empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid2D<T> {
    cols: usize,
    rows: usize,
    cells: Vec<Option<T>>,
}

impl<T> Grid2D<T> {
    /// Creates a grid with every cell empty.
    ///
    /// # Panics
    /// Panics if `cols` or `rows` is zero.
    ///
    /// # Examples
    /// ```
    /// use cookie_crunch::grid::Grid2D;
    /// let mut grid: Grid2D<u8> = Grid2D::new(3, 2);
    /// assert_eq!(grid.get(2, 1), None);
    /// grid.set(2, 1, Some(7));
    /// assert_eq!(grid.get(2, 1), Some(&7));
    /// ```
    pub fn new(cols: usize, rows: usize) -> Self {
        assert!(cols > 0 && rows > 0, "grid must be at least 1x1");
        let cells = std::iter::repeat_with(|| None).take(cols * rows).collect();
        Grid2D { cols, rows, cells }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn index(&self, col: usize, row: usize) -> usize {
        assert!(
            col < self.cols && row < self.rows,
            "cell ({}, {}) is outside a {}x{} grid",
            col,
            row,
            self.cols,
            self.rows
        );
        row * self.cols + col
    }

    /// Returns the value at `(col, row)`, or `None` if the cell is empty.
    pub fn get(&self, col: usize, row: usize) -> Option<&T> {
        let i = self.index(col, row);
        self.cells[i].as_ref()
    }

    /// Stores `value` at `(col, row)`; `None` empties the cell.
    pub fn set(&mut self, col: usize, row: usize, value: Option<T>) {
        let i = self.index(col, row);
        self.cells[i] = value;
    }

    /// Empties `(col, row)` and returns what was there.
    pub fn take(&mut self, col: usize, row: usize) -> Option<T> {
        let i = self.index(col, row);
        self.cells[i].take()
    }

    /// Exchanges the contents of two cells.
    pub fn swap(&mut self, a: (usize, usize), b: (usize, usize)) {
        let ia = self.index(a.0, a.1);
        let ib = self.index(b.0, b.1);
        self.cells.swap(ia, ib);
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    /// Iterates over occupied cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter().filter_map(Option::as_ref)
    }
}
