//! The cell grid
//!
//! A fixed-size 2D grid of cells stored as a flat row-major vector.
//! The grid never grows or shrinks: scrolling drops the top row and
//! appends a fresh blank row at the bottom.

use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// The grid - a flat row-major array of `cols * rows` cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Cell>,
    cols: usize,
    rows: usize,
}

impl Grid {
    /// Create a blank grid. Dimensions must be at least 1x1.
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cells: vec![Cell::default(); cols * rows],
            cols,
            rows,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get a reference to a cell
    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Get a mutable reference to a cell
    pub fn cell_mut(&mut self, col: usize, row: usize) -> Option<&mut Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// Replace a cell wholesale with a blank one
    pub fn reset_cell(&mut self, col: usize, row: usize) {
        if let Some(cell) = self.cell_mut(col, row) {
            *cell = Cell::default();
        }
    }

    /// Iterate over all cells mutably, row-major
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Blank the entire grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
    }

    /// Scroll up by one row: drop row 0, shift everything up, append a
    /// blank row at the bottom. Grid length is unchanged.
    pub fn scroll_up(&mut self) {
        self.cells.drain(0..self.cols);
        self.cells
            .extend(std::iter::repeat_with(Cell::default).take(self.cols));
    }
}
