//! Deterministic state snapshots
//!
//! Snapshots capture the complete engine state in a serializable form
//! for testing and debugging. Replaying the same instruction log must
//! always produce identical snapshots (animation clocks excluded, since
//! those are time-derived rather than logged).

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::cursor::Cursor;
use super::writer::{Mode, Writer};

/// A complete snapshot of the engine state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Grid dimensions
    pub cols: usize,
    pub rows: usize,
    /// Grid content, row-major
    pub grid: Vec<Vec<Cell>>,
    /// Cursor position and pending style
    pub cursor: Cursor,
    /// Grid-wide default style
    pub global_style: Cell,
    /// Application mode
    pub mode: Mode,
}

impl Snapshot {
    /// Capture the current state of a writer
    pub fn from_writer(writer: &Writer) -> Self {
        let mut grid = Vec::with_capacity(writer.rows());

        for row in 0..writer.rows() {
            let mut cells = Vec::with_capacity(writer.cols());
            for col in 0..writer.cols() {
                cells.push(writer.cell(col, row).cloned().unwrap_or_default());
            }
            grid.push(cells);
        }

        Snapshot {
            cols: writer.cols(),
            rows: writer.rows(),
            grid,
            cursor: writer.cursor().clone(),
            global_style: writer.global_style().clone(),
            mode: writer.mode(),
        }
    }

    /// Convert snapshot to a pretty JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a snapshot from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// A simple text rendering of the grid characters (for debugging)
    pub fn to_text(&self) -> String {
        let mut result = String::new();

        for row in &self.grid {
            for cell in row {
                result.push(cell.character.unwrap_or(' '));
            }
            while result.ends_with(' ') {
                result.pop();
            }
            result.push('\n');
        }

        result
    }

    /// Compare grid, cursor and global style, ignoring the mode
    pub fn content_equals(&self, other: &Snapshot) -> bool {
        self.cols == other.cols
            && self.rows == other.rows
            && self.grid == other.grid
            && self.cursor == other.cursor
            && self.global_style == other.global_style
    }
}
