//! Cursor state
//!
//! The cursor is the write head: a grid position plus a pending style.
//! Every character write and every style toggle goes through the pending
//! style, so the cursor carries a full `Cell` of its own.

use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// The write head: position plus pending style
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Column position (0-indexed)
    pub col: usize,
    /// Row position (0-indexed)
    pub row: usize,
    /// Pending style applied to future writes
    pub style: Cell,
}

impl Cursor {
    /// Create a new cursor at the home position with a blank pending style
    pub fn new() -> Self {
        Self::default()
    }
}
