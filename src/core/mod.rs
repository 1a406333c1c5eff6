//! Engine Core Module
//!
//! Platform-independent grid state management. This module contains:
//! - Cell representation with colors, pulse flags and afterglow
//! - Cursor state with its pending style
//! - The flat row-major cell grid
//! - The Writer: mutators, animation clocks and replay dispatch
//! - Deterministic snapshot generation
//!
//! The core is designed to be completely deterministic: replaying the
//! same instruction log always produces the same state.

mod cell;
mod color;
mod cursor;
mod grid;
mod snapshot;
mod writer;

pub use cell::Cell;
pub use color::Color;
pub use cursor::Cursor;
pub use grid::Grid;
pub use snapshot::Snapshot;
pub use writer::{Mode, Writer, CYCLE_MAX};
