//! Grid cell
//!
//! Represents a single position in the grid: its character, per-channel
//! style overrides, and any afterglow trail left behind by the cursor or
//! by scrolled-off content. A `None` color means "no override here, fall
//! back to the global style at render time".

use serde::{Deserialize, Serialize};

use super::color::Color;

/// A single cell in the grid
///
/// Also doubles as a plain style record: the cursor's pending style and
/// the global style are `Cell`s whose `character` and afterglow fields
/// stay unused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Foreground color override
    pub foreground: Option<Color>,
    /// Whether the foreground pulses with the cycle
    pub foreground_pulse: bool,

    /// Background color override
    pub background: Option<Color>,
    /// Whether the background pulses with the cycle
    pub background_pulse: bool,

    /// Border color override
    pub border: Option<Color>,
    /// Whether the border pulses with the cycle
    pub border_pulse: bool,

    /// Character in this cell
    pub character: Option<char>,

    /// Afterglow trail color, if a trail is active
    pub afterglow_color: Option<Color>,
    /// Afterglow intensity, decaying towards zero. Set and cleared
    /// together with `afterglow_color`.
    pub afterglow_counter: Option<u8>,
}

impl Cell {
    /// Check whether this cell is completely blank
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Start an afterglow trail on this cell
    pub fn set_afterglow(&mut self, color: Color, counter: u8) {
        self.afterglow_color = Some(color);
        self.afterglow_counter = Some(counter);
    }

    /// Remove any afterglow trail from this cell
    pub fn clear_afterglow(&mut self) {
        self.afterglow_color = None;
        self.afterglow_counter = None;
    }

    /// Copy the three color channels and pulse flags from another cell,
    /// leaving character and afterglow untouched
    pub fn copy_style_from(&mut self, style: &Cell) {
        self.foreground = style.foreground;
        self.foreground_pulse = style.foreground_pulse;
        self.background = style.background;
        self.background_pulse = style.background_pulse;
        self.border = style.border;
        self.border_pulse = style.border_pulse;
    }
}
