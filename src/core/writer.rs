//! The Writer - the grid state engine
//!
//! Owns the cell grid, the cursor, the global style, the animation
//! clocks and the instruction log. All mutations go through the methods
//! here; each one records its instruction while in record mode, and the
//! replay dispatcher calls the very same methods, so live input and
//! replay cannot diverge.
//!
//! The engine is tick-driven and single-threaded: the embedding
//! application calls [`Writer::tick`] at a steady cadence with the
//! current timestamp, and every operation runs to completion before
//! control returns.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::demo::{Demo, DemoDocument, Instruction, Mnemonic, Scope, Target};
use crate::error::Result;

use super::cell::Cell;
use super::color::Color;
use super::cursor::Cursor;
use super::grid::Grid;

/// Upper bound of the pulse cycle and of afterglow counters
pub const CYCLE_MAX: u8 = 255;

/// Pulse cycle step while rising
const CYCLE_RISE_STEP: i16 = 10;
/// Pulse cycle step while falling
const CYCLE_FALL_STEP: i16 = 20;
/// Afterglow counter decrement per decay step
const AFTERGLOW_DECAY_STEP: u8 = 5;

/// Base pacing intervals in milliseconds, scaled by `1 - speed`
const PLAYBACK_WAIT_MS: f64 = 100.0;
const CYCLE_WAIT_MS: f64 = 50.0;
const AFTERGLOW_WAIT_MS: f64 = 5.0;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Live input, every mutation is appended to the log
    #[default]
    Record,
    /// Instructions are pulled from the log and replayed
    Play,
    /// Animation clocks and replay are frozen
    Pause,
}

/// Timestamps of the last advance of each clock
#[derive(Debug, Clone, Copy, Default)]
struct Clocks {
    cycle: Duration,
    afterglow: Duration,
    playback: Duration,
}

/// The grid state engine
#[derive(Debug)]
pub struct Writer {
    cols: usize,
    rows: usize,
    grid: Grid,
    cursor: Cursor,
    global_style: Cell,
    demo: Demo,
    mode: Mode,
    /// Animation tempo between 0 and 1
    speed: f64,
    /// Pulse cycle value between 0 and [`CYCLE_MAX`]
    cycle_value: i16,
    /// Pulse cycle direction
    cycle_rising: bool,
    last: Clocks,
}

impl Writer {
    /// Create a new engine with a blank grid of the given dimensions
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let mut writer = Self {
            cols,
            rows,
            grid: Grid::new(cols, rows),
            cursor: Cursor::new(),
            global_style: Cell::default(),
            demo: Demo::new(),
            mode: Mode::Record,
            speed: 0.5,
            cycle_value: 0,
            cycle_rising: true,
            last: Clocks::default(),
        };
        writer.reinit();
        writer
    }

    /// Reset grid, cursor, global style, clocks and mode, keeping the log
    fn reinit(&mut self) {
        self.mode = Mode::Record;
        self.grid.clear();
        self.cursor = Cursor::new();

        self.global_style = Cell {
            foreground: Some(Color::DEFAULT_FOREGROUND),
            background: Some(Color::DEFAULT_BACKGROUND),
            border: Some(Color::DEFAULT_BORDER),
            ..Cell::default()
        };

        self.cycle_value = 0;
        self.cycle_rising = true;
        self.last = Clocks::default();
    }

    // --- accessors for the rendering collaborator ---

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cell at a grid position
    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        self.grid.cell(col, row)
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn global_style(&self) -> &Cell {
        &self.global_style
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn demo(&self) -> &Demo {
        &self.demo
    }

    /// Current pulse cycle intensity as a percentage (0-100)
    pub fn cycle_percent(&self) -> f64 {
        100.0 * f64::from(self.cycle_value) / f64::from(CYCLE_MAX)
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Set the animation tempo, clamped to [0, 1]
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(0.0, 1.0);
    }

    // --- mode transitions ---

    /// Request a mode transition. Only the transitions of the
    /// record/play/pause state machine are honored; anything else is
    /// logged and ignored. Entering play goes through [`Writer::play`].
    pub fn set_mode(&mut self, next: Mode) {
        if next == self.mode {
            return;
        }
        let legal = matches!(
            (self.mode, next),
            (Mode::Play, Mode::Pause) | (Mode::Pause, Mode::Play) | (Mode::Play, Mode::Record)
        );
        if legal {
            self.mode = next;
        } else {
            warn!(from = ?self.mode, to = ?next, "illegal mode transition ignored");
        }
    }

    /// Start replaying the recorded log from the beginning.
    ///
    /// Reinitializes the grid, cursor, global style and clocks so replay
    /// starts from the same blank state recording did.
    pub fn play(&mut self) {
        self.reinit();
        self.mode = Mode::Play;
        self.demo.reset_index();
    }

    /// Full reset: blank state and a fresh empty log
    pub fn reset(&mut self) {
        self.reinit();
        self.demo = Demo::new();
    }

    // --- demo exchange ---

    /// Export the recorded session as a demo document
    pub fn export_demo(&self) -> DemoDocument {
        self.demo.export()
    }

    /// Replace the log with an imported demo document.
    ///
    /// A malformed document leaves the engine completely untouched.
    pub fn import_demo(&mut self, document: &DemoDocument) -> Result<()> {
        self.demo = Demo::import(document)?;
        Ok(())
    }

    // --- tick / animation clocks ---

    /// Advance the animation clocks and, in play mode, the replay.
    ///
    /// `now` is the current timestamp on the embedding application's
    /// monotonic clock. Clocks only advance in record and play mode;
    /// pause freezes everything. Replay type errors propagate out.
    pub fn tick(&mut self, now: Duration) -> Result<()> {
        let mode = self.mode;

        if mode == Mode::Play {
            let wait = scaled_wait(PLAYBACK_WAIT_MS, self.speed);

            if now.saturating_sub(self.last.playback) > wait {
                match self.demo.next_instruction() {
                    Some(instruction) => {
                        let delay = self.execute(&instruction)?;
                        // Delay-exempt instructions re-arm the clock so
                        // the next pull happens on the very next tick
                        self.last.playback = if delay { now } else { Duration::ZERO };
                    }
                    None => {
                        self.mode = Mode::Record;
                        info!("playback finished, switched back to record mode");
                    }
                }
            }
        }

        if matches!(mode, Mode::Record | Mode::Play) {
            self.advance_cycle(now);
            self.decay_afterglow(now);
        }

        Ok(())
    }

    /// Oscillate the pulse cycle between 0 and [`CYCLE_MAX`]
    fn advance_cycle(&mut self, now: Duration) {
        if now.saturating_sub(self.last.cycle) <= scaled_wait(CYCLE_WAIT_MS, self.speed) {
            return;
        }

        if self.cycle_rising {
            self.cycle_value += CYCLE_RISE_STEP;
            if self.cycle_value >= i16::from(CYCLE_MAX) {
                self.cycle_value = i16::from(CYCLE_MAX);
                self.cycle_rising = false;
            }
        } else {
            self.cycle_value -= CYCLE_FALL_STEP;
            if self.cycle_value <= 0 {
                self.cycle_value = 0;
                self.cycle_rising = true;
            }
        }

        self.last.cycle = now;
    }

    /// Decay every active afterglow trail by one step
    fn decay_afterglow(&mut self, now: Duration) {
        if now.saturating_sub(self.last.afterglow) <= scaled_wait(AFTERGLOW_WAIT_MS, self.speed) {
            return;
        }

        // A pulsing global background and afterglow are mutually
        // exclusive effects; the former wins.
        let force_clear = self.global_style.background_pulse;

        for cell in self.grid.cells_mut() {
            if force_clear {
                cell.clear_afterglow();
            } else if let Some(counter) = cell.afterglow_counter {
                let next = counter.saturating_sub(AFTERGLOW_DECAY_STEP);
                if next == 0 {
                    cell.clear_afterglow();
                } else {
                    cell.afterglow_counter = Some(next);
                }
            }
        }

        self.last.afterglow = now;
    }

    /// Stamp an afterglow trail onto a cell
    fn trigger_afterglow(&mut self, col: usize, row: usize, color: Option<Color>, counter: u8) {
        let color = color.unwrap_or(Color::DEFAULT_FOREGROUND);
        if let Some(cell) = self.grid.cell_mut(col, row) {
            cell.set_afterglow(color, counter);
        }
    }

    /// Stamp the cursor's trail at its current (about to be vacated)
    /// position, using the pending background and the live cycle value
    fn stamp_cursor_afterglow(&mut self) {
        let color = self.cursor.style.background;
        let counter = self.cycle_value as u8;
        self.trigger_afterglow(self.cursor.col, self.cursor.row, color, counter);
    }

    // --- recording and replay dispatch ---

    /// Append an instruction to the log, unless currently replaying
    fn record(&mut self, instruction: Instruction) {
        if self.mode == Mode::Record {
            self.demo.push(instruction);
        }
    }

    /// Dispatch one instruction to its mutator.
    ///
    /// Returns whether the normal playback pacing delay applies after
    /// this instruction; character writes are exempt so typed sequences
    /// play back as one fluid step.
    fn execute(&mut self, instruction: &Instruction) -> Result<bool> {
        let mut delay = true;

        match instruction.mnemonic {
            Mnemonic::CursorUp => self.cursor_up(),
            Mnemonic::CursorDown => self.cursor_down(),
            Mnemonic::CursorLeft => self.cursor_left(),
            Mnemonic::CursorRight => self.cursor_right(),
            Mnemonic::Scroll => self.scroll(),
            Mnemonic::Advance => self.advance(),
            Mnemonic::Retract => {
                self.retract();
            }
            Mnemonic::Character => {
                self.character(instruction.char_argument()?);
                delay = false;
            }
            Mnemonic::ClearCell => self.clear_cell(),

            Mnemonic::CursorForegroundColor => {
                self.set_color(Scope::Cursor, Target::Foreground, instruction.color_argument()?)
            }
            Mnemonic::CursorBackgroundColor => {
                self.set_color(Scope::Cursor, Target::Background, instruction.color_argument()?)
            }
            Mnemonic::CursorBorderColor => {
                self.set_color(Scope::Cursor, Target::Border, instruction.color_argument()?)
            }
            Mnemonic::GlobalForegroundColor => {
                self.set_color(Scope::Global, Target::Foreground, instruction.color_argument()?)
            }
            Mnemonic::GlobalBackgroundColor => {
                self.set_color(Scope::Global, Target::Background, instruction.color_argument()?)
            }
            Mnemonic::GlobalBorderColor => {
                self.set_color(Scope::Global, Target::Border, instruction.color_argument()?)
            }

            Mnemonic::CursorForegroundPulse => {
                self.set_pulse(Scope::Cursor, Target::Foreground, instruction.bool_argument()?)
            }
            Mnemonic::CursorBackgroundPulse => {
                self.set_pulse(Scope::Cursor, Target::Background, instruction.bool_argument()?)
            }
            Mnemonic::CursorBorderPulse => {
                self.set_pulse(Scope::Cursor, Target::Border, instruction.bool_argument()?)
            }
            Mnemonic::GlobalForegroundPulse => {
                self.set_pulse(Scope::Global, Target::Foreground, instruction.bool_argument()?)
            }
            Mnemonic::GlobalBackgroundPulse => {
                self.set_pulse(Scope::Global, Target::Background, instruction.bool_argument()?)
            }
            Mnemonic::GlobalBorderPulse => {
                self.set_pulse(Scope::Global, Target::Border, instruction.bool_argument()?)
            }
        }

        Ok(delay)
    }

    // --- mutators ---

    /// Move the cursor up one row. A no-op at row 0 (still recorded).
    pub fn cursor_up(&mut self) {
        self.record(Instruction::bare(Mnemonic::CursorUp));

        if self.cursor.row == 0 {
            return;
        }

        self.stamp_cursor_afterglow();
        self.cursor.row -= 1;
    }

    /// Move the cursor down one row; at the bottom row this scrolls
    /// instead of moving
    pub fn cursor_down(&mut self) {
        self.record(Instruction::bare(Mnemonic::CursorDown));

        if self.cursor.row == self.rows - 1 {
            self.scroll_rows();
            return;
        }

        self.stamp_cursor_afterglow();
        self.cursor.row += 1;
    }

    /// Move the cursor left one column, wrapping within the same row
    pub fn cursor_left(&mut self) {
        self.record(Instruction::bare(Mnemonic::CursorLeft));

        self.stamp_cursor_afterglow();
        if self.cursor.col == 0 {
            self.cursor.col = self.cols - 1;
        } else {
            self.cursor.col -= 1;
        }
    }

    /// Move the cursor right one column, wrapping within the same row
    pub fn cursor_right(&mut self) {
        self.record(Instruction::bare(Mnemonic::CursorRight));

        self.stamp_cursor_afterglow();
        if self.cursor.col == self.cols - 1 {
            self.cursor.col = 0;
        } else {
            self.cursor.col += 1;
        }
    }

    /// Move the write head forward one cell in reading order; wraps to
    /// the next row and scrolls at the very end of the grid
    pub fn advance(&mut self) {
        self.record(Instruction::bare(Mnemonic::Advance));

        if self.cursor.col == self.cols - 1 {
            if self.cursor.row != self.rows - 1 {
                self.stamp_cursor_afterglow();
                self.cursor.col = 0;
                self.cursor.row += 1;
            } else {
                self.scroll_rows();
                self.cursor.col = 0;
            }
        } else {
            self.stamp_cursor_afterglow();
            self.cursor.col += 1;
        }
    }

    /// Move the write head back one cell in reading order.
    ///
    /// Returns `false` when the cursor is already at the origin, so a
    /// caller can skip a dependent action (e.g. not clearing a cell
    /// after a failed retract).
    pub fn retract(&mut self) -> bool {
        self.record(Instruction::bare(Mnemonic::Retract));

        if self.cursor.col == 0 {
            if self.cursor.row == 0 {
                return false;
            }
            self.stamp_cursor_afterglow();
            self.cursor.col = self.cols - 1;
            self.cursor.row -= 1;
        } else {
            self.stamp_cursor_afterglow();
            self.cursor.col -= 1;
        }

        true
    }

    /// Scroll the grid up one row without moving the cursor
    pub fn scroll(&mut self) {
        self.record(Instruction::bare(Mnemonic::Scroll));
        self.scroll_rows();
    }

    /// The actual scroll. Shared by `scroll`, `cursor_down` and
    /// `advance`; does not record, so a bottom-row cursor move logs a
    /// single instruction and replays with a single scroll.
    fn scroll_rows(&mut self) {
        self.grid.scroll_up();

        // Every shifted cell with a background leaves a fading ghost at
        // its pre-scroll position, one row below where it now sits.
        for row in 0..self.rows - 1 {
            for col in 0..self.cols {
                let Some(cell) = self.grid.cell(col, row) else {
                    continue;
                };
                let Some(background) = cell.background else {
                    continue;
                };
                let counter = if cell.background_pulse {
                    self.cycle_value as u8
                } else {
                    CYCLE_MAX
                };
                self.trigger_afterglow(col, row + 1, Some(background), counter);
            }
        }
    }

    /// Write a character at the cursor, stamping the pending style onto
    /// the cell. Does not move the cursor; callers compose this with
    /// [`Writer::advance`] for auto-advance behavior.
    pub fn character(&mut self, ch: char) {
        self.record(Instruction::character(ch));

        let style = self.cursor.style.clone();
        let (col, row) = (self.cursor.col, self.cursor.row);
        if let Some(cell) = self.grid.cell_mut(col, row) {
            cell.character = Some(ch);
            cell.copy_style_from(&style);
        }
    }

    /// Replace the cell at the cursor with a brand-new blank cell
    pub fn clear_cell(&mut self) {
        self.record(Instruction::bare(Mnemonic::ClearCell));
        self.grid.reset_cell(self.cursor.col, self.cursor.row);
    }

    /// Set a color channel on the cursor's pending style or the global
    /// style. Clearing a global color is rejected: the global style must
    /// always resolve to concrete colors.
    pub fn set_color(&mut self, scope: Scope, target: Target, color: Option<Color>) {
        if scope == Scope::Global && color.is_none() {
            warn!(?target, "global colors cannot be cleared, ignoring");
            return;
        }

        let style = match scope {
            Scope::Cursor => &mut self.cursor.style,
            Scope::Global => &mut self.global_style,
        };
        match target {
            Target::Foreground => style.foreground = color,
            Target::Background => style.background = color,
            Target::Border => style.border = color,
        }

        self.record(Instruction::color_set(scope, target, color));
    }

    /// Toggle pulsing for a channel on the cursor's pending style or the
    /// global style
    pub fn set_pulse(&mut self, scope: Scope, target: Target, enabled: bool) {
        let style = match scope {
            Scope::Cursor => &mut self.cursor.style,
            Scope::Global => &mut self.global_style,
        };
        match target {
            Target::Foreground => style.foreground_pulse = enabled,
            Target::Background => style.background_pulse = enabled,
            Target::Border => style.border_pulse = enabled,
        }

        self.record(Instruction::pulse_set(scope, target, enabled));
    }
}

/// Pacing interval scaled by the animation tempo: full speed means no
/// wait at all
fn scaled_wait(base_ms: f64, speed: f64) -> Duration {
    Duration::from_secs_f64(base_ms * (1.0 - speed) / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    /// A writer running at full tempo: every tick fires every clock
    fn fast_writer(cols: usize, rows: usize) -> Writer {
        let mut writer = Writer::new(cols, rows);
        writer.set_speed(1.0);
        writer
    }

    #[test]
    fn test_initial_state() {
        let writer = Writer::new(40, 25);
        assert_eq!(writer.mode(), Mode::Record);
        assert_eq!(writer.cursor().col, 0);
        assert_eq!(writer.cursor().row, 0);
        assert_eq!(
            writer.global_style().foreground,
            Some(Color::DEFAULT_FOREGROUND)
        );
        assert_eq!(
            writer.global_style().background,
            Some(Color::DEFAULT_BACKGROUND)
        );
        assert_eq!(writer.global_style().border, Some(Color::DEFAULT_BORDER));
        assert_eq!(writer.cycle_percent(), 0.0);
        assert!(writer.demo().is_empty());
    }

    #[test]
    fn test_horizontal_wraparound() {
        let mut writer = Writer::new(5, 3);

        writer.cursor_left();
        assert_eq!((writer.cursor().col, writer.cursor().row), (4, 0));

        writer.cursor_right();
        assert_eq!((writer.cursor().col, writer.cursor().row), (0, 0));
    }

    #[test]
    fn test_cursor_up_at_top_is_recorded_noop() {
        let mut writer = Writer::new(5, 3);
        writer.cursor_up();
        assert_eq!(writer.cursor().row, 0);
        assert_eq!(writer.demo().len(), 1);
        // No afterglow stamped for the no-op
        assert!(writer.cell(0, 0).unwrap().afterglow_counter.is_none());
    }

    #[test]
    fn test_cursor_down_at_bottom_scrolls_once() {
        let mut writer = Writer::new(3, 2);
        writer.character('X');
        writer.cursor_down();
        assert_eq!(writer.cursor().row, 1);

        writer.cursor_down();
        // Cursor stays on the last row, content scrolled up
        assert_eq!(writer.cursor().row, 1);
        assert_eq!(writer.cell(0, 0).unwrap().character, None);

        // Exactly one instruction per call, no separate scroll logged
        let mnemonics: Vec<_> = writer
            .demo()
            .instructions()
            .iter()
            .map(|i| i.mnemonic)
            .collect();
        assert_eq!(
            mnemonics,
            vec![Mnemonic::Character, Mnemonic::CursorDown, Mnemonic::CursorDown]
        );
    }

    #[test]
    fn test_advance_wraps_and_scrolls() {
        let mut writer = Writer::new(2, 2);

        writer.advance();
        assert_eq!((writer.cursor().col, writer.cursor().row), (1, 0));
        writer.advance();
        assert_eq!((writer.cursor().col, writer.cursor().row), (0, 1));
        writer.advance();
        assert_eq!((writer.cursor().col, writer.cursor().row), (1, 1));

        // Last cell: scrolls, cursor returns to column 0 of the last row
        writer.character('Z');
        writer.advance();
        assert_eq!((writer.cursor().col, writer.cursor().row), (0, 1));
        assert_eq!(writer.cell(1, 0).unwrap().character, Some('Z'));
    }

    #[test]
    fn test_retract_at_origin_fails_without_moving() {
        let mut writer = Writer::new(3, 2);
        assert!(!writer.retract());
        assert_eq!((writer.cursor().col, writer.cursor().row), (0, 0));
        // Still recorded
        assert_eq!(writer.demo().len(), 1);
    }

    #[test]
    fn test_retract_wraps_to_previous_row() {
        let mut writer = Writer::new(3, 2);
        writer.cursor_down();
        assert!(writer.retract());
        assert_eq!((writer.cursor().col, writer.cursor().row), (2, 0));
    }

    #[test]
    fn test_character_stamps_pending_style() {
        let mut writer = Writer::new(3, 2);
        let green = Color::rgb(0, 0xff, 0);
        writer.set_color(Scope::Cursor, Target::Background, Some(green));
        writer.set_pulse(Scope::Cursor, Target::Background, true);
        writer.character('A');

        let cell = writer.cell(0, 0).unwrap();
        assert_eq!(cell.character, Some('A'));
        assert_eq!(cell.background, Some(green));
        assert!(cell.background_pulse);
        // Cursor did not move
        assert_eq!(writer.cursor().col, 0);
    }

    #[test]
    fn test_clear_cell_replaces_with_blank() {
        let mut writer = Writer::new(3, 2);
        writer.set_color(Scope::Cursor, Target::Foreground, Some(Color::rgb(1, 2, 3)));
        writer.character('A');
        writer.clear_cell();
        assert!(writer.cell(0, 0).unwrap().is_blank());
    }

    #[test]
    fn test_scroll_invariant() {
        let mut writer = Writer::new(3, 3);
        writer.cursor_down();
        writer.character('M');

        writer.scroll();

        // Row 1 content is now at row 0; bottom row is blank
        assert_eq!(writer.cell(0, 0).unwrap().character, Some('M'));
        for col in 0..3 {
            assert!(writer.cell(col, 2).unwrap().character.is_none());
        }
    }

    #[test]
    fn test_scroll_seeds_afterglow_ghosts() {
        let mut writer = Writer::new(2, 3);
        let red = Color::rgb(0xff, 0, 0);
        writer.set_color(Scope::Cursor, Target::Background, Some(red));
        writer.cursor_down();
        writer.character('A'); // backgrounds (0,1)

        writer.scroll();

        // The cell moved from row 1 to row 0 and left a ghost at row 1
        assert_eq!(writer.cell(0, 0).unwrap().background, Some(red));
        let ghost = writer.cell(0, 1).unwrap();
        assert_eq!(ghost.afterglow_color, Some(red));
        // Non-pulsing background ghosts start at full intensity
        assert_eq!(ghost.afterglow_counter, Some(CYCLE_MAX));
    }

    #[test]
    fn test_moves_leave_afterglow_trail() {
        let mut writer = Writer::new(3, 3);
        let blue = Color::rgb(0x33, 0x99, 0xff);
        writer.set_color(Scope::Cursor, Target::Background, Some(blue));

        writer.cursor_right();
        let vacated = writer.cell(0, 0).unwrap();
        assert_eq!(vacated.afterglow_color, Some(blue));
        assert!(vacated.afterglow_counter.is_some());
    }

    #[test]
    fn test_afterglow_falls_back_to_default_foreground() {
        let mut writer = Writer::new(3, 3);
        // Pending background is unset
        writer.cursor_right();
        assert_eq!(
            writer.cell(0, 0).unwrap().afterglow_color,
            Some(Color::DEFAULT_FOREGROUND)
        );
    }

    #[test]
    fn test_global_color_cannot_be_cleared() {
        let mut writer = Writer::new(3, 2);
        writer.set_color(Scope::Global, Target::Background, None);

        assert_eq!(
            writer.global_style().background,
            Some(Color::DEFAULT_BACKGROUND)
        );
        // Rejected operations are not logged
        assert!(writer.demo().is_empty());
    }

    #[test]
    fn test_cursor_color_can_be_cleared() {
        let mut writer = Writer::new(3, 2);
        writer.set_color(Scope::Cursor, Target::Foreground, Some(Color::rgb(1, 2, 3)));
        writer.set_color(Scope::Cursor, Target::Foreground, None);
        assert!(writer.cursor().style.foreground.is_none());
        assert_eq!(writer.demo().len(), 2);
    }

    #[test]
    fn test_cycle_oscillates() {
        let mut writer = fast_writer(2, 2);

        writer.tick(ms(1)).unwrap();
        assert!(writer.cycle_percent() > 0.0);

        // Drive to the top; 26 rising steps reach 255
        for i in 2..40 {
            writer.tick(ms(i)).unwrap();
        }
        // By now the cycle has peaked and is on its way down (or bottomed)
        assert!(writer.cycle_percent() <= 100.0);
        assert!(writer.cycle_percent() >= 0.0);
    }

    #[test]
    fn test_cycle_frozen_in_pause() {
        let mut writer = fast_writer(2, 2);
        writer.character('A');
        writer.play();
        writer.tick(ms(1)).unwrap();
        writer.set_mode(Mode::Pause);
        let before = writer.cycle_percent();

        for i in 2..10 {
            writer.tick(ms(i)).unwrap();
        }
        assert_eq!(writer.cycle_percent(), before);
    }

    #[test]
    fn test_afterglow_exhaustion() {
        let mut writer = fast_writer(3, 2);
        writer
            .grid
            .cell_mut(1, 0)
            .unwrap()
            .set_afterglow(Color::rgb(9, 9, 9), 5);

        writer.tick(ms(1)).unwrap();

        let cell = writer.cell(1, 0).unwrap();
        assert!(cell.afterglow_counter.is_none());
        assert!(cell.afterglow_color.is_none());
    }

    #[test]
    fn test_afterglow_decays_stepwise() {
        let mut writer = fast_writer(3, 2);
        writer
            .grid
            .cell_mut(1, 0)
            .unwrap()
            .set_afterglow(Color::rgb(9, 9, 9), 12);

        writer.tick(ms(1)).unwrap();
        assert_eq!(writer.cell(1, 0).unwrap().afterglow_counter, Some(7));
        writer.tick(ms(2)).unwrap();
        assert_eq!(writer.cell(1, 0).unwrap().afterglow_counter, Some(2));
        writer.tick(ms(3)).unwrap();
        assert!(writer.cell(1, 0).unwrap().afterglow_counter.is_none());
    }

    #[test]
    fn test_global_background_pulse_clears_afterglow() {
        let mut writer = fast_writer(3, 2);
        writer
            .grid
            .cell_mut(2, 1)
            .unwrap()
            .set_afterglow(Color::rgb(9, 9, 9), 200);
        writer.set_pulse(Scope::Global, Target::Background, true);

        writer.tick(ms(1)).unwrap();

        let cell = writer.cell(2, 1).unwrap();
        assert!(cell.afterglow_counter.is_none());
        assert!(cell.afterglow_color.is_none());
    }

    #[test]
    fn test_illegal_mode_transitions_ignored() {
        let mut writer = Writer::new(3, 2);
        writer.set_mode(Mode::Pause);
        assert_eq!(writer.mode(), Mode::Record);
        writer.set_mode(Mode::Play);
        assert_eq!(writer.mode(), Mode::Record);

        writer.character('A');
        writer.play();
        assert_eq!(writer.mode(), Mode::Play);
        writer.set_mode(Mode::Pause);
        assert_eq!(writer.mode(), Mode::Pause);
        writer.set_mode(Mode::Record);
        assert_eq!(writer.mode(), Mode::Pause);
        writer.set_mode(Mode::Play);
        assert_eq!(writer.mode(), Mode::Play);
    }

    #[test]
    fn test_replay_does_not_append_to_log() {
        let mut writer = fast_writer(3, 2);
        writer.character('A');
        writer.advance();
        assert_eq!(writer.demo().len(), 2);

        writer.play();
        let mut t = 0;
        while writer.mode() == Mode::Play {
            t += 1;
            writer.tick(ms(t)).unwrap();
            assert!(t < 1000, "playback did not finish");
        }
        assert_eq!(writer.demo().len(), 2);
    }

    #[test]
    fn test_play_resets_state_but_keeps_log() {
        let mut writer = Writer::new(3, 2);
        writer.character('A');
        writer.advance();

        writer.play();
        assert_eq!(writer.mode(), Mode::Play);
        assert_eq!(writer.cursor().col, 0);
        assert!(writer.cell(0, 0).unwrap().is_blank());
        assert_eq!(writer.demo().len(), 2);
    }

    #[test]
    fn test_reset_discards_log() {
        let mut writer = Writer::new(3, 2);
        writer.character('A');
        writer.reset();
        assert!(writer.demo().is_empty());
        assert!(writer.cell(0, 0).unwrap().is_blank());
        assert_eq!(writer.mode(), Mode::Record);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut writer = Writer::new(3, 2);
        writer.set_speed(7.5);
        assert_eq!(writer.speed(), 1.0);
        writer.set_speed(-1.0);
        assert_eq!(writer.speed(), 0.0);
    }

    #[test]
    fn test_character_is_delay_exempt_during_replay() {
        let mut writer = Writer::new(3, 2);
        writer.character('A');
        writer.advance();
        writer.character('B');

        // Half tempo: the playback wait is 50ms
        writer.set_speed(0.5);
        writer.play();

        // First pull happens once the wait elapses; the character is
        // delay-exempt so the following advance runs on the next tick
        writer.tick(ms(51)).unwrap();
        assert_eq!(writer.cell(0, 0).unwrap().character, Some('A'));
        writer.tick(ms(52)).unwrap();
        assert_eq!(writer.cursor().col, 1);

        // The advance is not exempt: the next pull waits again
        writer.tick(ms(53)).unwrap();
        assert!(writer.cell(1, 0).unwrap().character.is_none());
        writer.tick(ms(103)).unwrap();
        assert_eq!(writer.cell(1, 0).unwrap().character, Some('B'));
    }
}
