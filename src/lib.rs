//! RetroWriter Core Library
//!
//! A character grid styled like a retro terminal/typewriter, where every
//! action is simultaneously recorded as a compact instruction log that
//! can be replayed deterministically to reproduce the exact session.
//! This crate provides:
//!
//! - `core`: Cell/cursor/grid model, the Writer engine with its animation
//!   clocks, deterministic snapshots
//! - `demo`: Instruction encoding and the recorded demo document format
//! - `error`: Crate-wide error type
//!
//! Rendering, input capture and file handling are left to the embedding
//! application; the engine only exposes read accessors and mutators.

pub mod core;
pub mod demo;
pub mod error;

pub use crate::core::{Cell, Color, Cursor, Grid, Mode, Snapshot, Writer, CYCLE_MAX};
pub use crate::demo::{Demo, DemoDocument, Instruction, Mnemonic, Scope, Target, MAGIC};
pub use crate::error::{Error, Result};
