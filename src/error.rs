//! Error types for demo decoding and replay

use std::io;
use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum Error {
    /// The document is not a RetroWriter demo
    #[error("not a RetroWriter demo document (magic identifier mismatch)")]
    BadMagic,

    /// The demo document has no header
    #[error("demo document header missing")]
    MissingHeader,

    /// Malformed instruction data in a demo document
    #[error("invalid instruction data: {0}")]
    InvalidInstruction(String),

    /// Mnemonic not present in the instruction table
    #[error("unknown instruction mnemonic '{0}'")]
    UnknownMnemonic(String),

    /// Instruction argument has the wrong type for its mnemonic
    #[error("instruction '{mnemonic}' expects {expected} argument")]
    ArgumentType {
        mnemonic: &'static str,
        expected: &'static str,
    },

    /// Color string that does not parse as `#rrggbb`
    #[error("invalid color '{0}': expected '#rrggbb'")]
    InvalidColor(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for demo and replay operations
pub type Result<T> = std::result::Result<T, Error>;
