//! Instructions and their wire encoding
//!
//! Every engine mutation is logged as one instruction: a mnemonic plus up
//! to two arguments. The encoded form is deliberately compact: a bare
//! mnemonic string when there are no arguments, otherwise a small array
//! `[mnemonic, arg1]` or `[mnemonic, arg1, arg2]`. The mnemonic strings
//! are stable identifiers; changing one breaks previously recorded demos.

use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::error::{Error, Result};

/// Which style record an instruction addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    /// The cursor's pending style
    Cursor,
    /// The grid-wide global style
    Global,
}

/// Which color channel an instruction addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    Foreground,
    Background,
    Border,
}

/// The closed instruction mnemonic table
///
/// The scope of the style mnemonics is encoded in the identifier's first
/// character: `C` for cursor scope, `G` for global scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Scroll,
    Advance,
    Retract,
    Character,
    ClearCell,

    CursorForegroundColor,
    CursorBackgroundColor,
    CursorBorderColor,
    CursorForegroundPulse,
    CursorBackgroundPulse,
    CursorBorderPulse,

    GlobalForegroundColor,
    GlobalBackgroundColor,
    GlobalBorderColor,
    GlobalForegroundPulse,
    GlobalBackgroundPulse,
    GlobalBorderPulse,
}

impl Mnemonic {
    /// Every mnemonic in the table
    pub const ALL: [Mnemonic; 21] = [
        Mnemonic::CursorUp,
        Mnemonic::CursorDown,
        Mnemonic::CursorLeft,
        Mnemonic::CursorRight,
        Mnemonic::Scroll,
        Mnemonic::Advance,
        Mnemonic::Retract,
        Mnemonic::Character,
        Mnemonic::ClearCell,
        Mnemonic::CursorForegroundColor,
        Mnemonic::CursorBackgroundColor,
        Mnemonic::CursorBorderColor,
        Mnemonic::CursorForegroundPulse,
        Mnemonic::CursorBackgroundPulse,
        Mnemonic::CursorBorderPulse,
        Mnemonic::GlobalForegroundColor,
        Mnemonic::GlobalBackgroundColor,
        Mnemonic::GlobalBorderColor,
        Mnemonic::GlobalForegroundPulse,
        Mnemonic::GlobalBackgroundPulse,
        Mnemonic::GlobalBorderPulse,
    ];

    /// The stable identifier used in recorded demos
    pub fn as_str(self) -> &'static str {
        match self {
            Mnemonic::CursorUp => "CUP",
            Mnemonic::CursorDown => "CDW",
            Mnemonic::CursorLeft => "CLF",
            Mnemonic::CursorRight => "CRT",
            Mnemonic::Scroll => "SCR",
            Mnemonic::Advance => "ADV",
            Mnemonic::Retract => "RCT",
            Mnemonic::Character => "CHR",
            Mnemonic::ClearCell => "CLR",
            Mnemonic::CursorForegroundColor => "CFC",
            Mnemonic::CursorBackgroundColor => "CBC",
            Mnemonic::CursorBorderColor => "CDC",
            Mnemonic::CursorForegroundPulse => "CFP",
            Mnemonic::CursorBackgroundPulse => "CBP",
            Mnemonic::CursorBorderPulse => "CDP",
            Mnemonic::GlobalForegroundColor => "GFC",
            Mnemonic::GlobalBackgroundColor => "GBC",
            Mnemonic::GlobalBorderColor => "GDC",
            Mnemonic::GlobalForegroundPulse => "GFP",
            Mnemonic::GlobalBackgroundPulse => "GBP",
            Mnemonic::GlobalBorderPulse => "GDP",
        }
    }

    /// Look up a mnemonic by its stable identifier
    pub fn parse(s: &str) -> Result<Self> {
        Mnemonic::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| Error::UnknownMnemonic(s.to_string()))
    }

    /// The color-set mnemonic for a scope/channel pair
    pub fn color_set(scope: Scope, target: Target) -> Self {
        match (scope, target) {
            (Scope::Cursor, Target::Foreground) => Mnemonic::CursorForegroundColor,
            (Scope::Cursor, Target::Background) => Mnemonic::CursorBackgroundColor,
            (Scope::Cursor, Target::Border) => Mnemonic::CursorBorderColor,
            (Scope::Global, Target::Foreground) => Mnemonic::GlobalForegroundColor,
            (Scope::Global, Target::Background) => Mnemonic::GlobalBackgroundColor,
            (Scope::Global, Target::Border) => Mnemonic::GlobalBorderColor,
        }
    }

    /// The pulse-set mnemonic for a scope/channel pair
    pub fn pulse_set(scope: Scope, target: Target) -> Self {
        match (scope, target) {
            (Scope::Cursor, Target::Foreground) => Mnemonic::CursorForegroundPulse,
            (Scope::Cursor, Target::Background) => Mnemonic::CursorBackgroundPulse,
            (Scope::Cursor, Target::Border) => Mnemonic::CursorBorderPulse,
            (Scope::Global, Target::Foreground) => Mnemonic::GlobalForegroundPulse,
            (Scope::Global, Target::Background) => Mnemonic::GlobalBackgroundPulse,
            (Scope::Global, Target::Border) => Mnemonic::GlobalBorderPulse,
        }
    }
}

/// One instruction argument
///
/// The wire format allows null, booleans, numbers and strings in a single
/// slot; which one is legal is decided by the mnemonic at dispatch time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Argument {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Argument {
    pub fn is_null(&self) -> bool {
        matches!(self, Argument::Null)
    }
}

/// The encoded (wire) form of an instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EncodedInstruction {
    /// Bare mnemonic, both arguments null
    Bare(String),
    /// Mnemonic followed by one or two arguments
    WithArgs(Vec<Argument>),
}

/// A single loggable, replayable engine action
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub argument1: Argument,
    /// Reserved; always null for current mnemonics but round-tripped
    /// when present in a document.
    pub argument2: Argument,
}

impl Instruction {
    /// An instruction with no arguments
    pub fn bare(mnemonic: Mnemonic) -> Self {
        Self {
            mnemonic,
            argument1: Argument::Null,
            argument2: Argument::Null,
        }
    }

    /// An instruction with a single argument
    pub fn with_arg(mnemonic: Mnemonic, argument1: Argument) -> Self {
        Self {
            mnemonic,
            argument1,
            argument2: Argument::Null,
        }
    }

    /// A character-write instruction. Space is normalized to a null
    /// argument so that encoding stays canonical; dispatch maps null
    /// back to space.
    pub fn character(ch: char) -> Self {
        let argument1 = if ch == ' ' {
            Argument::Null
        } else {
            Argument::String(ch.to_string())
        };
        Self::with_arg(Mnemonic::Character, argument1)
    }

    /// A color-set instruction for the given scope and channel
    pub fn color_set(scope: Scope, target: Target, color: Option<Color>) -> Self {
        let argument1 = match color {
            Some(color) => Argument::String(color.to_string()),
            None => Argument::Null,
        };
        Self::with_arg(Mnemonic::color_set(scope, target), argument1)
    }

    /// A pulse-set instruction for the given scope and channel
    pub fn pulse_set(scope: Scope, target: Target, enabled: bool) -> Self {
        Self::with_arg(Mnemonic::pulse_set(scope, target), Argument::Bool(enabled))
    }

    /// Encode into the compact wire form
    pub fn encode(&self) -> EncodedInstruction {
        if self.argument1.is_null() && self.argument2.is_null() {
            EncodedInstruction::Bare(self.mnemonic.as_str().to_string())
        } else {
            let mut data = vec![
                Argument::String(self.mnemonic.as_str().to_string()),
                self.argument1.clone(),
            ];
            if !self.argument2.is_null() {
                data.push(self.argument2.clone());
            }
            EncodedInstruction::WithArgs(data)
        }
    }

    /// Decode from the wire form. The exact inverse of [`encode`].
    ///
    /// [`encode`]: Instruction::encode
    pub fn decode(data: &EncodedInstruction) -> Result<Self> {
        match data {
            EncodedInstruction::Bare(mnemonic) => Ok(Self::bare(Mnemonic::parse(mnemonic)?)),
            EncodedInstruction::WithArgs(items) => {
                let mnemonic = match items.first() {
                    Some(Argument::String(s)) => Mnemonic::parse(s)?,
                    Some(other) => {
                        return Err(Error::InvalidInstruction(format!(
                            "expected string as mnemonic, got {other:?}"
                        )))
                    }
                    None => {
                        return Err(Error::InvalidInstruction(
                            "expected at least one item as instruction data".to_string(),
                        ))
                    }
                };
                if items.len() > 3 {
                    return Err(Error::InvalidInstruction(format!(
                        "expected at most two arguments, got {}",
                        items.len() - 1
                    )));
                }
                Ok(Self {
                    mnemonic,
                    argument1: items.get(1).cloned().unwrap_or_default(),
                    argument2: items.get(2).cloned().unwrap_or_default(),
                })
            }
        }
    }

    /// Interpret argument1 as a nullable color
    pub fn color_argument(&self) -> Result<Option<Color>> {
        match &self.argument1 {
            Argument::Null => Ok(None),
            Argument::String(s) => s.parse().map(Some),
            _ => Err(Error::ArgumentType {
                mnemonic: self.mnemonic.as_str(),
                expected: "null or color string",
            }),
        }
    }

    /// Interpret argument1 as a boolean
    pub fn bool_argument(&self) -> Result<bool> {
        match &self.argument1 {
            Argument::Bool(b) => Ok(*b),
            _ => Err(Error::ArgumentType {
                mnemonic: self.mnemonic.as_str(),
                expected: "boolean",
            }),
        }
    }

    /// Interpret argument1 as a character; null decodes as space
    pub fn char_argument(&self) -> Result<char> {
        match &self.argument1 {
            Argument::Null => Ok(' '),
            Argument::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Ok(ch),
                    _ => Err(Error::ArgumentType {
                        mnemonic: self.mnemonic.as_str(),
                        expected: "single-character string",
                    }),
                }
            }
            _ => Err(Error::ArgumentType {
                mnemonic: self.mnemonic.as_str(),
                expected: "null or single-character string",
            }),
        }
    }
}
