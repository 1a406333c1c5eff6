//! Demo recording
//!
//! A demo is the ordered instruction log of a session plus the JSON
//! document format it is exchanged in. The log is append-only while
//! recording and is read back through a forward-only cursor during
//! replay; there is no seeking other than a full reset to the start.

mod instruction;

pub use instruction::{Argument, EncodedInstruction, Instruction, Mnemonic, Scope, Target};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Magic identifier of the demo document format
pub const MAGIC: &str = "RTRWRTR";

/// Demo document header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoHeader {
    /// Version of the engine that produced the demo
    pub version: String,

    /// Legacy placement of the magic identifier. Pre-0.2 documents
    /// carried it here instead of at the top level; accepted on import,
    /// never written on export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magic: Option<String>,
}

/// The persisted demo document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<DemoHeader>,
    #[serde(default)]
    pub instructions: Vec<EncodedInstruction>,
}

/// The instruction log of one session
#[derive(Debug, Clone)]
pub struct Demo {
    /// Engine version the demo was created with
    version: String,
    /// Sequential instructions
    instructions: Vec<Instruction>,
    /// Forward-only read cursor; `None` means unarmed or exhausted
    index: Option<usize>,
}

impl Demo {
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: Vec::new(),
            index: None,
        }
    }

    /// Append an instruction to the log
    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The recorded instructions in order
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Re-arm the read cursor at the start of the log
    pub fn reset_index(&mut self) {
        self.index = Some(0);
    }

    /// Fetch the next instruction and advance the read cursor.
    ///
    /// Returns `None` once the log is exhausted (or was never armed);
    /// pulling the last instruction disarms the cursor rather than
    /// leaving it past the end.
    pub fn next_instruction(&mut self) -> Option<Instruction> {
        let index = self.index?;
        let instruction = self.instructions.get(index)?.clone();

        if index + 1 < self.instructions.len() {
            self.index = Some(index + 1);
        } else {
            self.index = None;
        }

        Some(instruction)
    }

    /// Build the exchange document for this demo
    pub fn export(&self) -> DemoDocument {
        DemoDocument {
            magic: Some(MAGIC.to_string()),
            header: Some(DemoHeader {
                version: self.version.clone(),
                magic: None,
            }),
            instructions: self
                .instructions
                .iter()
                .map(Instruction::encode)
                .collect(),
        }
    }

    /// Build a demo from an exchange document.
    ///
    /// Every instruction is decoded before anything is returned, so a
    /// malformed document never yields a half-loaded demo.
    pub fn import(document: &DemoDocument) -> Result<Self> {
        let top_level_magic = document.magic.as_deref() == Some(MAGIC);
        let legacy_magic = document
            .header
            .as_ref()
            .and_then(|header| header.magic.as_deref())
            == Some(MAGIC);
        if !top_level_magic && !legacy_magic {
            return Err(Error::BadMagic);
        }

        let header = document.header.as_ref().ok_or(Error::MissingHeader)?;

        let instructions = document
            .instructions
            .iter()
            .map(Instruction::decode)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            version: header.version.clone(),
            instructions,
            index: None,
        })
    }
}

impl Default for Demo {
    fn default() -> Self {
        Self::new()
    }
}
