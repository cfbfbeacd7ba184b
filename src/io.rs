use std::fmt;
use std::str::FromStr;

use crate::error::MachineError;
use crate::memory::{Cell, Memory};
use crate::Word;

/// How the output buffer is rendered when a run finishes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutputMode {
    /// Each word becomes the character with that ordinal.
    Text,
    /// Each word becomes its decimal form followed by a space.
    Numeric,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseOutputModeError {
    pub value: String,
}

impl fmt::Display for ParseOutputModeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unknown output mode: {}", self.value)
    }
}

impl std::error::Error for ParseOutputModeError {}

impl FromStr for OutputMode {
    type Err = ParseOutputModeError;

    fn from_str(s: &str) -> Result<OutputMode, ParseOutputModeError> {
        match s {
            "text" => Ok(OutputMode::Text),
            "numeric" => Ok(OutputMode::Numeric),
            other => Err(ParseOutputModeError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Mediates the memory-mapped I/O cell between the input and output
/// buffers. Characters were already mapped to their ordinals when the input
/// buffer was built.
pub struct IoController {
    input: Vec<Word>,
    cursor: usize,
    output: Vec<Word>,
    address: Word,
    mode: OutputMode,
}

impl IoController {
    pub fn new(input: Vec<Word>, address: Word, mode: OutputMode) -> IoController {
        IoController {
            input,
            cursor: 0,
            output: Vec::new(),
            address,
            mode,
        }
    }

    /// Moves the next input word into the memory-mapped cell. Returns
    /// `false` once the buffer is exhausted; the machine then stops as if it
    /// had executed HLT.
    pub fn get(&mut self, memory: &mut Memory) -> Result<bool, MachineError> {
        if self.cursor >= self.input.len() {
            return Ok(false);
        }
        memory.value = Cell::Data(self.input[self.cursor]);
        memory.write(self.address)?;
        self.cursor += 1;
        Ok(true)
    }

    /// Appends the memory-mapped cell to the output buffer.
    pub fn send(&mut self, memory: &mut Memory) -> Result<(), MachineError> {
        memory.read(self.address)?;
        match memory.value {
            Cell::Data(value) => self.output.push(value),
            Cell::Instr(_) => return Err(MachineError::DataExpected(self.address)),
        }
        Ok(())
    }

    /// Renders the output buffer in the configured mode.
    pub fn finish(&self) -> String {
        match self.mode {
            OutputMode::Text => self
                .output
                .iter()
                .map(|&value| std::char::from_u32(value as u32).unwrap_or('\u{FFFD}'))
                .collect(),
            OutputMode::Numeric => {
                let mut rendered = String::new();
                for value in &self.output {
                    rendered.push_str(&value.to_string());
                    rendered.push(' ');
                }
                rendered
            }
        }
    }

    pub fn output(&self) -> &[Word] {
        &self.output
    }
}
