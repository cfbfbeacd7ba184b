//! Serialised code image for the SCPU toolchain.
//!
//! The image is a JSON array of [`Record`](struct.Record.html)s, one per
//! word of the program, in program order:
//!
//! ```json
//! [
//!     { "index": 0, "opcode": "nop", "arg": 0, "addressing": 0 },
//!     { "index": 1, "opcode": "ld", "arg": "5", "addressing": 2 },
//!     { "index": 2, "opcode": "hlt", "addressing": 5 }
//! ]
//! ```
//!
//! `opcode` is the lowercase mnemonic, `addressing` the integer value of
//! the addressing enum. `arg` is the decimal-string operand left by the
//! translator, a bare integer for `WORD` data placeholders (serialised as
//! NOP records), and absent for instructions without an operand.
//!
//! [`load`](fn.load.html) turns an image into the mixed instruction/data
//! memory the simulator expects, lowering every NOP record to its raw data
//! word on the way.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

use num_traits::FromPrimitive;
use scpu::{Addressing, Cell, Instruction, Opcode, Word};

#[derive(Error, Debug)]
pub enum ImageError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("image is not well-formed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record {index}: unknown opcode \"{opcode}\"")]
    UnknownOpcode { index: usize, opcode: String },

    #[error("record {index}: {value} is not an addressing mode")]
    UnknownAddressing { index: usize, value: u8 },

    #[error("record {index}: argument \"{arg}\" is not a number")]
    BadArgument { index: usize, arg: String },

    #[error("record {index}: addressing mode requires an argument")]
    MissingArgument { index: usize },

    #[error("record at position {position} carries index {index}")]
    OutOfOrder { position: usize, index: usize },
}

/// Operand field of a record: translated instructions carry decimal
/// strings, `WORD` placeholders carry their literal value.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(untagged)]
pub enum Arg {
    Number(Word),
    Text(String),
}

/// One serialised word of the code image.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Record {
    pub index: usize,
    pub opcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<Arg>,
    pub addressing: u8,
}

impl Record {
    pub fn new(index: usize, opcode: Opcode, arg: Option<Arg>, addressing: Addressing) -> Record {
        Record {
            index,
            opcode: opcode.to_string(),
            arg,
            addressing: addressing as u8,
        }
    }

    /// A data placeholder, written by the translator for `WORD` directives.
    pub fn word(index: usize, value: Word) -> Record {
        Record::new(
            index,
            Opcode::NOP,
            Some(Arg::Number(value)),
            Addressing::DirectAbs,
        )
    }
}

pub fn read<R: Read>(reader: &mut R) -> Result<Vec<Record>, ImageError> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn write<W: Write>(writer: &mut W, image: &[Record]) -> Result<(), ImageError> {
    serde_json::to_writer_pretty(writer, image)?;
    Ok(())
}

pub trait ReadImageExt: Read + Sized {
    fn read_image(&mut self) -> Result<Vec<Record>, ImageError> {
        read(self)
    }
}

impl<R: Read + Sized> ReadImageExt for R {}

pub trait WriteImageExt: Write + Sized {
    fn write_image(&mut self, image: &[Record]) -> Result<(), ImageError> {
        write(self, image)
    }
}

impl<W: Write + Sized> WriteImageExt for W {}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, ImageError> {
    BufReader::new(File::open(path)?).read_image()
}

pub fn write_file<P: AsRef<Path>>(path: P, image: &[Record]) -> Result<(), ImageError> {
    BufWriter::new(File::create(path)?).write_image(image)
}

fn parse_arg(record: &Record) -> Result<Option<Word>, ImageError> {
    match &record.arg {
        None => Ok(None),
        Some(Arg::Number(value)) => Ok(Some(*value)),
        Some(Arg::Text(text)) => {
            let value = text.parse().map_err(|_| ImageError::BadArgument {
                index: record.index,
                arg: text.clone(),
            })?;
            Ok(Some(value))
        }
    }
}

/// Reconstructs the memory contents from an image.
///
/// Checks the position invariant (`index` equals the record's place in the
/// image), lowers NOP records to raw data words, and guarantees that every
/// surviving instruction with an operand-taking addressing mode carries an
/// argument.
pub fn load(image: &[Record]) -> Result<Vec<Cell>, ImageError> {
    let mut cells = Vec::with_capacity(image.len());

    for (position, record) in image.iter().enumerate() {
        if record.index != position {
            return Err(ImageError::OutOfOrder {
                position,
                index: record.index,
            });
        }

        let opcode: Opcode =
            record
                .opcode
                .parse()
                .map_err(|_| ImageError::UnknownOpcode {
                    index: record.index,
                    opcode: record.opcode.clone(),
                })?;

        if opcode == Opcode::NOP {
            let value =
                parse_arg(record)?.ok_or(ImageError::MissingArgument { index: record.index })?;
            cells.push(Cell::Data(value));
            continue;
        }

        let addressing =
            Addressing::from_u8(record.addressing).ok_or(ImageError::UnknownAddressing {
                index: record.index,
                value: record.addressing,
            })?;

        let arg = parse_arg(record)?;
        if addressing != Addressing::None && arg.is_none() {
            return Err(ImageError::MissingArgument { index: record.index });
        }

        cells.push(Cell::Instr(Instruction::new(
            record.index,
            opcode,
            arg,
            addressing,
        )));
    }

    Ok(cells)
}

/// Reads and lowers an image in one step.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<Cell>, ImageError> {
    load(&read_file(path)?)
}
