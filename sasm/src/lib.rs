//! Two-pass assembler for the SCPU stack machine.
//!
//! [`translate`](fn.translate.html) accepts source text in the assembly
//! language below and produces the ordered record sequence of the code
//! image (the [`simg`](../simg/index.html) crate writes it to disk and
//! loads it back for the simulator).
//!
//! Parsing is implemented with [pest]; the crate [`Error`](type.Error.html)
//! type is an alias of `pest::error::Error`, so every translation failure
//! carries the offending span and pretty-prints with line/column context.
//!
//! # Assembly language
//!
//! The source is line-oriented. Comments start with a semicolon `;` and run
//! to the end of the line; blank lines are ignored. A significant line is
//! one of:
//!
//!  Form               | Meaning
//! --------------------|---------------------------------------------------
//! `name:`             | binds `name` to the current program position
//! `MNEMONIC operand`  | one instruction with one operand
//! `MNEMONIC`          | one instruction without an operand
//! `WORD n`            | reserves a data word holding `n`
//!
//! Mnemonics are matched case-insensitively. Numbers are signed decimal or
//! `0x` hexadecimal.
//!
//! The lexical form of the operand selects the addressing mode:
//!
//!  Operand  | Addressing   | Effect
//! ----------|--------------|--------------------------------------------
//! `t`       | DIRECT_ABS   | operand lives at address `t`
//! `[t]`     | DIRECT_SHIFT | operand lives at `IP + t`
//! `[t]+`    | POST_INC     | `t` addresses a pointer, incremented after use
//! `[t]-`    | POST_DEC     | `t` addresses a pointer, decremented after use
//! `#t`      | LOAD         | `t` itself is the operand
//!
//! where `t` is a number or a label. The second pass replaces every label
//! with its decimal address; a reference to an unknown label, a label
//! defined twice and an unknown mnemonic are all translation errors.

mod labels;
mod parser;
mod resolve;
mod statements;


use parser::{Rule, SasmParser};
use pest::iterators::Pair;
use pest::{Parser, Span};
use simg::Record;

pub type Error = pest::error::Error<Rule>;

pub type Result<T> = std::result::Result<T, Error>;

/// Runs both passes over the source and returns the code image records.
pub fn translate(input: &str) -> Result<Vec<Record>> {
    let (instructions, labels) = statements::process_program(parse(input)?)?;
    resolve::resolve_instructions(instructions, &labels)
}

fn parse(input: &str) -> Result<Pair<Rule>> {
    Ok(SasmParser::parse(Rule::program, input)?.next().unwrap())
}

fn new_parser_error(span: Span, message: String) -> Error {
    Error::new_from_span(pest::error::ErrorVariant::CustomError { message }, span)
}
