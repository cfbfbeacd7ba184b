//! Runner glue for SCPU code images: loads an image, frames the input
//! file, drives the simulation and writes the output file.

use std::convert::TryFrom;
use std::fs;
use std::path::Path;
use thiserror::Error;

use scpu::constants::INSTRUCTION_LIMIT;
use scpu::{simulation, OutputMode, SimulationResult, Word};

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Image(#[from] simg::ImageError),

    #[error("simulation aborted: {0}")]
    Machine(#[from] scpu::MachineError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("input line is not a valid list: {0}")]
    BadInputList(String),
}

/// Builds the input buffer from the input file text.
///
/// Only the first line counts. A line starting with `[` is read as a JSON
/// list whose elements are integers or one-character strings (characters
/// are mapped to their ordinals); any other line is taken as a plain run of
/// characters. The element count is prepended so a program that reads the
/// memory-mapped cell first observes the input length.
pub fn parse_input_buffer(text: &str) -> Result<Vec<Word>, RunError> {
    let line = text.lines().next().unwrap_or("");

    let mut items = if line.trim_start().starts_with('[') {
        parse_input_list(line)?
    } else {
        line.chars().map(|symbol| symbol as Word).collect()
    };

    let mut buffer = vec![items.len() as Word];
    buffer.append(&mut items);
    Ok(buffer)
}

fn parse_input_list(line: &str) -> Result<Vec<Word>, RunError> {
    let bad = || RunError::BadInputList(line.to_owned());

    let values: Vec<serde_json::Value> = serde_json::from_str(line).map_err(|_| bad())?;

    let mut items = Vec::with_capacity(values.len());
    for value in values {
        let item = match &value {
            serde_json::Value::Number(number) => {
                let wide = number.as_i64().ok_or_else(bad)?;
                Word::try_from(wide).map_err(|_| bad())?
            }
            serde_json::Value::String(text) => {
                let mut symbols = text.chars();
                let symbol = symbols.next().ok_or_else(bad)?;
                if symbols.next().is_some() {
                    return Err(bad());
                }
                symbol as Word
            }
            _ => return Err(bad()),
        };
        items.push(item);
    }
    Ok(items)
}

/// Loads the image, runs it against the input file and writes the rendered
/// output buffer to the output file.
pub fn run<P: AsRef<Path>>(
    image_path: P,
    input_path: P,
    output_path: P,
    mode: OutputMode,
) -> Result<SimulationResult, RunError> {
    let code = simg::load_file(image_path)?;
    let input = parse_input_buffer(&fs::read_to_string(input_path)?)?;
    log::debug!("input buffer: {:?}", input);

    let result = simulation(code, input, mode, INSTRUCTION_LIMIT)?;

    fs::write(output_path, &result.output)?;
    Ok(result)
}
