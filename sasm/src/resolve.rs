use crate::labels::*;
use crate::statements::{Operand, ParsedInstruction, Target};
use crate::*;
use scpu::{Addressing, Word};
use simg::{Arg, Record};

/// Second pass: replaces every label target with its decimal address and
/// emits the final records. Numbers pass through unchanged apart from the
/// decimal rendering.
pub fn resolve_instructions(
    instructions: Vec<ParsedInstruction>,
    labels: &LabelMap,
) -> Result<Vec<Record>> {
    instructions
        .into_iter()
        .map(|instruction| resolve_instruction(instruction, labels))
        .collect()
}

fn resolve_instruction(instruction: ParsedInstruction, labels: &LabelMap) -> Result<Record> {
    Ok(match instruction {
        ParsedInstruction::Word { index, value } => Record::word(index, value),

        ParsedInstruction::Plain { index, opcode } => {
            Record::new(index, opcode, None, Addressing::None)
        }

        ParsedInstruction::WithOperand {
            index,
            opcode,
            operand,
        } => {
            let Operand { addressing, target } = operand;
            let value = match target {
                Target::Number(value) => value,
                Target::Label(span) => {
                    let name = span.as_str();
                    match labels.get(name) {
                        Some(address) => *address as Word,
                        None => {
                            return Err(new_parser_error(
                                span,
                                format!("Label not defined: {}", name),
                            ));
                        }
                    }
                }
            };
            Record::new(index, opcode, Some(Arg::Text(value.to_string())), addressing)
        }
    })
}
