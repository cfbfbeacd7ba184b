use crate::labels::*;
use crate::*;
use matches::debug_assert_matches;
use scpu::{Addressing, Opcode, Word};

/// First-pass output: one entry per emitted word, operands still unresolved.
#[derive(Debug, PartialEq)]
pub enum ParsedInstruction<'i> {
    /// A `WORD` directive, complete as soon as it is parsed.
    Word { index: usize, value: Word },

    /// A bare mnemonic.
    Plain { index: usize, opcode: Opcode },

    /// A mnemonic with an operand, finished by the second pass.
    WithOperand {
        index: usize,
        opcode: Opcode,
        operand: Operand<'i>,
    },
}

#[derive(Debug, PartialEq)]
pub struct Operand<'i> {
    pub addressing: Addressing,
    pub target: Target<'i>,
}

#[derive(Debug, PartialEq)]
pub enum Target<'i> {
    Number(Word),
    Label(Span<'i>),
}

/// First pass: walks the parse tree, assigns program positions, collects
/// label definitions and keeps operand targets for the second pass.
pub fn process_program<'i>(
    pair: Pair<'i, Rule>,
) -> Result<(Vec<ParsedInstruction<'i>>, LabelMap<'i>)> {
    debug_assert_matches!(pair.as_rule(), Rule::program);

    let mut instructions = Vec::new();
    let mut labels = LabelMap::new();

    for statement in pair.into_inner() {
        if statement.as_rule() == Rule::EOI {
            continue;
        }
        debug_assert_matches!(statement.as_rule(), Rule::statement);
        let inner = statement.into_inner().next().unwrap();

        match inner.as_rule() {
            Rule::label_def => {
                let name = inner.into_inner().next().unwrap();
                define_label(&mut labels, name.as_span(), instructions.len())?;
            }
            Rule::word_def => {
                let value = process_number(inner.into_inner().next().unwrap())?;
                instructions.push(ParsedInstruction::Word {
                    index: instructions.len(),
                    value,
                });
            }
            Rule::operation => {
                let mut pairs = inner.into_inner();
                let mnemonic = pairs.next().unwrap();
                let opcode = process_opcode(&mnemonic)?;
                let index = instructions.len();

                match pairs.next() {
                    Some(operand) => instructions.push(ParsedInstruction::WithOperand {
                        index,
                        opcode,
                        operand: process_operand(operand)?,
                    }),
                    None => instructions.push(ParsedInstruction::Plain { index, opcode }),
                }
            }
            _ => unreachable!(),
        }
    }

    Ok((instructions, labels))
}

fn process_opcode(pair: &Pair<Rule>) -> Result<Opcode> {
    pair.as_str()
        .parse()
        .map_err(|err| new_parser_error(pair.as_span(), format!("{}", err)))
}

fn process_operand<'i>(pair: Pair<'i, Rule>) -> Result<Operand<'i>> {
    debug_assert_matches!(pair.as_rule(), Rule::operand);
    let inner = pair.into_inner().next().unwrap();

    let addressing = match inner.as_rule() {
        Rule::indirect => Addressing::DirectShift,
        Rule::post_inc => Addressing::PostInc,
        Rule::post_dec => Addressing::PostDec,
        Rule::immediate => Addressing::Load,
        Rule::plain => Addressing::DirectAbs,
        _ => unreachable!(),
    };

    let target = process_target(inner.into_inner().next().unwrap())?;
    Ok(Operand { addressing, target })
}

fn process_target<'i>(pair: Pair<'i, Rule>) -> Result<Target<'i>> {
    debug_assert_matches!(pair.as_rule(), Rule::target);
    let inner = pair.into_inner().next().unwrap();

    match inner.as_rule() {
        Rule::number => Ok(Target::Number(process_number(inner)?)),
        Rule::identifier => Ok(Target::Label(inner.as_span())),
        _ => unreachable!(),
    }
}

fn process_number(pair: Pair<Rule>) -> Result<Word> {
    debug_assert_matches!(pair.as_rule(), Rule::number);
    parse_number(pair.as_str())
        .map_err(|err| new_parser_error(pair.as_span(), format!("Parsing number failed: {}", err)))
}

/// `0x` prefix selects hexadecimal, anything else is signed decimal.
/// Hexadecimal literals use the full unsigned word range, so `0xFFFFFFFF`
/// truncates to -1.
fn parse_number(text: &str) -> std::result::Result<Word, std::num::ParseIntError> {
    if text.starts_with("0x") {
        u32::from_str_radix(&text[2..], 16).map(|value| value as Word)
    } else {
        text.parse()
    }
}
