use thiserror::Error;

use crate::isa::Opcode;
use crate::Word;

/// Runtime failures that abort a simulation.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum MachineError {
    #[error("unable to parse instruction {found} at ip = {ip} - wrong format")]
    WrongInstructionFormat { found: String, ip: Word },

    #[error("stack is overflowed (max size is {max_size})")]
    StackOverflow { max_size: usize },

    #[error("memory access out of range: {0}")]
    OutOfRange(Word),

    #[error("expected a data word at address {0}, found an instruction")]
    DataExpected(Word),

    #[error("division by zero")]
    DivisionByZero,

    #[error("opcode {0} has no defined micro-sequence")]
    ReservedOpcode(Opcode),

    #[error("instruction {0} carries no argument for its addressing mode")]
    MissingArgument(Opcode),

    #[error("return stack is empty on ret")]
    ReturnStackEmpty,
}
