use crate::constants::{MAX_NUMBER, MIN_NUMBER};
use crate::error::MachineError;
use crate::isa::Opcode;
use crate::Word;

/// Combinational arithmetic-logic unit.
///
/// Operations read the input latches and leave the result in `value`
/// together with freshly derived NZV flags. Passing no command is a
/// passthrough of `first_value`.
pub struct Alu {
    pub first_value: Word,
    pub second_value: Word,
    pub value: Word,
    pub n_flag: bool,
    pub z_flag: bool,
    pub v_flag: bool,
}

impl Alu {
    pub fn new() -> Alu {
        Alu {
            first_value: 0,
            second_value: 0,
            value: 0,
            n_flag: false,
            z_flag: false,
            v_flag: false,
        }
    }

    /// Runs one operation. Branch commands yield 1 or 0 and never touch IP
    /// themselves; CMP derives flags from the difference but keeps
    /// `first_value` as the result so the TOS latch after it is a no-op.
    pub fn do_operation(&mut self, command: Option<Opcode>) -> Result<(), MachineError> {
        let command = match command {
            Some(command) => command,
            None => {
                self.value = self.set_flags(i64::from(self.first_value));
                return Ok(());
            }
        };

        let x = i64::from(self.first_value);
        let y = i64::from(self.second_value);

        let result = match command {
            Opcode::CLA => 0,
            Opcode::NEG => -x,
            Opcode::INC => x + 1,
            Opcode::DEC => x - 1,
            Opcode::NOT => !x,
            Opcode::AND => x & y,
            Opcode::OR => x | y,
            Opcode::ADD => x + y,
            Opcode::SUB => x - y,
            Opcode::CMP => {
                self.set_flags(x - y);
                self.value = self.first_value;
                return Ok(());
            }
            Opcode::MUL => x * y,
            Opcode::DIV => {
                if y == 0 {
                    return Err(MachineError::DivisionByZero);
                }
                x / y
            }
            Opcode::BEQ => (x == y) as i64,
            Opcode::BGT => (x > y) as i64,
            Opcode::BLT => (x < y) as i64,
            other => return Err(MachineError::ReservedOpcode(other)),
        };

        self.value = self.set_flags(result);
        Ok(())
    }

    /// Derives N and Z from the raw result, then reduces it into the word
    /// range, setting V when a reduction happened. The negative reduction
    /// keeps the sign.
    fn set_flags(&mut self, result: i64) -> Word {
        self.n_flag = result < 0;
        self.z_flag = result == 0;
        self.v_flag = false;

        let mut result = result;
        if result > MAX_NUMBER {
            result %= MAX_NUMBER;
            self.v_flag = true;
        } else if result < MIN_NUMBER {
            result %= -MIN_NUMBER;
            self.v_flag = true;
        }
        result as Word
    }
}
