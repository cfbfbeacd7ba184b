use crate::alu::Alu;
use crate::constants::STACK_SIZE;
use crate::error::MachineError;
use crate::isa::Opcode;
use crate::memory::{Cell, Memory};
use crate::signals::{AluSelect, ArSelect, DrSignal, IpSelect, TosSelect};
use crate::stack::Stack;
use crate::Word;

/// Register file, ALU, data stack and memory, wired together by latch
/// operations.
///
/// Latches are single-cycle: no ticks are charged here, the control unit
/// advances the tick counter between them. TOS and BR are nullable so a
/// value popped off an empty stack can travel through them and be dropped
/// again on the next push.
pub struct DataPath {
    pub(crate) ip: Word,
    pub(crate) tos: Option<Word>,
    pub(crate) ar: Word,
    pub(crate) dr: Cell,
    pub(crate) br: Option<Word>,
    pub(crate) alu: Alu,
    pub(crate) data_stack: Stack,
    pub(crate) memory: Memory,
}

impl DataPath {
    pub fn new(memory: Memory) -> DataPath {
        DataPath {
            ip: 1,
            tos: Some(0),
            ar: 0,
            dr: Cell::Data(0),
            br: None,
            alu: Alu::new(),
            data_stack: Stack::new(STACK_SIZE),
            memory,
        }
    }

    /// Pushes TOS onto the data stack.
    pub fn data_stack_push(&mut self) -> Result<(), MachineError> {
        self.data_stack.push(self.tos)
    }

    pub fn signal_latch_dr(&mut self, signal: DrSignal) -> Result<(), MachineError> {
        match signal {
            DrSignal::Read => {
                self.memory.read(self.ar)?;
                self.dr = self.memory.value.clone();
            }
            DrSignal::Write => {
                self.memory.value = self.dr.clone();
                self.memory.write(self.ar)?;
            }
            DrSignal::NewValue => {
                self.dr = Cell::Data(self.alu.value);
            }
        }
        Ok(())
    }

    pub fn signal_latch_tos(&mut self, select: TosSelect) -> Result<(), MachineError> {
        match select {
            TosSelect::Br => self.tos = self.br,
            TosSelect::Dr => match self.dr {
                Cell::Data(value) => self.tos = Some(value),
                Cell::Instr(_) => return Err(MachineError::DataExpected(self.ar)),
            },
            TosSelect::Ip => self.tos = Some(self.ip),
            TosSelect::Alu => self.tos = Some(self.alu.value),
            TosSelect::DataStack => self.tos = self.data_stack.pop(),
            TosSelect::Cr(arg) => self.tos = Some(arg),
        }
        Ok(())
    }

    pub fn signal_latch_ip(&mut self, select: IpSelect) {
        match select {
            IpSelect::Alu => self.ip = self.alu.value,
            IpSelect::ReturnStack(address) => self.ip = address,
        }
    }

    pub fn signal_latch_ar(&mut self, select: ArSelect) {
        match select {
            ArSelect::Ip => self.ar = self.ip,
            ArSelect::Alu => self.ar = self.alu.value,
            ArSelect::Cr(arg) => self.ar = arg,
        }
    }

    pub fn signal_latch_br(&mut self) {
        self.br = self.data_stack.pop();
    }

    pub fn signal_latch_alu(&mut self, select: AluSelect) {
        self.alu.first_value = match select {
            AluSelect::Tos => self.tos.unwrap_or(0),
            AluSelect::Ip => self.ip,
            AluSelect::Cr(arg) => arg,
        };
    }

    /// Runs one ALU operation; two-operand commands pop their second operand
    /// off the data stack first. SXTB is refused before touching the stack.
    pub fn alu_operation(&mut self, command: Option<Opcode>) -> Result<(), MachineError> {
        if let Some(command) = command {
            if command == Opcode::SXTB {
                return Err(MachineError::ReservedOpcode(command));
            }
            if command.is_two_operand() {
                self.alu.second_value = self.data_stack.pop().unwrap_or(0);
            }
        }
        self.alu.do_operation(command)
    }
}
