use log::{debug, info, warn};

use crate::constants::{SIZE_FOR_VARS, STACK_SIZE};
use crate::datapath::DataPath;
use crate::error::MachineError;
use crate::io::{IoController, OutputMode};
use crate::isa::{Addressing, Instruction, Opcode};
use crate::memory::{Cell, Memory};
use crate::signals::{AluSelect, ArSelect, DrSignal, IpSelect, TosSelect};
use crate::stack::Stack;
use crate::Word;

/// Why a run ended cleanly.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StopReason {
    /// HLT was executed.
    Halted,
    /// IN found the input buffer empty; equivalent to HLT.
    InputExhausted,
    /// The instruction safety limit was reached.
    LimitExceeded,
}

/// Outcome of executing one instruction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExecuteResult {
    Running,
    Stop(StopReason),
}

/// Drives the fetch/address/operand/execute phases against the datapath.
///
/// Owns the pieces the datapath does not: the current-instruction register,
/// the return stack, the I/O controller and the tick counter. Every tick
/// emits one trace line at debug level.
pub struct ControlUnit {
    pub(crate) data_path: DataPath,
    pub(crate) io: IoController,
    pub(crate) return_stack: Stack,
    pub(crate) cr: Option<Instruction>,
    pub(crate) ticks: u64,
}

impl ControlUnit {
    pub fn new(code: Vec<Cell>, input: Vec<Word>, mode: OutputMode) -> ControlUnit {
        let memory = Memory::new(code, SIZE_FOR_VARS);
        ControlUnit {
            data_path: DataPath::new(memory),
            io: IoController::new(input, 0, mode),
            return_stack: Stack::new(STACK_SIZE),
            cr: None,
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tos(&self) -> Option<Word> {
        self.data_path.tos
    }

    pub fn ip(&self) -> Word {
        self.data_path.ip
    }

    /// Renders the output buffer in the configured mode.
    pub fn finish(&self) -> String {
        self.io.finish()
    }

    fn tick(&mut self) {
        self.ticks += 1;
        let data_path = &self.data_path;
        debug!(
            "tick {:4} | IP: {:3} CR: {:8} AR: {:3} DR: {:8} BR: {:3} TOS: {:3} STACK: {:?}",
            self.ticks,
            data_path.ip,
            self.cr
                .as_ref()
                .map_or_else(|| "-".to_owned(), Instruction::short_note),
            data_path.ar,
            data_path.dr.short_note(),
            data_path
                .br
                .map_or_else(|| "-".to_owned(), |value| value.to_string()),
            data_path
                .tos
                .map_or_else(|| "-".to_owned(), |value| value.to_string()),
            data_path.data_stack.items(),
        );
    }

    fn arg(cmd: &Instruction) -> Result<Word, MachineError> {
        cmd.arg.ok_or(MachineError::MissingArgument(cmd.opcode))
    }

    /// Four ticks: latch AR from IP, read the instruction into CR through
    /// DR, then increment IP through the ALU.
    fn instruction_fetch(&mut self) -> Result<Instruction, MachineError> {
        self.data_path.signal_latch_ar(ArSelect::Ip);
        self.tick();

        self.data_path.signal_latch_dr(DrSignal::Read)?;
        let cmd = match &self.data_path.dr {
            Cell::Instr(instruction) => instruction.clone(),
            Cell::Data(value) => {
                return Err(MachineError::WrongInstructionFormat {
                    found: value.to_string(),
                    ip: self.data_path.ip,
                });
            }
        };
        self.cr = Some(cmd.clone());
        self.tick();

        self.data_path.signal_latch_alu(AluSelect::Ip);
        self.tick();

        self.data_path.alu_operation(Some(Opcode::INC))?;
        self.data_path.signal_latch_ip(IpSelect::Alu);
        self.tick();

        Ok(cmd)
    }

    /// Resolves the operand per addressing mode. Modes that produce an
    /// effective address leave it in the ALU for `operand_fetch` (and for
    /// JUMP/CALL, which take their target from the same latch).
    fn address_fetch(&mut self, cmd: &Instruction) -> Result<(), MachineError> {
        match cmd.addressing {
            Addressing::None => Ok(()),

            Addressing::DirectAbs => {
                let arg = Self::arg(cmd)?;

                self.data_path.data_stack_push()?;
                self.tick();

                self.data_path.signal_latch_alu(AluSelect::Cr(arg));
                self.data_path.alu_operation(None)?;
                self.data_path.signal_latch_dr(DrSignal::NewValue)?;
                self.tick();

                self.data_path.signal_latch_tos(TosSelect::DataStack)?;
                self.tick();

                self.operand_fetch()
            }

            Addressing::Load => {
                let arg = Self::arg(cmd)?;

                // the literal itself is the operand: no operand fetch
                self.data_path.signal_latch_alu(AluSelect::Cr(arg));
                self.data_path.alu_operation(None)?;
                self.data_path.signal_latch_dr(DrSignal::NewValue)?;
                self.tick();

                Ok(())
            }

            Addressing::DirectShift => {
                let arg = Self::arg(cmd)?;

                self.data_path.data_stack_push()?;
                self.tick();

                self.data_path.signal_latch_tos(TosSelect::Ip)?;
                self.tick();

                self.data_path.data_stack_push()?;
                self.tick();

                self.data_path.signal_latch_tos(TosSelect::Cr(arg))?;
                self.tick();

                // ADD consumes the IP copy from the stack as second operand
                self.data_path.signal_latch_alu(AluSelect::Tos);
                self.data_path.alu_operation(Some(Opcode::ADD))?;
                self.tick();

                self.operand_fetch()
            }

            Addressing::PostInc | Addressing::PostDec => {
                let arg = Self::arg(cmd)?;

                self.data_path.data_stack_push()?;
                self.tick();

                self.data_path.signal_latch_ar(ArSelect::Cr(arg));
                self.tick();

                self.data_path.signal_latch_dr(DrSignal::Read)?;
                self.tick();

                self.data_path.signal_latch_tos(TosSelect::Dr)?;
                self.tick();

                let step = if cmd.addressing == Addressing::PostInc {
                    Opcode::INC
                } else {
                    Opcode::DEC
                };
                self.data_path.signal_latch_alu(AluSelect::Tos);
                self.data_path.alu_operation(Some(step))?;
                self.tick();
                self.tick();

                self.data_path.signal_latch_dr(DrSignal::NewValue)?;
                self.data_path.signal_latch_dr(DrSignal::Write)?;
                self.tick();

                // the old pointer value in TOS is the effective address
                self.data_path.signal_latch_alu(AluSelect::Tos);
                self.data_path.alu_operation(None)?;
                self.data_path.signal_latch_tos(TosSelect::DataStack)?;
                self.tick();

                self.operand_fetch()
            }
        }
    }

    /// Two ticks: AR from the ALU, then the operand cell into DR.
    fn operand_fetch(&mut self) -> Result<(), MachineError> {
        self.data_path.signal_latch_ar(ArSelect::Alu);
        self.tick();

        self.data_path.signal_latch_dr(DrSignal::Read)?;
        self.tick();

        Ok(())
    }

    fn execution_fetch(&mut self, cmd: &Instruction) -> Result<ExecuteResult, MachineError> {
        let mut result = ExecuteResult::Running;

        if cmd.opcode.is_alu_group() {
            self.data_path.signal_latch_alu(AluSelect::Tos);
            self.data_path.alu_operation(Some(cmd.opcode))?;

            if cmd.opcode.is_branch() {
                if self.data_path.alu.value == 1 {
                    // the taken branch re-reads its argument from the stack
                    self.tick();

                    self.data_path.signal_latch_alu(AluSelect::Ip);
                    self.data_path.alu_operation(Some(Opcode::INC))?;
                    self.data_path.signal_latch_ip(IpSelect::Alu);
                }
            } else {
                self.data_path.signal_latch_tos(TosSelect::Alu)?;
            }
        }

        match cmd.opcode {
            Opcode::LD => {
                self.data_path.data_stack_push()?;
                self.tick();

                self.data_path.signal_latch_tos(TosSelect::Dr)?;
            }

            Opcode::ST => {
                self.data_path.signal_latch_alu(AluSelect::Tos);
                self.data_path.alu_operation(None)?;
                self.data_path.signal_latch_dr(DrSignal::NewValue)?;
                self.tick();

                self.data_path.signal_latch_dr(DrSignal::Write)?;
            }

            Opcode::JUMP | Opcode::CALL => {
                if cmd.opcode == Opcode::CALL {
                    self.return_stack.push(Some(self.data_path.ip))?;
                    self.tick();
                }
                // the address fetch left the target in the ALU
                self.data_path.signal_latch_ip(IpSelect::Alu);
            }

            Opcode::RET => {
                let address = self
                    .return_stack
                    .pop()
                    .ok_or(MachineError::ReturnStackEmpty)?;
                self.data_path.signal_latch_ip(IpSelect::ReturnStack(address));
            }

            Opcode::SWAP => {
                self.data_path.signal_latch_br();
                self.tick();

                self.data_path.data_stack_push()?;
                self.tick();

                self.data_path.signal_latch_tos(TosSelect::Br)?;
            }

            Opcode::DUP => self.data_path.data_stack_push()?,

            Opcode::POP => self.data_path.signal_latch_tos(TosSelect::DataStack)?,

            Opcode::IN => {
                if !self.io.get(&mut self.data_path.memory)? {
                    result = ExecuteResult::Stop(StopReason::InputExhausted);
                }
            }

            Opcode::OUT => self.io.send(&mut self.data_path.memory)?,

            Opcode::HLT => result = ExecuteResult::Stop(StopReason::Halted),

            // NOP records are lowered to data words by the loader and can
            // never be fetched
            Opcode::NOP => {}

            _ => {}
        }

        self.tick();
        Ok(result)
    }

    /// Runs one full instruction: fetch, address fetch, execute.
    pub fn execute(&mut self) -> Result<ExecuteResult, MachineError> {
        let cmd = self.instruction_fetch()?;
        self.address_fetch(&cmd)?;
        self.execution_fetch(&cmd)
    }

    /// Executes instructions until a stop condition or the limit. Reaching
    /// the limit is not an error; it logs a warning and stops the run.
    pub fn run(&mut self, limit: u64) -> Result<(StopReason, u64), MachineError> {
        let mut instr_counter = 0;
        while instr_counter < limit {
            let result = self.execute()?;
            instr_counter += 1;
            if let ExecuteResult::Stop(reason) = result {
                return Ok((reason, instr_counter));
            }
        }
        warn!("Limit exceeded!");
        Ok((StopReason::LimitExceeded, instr_counter))
    }
}

/// Outcome of a whole run.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SimulationResult {
    /// Output buffer rendered in the requested mode.
    pub output: String,
    pub instructions: u64,
    pub ticks: u64,
    pub stop: StopReason,
}

/// Builds a machine around the loaded code and runs it to completion.
pub fn simulation(
    code: Vec<Cell>,
    input: Vec<Word>,
    mode: OutputMode,
    limit: u64,
) -> Result<SimulationResult, MachineError> {
    let mut control_unit = ControlUnit::new(code, input, mode);
    let (stop, instructions) = control_unit.run(limit)?;

    info!("output buffer: {:?}", control_unit.io.output());

    Ok(SimulationResult {
        output: control_unit.finish(),
        instructions,
        ticks: control_unit.ticks,
        stop,
    })
}
