use matches::assert_matches;

use crate::test::{data, run_error, run_halted};
use crate::*;

#[test]
fn ld_literal_goes_through_the_alu_passthrough() {
    let code = vec![data(0), op!(1, LD, Load 5), op!(2, HLT)];

    let control_unit = run_halted(code);

    assert_eq!(control_unit.tos(), Some(5));
    // the old TOS was pushed before the latch
    assert_eq!(control_unit.data_path.data_stack.items(), &[0]);
    // LD: 4 fetch + 1 address + 2 execute; HLT: 5
    assert_eq!(control_unit.ticks(), 12);
}

#[test]
fn ld_direct_abs_reads_the_operand_cell() {
    let code = vec![
        data(0),
        op!(1, LD, DirectAbs 4),
        op!(2, HLT),
        data(0),
        data(99),
    ];

    assert_eq!(run_halted(code).tos(), Some(99));
}

#[test]
fn ld_direct_shift_adds_the_offset_to_ip() {
    let code = vec![
        data(0),
        op!(1, LD, DirectShift 2),
        op!(2, HLT),
        data(0),
        data(99),
    ];

    let control_unit = run_halted(code);

    // IP was already 2 when the offset was added: cell 4 is the operand
    assert_eq!(control_unit.tos(), Some(99));
    // the micro-sequence leaves the saved TOS copy and the offset on the
    // stack
    assert_eq!(control_unit.data_path.data_stack.items(), &[0, 2]);
    assert_eq!(control_unit.ticks(), 4 + 7 + 2 + 5);
}

#[test]
fn ld_post_inc_reads_then_bumps_the_pointer() {
    let code = vec![
        data(0),
        op!(1, LD, PostInc 4),
        op!(2, HLT),
        data(0),
        data(6), // pointer cell
        data(0),
        data(123),
    ];

    let control_unit = run_halted(code);

    assert_eq!(control_unit.tos(), Some(123));
    assert_eq!(control_unit.data_path.memory.cells()[4], Cell::Data(7));
    assert_eq!(control_unit.ticks(), 4 + 10 + 2 + 5);
}

#[test]
fn ld_post_dec_reads_then_lowers_the_pointer() {
    let code = vec![
        data(0),
        op!(1, LD, PostDec 4),
        op!(2, HLT),
        data(0),
        data(6), // pointer cell
        data(0),
        data(123),
    ];

    let control_unit = run_halted(code);

    // the old pointer value addressed the operand
    assert_eq!(control_unit.tos(), Some(123));
    assert_eq!(control_unit.data_path.memory.cells()[4], Cell::Data(5));
}

#[test]
fn st_writes_tos_to_the_operand_cell() {
    let code = vec![
        data(0),
        op!(1, LD, Load 42),
        op!(2, ST, DirectAbs 5),
        op!(3, HLT),
        data(0),
        data(0),
    ];

    let control_unit = run_halted(code);

    assert_eq!(control_unit.data_path.memory.cells()[5], Cell::Data(42));
    assert_eq!(control_unit.tos(), Some(42));
}

#[test]
fn st_through_a_pointer_with_post_inc() {
    let code = vec![
        data(0),
        op!(1, LD, Load 42),
        op!(2, ST, PostInc 5),
        op!(3, HLT),
        data(0),
        data(6), // pointer cell
        data(0),
    ];

    let control_unit = run_halted(code);

    assert_eq!(control_unit.data_path.memory.cells()[6], Cell::Data(42));
    assert_eq!(control_unit.data_path.memory.cells()[5], Cell::Data(7));
}

#[test]
fn loading_an_instruction_cell_into_tos_is_an_error() {
    let code = vec![data(0), op!(1, LD, DirectAbs 2), op!(2, HLT)];

    assert_matches!(run_error(code), MachineError::DataExpected(2));
}

#[test]
fn word_data_is_readable_as_an_operand() {
    // a data word placed at address 0 by the translator's WORD directive
    let code = vec![data(0x2A), op!(1, LD, DirectAbs 0), op!(2, HLT)];

    assert_eq!(run_halted(code).tos(), Some(42));
}
