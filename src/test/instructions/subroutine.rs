use matches::assert_matches;

use crate::test::{data, run_error, run_machine};
use crate::*;

#[test]
fn call_pushes_the_return_address_and_ret_pops_it() {
    let code = vec![
        data(0),
        op!(1, CALL, DirectAbs 3),
        op!(2, HLT),
        op!(3, RET),
    ];
    let mut control_unit = ControlUnit::new(code, Vec::new(), OutputMode::Text);

    // CALL: one frame on the return stack, control at the subroutine
    assert_eq!(control_unit.execute().unwrap(), ExecuteResult::Running);
    assert_eq!(control_unit.ip(), 3);
    assert_eq!(control_unit.return_stack.items(), &[2]);

    // RET: frame consumed, control back after the call site
    assert_eq!(control_unit.execute().unwrap(), ExecuteResult::Running);
    assert_eq!(control_unit.ip(), 2);
    assert!(control_unit.return_stack.is_empty());

    assert_eq!(
        control_unit.execute().unwrap(),
        ExecuteResult::Stop(StopReason::Halted)
    );
}

#[test]
fn jump_direct_abs_transfers_control() {
    let code = vec![
        data(0),
        op!(1, JUMP, DirectAbs 3),
        op!(2, LD, Load 9),
        op!(3, HLT),
    ];

    let (control_unit, stop, instructions) = run_machine(code, Vec::new(), OutputMode::Text);

    assert_eq!(stop, StopReason::Halted);
    assert_eq!(instructions, 2);
    assert_eq!(control_unit.tos(), Some(0));
}

#[test]
fn jump_load_takes_the_literal_as_target() {
    let code = vec![
        data(0),
        op!(1, JUMP, Load 3),
        op!(2, LD, Load 9),
        op!(3, HLT),
    ];

    let (control_unit, stop, instructions) = run_machine(code, Vec::new(), OutputMode::Text);

    assert_eq!(stop, StopReason::Halted);
    assert_eq!(instructions, 2);
    // JUMP via LOAD: 4 fetch + 1 address + 1 execute, then HLT
    assert_eq!(control_unit.ticks(), 6 + 5);
}

#[test]
fn ret_on_an_empty_return_stack_aborts() {
    let code = vec![data(0), op!(1, RET)];

    assert_eq!(run_error(code), MachineError::ReturnStackEmpty);
}

#[test]
fn runaway_recursion_overflows_the_return_stack() {
    let code = vec![data(0), op!(1, CALL, DirectAbs 1)];

    assert_matches!(run_error(code), MachineError::StackOverflow { max_size: 64 });
}
