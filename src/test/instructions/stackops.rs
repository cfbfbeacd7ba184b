use crate::test::{data, run_halted};
use crate::*;

#[test]
fn swap_exchanges_tos_with_the_word_under_it() {
    let code = vec![
        data(0),
        op!(1, LD, Load 1),
        op!(2, LD, Load 2),
        op!(3, SWAP),
        op!(4, HLT),
    ];

    let control_unit = run_halted(code);

    assert_eq!(control_unit.tos(), Some(1));
    assert_eq!(control_unit.data_path.data_stack.items(), &[0, 2]);
    // SWAP costs two internal ticks plus the concluding one
    assert_eq!(control_unit.ticks(), 7 + 7 + 7 + 5);
}

#[test]
fn swap_on_an_empty_stack_yields_a_null_tos() {
    let code = vec![data(0), op!(1, SWAP), op!(2, HLT)];

    let control_unit = run_halted(code);

    assert_eq!(control_unit.tos(), None);
    // the old TOS still went down
    assert_eq!(control_unit.data_path.data_stack.items(), &[0]);
}

#[test]
fn dup_pushes_tos() {
    let code = vec![data(0), op!(1, LD, Load 9), op!(2, DUP), op!(3, HLT)];

    let control_unit = run_halted(code);

    assert_eq!(control_unit.tos(), Some(9));
    assert_eq!(control_unit.data_path.data_stack.items(), &[0, 9]);
}

#[test]
fn pop_pulls_the_next_word_into_tos() {
    let code = vec![
        data(0),
        op!(1, LD, Load 1),
        op!(2, LD, Load 2),
        op!(3, POP),
        op!(4, HLT),
    ];

    let control_unit = run_halted(code);

    assert_eq!(control_unit.tos(), Some(1));
    assert_eq!(control_unit.data_path.data_stack.items(), &[0]);
}

#[test]
fn pop_on_an_empty_stack_yields_a_null_tos() {
    let code = vec![data(0), op!(1, POP), op!(2, HLT)];

    let control_unit = run_halted(code);

    assert_eq!(control_unit.tos(), None);
    assert!(control_unit.data_path.data_stack.is_empty());
}

#[test]
fn a_null_tos_is_not_pushed_back() {
    // POP empties TOS, DUP then has nothing to push
    let code = vec![
        data(0),
        op!(1, POP),
        op!(2, DUP),
        op!(3, HLT),
    ];

    let control_unit = run_halted(code);

    assert_eq!(control_unit.tos(), None);
    assert!(control_unit.data_path.data_stack.is_empty());
}
