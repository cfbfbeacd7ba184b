use crate::test::{data, run_halted};
use crate::*;

#[test]
fn beq_taken_skips_one_word() {
    let code = vec![
        data(0),
        op!(1, LD, Load 5),
        op!(2, DUP),
        op!(3, BEQ),
        op!(4, LD, Load 1), // skipped
        op!(5, HLT),
    ];

    let control_unit = run_halted(code);

    assert_eq!(control_unit.tos(), Some(5));
    assert_eq!(control_unit.data_path.data_stack.items(), &[0]);
    // LD 7 + DUP 5 + taken BEQ 6 + HLT 5
    assert_eq!(control_unit.ticks(), 23);
}

#[test]
fn beq_not_taken_leaves_ip_alone() {
    let code = vec![
        data(0),
        op!(1, LD, Load 5),
        op!(2, LD, Load 6),
        op!(3, BEQ),
        op!(4, LD, Load 1),
        op!(5, HLT),
    ];

    let control_unit = run_halted(code);

    // the next word executed, and the untaken branch cost no extra tick
    assert_eq!(control_unit.tos(), Some(1));
    assert_eq!(control_unit.ticks(), 31);
}

#[test]
fn bgt_compares_tos_with_the_popped_word() {
    let code = vec![
        data(0),
        op!(1, LD, Load 5),
        op!(2, LD, Load 6),
        op!(3, BGT),
        op!(4, LD, Load 1), // skipped: 6 > 5
        op!(5, HLT),
    ];

    assert_eq!(run_halted(code).tos(), Some(6));
}

#[test]
fn blt_compares_tos_with_the_popped_word() {
    let code = vec![
        data(0),
        op!(1, LD, Load 6),
        op!(2, LD, Load 5),
        op!(3, BLT),
        op!(4, LD, Load 1), // skipped: 5 < 6
        op!(5, HLT),
    ];

    assert_eq!(run_halted(code).tos(), Some(5));
}

#[test]
fn branches_do_not_latch_tos() {
    let code = vec![
        data(0),
        op!(1, LD, Load 9),
        op!(2, LD, Load 3),
        op!(3, BEQ),
        op!(4, HLT),
    ];

    // 3 != 9: the comparison result never reaches TOS
    assert_eq!(run_halted(code).tos(), Some(3));
}
