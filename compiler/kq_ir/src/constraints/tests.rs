#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::BinaryOp;

#[test]
fn keeps_insertion_order_and_duplicates() {
    let mut arena = ExprArena::new();
    let t = arena.bool(true);
    let f = arena.bool(false);

    let mut set = ConstraintSet::new();
    set.push(&arena, f).unwrap();
    set.push(&arena, t).unwrap();
    set.push(&arena, f).unwrap();

    assert_eq!(set.as_slice(), &[f, t, f]);
    assert_eq!(set.len(), 3);
}

#[test]
fn rejects_non_boolean() {
    let mut arena = ExprArena::new();
    let a = arena.constant(1, 32).unwrap();
    let b = arena.constant(2, 32).unwrap();
    let sum = arena.binary(BinaryOp::Mul, a, b).unwrap();

    let mut set = ConstraintSet::new();
    assert_eq!(set.push(&arena, sum), Err(BuildError::NotBoolean(32)));
    assert!(set.is_empty());
}
