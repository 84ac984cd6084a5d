#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use kq_ir::{BinaryOp, CompareOp, UpdateList};
use pretty_assertions::assert_eq;

fn symbolic(arena: &mut ExprArena, name: &str, size: u32) -> UpdateList {
    UpdateList::new(arena.symbolic_array(name, size).unwrap())
}

#[test]
fn empty_query() {
    let mut arena = ExprArena::new();
    let constraints = ConstraintSet::new();
    let q = arena.bool(false);
    let out = format_query(&arena, &Query::new(&constraints, q), PrintConfig::default());
    assert_eq!(out, "(query [] false)\n");
}

#[test]
fn sharing_spans_constraints() {
    let mut arena = ExprArena::new();
    let arr = symbolic(&mut arena, "arr", 8);
    let a = arena.read_at(arr, 0).unwrap();
    let b = arena.read_at(arr, 1).unwrap();
    let x = arena.binary(BinaryOp::Mul, a, b).unwrap();
    let zero = arena.constant(0, 8).unwrap();
    let five = arena.constant(5, 8).unwrap();
    let c1 = arena.compare(CompareOp::Eq, x, zero).unwrap();
    let c2 = arena.compare(CompareOp::Ult, x, five).unwrap();

    let mut constraints = ConstraintSet::new();
    constraints.push(&arena, c1).unwrap();
    constraints.push(&arena, c2).unwrap();

    let expected = [
        "array arr[8] : w32 -> w8 = symbolic",
        "(query [(Eq N0:(Mul w8 (Read w8 0x0 arr) (Read w8 0x1 arr))",
        "            (w8 0x0))",
        "        (Ult N0 (w8 0x5))]",
        "       false)",
        "",
    ]
    .join("\n");
    let out = format_constraints(&arena, &constraints, PrintConfig::default());
    assert_eq!(out, expected);
}

#[test]
fn eval_exprs_and_arrays() {
    let mut arena = ExprArena::new();
    let arr = symbolic(&mut arena, "arr", 8);
    let table = arena.concrete_array("tbl", vec![1, 0xab]).unwrap();
    let byte = arena.read_at(arr, 0).unwrap();
    let q = arena.bool(false);
    let constraints = ConstraintSet::new();
    let eval_exprs = [byte];
    let eval_arrays = [table];

    let query = Query::new(&constraints, q)
        .with_eval_exprs(&eval_exprs)
        .with_eval_arrays(&eval_arrays);
    let expected = [
        "array arr[8] : w32 -> w8 = symbolic",
        "array tbl[2] : w32 -> w8 = [0x1 0xab]",
        "(query [] false [(Read w8 0x0 arr)]",
        "       [tbl])",
        "",
    ]
    .join("\n");
    assert_eq!(format_query(&arena, &query, PrintConfig::default()), expected);
}

#[test]
fn eval_arrays_without_eval_exprs() {
    let mut arena = ExprArena::new();
    let arr = arena.symbolic_array("arr", 8).unwrap();
    let q = arena.bool(false);
    let constraints = ConstraintSet::new();
    let eval_arrays = [arr];

    let query = Query::new(&constraints, q)
        .with_eval_arrays(&eval_arrays)
        .with_array_decls(false);
    assert_eq!(
        format_query(&arena, &query, PrintConfig::default()),
        "(query [] false []\n       [arr])\n"
    );
}

#[test]
fn non_false_query_breaks_before_eval_list() {
    let mut arena = ExprArena::new();
    let arr = symbolic(&mut arena, "arr", 8);
    let a = arena.read_at(arr, 0).unwrap();
    let zero = arena.constant(0, 8).unwrap();
    let q = arena.eq(a, zero).unwrap();
    let constraints = ConstraintSet::new();
    let eval_exprs = [a];

    let query = Query::new(&constraints, q)
        .with_eval_exprs(&eval_exprs)
        .with_array_decls(false);
    let expected = [
        "(query [] (Eq N0:(Read w8 0x0 arr) (w8 0x0))",
        "       [N0])",
        "",
    ]
    .join("\n");
    assert_eq!(format_query(&arena, &query, PrintConfig::default()), expected);
}

#[test]
fn arrays_are_declared_in_creation_order() {
    let mut arena = ExprArena::new();
    let first = symbolic(&mut arena, "first", 4);
    let second = symbolic(&mut arena, "second", 4);
    let b = arena.read_at(second, 0).unwrap();
    let a = arena.read_at(first, 0).unwrap();
    let c = arena.compare(CompareOp::Ult, b, a).unwrap();
    let mut constraints = ConstraintSet::new();
    constraints.push(&arena, c).unwrap();

    let out = format_constraints(&arena, &constraints, PrintConfig::default());
    let decls: Vec<&str> = out.lines().take_while(|l| l.starts_with("array")).collect();
    assert_eq!(
        decls,
        vec![
            "array first[4] : w32 -> w8 = symbolic",
            "array second[4] : w32 -> w8 = symbolic",
        ]
    );
}

#[test]
fn print_one_and_single_expr() {
    let mut arena = ExprArena::new();
    let arr = symbolic(&mut arena, "arr", 8);
    let e = arena.read_at(arr, 3).unwrap();
    let config = PrintConfig::default();

    assert_eq!(format_one(&arena, "value", e, config), "value: (Read w8 0x3 arr)\n");
    assert_eq!(format_single_expr(&arena, e, config), "(Read w8 0x3 arr)");
    assert_eq!(display(&arena, e).to_string(), "(Read w8 0x3 arr)");
}

#[test]
fn display_with_config() {
    let mut arena = ExprArena::new();
    let arr = symbolic(&mut arena, "arr", 8);
    let e = arena.read_at(arr, 3).unwrap();
    let config = PrintConfig::default().with_flag(crate::PrintFlags::PREFIX_WIDTH, false);
    assert_eq!(format!("{}", display(&arena, e).with_config(config)), "(Read 8 0x3 arr)");
}

#[test]
fn sessions_are_independent() {
    let mut arena = ExprArena::new();
    let arr = symbolic(&mut arena, "arr", 8);
    let x = arena.read_at(arr, 0).unwrap();
    let e = arena.binary(BinaryOp::Mul, x, x).unwrap();
    let config = PrintConfig::default();

    let first = format_single_expr(&arena, e, config);
    let second = format_single_expr(&arena, e, config);
    assert_eq!(first, "(Mul w8 N0:(Read w8 0x0 arr) N0)");
    assert_eq!(first, second);
}

#[test]
fn custom_newline() {
    let mut arena = ExprArena::new();
    let q = arena.bool(false);
    let constraints = ConstraintSet::new();
    let config = PrintConfig::default().with_newline("\r\n");
    assert_eq!(
        format_query(&arena, &Query::new(&constraints, q), config),
        "(query [] false)\r\n"
    );
}

#[test]
fn write_matches_format() {
    let mut arena = ExprArena::new();
    let arr = symbolic(&mut arena, "arr", 8);
    let e = arena.read_at(arr, 1).unwrap();
    let c = arena.eq(e, e).unwrap();
    let mut constraints = ConstraintSet::new();
    constraints.push(&arena, c).unwrap();
    let config = PrintConfig::default();

    let mut buf = Vec::new();
    write_constraints(&mut buf, &arena, &constraints, config).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        format_constraints(&arena, &constraints, config)
    );

    let mut buf = Vec::new();
    write_one(&mut buf, &arena, "e", e, config).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "e: (Read w8 0x1 arr)\n");

    let mut buf = Vec::new();
    write_single_expr(&mut buf, &arena, e, config).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "(Read w8 0x1 arr)");
}

struct Broken;

impl io::Write for Broken {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn write_errors_propagate_unchanged() {
    let mut arena = ExprArena::new();
    let q = arena.bool(false);
    let constraints = ConstraintSet::new();
    let err = write_query(
        Broken,
        &arena,
        &Query::new(&constraints, q),
        PrintConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    assert_eq!(err.to_string(), "pipe closed");
}
