#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::config::PrintFlags;
use kq_ir::{BinaryOp, CompareOp, Constant};
use pretty_assertions::assert_eq;

struct Fixture {
    arena: ExprArena,
    list: UpdateList,
}

impl Fixture {
    fn new() -> Self {
        let mut arena = ExprArena::new();
        let arr = arena.symbolic_array("arr", 16).unwrap();
        Fixture {
            arena,
            list: UpdateList::new(arr),
        }
    }

    fn read(&mut self, offset: u64) -> ExprId {
        self.arena.read_at(self.list, offset).unwrap()
    }

    fn store(&mut self, list: UpdateList, index: u64, value: u64) -> UpdateList {
        let index = self.arena.constant(index, 32).unwrap();
        let value = self.arena.constant(value, 8).unwrap();
        self.arena.update(list, index, value).unwrap()
    }
}

fn render_with(arena: &ExprArena, expr: ExprId, config: PrintConfig) -> String {
    let mut printer = Printer::new(arena, config);
    printer.scan(expr);
    let mut ctx = PrintContext::new();
    printer.print(&mut ctx, expr, false);
    ctx.finalize()
}

fn render(arena: &ExprArena, expr: ExprId) -> String {
    render_with(arena, expr, PrintConfig::default())
}

fn spaces(n: usize) -> String {
    " ".repeat(n)
}

#[test]
fn single_read() {
    let mut f = Fixture::new();
    let e = f.read(3);
    assert_eq!(render(&f.arena, e), "(Read w8 0x3 arr)");
}

#[test]
fn unscanned_printing_labels_everything() {
    let mut f = Fixture::new();
    let x = f.read(3);
    let e = f.arena.not(x).unwrap();

    let mut printer = Printer::new(&f.arena, PrintConfig::default());
    let mut ctx = PrintContext::new();
    printer.print_at(&mut ctx, e, 0);
    assert_eq!(ctx.finalize(), "N0:(Not w8 N1:(Read w8 0x3 arr))");
}

#[test]
fn print_at_aligns_from_given_column() {
    let mut f = Fixture::new();
    let a = f.read(0);
    let b = f.read(1);
    let c = f.read(2);
    let d = f.read(3);
    let left = f.arena.binary(BinaryOp::Mul, a, b).unwrap();
    let right = f.arena.binary(BinaryOp::Mul, c, d).unwrap();
    let e = f.arena.binary(BinaryOp::Xor, left, right).unwrap();

    let mut printer = Printer::new(&f.arena, PrintConfig::default());
    printer.scan(e);
    let mut ctx = PrintContext::new();
    printer.print_at(&mut ctx, e, 4);
    let expected = format!(
        concat!(
            "(Xor w8 (Mul w8 (Read w8 0x0 arr) (Read w8 0x1 arr))\n",
            "{}(Mul w8 (Read w8 0x2 arr) (Read w8 0x3 arr)))",
        ),
        spaces(12)
    );
    assert_eq!(ctx.finalize(), expected);
}

#[test]
fn shared_operand_is_labeled_once() {
    let mut f = Fixture::new();
    let x = f.read(0);
    let e = f.arena.binary(BinaryOp::Mul, x, x).unwrap();
    assert_eq!(render(&f.arena, e), "(Mul w8 N0:(Read w8 0x0 arr) N0)");
}

#[test]
fn complex_operands_break_and_align() {
    let mut f = Fixture::new();
    let a = f.read(0);
    let b = f.read(1);
    let c = f.read(2);
    let d = f.read(3);
    let left = f.arena.binary(BinaryOp::Mul, a, b).unwrap();
    let right = f.arena.binary(BinaryOp::Mul, c, d).unwrap();
    let e = f.arena.binary(BinaryOp::Xor, left, right).unwrap();

    let expected = format!(
        concat!(
            "(Xor w8 (Mul w8 (Read w8 0x0 arr) (Read w8 0x1 arr))\n",
            "{}(Mul w8 (Read w8 0x2 arr) (Read w8 0x3 arr)))",
        ),
        spaces(8)
    );
    assert_eq!(render(&f.arena, e), expected);
}

#[test]
fn constant_operands_carry_their_width() {
    let mut f = Fixture::new();
    let x = f.read(0);
    let two = f.arena.constant(2, 8).unwrap();
    let e = f.arena.binary(BinaryOp::Mul, x, two).unwrap();
    assert_eq!(render(&f.arena, e), "(Mul w8 (Read w8 0x0 arr) (w8 0x2))");
}

#[test]
fn look_ahead_sees_one_level_down() {
    let mut f = Fixture::new();
    let x = f.read(0);
    let wide = f.arena.zext(x, 32).unwrap();
    let one = f.arena.constant(1, 32).unwrap();
    let e = f.arena.add(wide, one).unwrap();

    let expected = format!(
        "(Add w32 (w32 0x1)\n{}(ZExt w32 (Read w8 0x0 arr)))",
        spaces(9)
    );
    assert_eq!(render(&f.arena, e), expected);
}

#[test]
fn boolean_width_is_omitted() {
    let mut f = Fixture::new();
    let x = f.read(0);
    let y = f.read(1);
    let e = f.arena.compare(CompareOp::Eq, x, y).unwrap();
    assert_eq!(render(&f.arena, e), "(Eq (Read w8 0x0 arr) (Read w8 0x1 arr))");

    let config = PrintConfig::default().with_flag(PrintFlags::ALL_WIDTHS, true);
    assert_eq!(
        render_with(&f.arena, e, config),
        "(Eq w1 (Read w8 0x0 arr) (Read w8 0x1 arr))"
    );
}

#[test]
fn width_flags() {
    let mut f = Fixture::new();
    let e = f.read(3);

    let glued = PrintConfig::default().with_flag(PrintFlags::WIDTH_AS_ARG, false);
    assert_eq!(render_with(&f.arena, e, glued), "(Read8 0x3 arr)");

    let bare = PrintConfig::default().with_flag(PrintFlags::PREFIX_WIDTH, false);
    assert_eq!(render_with(&f.arena, e, bare), "(Read 8 0x3 arr)");

    let consts = PrintConfig::default().with_flag(PrintFlags::ALL_CONST_WIDTHS, true);
    assert_eq!(render_with(&f.arena, e, consts), "(Read w8 (w32 0x3) arr)");
}

#[test]
fn boolean_constants() {
    let mut arena = ExprArena::new();
    let t = arena.bool(true);
    let f = arena.bool(false);
    assert_eq!(render(&arena, t), "true");
    assert_eq!(render(&arena, f), "false");
}

#[test]
fn wide_constants_print_bare_hex() {
    let mut arena = ExprArena::new();
    let value = (num_value(1) << 100u32) | num_value(0xff);
    let e = arena.constant_value(Constant::from_biguint(value, 128));
    let expected = format!("1{}ff", "0".repeat(23));
    assert_eq!(render(&arena, e), expected);

    let narrow = arena.constant(u64::MAX, 64).unwrap();
    assert_eq!(render(&arena, narrow), "0xffffffffffffffff");
}

fn num_value(v: u64) -> kq_ir::BigUint {
    kq_ir::BigUint::from(v)
}

#[test]
fn extract_prints_offset() {
    let mut f = Fixture::new();
    let a = f.read(0);
    let b = f.read(5);
    let word = f.arena.concat(a, b).unwrap();
    let e = f.arena.extract(word, 8, 8).unwrap();
    assert_eq!(
        render(&f.arena, e),
        "(Extract w8 8 (Concat w16 (Read w8 0x0 arr) (Read w8 0x5 arr)))"
    );
}

#[test]
fn little_endian_chain_collapses() {
    let mut f = Fixture::new();
    let b0 = f.read(0);
    let b1 = f.read(1);
    let b2 = f.read(2);
    let b3 = f.read(3);
    let low = f.arena.concat(b1, b0).unwrap();
    let mid = f.arena.concat(b2, low).unwrap();
    let e = f.arena.concat(b3, mid).unwrap();
    assert_eq!(render(&f.arena, e), "(ReadLSB w32 0x0 arr)");
}

#[test]
fn big_endian_chain_collapses() {
    let mut f = Fixture::new();
    let b0 = f.read(0);
    let b1 = f.read(1);
    let b2 = f.read(2);
    let b3 = f.read(3);
    let low = f.arena.concat(b2, b3).unwrap();
    let mid = f.arena.concat(b1, low).unwrap();
    let e = f.arena.concat(b0, mid).unwrap();
    assert_eq!(render(&f.arena, e), "(ReadMSB w32 0x0 arr)");

    let off = PrintConfig::default().with_flag(PrintFlags::MULTIBYTE_READS, false);
    assert!(render_with(&f.arena, e, off).starts_with("(Concat w32 (Read w8 0x0 arr)\n"));
}

#[test]
fn collapsed_read_keeps_shared_index_label() {
    let mut f = Fixture::new();
    let idx_array = f.arena.symbolic_array("idx", 4).unwrap();
    let raw = f.arena.read_at(UpdateList::new(idx_array), 0).unwrap();
    let base = f.arena.zext(raw, 32).unwrap();

    let mut bytes = Vec::new();
    for k in 0..4 {
        let k = f.arena.constant(k, 32).unwrap();
        let index = f.arena.add(k, base).unwrap();
        bytes.push(f.arena.read(f.list, index).unwrap());
    }
    let low = f.arena.concat(bytes[1], bytes[0]).unwrap();
    let mid = f.arena.concat(bytes[2], low).unwrap();
    let e = f.arena.concat(bytes[3], mid).unwrap();

    // The base index is shared by the per-byte index sums, so it keeps its label.
    assert_eq!(
        render(&f.arena, e),
        "(ReadLSB w32 N0:(ZExt w32 (Read w8 0x0 idx)) arr)"
    );
}

#[test]
fn broken_chain_prints_nested_concats() {
    let mut f = Fixture::new();
    let b0 = f.read(0);
    let b1 = f.read(1);
    let b3 = f.read(3);
    let inner = f.arena.concat(b1, b3).unwrap();
    let e = f.arena.concat(b0, inner).unwrap();

    let expected = format!(
        "(Concat w24 (Read w8 0x0 arr)\n{}(Concat w16 (Read w8 0x1 arr) (Read w8 0x3 arr)))",
        spaces(12)
    );
    assert_eq!(render(&f.arena, e), expected);
}

#[test]
fn reads_through_different_updates_do_not_collapse() {
    let mut f = Fixture::new();
    let updated = f.store(f.list, 0, 1);
    let low = f.read(0);
    let high = f.arena.read_at(updated, 1).unwrap();
    let e = f.arena.concat(low, high).unwrap();

    let expected = format!(
        "(Concat w16 (Read w8 0x0 arr)\n{}(Read w8 0x1 [0x0=0x1] @ arr))",
        spaces(12)
    );
    assert_eq!(render(&f.arena, e), expected);
}

#[test]
fn constant_updates_share_a_line() {
    let mut f = Fixture::new();
    let first = f.store(f.list, 0, 1);
    let second = f.store(first, 1, 2);
    let e = f.arena.read_at(second, 3).unwrap();
    assert_eq!(render(&f.arena, e), "(Read w8 0x3 [0x1=0x2, 0x0=0x1] @ arr)");
}

#[test]
fn symbolic_update_breaks_following_pair() {
    let mut f = Fixture::new();
    let src = f.arena.symbolic_array("src", 4).unwrap();
    let stored = f.arena.read_at(UpdateList::new(src), 0).unwrap();
    let older = f.store(f.list, 1, 2);
    let zero = f.arena.constant(0, 32).unwrap();
    let newer = f.arena.update(older, zero, stored).unwrap();
    let e = f.arena.read_at(newer, 3).unwrap();

    let expected = format!(
        "(Read w8 0x3 [0x0=(Read w8 0x0 src),\n{}0x1=0x2] @ arr)",
        spaces(14)
    );
    assert_eq!(render(&f.arena, e), expected);
}

#[test]
fn shared_update_list_is_labeled() {
    let mut f = Fixture::new();
    let list = f.store(f.list, 0, 1);
    let a = f.arena.read_at(list, 2).unwrap();
    let b = f.arena.read_at(list, 3).unwrap();
    let e = f.arena.binary(BinaryOp::Mul, a, b).unwrap();

    let expected = format!(
        "(Mul w8 (Read w8 0x2 U0:[0x0=0x1] @ arr)\n{}(Read w8 0x3 U0))",
        spaces(8)
    );
    assert_eq!(render(&f.arena, e), expected);
}

#[test]
fn shared_suffix_opens_new_run() {
    let mut f = Fixture::new();
    let base = f.store(f.list, 0, 1);
    let longer = f.store(base, 1, 2);
    let a = f.arena.read_at(longer, 5).unwrap();
    let b = f.arena.read_at(base, 6).unwrap();
    let e = f.arena.binary(BinaryOp::Mul, a, b).unwrap();

    let expected = format!(
        "(Mul w8 (Read w8 0x5 [0x1=0x2] @\n{}U0:[0x0=0x1] @ arr)\n{}(Read w8 0x6 U0))",
        spaces(21),
        spaces(8)
    );
    assert_eq!(render(&f.arena, e), expected);
}

#[test]
fn reset_forgets_labels() {
    let mut f = Fixture::new();
    let x = f.read(0);
    let e = f.arena.binary(BinaryOp::Mul, x, x).unwrap();

    let mut printer = Printer::new(&f.arena, PrintConfig::default());
    printer.scan(e);
    let mut ctx = PrintContext::new();
    printer.print(&mut ctx, e, false);
    assert_eq!(printer.binder().expr_count(), 1);

    printer.reset();
    assert_eq!(printer.binder().expr_count(), 0);
    assert_eq!(printer.scanner().reachable_count(), 0);

    printer.scan(e);
    let mut ctx = PrintContext::new();
    printer.print(&mut ctx, e, false);
    assert_eq!(ctx.finalize(), "(Mul w8 N0:(Read w8 0x0 arr) N0)");
}

#[test]
fn separator_helper() {
    let arena = ExprArena::new();
    let printer = Printer::new(&arena, PrintConfig::default());
    let mut ctx = PrintContext::new();
    ctx.emit("ab");
    printer.print_separator(&mut ctx, true, 4);
    ctx.emit("c");
    printer.print_separator(&mut ctx, false, 4);
    ctx.emit("d");
    assert_eq!(ctx.finalize(), "ab c\n    d");
}
