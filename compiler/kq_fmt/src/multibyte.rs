//! Multi-byte read detection.
//!
//! A little-endian load of four bytes builds as
//! `(Concat (Read i+3) (Concat (Read i+2) (Concat (Read i+1) (Read i))))`.
//! Such chains print as a single `(ReadLSB w32 i arr)`. Big-endian loads
//! count upward instead and print as `ReadMSB`.
//!
//! Index offsets are compared with [`ExprArena::constant_difference`], so a
//! chain is recognized exactly when the builder would fold the index
//! difference to the expected constant.

use kq_ir::width;
use kq_ir::{Constant, ExprArena, ExprId, ExprKind, UpdateList};

/// Direction in which successive operand indices move.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Stride {
    /// Each operand reads the byte just below the previous one.
    Descending,
    /// Each operand reads the byte just above the previous one.
    Ascending,
}

impl Stride {
    fn step(self, index_width: width::Width) -> Constant {
        match self {
            Stride::Descending => Constant::all_ones(index_width),
            Stride::Ascending => Constant::new(1, index_width),
        }
    }
}

/// Byte order of a collapsed read.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ByteOrder {
    Lsb,
    Msb,
}

impl ByteOrder {
    pub fn tag(self) -> &'static str {
        match self {
            ByteOrder::Lsb => "ReadLSB",
            ByteOrder::Msb => "ReadMSB",
        }
    }
}

/// A concatenation recognized as one wide load.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct MultibyteRead {
    pub order: ByteOrder,
    pub updates: UpdateList,
    /// Index of the lowest-addressed byte.
    pub index: ExprId,
}

/// Recognize `concat` as a little- or big-endian multi-byte load.
///
/// Little-endian is tried first.
pub fn detect(arena: &ExprArena, concat: ExprId) -> Option<MultibyteRead> {
    let (order, base) = if let Some(base) = ordered_reads(arena, concat, Stride::Descending) {
        (ByteOrder::Lsb, base)
    } else {
        (ByteOrder::Msb, ordered_reads(arena, concat, Stride::Ascending)?)
    };
    let (updates, index) = byte_read(arena, base)?;
    Some(MultibyteRead {
        order,
        updates,
        index,
    })
}

/// Check that `concat` is a right-nested chain of byte reads whose indices
/// move by `stride` from the leftmost one.
///
/// Returns the read holding the lowest index: the rightmost operand for a
/// descending chain, the leftmost for an ascending one.
pub fn ordered_reads(arena: &ExprArena, concat: ExprId, stride: Stride) -> Option<ExprId> {
    let ExprKind::Concat { left: base, right } = arena.get(concat).kind else {
        return None;
    };
    let (base_updates, base_index) = byte_read(arena, base)?;
    let index_width = arena.get(base_index).width;
    let step = stride.step(index_width);

    let mut offset = Constant::zero(index_width);
    let mut rest = right;
    loop {
        offset = offset.wrapping_add(&step);
        let (operand, next) = match arena.get(rest).kind {
            ExprKind::Concat { left, right } => (left, Some(right)),
            _ => (rest, None),
        };
        if !reads_at(arena, operand, base_updates, base_index, &offset) {
            return None;
        }
        match next {
            Some(next) => rest = next,
            None => break,
        }
    }

    Some(match stride {
        Stride::Descending => rest,
        Stride::Ascending => base,
    })
}

/// Updates and index of a `w8` read.
fn byte_read(arena: &ExprArena, expr: ExprId) -> Option<(UpdateList, ExprId)> {
    let expr = arena.get(expr);
    match expr.kind {
        ExprKind::Read { updates, index } if expr.width == width::INT8 => Some((updates, index)),
        _ => None,
    }
}

/// Whether `expr` reads the same update list as the base at `base + offset`.
fn reads_at(
    arena: &ExprArena,
    expr: ExprId,
    base_updates: UpdateList,
    base_index: ExprId,
    offset: &Constant,
) -> bool {
    let Some((updates, index)) = byte_read(arena, expr) else {
        return false;
    };
    updates == base_updates
        && arena
            .constant_difference(index, base_index)
            .is_some_and(|diff| diff == *offset)
}
