//! Expression nodes.
//!
//! Every node carries its result width and an [`ExprKind`]. Kinds are a
//! closed sum type; consumers dispatch with exhaustive `match`.

use smallvec::{smallvec, SmallVec};

use crate::array::UpdateList;
use crate::constant::Constant;
use crate::width::{self, Width};
use crate::ExprId;

/// Child list of an expression. No kind has more than three children.
pub type Kids = SmallVec<[ExprId; 3]>;

/// An expression node.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Expr {
    pub width: Width,
    pub kind: ExprKind,
}

/// Two-operand arithmetic and bitwise operators. Result width equals the
/// operand width.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    UDiv,
    SDiv,
    URem,
    SRem,
    And,
    Or,
    Xor,
    Shl,
    LShr,
    AShr,
}

/// Comparisons. Result width is always `w1`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CompareOp {
    Eq,
    Ne,
    Ult,
    Ule,
    Ugt,
    Uge,
    Slt,
    Sle,
    Sgt,
    Sge,
}

/// Expression variants.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ExprKind {
    /// Literal value.
    Constant(Constant),

    /// Marker that blocks simplification of its operand.
    NotOptimized { src: ExprId },

    /// Byte load from an array as of a list of updates.
    Read { updates: UpdateList, index: ExprId },

    /// `cond ? then_expr : else_expr`
    Select {
        cond: ExprId,
        then_expr: ExprId,
        else_expr: ExprId,
    },

    /// Bit concatenation, `left` is the most significant part.
    Concat { left: ExprId, right: ExprId },

    /// `width` bits of `src` starting at bit `offset`.
    Extract { src: ExprId, offset: Width },

    ZExt { src: ExprId },
    SExt { src: ExprId },
    Not { src: ExprId },

    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    Compare {
        op: CompareOp,
        left: ExprId,
        right: ExprId,
    },
}

impl BinaryOp {
    /// Printed name of the operator.
    pub fn tag(self) -> &'static str {
        match self {
            BinaryOp::Add => "Add",
            BinaryOp::Sub => "Sub",
            BinaryOp::Mul => "Mul",
            BinaryOp::UDiv => "UDiv",
            BinaryOp::SDiv => "SDiv",
            BinaryOp::URem => "URem",
            BinaryOp::SRem => "SRem",
            BinaryOp::And => "And",
            BinaryOp::Or => "Or",
            BinaryOp::Xor => "Xor",
            BinaryOp::Shl => "Shl",
            BinaryOp::LShr => "LShr",
            BinaryOp::AShr => "AShr",
        }
    }
}

impl CompareOp {
    /// Printed name of the comparison.
    pub fn tag(self) -> &'static str {
        match self {
            CompareOp::Eq => "Eq",
            CompareOp::Ne => "Ne",
            CompareOp::Ult => "Ult",
            CompareOp::Ule => "Ule",
            CompareOp::Ugt => "Ugt",
            CompareOp::Uge => "Uge",
            CompareOp::Slt => "Slt",
            CompareOp::Sle => "Sle",
            CompareOp::Sgt => "Sgt",
            CompareOp::Sge => "Sge",
        }
    }
}

impl ExprKind {
    /// Printed name of the kind.
    pub fn tag(&self) -> &'static str {
        match self {
            ExprKind::Constant(_) => "Constant",
            ExprKind::NotOptimized { .. } => "NotOptimized",
            ExprKind::Read { .. } => "Read",
            ExprKind::Select { .. } => "Select",
            ExprKind::Concat { .. } => "Concat",
            ExprKind::Extract { .. } => "Extract",
            ExprKind::ZExt { .. } => "ZExt",
            ExprKind::SExt { .. } => "SExt",
            ExprKind::Not { .. } => "Not",
            ExprKind::Binary { op, .. } => op.tag(),
            ExprKind::Compare { op, .. } => op.tag(),
        }
    }

    /// Ordered children. A `Read` has its index as its only child; its
    /// update list is reached separately.
    pub fn kids(&self) -> Kids {
        match *self {
            ExprKind::Constant(_) => SmallVec::new(),
            ExprKind::NotOptimized { src }
            | ExprKind::Extract { src, .. }
            | ExprKind::ZExt { src }
            | ExprKind::SExt { src }
            | ExprKind::Not { src } => smallvec![src],
            ExprKind::Read { index, .. } => smallvec![index],
            ExprKind::Select {
                cond,
                then_expr,
                else_expr,
            } => smallvec![cond, then_expr, else_expr],
            ExprKind::Concat { left, right }
            | ExprKind::Binary { left, right, .. }
            | ExprKind::Compare { left, right, .. } => smallvec![left, right],
        }
    }

    /// Same variant with the same non-child payload (operator, offset,
    /// constant value, update list). Children are not compared.
    pub fn same_shape(&self, other: &ExprKind) -> bool {
        match (self, other) {
            (ExprKind::Constant(a), ExprKind::Constant(b)) => a == b,
            (ExprKind::Read { updates: a, .. }, ExprKind::Read { updates: b, .. }) => {
                a.root == b.root
            }
            (ExprKind::Extract { offset: a, .. }, ExprKind::Extract { offset: b, .. }) => a == b,
            (ExprKind::Binary { op: a, .. }, ExprKind::Binary { op: b, .. }) => a == b,
            (ExprKind::Compare { op: a, .. }, ExprKind::Compare { op: b, .. }) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Expr {
    pub fn new(width: Width, kind: ExprKind) -> Self {
        Expr { width, kind }
    }

    #[inline]
    pub fn is_bool(&self) -> bool {
        self.width == width::BOOL
    }

    #[inline]
    pub fn as_constant(&self) -> Option<&Constant> {
        match &self.kind {
            ExprKind::Constant(c) => Some(c),
            _ => None,
        }
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        matches!(self.kind, ExprKind::Constant(_))
    }

    /// The boolean constant `false`.
    pub fn is_false(&self) -> bool {
        self.as_constant().is_some_and(Constant::is_false)
    }

    #[inline]
    pub fn kids(&self) -> Kids {
        self.kind.kids()
    }
}
