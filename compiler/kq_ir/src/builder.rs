//! Expression construction.
//!
//! Construction validates widths and applies a small set of canonicalizing
//! folds on `Add`/`Sub`:
//!
//! - constants fold: `c1 + c2`, `c1 - c2`
//! - constants sit on the left of `Add`: `x + c → c + x`, `0 + x → x`
//! - constant parts bubble up: `(k + x) + y → k + (x + y)`
//! - `x - x → 0`, `x - c → (-c) + x`
//! - `(k + x) - y → k + (x - y)`, `x - (k + y) → (-k) + (x - y)`
//!
//! [`ExprArena::constant_difference`] answers what `sub(l, r)` would fold to
//! without allocating. Byte-offset pattern matching is built on it, so the
//! two must stay in lockstep.

use kq_stack::ensure_sufficient_stack;

use crate::array::{Array, ArrayContents, UpdateList, UpdateNode};
use crate::constant::Constant;
use crate::expr::{BinaryOp, CompareOp, Expr, ExprKind};
use crate::width::{self, Width};
use crate::{ArrayId, BuildError, ExprArena, ExprId};

impl ExprArena {
    // ===== Leaves =====

    /// Allocate a constant of `width` bits.
    ///
    /// # Errors
    /// Returns [`BuildError::ZeroWidth`] for a zero width.
    pub fn constant(&mut self, value: u64, width: Width) -> Result<ExprId, BuildError> {
        if width == 0 {
            return Err(BuildError::ZeroWidth);
        }
        Ok(self.constant_value(Constant::new(value, width)))
    }

    /// Allocate an already-built constant.
    pub fn constant_value(&mut self, value: Constant) -> ExprId {
        let width = value.width();
        self.alloc_expr(Expr::new(width, ExprKind::Constant(value)))
    }

    /// Allocate a boolean constant.
    pub fn bool(&mut self, value: bool) -> ExprId {
        self.constant_value(Constant::bool(value))
    }

    // ===== Arrays and updates =====

    /// Declare a fully symbolic array.
    ///
    /// # Errors
    /// Returns [`BuildError::EmptyArray`] for a zero size.
    pub fn symbolic_array(
        &mut self,
        name: impl Into<String>,
        size: u32,
    ) -> Result<ArrayId, BuildError> {
        let name = name.into();
        if size == 0 {
            return Err(BuildError::EmptyArray(name));
        }
        Ok(self.alloc_array(Array::new(name, size, ArrayContents::Symbolic)))
    }

    /// Declare a concrete array holding `bytes`.
    ///
    /// # Errors
    /// Returns [`BuildError::EmptyArray`] if `bytes` is empty.
    ///
    /// # Panics
    /// Panics if `bytes` has more than `u32::MAX` elements.
    pub fn concrete_array(
        &mut self,
        name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<ArrayId, BuildError> {
        let name = name.into();
        if bytes.is_empty() {
            return Err(BuildError::EmptyArray(name));
        }
        let size =
            u32::try_from(bytes.len()).unwrap_or_else(|_| panic!("array `{name}` too large"));
        Ok(self.alloc_array(Array::new(name, size, ArrayContents::Concrete(bytes))))
    }

    /// Record the store `index = value` on top of `list`.
    ///
    /// # Errors
    /// Returns an error unless `index` is `w32` and `value` is `w8`.
    pub fn update(
        &mut self,
        list: UpdateList,
        index: ExprId,
        value: ExprId,
    ) -> Result<UpdateList, BuildError> {
        self.check_index(index)?;
        let value_width = self.get(value).width;
        if value_width != Array::RANGE {
            return Err(BuildError::ValueWidth(value_width));
        }
        let head = self.alloc_update(UpdateNode {
            index,
            value,
            next: list.head,
        });
        Ok(UpdateList {
            root: list.root,
            head: Some(head),
        })
    }

    // ===== Operators =====

    /// Byte load from `updates` at `index`.
    ///
    /// # Errors
    /// Returns [`BuildError::IndexWidth`] unless `index` is `w32`.
    pub fn read(&mut self, updates: UpdateList, index: ExprId) -> Result<ExprId, BuildError> {
        self.check_index(index)?;
        Ok(self.alloc_expr(Expr::new(Array::RANGE, ExprKind::Read { updates, index })))
    }

    /// Byte load at a constant offset.
    ///
    /// # Errors
    /// Never fails for arrays built by this arena; kept fallible for symmetry.
    pub fn read_at(&mut self, updates: UpdateList, offset: u64) -> Result<ExprId, BuildError> {
        let index = self.constant(offset, Array::DOMAIN)?;
        self.read(updates, index)
    }

    /// `left` concatenated above `right`.
    pub fn concat(&mut self, left: ExprId, right: ExprId) -> Result<ExprId, BuildError> {
        let width = self.get(left).width + self.get(right).width;
        Ok(self.alloc_expr(Expr::new(width, ExprKind::Concat { left, right })))
    }

    /// `width` bits of `src` starting at bit `offset`.
    ///
    /// # Errors
    /// Returns [`BuildError::ExtractOutOfRange`] if the slice leaves `src`.
    pub fn extract(
        &mut self,
        src: ExprId,
        offset: Width,
        width: Width,
    ) -> Result<ExprId, BuildError> {
        if width == 0 {
            return Err(BuildError::ZeroWidth);
        }
        let source_width = self.get(src).width;
        if offset.checked_add(width).map_or(true, |end| end > source_width) {
            return Err(BuildError::ExtractOutOfRange {
                offset,
                width,
                source_width,
            });
        }
        Ok(self.alloc_expr(Expr::new(width, ExprKind::Extract { src, offset })))
    }

    /// Zero-extend `src` to `width` bits.
    pub fn zext(&mut self, src: ExprId, width: Width) -> Result<ExprId, BuildError> {
        self.check_extension(src, width)?;
        Ok(self.alloc_expr(Expr::new(width, ExprKind::ZExt { src })))
    }

    /// Sign-extend `src` to `width` bits.
    pub fn sext(&mut self, src: ExprId, width: Width) -> Result<ExprId, BuildError> {
        self.check_extension(src, width)?;
        Ok(self.alloc_expr(Expr::new(width, ExprKind::SExt { src })))
    }

    /// Bitwise negation.
    pub fn not(&mut self, src: ExprId) -> Result<ExprId, BuildError> {
        let width = self.get(src).width;
        Ok(self.alloc_expr(Expr::new(width, ExprKind::Not { src })))
    }

    /// Opaque wrapper that downstream simplifiers leave alone.
    pub fn not_optimized(&mut self, src: ExprId) -> Result<ExprId, BuildError> {
        let width = self.get(src).width;
        Ok(self.alloc_expr(Expr::new(width, ExprKind::NotOptimized { src })))
    }

    /// `cond ? then_expr : else_expr`
    ///
    /// # Errors
    /// `cond` must be boolean and both arms must have the same width.
    pub fn select(
        &mut self,
        cond: ExprId,
        then_expr: ExprId,
        else_expr: ExprId,
    ) -> Result<ExprId, BuildError> {
        let cond_width = self.get(cond).width;
        if cond_width != width::BOOL {
            return Err(BuildError::NotBoolean(cond_width));
        }
        let width = self.same_width(then_expr, else_expr)?;
        Ok(self.alloc_expr(Expr::new(
            width,
            ExprKind::Select {
                cond,
                then_expr,
                else_expr,
            },
        )))
    }

    /// Two-operand operator. `Add` and `Sub` go through their folds.
    pub fn binary(
        &mut self,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    ) -> Result<ExprId, BuildError> {
        match op {
            BinaryOp::Add => self.add(left, right),
            BinaryOp::Sub => self.sub(left, right),
            _ => {
                let width = self.same_width(left, right)?;
                Ok(self.alloc_expr(Expr::new(width, ExprKind::Binary { op, left, right })))
            }
        }
    }

    /// Comparison. `Eq` of two constants folds to a boolean constant.
    pub fn compare(
        &mut self,
        op: CompareOp,
        left: ExprId,
        right: ExprId,
    ) -> Result<ExprId, BuildError> {
        self.same_width(left, right)?;
        if op == CompareOp::Eq {
            if let (Some(a), Some(b)) =
                (self.get(left).as_constant(), self.get(right).as_constant())
            {
                let equal = a == b;
                return Ok(self.bool(equal));
            }
        }
        Ok(self.alloc_expr(Expr::new(width::BOOL, ExprKind::Compare { op, left, right })))
    }

    pub fn eq(&mut self, left: ExprId, right: ExprId) -> Result<ExprId, BuildError> {
        self.compare(CompareOp::Eq, left, right)
    }

    /// Canonicalizing addition.
    pub fn add(&mut self, left: ExprId, right: ExprId) -> Result<ExprId, BuildError> {
        let width = self.same_width(left, right)?;
        ensure_sufficient_stack(|| {
            match (self.constant_of(left), self.constant_of(right)) {
                (Some(a), Some(b)) => return Ok(self.constant_value(a.wrapping_add(&b))),
                (Some(a), None) => {
                    if a.is_zero() {
                        return Ok(right);
                    }
                    if let Some((k, y)) = self.split_constant_add(right) {
                        let sum = self.constant_value(a.wrapping_add(&k));
                        return self.add(sum, y);
                    }
                }
                (None, Some(_)) => return self.add(right, left),
                (None, None) => {
                    if let Some((k, x)) = self.split_constant_add(left) {
                        let rest = self.add(x, right)?;
                        let k = self.constant_value(k);
                        return self.add(k, rest);
                    }
                    if let Some((k, y)) = self.split_constant_add(right) {
                        let rest = self.add(left, y)?;
                        let k = self.constant_value(k);
                        return self.add(k, rest);
                    }
                }
            }
            Ok(self.alloc_binary(BinaryOp::Add, width, left, right))
        })
    }

    /// Canonicalizing subtraction.
    pub fn sub(&mut self, left: ExprId, right: ExprId) -> Result<ExprId, BuildError> {
        let width = self.same_width(left, right)?;
        ensure_sufficient_stack(|| {
            let (l, r) = (self.constant_of(left), self.constant_of(right));
            if let (Some(a), Some(b)) = (&l, &r) {
                return Ok(self.constant_value(a.wrapping_sub(b)));
            }
            if self.structurally_equal(left, right) {
                return Ok(self.constant_value(Constant::zero(width)));
            }
            if let Some(b) = r {
                let negated = self.constant_value(b.wrapping_neg());
                return self.add(negated, left);
            }
            if let Some((k, x)) = self.split_constant_add(left) {
                let rest = self.sub(x, right)?;
                let k = self.constant_value(k);
                return self.add(k, rest);
            }
            if let Some((k, y)) = self.split_constant_add(right) {
                let rest = self.sub(left, y)?;
                let negated = self.constant_value(k.wrapping_neg());
                return self.add(negated, rest);
            }
            Ok(self.alloc_binary(BinaryOp::Sub, width, left, right))
        })
    }

    // ===== Read-only folding =====

    /// The constant `sub(left, right)` would fold to, if any.
    ///
    /// Follows exactly the rules of [`ExprArena::sub`], so two indices built
    /// through `add` from a common base are recognized as a fixed distance
    /// apart, while semantically equal but differently built indices are not.
    pub fn constant_difference(&self, left: ExprId, right: ExprId) -> Option<Constant> {
        let (l, r) = (self.get(left), self.get(right));
        if l.width != r.width {
            return None;
        }
        if let (Some(a), Some(b)) = (l.as_constant(), r.as_constant()) {
            return Some(a.wrapping_sub(b));
        }
        ensure_sufficient_stack(|| {
            if self.structurally_equal(left, right) {
                return Some(Constant::zero(l.width));
            }
            if r.is_constant() {
                return None;
            }
            if let Some((k, x)) = self.split_constant_add(left) {
                return self
                    .constant_difference(x, right)
                    .map(|rest| k.wrapping_add(&rest));
            }
            if let Some((k, y)) = self.split_constant_add(right) {
                return self
                    .constant_difference(left, y)
                    .map(|rest| rest.wrapping_sub(&k));
            }
            None
        })
    }

    /// Deep structural comparison.
    ///
    /// Handle equality short-circuits; otherwise nodes match when they have
    /// the same width, the same shape and pairwise equal children.
    pub fn structurally_equal(&self, a: ExprId, b: ExprId) -> bool {
        if a == b {
            return true;
        }
        let (ea, eb) = (self.get(a), self.get(b));
        if ea.width != eb.width || !ea.kind.same_shape(&eb.kind) {
            return false;
        }
        if let (ExprKind::Read { updates: ua, .. }, ExprKind::Read { updates: ub, .. }) =
            (&ea.kind, &eb.kind)
        {
            if !self.updates_equal(*ua, *ub) {
                return false;
            }
        }
        ensure_sufficient_stack(|| {
            ea.kids()
                .into_iter()
                .zip(eb.kids())
                .all(|(ka, kb)| self.structurally_equal(ka, kb))
        })
    }

    fn updates_equal(&self, a: UpdateList, b: UpdateList) -> bool {
        if a.root != b.root {
            return false;
        }
        let mut left = self.update_chain(a);
        let mut right = self.update_chain(b);
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some((ia, _)), Some((ib, _))) if ia == ib => return true,
                (Some((_, na)), Some((_, nb))) => {
                    if !self.structurally_equal(na.index, nb.index)
                        || !self.structurally_equal(na.value, nb.value)
                    {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }

    // ===== Helpers =====

    fn constant_of(&self, id: ExprId) -> Option<Constant> {
        self.get(id).as_constant().cloned()
    }

    /// `k + x` with a constant `k` on the left.
    fn split_constant_add(&self, id: ExprId) -> Option<(Constant, ExprId)> {
        match self.get(id).kind {
            ExprKind::Binary {
                op: BinaryOp::Add,
                left,
                right,
            } => self.constant_of(left).map(|k| (k, right)),
            _ => None,
        }
    }

    fn alloc_binary(&mut self, op: BinaryOp, width: Width, left: ExprId, right: ExprId) -> ExprId {
        self.alloc_expr(Expr::new(width, ExprKind::Binary { op, left, right }))
    }

    fn same_width(&self, left: ExprId, right: ExprId) -> Result<Width, BuildError> {
        let (l, r) = (self.get(left).width, self.get(right).width);
        if l == r {
            Ok(l)
        } else {
            Err(BuildError::WidthMismatch { left: l, right: r })
        }
    }

    fn check_index(&self, index: ExprId) -> Result<(), BuildError> {
        let width = self.get(index).width;
        if width == Array::DOMAIN {
            Ok(())
        } else {
            Err(BuildError::IndexWidth(width))
        }
    }

    fn check_extension(&self, src: ExprId, width: Width) -> Result<(), BuildError> {
        let from = self.get(src).width;
        if width < from {
            return Err(BuildError::BadExtension { from, to: width });
        }
        Ok(())
    }
}
