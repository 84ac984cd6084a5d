//! Label assignment.
//!
//! Expressions and update nodes draw from separate counters, so `N0` and
//! `U0` can coexist. Labels are handed out in print order.

use kq_ir::{ExprId, UpdateId};
use rustc_hash::FxHashMap;

/// Labels bound so far in one printing session.
#[derive(Default, Debug)]
pub struct Binder {
    exprs: FxHashMap<ExprId, u32>,
    updates: FxHashMap<UpdateId, u32>,
    next_expr: u32,
    next_update: u32,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn expr(&self, expr: ExprId) -> Option<u32> {
        self.exprs.get(&expr).copied()
    }

    /// Give `expr` the next `N` label.
    pub fn bind_expr(&mut self, expr: ExprId) -> u32 {
        debug_assert!(!self.exprs.contains_key(&expr), "{expr:?} bound twice");
        let label = self.next_expr;
        self.next_expr += 1;
        self.exprs.insert(expr, label);
        label
    }

    #[inline]
    pub fn update(&self, update: UpdateId) -> Option<u32> {
        self.updates.get(&update).copied()
    }

    /// Give `update` the next `U` label.
    pub fn bind_update(&mut self, update: UpdateId) -> u32 {
        debug_assert!(!self.updates.contains_key(&update), "{update:?} bound twice");
        let label = self.next_update;
        self.next_update += 1;
        self.updates.insert(update, label);
        label
    }

    /// Number of `N` labels handed out.
    pub fn expr_count(&self) -> u32 {
        self.next_expr
    }

    pub fn update_count(&self) -> u32 {
        self.next_update
    }

    pub fn clear(&mut self) {
        self.exprs.clear();
        self.updates.clear();
        self.next_expr = 0;
        self.next_update = 0;
    }
}
