//! Sharing analysis.
//!
//! A pre-pass over every root of a printing session. Each non-constant node
//! and update node is counted on every path that reaches it; the second
//! arrival marks it as shared. Only shared nodes get a label when printed,
//! so an expression used once is printed inline even under a shared parent.
//!
//! Descendants are visited only on the first arrival.

use std::collections::BTreeSet;

use kq_ir::{ArrayId, ExprArena, ExprId, ExprKind, UpdateId, UpdateList};
use kq_stack::ensure_sufficient_stack;
use rustc_hash::FxHashSet;

/// Reachability and sharing sets accumulated across scans.
#[derive(Default, Debug)]
pub struct Scanner {
    could_print: FxHashSet<ExprId>,
    should_print: FxHashSet<ExprId>,
    could_print_updates: FxHashSet<UpdateId>,
    should_print_updates: FxHashSet<UpdateId>,
    /// Root arrays of every reachable read, in declaration order.
    used_arrays: BTreeSet<ArrayId>,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every node reachable from `root`.
    pub fn scan(&mut self, arena: &ExprArena, root: ExprId) {
        ensure_sufficient_stack(|| {
            let expr = arena.get(root);
            if expr.is_constant() {
                return;
            }
            if !self.could_print.insert(root) {
                self.should_print.insert(root);
                return;
            }
            for kid in expr.kids() {
                self.scan(arena, kid);
            }
            if let ExprKind::Read { updates, .. } = expr.kind {
                self.used_arrays.insert(updates.root);
                self.scan_updates(arena, updates);
            }
        });
    }

    /// Walk an update chain until it meets a node seen before.
    ///
    /// The chain is followed iteratively; only the stored index and value
    /// recurse.
    fn scan_updates(&mut self, arena: &ExprArena, updates: UpdateList) {
        for (id, node) in arena.update_chain(updates) {
            if !self.could_print_updates.insert(id) {
                self.should_print_updates.insert(id);
                break;
            }
            self.scan(arena, node.index);
            self.scan(arena, node.value);
        }
    }

    /// Whether `expr` was reached more than once.
    #[inline]
    pub fn is_shared(&self, expr: ExprId) -> bool {
        self.should_print.contains(&expr)
    }

    #[inline]
    pub fn is_shared_update(&self, update: UpdateId) -> bool {
        self.should_print_updates.contains(&update)
    }

    /// Arrays read anywhere in the scanned roots, ordered by handle.
    pub fn used_arrays(&self) -> impl Iterator<Item = ArrayId> + '_ {
        self.used_arrays.iter().copied()
    }

    /// Distinct non-constant expressions reached.
    pub fn reachable_count(&self) -> usize {
        self.could_print.len()
    }

    pub fn shared_count(&self) -> usize {
        self.should_print.len()
    }

    pub fn shared_update_count(&self) -> usize {
        self.should_print_updates.len()
    }

    pub fn clear(&mut self) {
        self.could_print.clear();
        self.should_print.clear();
        self.could_print_updates.clear();
        self.should_print_updates.clear();
        self.used_arrays.clear();
    }
}
