//! Arena storage for expressions, update nodes and arrays.
//!
//! - All nodes live in flat `Vec`s indexed by their handle
//! - Children are handles, never owned boxes
//! - Nothing is ever removed, so handles stay valid for the arena's lifetime
//!
//! The arena is read-only while it is being printed and can be shared
//! across threads by reference.

use crate::array::{Array, UpdateList, UpdateNode};
use crate::expr::{Expr, Kids};
use crate::{ArrayId, ExprId, UpdateId};

/// Contiguous storage for one expression DAG.
#[derive(Clone, Default, Debug)]
pub struct ExprArena {
    /// All expressions (indexed by `ExprId`).
    exprs: Vec<Expr>,

    /// All update nodes (indexed by `UpdateId`).
    updates: Vec<UpdateNode>,

    /// All arrays (indexed by `ArrayId`).
    arrays: Vec<Array>,
}

impl ExprArena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Expressions =====

    /// Allocate an expression, return its handle.
    ///
    /// # Panics
    /// Panics if a child handle does not already exist in this arena.
    #[track_caller]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::from_len(self.exprs.len());
        for kid in expr.kids() {
            assert!(kid < id, "{kid:?} is not allocated before {id:?}");
        }
        self.exprs.push(expr);
        id
    }

    /// Get an expression by handle.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Children of an expression.
    #[inline]
    #[track_caller]
    pub fn kids(&self, id: ExprId) -> Kids {
        self.get(id).kids()
    }

    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    // ===== Update nodes =====

    /// Allocate an update node, return its handle.
    ///
    /// # Panics
    /// Panics if `node.next` or its index/value are not already allocated.
    /// This keeps every chain finite and acyclic.
    #[track_caller]
    pub fn alloc_update(&mut self, node: UpdateNode) -> UpdateId {
        let id = UpdateId::from_len(self.updates.len());
        if let Some(next) = node.next {
            assert!(next < id, "update link {next:?} does not precede {id:?}");
        }
        assert!(node.index.index() < self.exprs.len(), "dangling update index");
        assert!(node.value.index() < self.exprs.len(), "dangling update value");
        self.updates.push(node);
        id
    }

    /// Get an update node by handle.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn update_node(&self, id: UpdateId) -> &UpdateNode {
        &self.updates[id.index()]
    }

    #[inline]
    pub fn update_count(&self) -> usize {
        self.updates.len()
    }

    /// Walk an update list from the newest store to the oldest.
    pub fn update_chain(&self, list: UpdateList) -> UpdateChain<'_> {
        UpdateChain {
            arena: self,
            cursor: list.head,
        }
    }

    // ===== Arrays =====

    pub(crate) fn alloc_array(&mut self, array: Array) -> ArrayId {
        let id = ArrayId::from_len(self.arrays.len());
        self.arrays.push(array);
        id
    }

    /// Get an array by handle.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn array(&self, id: ArrayId) -> &Array {
        &self.arrays[id.index()]
    }

    #[inline]
    pub fn array_count(&self) -> usize {
        self.arrays.len()
    }
}

/// Iterator over an update chain, newest first.
pub struct UpdateChain<'a> {
    arena: &'a ExprArena,
    cursor: Option<UpdateId>,
}

impl<'a> Iterator for UpdateChain<'a> {
    type Item = (UpdateId, &'a UpdateNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.arena.update_node(id);
        self.cursor = node.next;
        Some((id, node))
    }
}
