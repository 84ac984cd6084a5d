//! Ordered constraint sets.

use crate::{BuildError, ExprArena, ExprId};

/// Boolean expressions in insertion order.
///
/// Insertion order is print order. Duplicates are kept.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct ConstraintSet {
    constraints: Vec<ExprId>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a constraint.
    ///
    /// # Errors
    /// Returns [`BuildError::NotBoolean`] if `constraint` is not `w1`.
    pub fn push(&mut self, arena: &ExprArena, constraint: ExprId) -> Result<(), BuildError> {
        let expr = arena.get(constraint);
        if !expr.is_bool() {
            return Err(BuildError::NotBoolean(expr.width));
        }
        self.constraints.push(constraint);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = ExprId> + '_ {
        self.constraints.iter().copied()
    }

    pub fn as_slice(&self) -> &[ExprId] {
        &self.constraints
    }
}

#[cfg(test)]
mod tests;
