//! kquery IR - symbolic expressions over byte arrays
//!
//! This crate holds the data the query printer reads:
//! - Expressions: an immutable DAG of bit-vector nodes addressed by [`ExprId`]
//! - Arrays: named byte arrays, symbolic or concrete, addressed by [`ArrayId`]
//! - Update lists: append-only store logs layered over an array
//! - Constraint sets: ordered boolean expressions
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: no `Rc<Expr>`, children are `ExprId(u32)` indices
//!   into one [`ExprArena`]
//! - **Identity is the handle**: two `ExprId`s are the same node iff they are
//!   equal. Structurally equal nodes allocated twice are distinct, which is
//!   what sharing detection keys on.
//! - **Acyclic by construction**: a node can only point at ids that already
//!   exist, so neither expressions nor update chains can form cycles.
//!
//! Construction helpers live on [`ExprArena`] (see `builder`) and apply the
//! canonicalizing folds that downstream pattern matching depends on.

mod arena;
mod array;
mod builder;
mod constant;
mod constraints;
mod error;
mod expr;
mod ids;
pub mod width;

pub use arena::{ExprArena, UpdateChain};
pub use array::{Array, ArrayContents, UpdateList, UpdateNode};
pub use constant::Constant;
pub use constraints::ConstraintSet;
pub use error::BuildError;
pub use expr::{BinaryOp, CompareOp, Expr, ExprKind, Kids};
pub use ids::{ArrayId, ExprId, UpdateId};
pub use width::Width;

/// Arbitrary-precision value type carried by [`Constant`].
pub use num_bigint::BigUint;
