//! Arrays and update lists.

use crate::width::{self, Width};
use crate::{ArrayId, ExprId, UpdateId};

/// Contents of an array.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ArrayContents {
    /// Every element is unconstrained.
    Symbolic,
    /// Fixed byte values, one per element.
    Concrete(Vec<u8>),
}

/// A named byte array indexed by `w32` values.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Array {
    name: String,
    size: u32,
    contents: ArrayContents,
}

impl Array {
    /// Width of array indices.
    pub const DOMAIN: Width = width::INT32;
    /// Width of array elements.
    pub const RANGE: Width = width::INT8;

    pub(crate) fn new(name: String, size: u32, contents: ArrayContents) -> Self {
        Array {
            name,
            size,
            contents,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn contents(&self) -> &ArrayContents {
        &self.contents
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self.contents, ArrayContents::Symbolic)
    }

    /// Element values of a concrete array.
    pub fn constant_values(&self) -> Option<&[u8]> {
        match &self.contents {
            ArrayContents::Symbolic => None,
            ArrayContents::Concrete(bytes) => Some(bytes),
        }
    }
}

/// One store event: `array[index] = value`, layered over `next`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct UpdateNode {
    pub index: ExprId,
    pub value: ExprId,
    /// The older update, or `None` at the bottom of the chain.
    pub next: Option<UpdateId>,
}

/// An array as of zero or more stores.
///
/// `head` is the most recent store; `None` means the unmodified root array.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct UpdateList {
    pub root: ArrayId,
    pub head: Option<UpdateId>,
}

impl UpdateList {
    /// The unmodified array.
    pub const fn new(root: ArrayId) -> Self {
        UpdateList { root, head: None }
    }

    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}
