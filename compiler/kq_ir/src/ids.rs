//! Arena handles.
//!
//! - `ExprId(u32)` instead of `Rc<Expr>`: 4 bytes, O(1) identity compare
//! - `UpdateId(u32)` for update-list nodes
//! - `ArrayId(u32)` for arrays
//!
//! All three are allocation-ordered: a handle created later compares greater.

use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create a handle from a raw index.
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Create a handle for the next slot of an arena vector.
            ///
            /// # Panics
            /// Panics if the arena has outgrown `u32`.
            #[inline]
            #[track_caller]
            pub(crate) fn from_len(len: usize) -> Self {
                match u32::try_from(len) {
                    Ok(index) => $name(index),
                    Err(_) => panic!(concat!(stringify!($name), " space exhausted")),
                }
            }

            /// Get the index into the arena.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Get the raw u32 value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

arena_id! {
    /// Index into the expression arena.
    ExprId
}

arena_id! {
    /// Index into the update-node arena.
    UpdateId
}

arena_id! {
    /// Index into the array table.
    ArrayId
}
