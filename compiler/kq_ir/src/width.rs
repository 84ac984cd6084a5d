//! Bit widths.

/// Width of an expression in bits.
pub type Width = u32;

pub const BOOL: Width = 1;
pub const INT8: Width = 8;
pub const INT16: Width = 16;
pub const INT32: Width = 32;
pub const INT64: Width = 64;
