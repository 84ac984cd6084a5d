//! Bit-vector constants of arbitrary width.
//!
//! Values are kept as unsigned integers reduced modulo `2^width`. Widths are
//! not bounded by machine words, so the value is a `BigUint`.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use crate::width::{self, Width};

/// A constant bit-vector value.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Constant {
    width: Width,
    value: BigUint,
}

impl Constant {
    /// Create a constant from a machine integer, truncated to `width`.
    pub fn new(value: u64, width: Width) -> Self {
        Self::from_biguint(BigUint::from(value), width)
    }

    /// Create a constant from an arbitrary-precision value, truncated to `width`.
    pub fn from_biguint(value: BigUint, width: Width) -> Self {
        let value = value % modulus(width);
        Constant { width, value }
    }

    /// Boolean constant (`w1`).
    pub fn bool(value: bool) -> Self {
        Constant::new(u64::from(value), width::BOOL)
    }

    /// Zero of the given width.
    pub fn zero(width: Width) -> Self {
        Constant {
            width,
            value: BigUint::zero(),
        }
    }

    /// The all-ones value (`-1`) of the given width.
    pub fn all_ones(width: Width) -> Self {
        Constant {
            width,
            value: modulus(width) - BigUint::one(),
        }
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// The zero-extended value if it fits in 64 bits.
    pub fn to_u64(&self) -> Option<u64> {
        self.value.to_u64()
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// True for the boolean constant `true` only.
    pub fn is_true(&self) -> bool {
        self.width == width::BOOL && self.value.is_one()
    }

    /// True for the boolean constant `false` only.
    pub fn is_false(&self) -> bool {
        self.width == width::BOOL && self.value.is_zero()
    }

    /// Addition modulo `2^width`. Both operands must have the same width.
    #[must_use]
    pub fn wrapping_add(&self, rhs: &Constant) -> Constant {
        debug_assert_eq!(self.width, rhs.width);
        Constant::from_biguint(&self.value + &rhs.value, self.width)
    }

    /// Two's complement negation.
    #[must_use]
    pub fn wrapping_neg(&self) -> Constant {
        Constant::from_biguint(modulus(self.width) - &self.value, self.width)
    }

    /// Subtraction modulo `2^width`. Both operands must have the same width.
    #[must_use]
    pub fn wrapping_sub(&self, rhs: &Constant) -> Constant {
        self.wrapping_add(&rhs.wrapping_neg())
    }
}

fn modulus(width: Width) -> BigUint {
    BigUint::one() << width
}
