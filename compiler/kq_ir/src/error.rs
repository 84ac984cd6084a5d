//! Construction errors.

use crate::width::Width;

/// A builder call whose operands violate the expression typing rules.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("operand widths differ: w{left} vs w{right}")]
    WidthMismatch { left: Width, right: Width },

    #[error("array index must be w32, found w{0}")]
    IndexWidth(Width),

    #[error("array element must be w8, found w{0}")]
    ValueWidth(Width),

    #[error("extract of w{width} at offset {offset} exceeds source width w{source_width}")]
    ExtractOutOfRange {
        offset: Width,
        width: Width,
        source_width: Width,
    },

    #[error("cannot extend w{from} to w{to}")]
    BadExtension { from: Width, to: Width },

    #[error("expression width must be non-zero")]
    ZeroWidth,

    #[error("expected a boolean expression, found w{0}")]
    NotBoolean(Width),

    #[error("array `{0}` must have at least one element")]
    EmptyArray(String),
}
