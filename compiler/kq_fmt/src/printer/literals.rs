//! Constant literals.
//!
//! Booleans print as `true` and `false`. Other constants print in
//! lowercase hexadecimal, `0x`-prefixed up to 64 bits. Wider values are
//! bare hex digits.

use kq_ir::{width, Constant};

use super::Printer;
use crate::context::PrintContext;
use crate::emitter::Emitter;

impl Printer<'_> {
    pub(super) fn print_const<E: Emitter>(
        &self,
        ctx: &mut PrintContext<E>,
        value: &Constant,
        print_width: bool,
    ) {
        if value.width() == width::BOOL {
            ctx.emit(if value.is_true() { "true" } else { "false" });
            return;
        }

        let print_width = print_width || self.config.all_const_widths();
        if print_width {
            ctx.emit_display(format_args!("(w{} ", value.width()));
        }
        emit_hex(ctx, value);
        if print_width {
            ctx.emit(")");
        }
    }
}

fn emit_hex<E: Emitter>(ctx: &mut PrintContext<E>, value: &Constant) {
    match value.to_u64() {
        Some(small) if value.width() <= width::INT64 => {
            ctx.emit_display(format_args!("{small:#x}"));
        }
        _ => ctx.emit(&value.value().to_str_radix(16)),
    }
}
