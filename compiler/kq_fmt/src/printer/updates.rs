//! Update list printing.
//!
//! A list prints as bracketed `index=value` runs, newest store first,
//! followed by `@ <array>`. A run closes wherever a shared update node
//! begins; that node opens a new run under its `U<k>:` label on a fresh
//! line aligned with the start of the list. An already-labeled node ends
//! the list with a bare `U<k>`.
//!
//! Inside a run, pairs stay on one line while the previous pair was fully
//! constant.

use kq_ir::UpdateList;

use super::Printer;
use crate::context::PrintContext;
use crate::emitter::Emitter;

impl Printer<'_> {
    pub(super) fn print_update_list<E: Emitter>(
        &mut self,
        ctx: &mut PrintContext<E>,
        updates: UpdateList,
    ) {
        let arena = self.arena;
        let root_name = arena.array(updates.root).name();
        let Some(head) = updates.head else {
            ctx.emit(root_name);
            return;
        };

        let mut opened_list = false;
        let mut next_should_break = false;
        let outer_indent = ctx.column();
        let mut middle_indent = 0;

        for (id, node) in arena.update_chain(updates) {
            if let Some(label) = self.binder.update(id) {
                if opened_list {
                    ctx.emit("] @ ");
                }
                ctx.emit_display(format_args!("U{label}"));
                return;
            }

            if !self.has_scan || self.scanner.is_shared_update(id) {
                if opened_list {
                    ctx.emit("] @");
                }
                if id != head {
                    ctx.break_line(outer_indent);
                }
                let label = self.binder.bind_update(id);
                ctx.emit_display(format_args!("U{label}:"));
                opened_list = false;
                next_should_break = false;
            }

            if opened_list {
                ctx.emit(",");
                self.print_separator(ctx, !next_should_break, middle_indent);
            } else {
                opened_list = true;
                ctx.emit("[");
                middle_indent = ctx.column();
            }

            self.print(ctx, node.index, false);
            ctx.emit("=");
            self.print(ctx, node.value, false);

            next_should_break =
                !(arena.get(node.index).is_constant() && arena.get(node.value).is_constant());
        }

        if opened_list {
            ctx.emit("]");
        }
        ctx.emit(" @ ");
        ctx.emit(root_name);
    }
}
