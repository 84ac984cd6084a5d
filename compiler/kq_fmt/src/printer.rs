//! Sharing-aware expression printer.
//!
//! A [`Printer`] holds the state of one printing session: the sharing sets
//! collected by [`scan`](Printer::scan) and the labels bound so far. Nodes
//! reached more than once print as `N<k>:(...)` the first time and as
//! `N<k>` afterwards. Update nodes use `U<k>` the same way.
//!
//! Without a prior scan every node is labeled, which is how single
//! expressions are printed when sharing is unknown.
//!
//! # Layout
//!
//! Operands go on one line when every one of them is simple. Otherwise each
//! operand after the first starts on a new line aligned under the first.
//! Simplicity looks one level ahead: an operand is simple when its own
//! operands are constants or already labeled.

mod literals;
mod updates;

use kq_ir::{Expr, ExprArena, ExprId, ExprKind, UpdateId, UpdateList};
use kq_stack::ensure_sufficient_stack;

use crate::binder::Binder;
use crate::config::PrintConfig;
use crate::context::PrintContext;
use crate::emitter::Emitter;
use crate::multibyte;
use crate::scan::Scanner;

/// Printer state for one session over one arena.
pub struct Printer<'a> {
    arena: &'a ExprArena,
    config: PrintConfig,
    scanner: Scanner,
    binder: Binder,
    has_scan: bool,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a ExprArena, config: PrintConfig) -> Self {
        Self {
            arena,
            config,
            scanner: Scanner::new(),
            binder: Binder::new(),
            has_scan: false,
        }
    }

    pub fn arena(&self) -> &'a ExprArena {
        self.arena
    }

    pub fn config(&self) -> &PrintConfig {
        &self.config
    }

    /// Forget all sharing information and labels.
    pub fn reset(&mut self) {
        self.scanner.clear();
        self.binder.clear();
        self.has_scan = false;
    }

    /// Add everything reachable from `root` to the sharing analysis.
    ///
    /// Call once per root before printing any of them.
    pub fn scan(&mut self, root: ExprId) {
        self.scanner.scan(self.arena, root);
        self.has_scan = true;
        tracing::trace!(
            reachable = self.scanner.reachable_count(),
            shared = self.scanner.shared_count(),
            shared_updates = self.scanner.shared_update_count(),
            "scanned root"
        );
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn binder(&self) -> &Binder {
        &self.binder
    }

    /// Print `expr` as if the output already stood at column `column`.
    pub fn print_at<E: Emitter>(&mut self, ctx: &mut PrintContext<E>, expr: ExprId, column: usize) {
        ctx.set_column(column);
        self.print(ctx, expr, false);
    }

    /// Print `expr`. `print_const_width` wraps a non-boolean constant in
    /// `(w<W> ...)`.
    pub fn print<E: Emitter>(
        &mut self,
        ctx: &mut PrintContext<E>,
        id: ExprId,
        print_const_width: bool,
    ) {
        let arena = self.arena;
        let expr = arena.get(id);
        if let Some(value) = expr.as_constant() {
            self.print_const(ctx, value, print_const_width);
            return;
        }
        if let Some(label) = self.binder.expr(id) {
            ctx.emit_display(format_args!("N{label}"));
            return;
        }
        if !self.has_scan || self.scanner.is_shared(id) {
            let label = self.binder.bind_expr(id);
            ctx.emit_display(format_args!("N{label}:"));
        }

        if self.config.multibyte_reads()
            && matches!(expr.kind, ExprKind::Concat { .. })
            && self.print_multibyte(ctx, id, expr)
        {
            return;
        }

        ctx.emit("(");
        ctx.emit(expr.kind.tag());
        self.print_width(ctx, expr);
        ctx.emit(" ");
        let indent = ctx.column();
        ensure_sufficient_stack(|| match expr.kind {
            ExprKind::Read { updates, index } => self.print_read(ctx, updates, index, indent),
            ExprKind::Extract { src, offset } => {
                ctx.emit_display(format_args!("{offset} "));
                self.print(ctx, src, false);
            }
            _ => self.print_kids(ctx, expr, indent),
        });
        ctx.emit(")");
    }

    /// A space when `simple`, otherwise a line break to `indent`.
    pub fn print_separator<E: Emitter>(
        &self,
        ctx: &mut PrintContext<E>,
        simple: bool,
        indent: usize,
    ) {
        if simple {
            ctx.emit_space();
        } else {
            ctx.break_line(indent);
        }
    }

    fn print_multibyte<E: Emitter>(
        &mut self,
        ctx: &mut PrintContext<E>,
        id: ExprId,
        expr: &Expr,
    ) -> bool {
        let Some(read) = multibyte::detect(self.arena, id) else {
            return false;
        };
        tracing::trace!(
            expr = ?id,
            order = ?read.order,
            width = expr.width,
            "collapsed byte reads"
        );

        ctx.emit("(");
        ctx.emit(read.order.tag());
        self.print_width(ctx, expr);
        ctx.emit(" ");
        let indent = ctx.column();
        self.print_read(ctx, read.updates, read.index, indent);
        ctx.emit(")");
        true
    }

    fn print_read<E: Emitter>(
        &mut self,
        ctx: &mut PrintContext<E>,
        updates: UpdateList,
        index: ExprId,
        indent: usize,
    ) {
        self.print(ctx, index, false);
        self.print_separator(ctx, self.is_very_simple(index), indent);
        self.print_update_list(ctx, updates);
    }

    fn print_kids<E: Emitter>(&mut self, ctx: &mut PrintContext<E>, expr: &Expr, indent: usize) {
        let simple = self.has_simple_kids(expr);
        for (i, kid) in expr.kids().into_iter().enumerate() {
            if i > 0 {
                self.print_separator(ctx, simple, indent);
            }
            self.print(ctx, kid, true);
        }
    }

    fn print_width<E: Emitter>(&self, ctx: &mut PrintContext<E>, expr: &Expr) {
        if !self.should_print_width(expr) {
            return;
        }
        if self.config.width_as_arg() {
            ctx.emit_space();
            if self.config.prefix_width() {
                ctx.emit("w");
            }
        }
        ctx.emit_display(expr.width);
    }

    fn should_print_width(&self, expr: &Expr) -> bool {
        self.config.all_widths() || !expr.is_bool()
    }

    // ===== Layout look-ahead =====

    /// Constant or already labeled.
    fn is_very_simple(&self, id: ExprId) -> bool {
        self.arena.get(id).is_constant() || self.binder.expr(id).is_some()
    }

    fn is_very_simple_update(&self, head: Option<UpdateId>) -> bool {
        match head {
            Some(update) => self.binder.update(update).is_some(),
            None => true,
        }
    }

    fn is_simple(&self, id: ExprId) -> bool {
        if self.is_very_simple(id) {
            return true;
        }
        let expr = self.arena.get(id);
        match expr.kind {
            ExprKind::Read { updates, index } => {
                self.is_very_simple(index) && self.is_very_simple_update(updates.head)
            }
            _ => expr.kids().into_iter().all(|kid| self.is_very_simple(kid)),
        }
    }

    fn has_simple_kids(&self, expr: &Expr) -> bool {
        expr.kids().into_iter().all(|kid| self.is_simple(kid))
    }
}

#[cfg(test)]
mod tests;
