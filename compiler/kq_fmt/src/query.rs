//! Query-level entry points.
//!
//! Every entry point runs one fresh [`Printer`] session: scan all roots,
//! then print them, so labels are shared across constraints, the query
//! expression and the evaluation lists.
//!
//! The `format_*` functions return a `String`. The `write_*` functions
//! stream to an `io::Write` sink and report its first error.

use std::collections::BTreeSet;
use std::fmt;
use std::io;

use kq_ir::{Array, ArrayContents, ArrayId, ConstraintSet, ExprArena, ExprId};

use crate::config::PrintConfig;
use crate::context::PrintContext;
use crate::emitter::{Emitter, StringEmitter, WriterEmitter};
use crate::printer::Printer;

/// A validity query over a constraint set.
#[derive(Clone, Copy, Debug)]
pub struct Query<'q> {
    pub constraints: &'q ConstraintSet,
    /// The queried expression. `None` stands for the constant `false`.
    pub expr: Option<ExprId>,
    /// Expressions whose values are requested.
    pub eval_exprs: &'q [ExprId],
    /// Arrays whose contents are requested. These are always declared.
    pub eval_arrays: &'q [ArrayId],
    /// Emit `array` declarations ahead of the query.
    pub array_decls: bool,
}

impl<'q> Query<'q> {
    pub fn new(constraints: &'q ConstraintSet, expr: ExprId) -> Self {
        Self {
            constraints,
            expr: Some(expr),
            eval_exprs: &[],
            eval_arrays: &[],
            array_decls: true,
        }
    }

    /// Query `false` under `constraints`, i.e. the constraint set alone.
    pub fn constraints_only(constraints: &'q ConstraintSet) -> Self {
        Self {
            constraints,
            expr: None,
            eval_exprs: &[],
            eval_arrays: &[],
            array_decls: true,
        }
    }

    #[must_use]
    pub fn with_eval_exprs(mut self, eval_exprs: &'q [ExprId]) -> Self {
        self.eval_exprs = eval_exprs;
        self
    }

    #[must_use]
    pub fn with_eval_arrays(mut self, eval_arrays: &'q [ArrayId]) -> Self {
        self.eval_arrays = eval_arrays;
        self
    }

    #[must_use]
    pub fn with_array_decls(mut self, array_decls: bool) -> Self {
        self.array_decls = array_decls;
        self
    }

    fn expr_is_false(&self, arena: &ExprArena) -> bool {
        match self.expr {
            Some(expr) => arena.get(expr).is_false(),
            None => true,
        }
    }
}

/// Print a full `(query ...)` form, array declarations included.
pub fn print_query<E: Emitter>(
    ctx: &mut PrintContext<E>,
    arena: &ExprArena,
    query: &Query<'_>,
    config: PrintConfig,
) {
    tracing::debug!(
        constraints = query.constraints.len(),
        eval_exprs = query.eval_exprs.len(),
        eval_arrays = query.eval_arrays.len(),
        "printing query"
    );

    let mut printer = Printer::new(arena, config);
    for constraint in query.constraints.iter() {
        printer.scan(constraint);
    }
    if let Some(expr) = query.expr {
        printer.scan(expr);
    }
    for &expr in query.eval_exprs {
        printer.scan(expr);
    }

    if query.array_decls {
        let mut arrays: BTreeSet<ArrayId> = printer.scanner().used_arrays().collect();
        arrays.extend(query.eval_arrays.iter().copied());
        for id in arrays {
            print_array_decl(ctx, arena.array(id));
            ctx.break_line(0);
        }
    }

    ctx.emit("(query [");
    let indent = ctx.column();
    let outer = indent.saturating_sub(1);

    for (i, constraint) in query.constraints.iter().enumerate() {
        if i > 0 {
            ctx.break_line(indent);
        }
        printer.print(ctx, constraint, true);
    }
    ctx.emit("]");

    printer.print_separator(ctx, query.constraints.is_empty(), outer);
    match query.expr {
        Some(expr) => printer.print(ctx, expr, true),
        None => ctx.emit("false"),
    }

    if !query.eval_exprs.is_empty() {
        printer.print_separator(ctx, query.expr_is_false(arena), outer);
        ctx.emit("[");
        for (i, &expr) in query.eval_exprs.iter().enumerate() {
            if i > 0 {
                ctx.break_line(indent);
            }
            printer.print(ctx, expr, true);
        }
        ctx.emit("]");
    }

    if !query.eval_arrays.is_empty() {
        if query.eval_exprs.is_empty() {
            ctx.emit(" []");
        }
        ctx.break_line(outer);
        ctx.emit("[");
        for (i, &id) in query.eval_arrays.iter().enumerate() {
            if i > 0 {
                ctx.break_line(indent);
            }
            ctx.emit(arena.array(id).name());
        }
        ctx.emit("]");
    }

    ctx.emit(")");
    ctx.break_line(0);

    tracing::debug!(
        expr_labels = printer.binder().expr_count(),
        update_labels = printer.binder().update_count(),
        "query printed"
    );
}

/// `array <name>[<size>] : w32 -> w8 = symbolic` or `= [0x.. ...]`.
fn print_array_decl<E: Emitter>(ctx: &mut PrintContext<E>, array: &Array) {
    ctx.emit_display(format_args!(
        "array {}[{}] : w{} -> w{} = ",
        array.name(),
        array.size(),
        Array::DOMAIN,
        Array::RANGE
    ));
    match array.contents() {
        ArrayContents::Symbolic => ctx.emit("symbolic"),
        ArrayContents::Concrete(bytes) => {
            ctx.emit("[");
            for (i, byte) in bytes.iter().enumerate() {
                if i > 0 {
                    ctx.emit_space();
                }
                ctx.emit_display(format_args!("{byte:#x}"));
            }
            ctx.emit("]");
        }
    }
}

/// Print `<message>: <expr>` followed by a line break.
pub fn print_one<E: Emitter>(
    ctx: &mut PrintContext<E>,
    arena: &ExprArena,
    message: &str,
    expr: ExprId,
    config: PrintConfig,
) {
    let mut printer = Printer::new(arena, config);
    printer.scan(expr);
    ctx.emit(message);
    ctx.emit(": ");
    printer.print(ctx, expr, false);
    ctx.break_line(0);
}

/// Print one expression with sharing labels and no trailing line break.
pub fn print_single_expr<E: Emitter>(
    ctx: &mut PrintContext<E>,
    arena: &ExprArena,
    expr: ExprId,
    config: PrintConfig,
) {
    let mut printer = Printer::new(arena, config);
    printer.scan(expr);
    printer.print(ctx, expr, false);
}

fn format_with(config: PrintConfig, f: impl FnOnce(&mut PrintContext<StringEmitter>)) -> String {
    let mut ctx = PrintContext::new().with_newline(config.newline);
    f(&mut ctx);
    ctx.finalize()
}

fn write_with<W: io::Write>(
    writer: W,
    config: PrintConfig,
    f: impl FnOnce(&mut PrintContext<WriterEmitter<W>>),
) -> io::Result<()> {
    let mut ctx =
        PrintContext::with_emitter(WriterEmitter::new(writer)).with_newline(config.newline);
    f(&mut ctx);
    ctx.into_emitter().finish().map(drop)
}

pub fn format_query(arena: &ExprArena, query: &Query<'_>, config: PrintConfig) -> String {
    format_with(config, |ctx| print_query(ctx, arena, query, config))
}

/// # Errors
///
/// Returns the first error raised by `writer`.
pub fn write_query<W: io::Write>(
    writer: W,
    arena: &ExprArena,
    query: &Query<'_>,
    config: PrintConfig,
) -> io::Result<()> {
    write_with(writer, config, |ctx| print_query(ctx, arena, query, config))
}

/// Print a constraint set as a query of `false`.
pub fn format_constraints(
    arena: &ExprArena,
    constraints: &ConstraintSet,
    config: PrintConfig,
) -> String {
    format_query(arena, &Query::constraints_only(constraints), config)
}

/// # Errors
///
/// Returns the first error raised by `writer`.
pub fn write_constraints<W: io::Write>(
    writer: W,
    arena: &ExprArena,
    constraints: &ConstraintSet,
    config: PrintConfig,
) -> io::Result<()> {
    write_query(writer, arena, &Query::constraints_only(constraints), config)
}

pub fn format_one(arena: &ExprArena, message: &str, expr: ExprId, config: PrintConfig) -> String {
    format_with(config, |ctx| print_one(ctx, arena, message, expr, config))
}

/// # Errors
///
/// Returns the first error raised by `writer`.
pub fn write_one<W: io::Write>(
    writer: W,
    arena: &ExprArena,
    message: &str,
    expr: ExprId,
    config: PrintConfig,
) -> io::Result<()> {
    write_with(writer, config, |ctx| print_one(ctx, arena, message, expr, config))
}

pub fn format_single_expr(arena: &ExprArena, expr: ExprId, config: PrintConfig) -> String {
    format_with(config, |ctx| print_single_expr(ctx, arena, expr, config))
}

/// # Errors
///
/// Returns the first error raised by `writer`.
pub fn write_single_expr<W: io::Write>(
    writer: W,
    arena: &ExprArena,
    expr: ExprId,
    config: PrintConfig,
) -> io::Result<()> {
    write_with(writer, config, |ctx| print_single_expr(ctx, arena, expr, config))
}

/// `Display` adaptor printing one expression with the default configuration.
pub struct DisplayExpr<'a> {
    arena: &'a ExprArena,
    expr: ExprId,
    config: PrintConfig,
}

impl DisplayExpr<'_> {
    #[must_use]
    pub fn with_config(mut self, config: PrintConfig) -> Self {
        self.config = config;
        self
    }
}

impl fmt::Display for DisplayExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_single_expr(self.arena, self.expr, self.config))
    }
}

pub fn display(arena: &ExprArena, expr: ExprId) -> DisplayExpr<'_> {
    DisplayExpr {
        arena,
        expr,
        config: PrintConfig::default(),
    }
}

#[cfg(test)]
mod tests;
