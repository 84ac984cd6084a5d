//! kquery printer
//!
//! Prints expression DAGs, constraint sets and queries in the textual
//! kquery form.
//!
//! # Architecture
//!
//! Printing is two passes over a shared [`ExprArena`](kq_ir::ExprArena):
//!
//! 1. **Scan**: count how often every node is reached from the roots
//! 2. **Print**: emit each node, labeling it `N<k>:` the first time when it
//!    was reached more than once and writing `N<k>` afterwards
//!
//! Update lists get the same treatment with `U<k>` labels. Line breaks are
//! decided per operand list by a one-level look-ahead and columns are
//! tracked so broken operands align under their first sibling.
//!
//! # Modules
//!
//! - [`config`]: print flags and line terminator
//! - [`emitter`]: output abstraction for strings and writers
//! - [`context`]: column tracking and line breaks
//! - [`scan`]: sharing analysis
//! - [`binder`]: label assignment
//! - [`multibyte`]: collapsing byte-read concatenations into wide loads
//! - [`printer`]: the expression printer
//! - [`query`]: query, constraint and single-expression entry points
//!
//! # Example
//!
//! ```
//! use kq_fmt::{format_single_expr, PrintConfig};
//! use kq_ir::{BinaryOp, ExprArena, UpdateList};
//!
//! let mut arena = ExprArena::new();
//! let arr = UpdateList::new(arena.symbolic_array("arr", 4).unwrap());
//! let x = arena.read_at(arr, 0).unwrap();
//! let e = arena.binary(BinaryOp::Mul, x, x).unwrap();
//! assert_eq!(
//!     format_single_expr(&arena, e, PrintConfig::default()),
//!     "(Mul w8 N0:(Read w8 0x0 arr) N0)"
//! );
//! ```

pub mod binder;
pub mod config;
pub mod context;
pub mod emitter;
pub mod multibyte;
pub mod printer;
pub mod query;
pub mod scan;

pub use binder::Binder;
pub use config::{PrintConfig, PrintFlags, DEFAULT_NEWLINE};
pub use context::PrintContext;
pub use emitter::{Emitter, StringEmitter, WriterEmitter};
pub use multibyte::{ByteOrder, MultibyteRead, Stride};
pub use printer::Printer;
pub use query::{
    display, format_constraints, format_one, format_query, format_single_expr, print_one,
    print_query, print_single_expr, write_constraints, write_one, write_query,
    write_single_expr, DisplayExpr, Query,
};
pub use scan::Scanner;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=kq_fmt=trace`.
/// Only the first call has any effect. Returns `true` if this call
/// installed the subscriber.
pub fn init_tracing() -> bool {
    let mut installed = false;
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*};

        let directives = std::env::var("RUST_LOG").ok();
        if let Some(filter) = env_filter(directives.as_deref()) {
            installed = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init()
                .is_ok();
        }
    });
    installed
}

/// Filter for the given `RUST_LOG` directives, if any were given.
fn env_filter(directives: Option<&str>) -> Option<EnvFilter> {
    directives.map(EnvFilter::new)
}
