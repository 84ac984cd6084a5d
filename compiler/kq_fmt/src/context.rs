//! Print Context
//!
//! Tracks the output column while printing. Line breaks realign the column
//! to the requested indentation, which is how nested operands line up under
//! their first sibling.

use std::fmt::{self, Write as _};

use crate::config::DEFAULT_NEWLINE;
use crate::emitter::{Emitter, StringEmitter};

/// Output state for one printing session.
pub struct PrintContext<E: Emitter = StringEmitter> {
    emitter: E,
    /// Column of the next character, counted in bytes from the last break.
    column: usize,
    newline: &'static str,
    /// Reused buffer for formatted fragments.
    scratch: String,
}

impl PrintContext<StringEmitter> {
    /// Create a context writing to an in-memory string.
    pub fn new() -> Self {
        Self::with_emitter(StringEmitter::new())
    }

    /// Get the printed output.
    pub fn finalize(self) -> String {
        self.emitter.output()
    }

    /// Current output without consuming the context.
    pub fn as_str(&self) -> &str {
        self.emitter.as_str()
    }
}

impl Default for PrintContext<StringEmitter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Emitter> PrintContext<E> {
    pub fn with_emitter(emitter: E) -> Self {
        Self {
            emitter,
            column: 0,
            newline: DEFAULT_NEWLINE,
            scratch: String::new(),
        }
    }

    #[must_use]
    pub fn with_newline(mut self, newline: &'static str) -> Self {
        self.newline = newline;
        self
    }

    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Pretend the output already sits at `column`.
    ///
    /// Used when the caller has written a prefix of its own.
    #[inline]
    pub fn set_column(&mut self, column: usize) {
        self.column = column;
    }

    #[inline]
    pub fn emit(&mut self, text: &str) {
        self.emitter.emit(text);
        self.column += text.len();
    }

    #[inline]
    pub fn emit_space(&mut self) {
        self.emitter.emit_space();
        self.column += 1;
    }

    /// Emit a formatted fragment such as `N12:` or `0xff`.
    pub fn emit_display(&mut self, value: impl fmt::Display) {
        self.scratch.clear();
        // Writing into a String never fails.
        let _ = write!(self.scratch, "{value}");
        self.emitter.emit(&self.scratch);
        self.column += self.scratch.len();
    }

    /// End the line and indent the next one to `indent`.
    pub fn break_line(&mut self, indent: usize) {
        self.emitter.emit(self.newline);
        if indent > 0 {
            self.emitter.emit_indent(indent);
        }
        self.column = indent;
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    pub fn into_emitter(self) -> E {
        self.emitter
    }
}
