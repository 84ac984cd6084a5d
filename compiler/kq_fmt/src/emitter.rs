//! Output Emitter
//!
//! Abstraction for output production during printing.
//! Supports string building for in-memory formatting and streaming to any
//! `io::Write` sink.

use std::io;

/// Trait for emitting printed output.
///
/// The printer writes to an emitter as it walks the DAG. Column tracking
/// lives in [`PrintContext`](crate::PrintContext), not here.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit `spaces` space characters.
    fn emit_indent(&mut self, spaces: usize);

    /// Emit a single space.
    fn emit_space(&mut self);
}

/// String-based emitter for in-memory formatting.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the formatted output.
    pub fn output(self) -> String {
        self.buffer
    }

    /// Get the current buffer contents without consuming.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_indent(&mut self, spaces: usize) {
        for _ in 0..spaces {
            self.buffer.push(' ');
        }
    }

    fn emit_space(&mut self) {
        self.buffer.push(' ');
    }
}

/// Streaming emitter over any writer.
///
/// The `Emitter` methods cannot fail, so the first write error is stored and
/// every later fragment is dropped. [`finish`](Self::finish) reports it.
pub struct WriterEmitter<W: io::Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: io::Write> WriterEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Whether a write has already failed.
    pub fn has_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Flush and hand back the writer.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the writer, unmodified, or the
    /// error from the final flush.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write(&mut self, bytes: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.writer.write_all(bytes) {
            self.error = Some(err);
        }
    }
}

impl<W: io::Write> Emitter for WriterEmitter<W> {
    fn emit(&mut self, text: &str) {
        self.write(text.as_bytes());
    }

    fn emit_indent(&mut self, spaces: usize) {
        const SPACES: &[u8] = &[b' '; 64];
        let mut remaining = spaces;
        while remaining > 0 {
            let chunk = remaining.min(SPACES.len());
            self.write(&SPACES[..chunk]);
            remaining -= chunk;
        }
    }

    fn emit_space(&mut self) {
        self.write(b" ");
    }
}
