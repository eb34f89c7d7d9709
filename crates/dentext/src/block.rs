//! Bracket Blocks
//!
//! The canonical scoped-nesting shape for generated code:
//!
//! ```text
//! header
//! {
//!     body at depth + 1
//! }
//! ```
//!
//! Entering a block writes the opener and a line break, then increments the
//! depth. Leaving it decrements the depth and writes the closer on a line of
//! its own, realigned with the opener; an unfinished body line is ended
//! first. Blocks nest with stack discipline: an
//! inner block always closes before the block enclosing it.

use std::ops::{Deref, DerefMut};

use crate::error::BufferError;
use crate::writer::IndentedWriter;

/// Default block opener.
pub const OPEN_BRACE: char = '{';

/// Default block closer.
pub const CLOSE_BRACE: char = '}';

impl IndentedWriter {
    /// Open a block delimited by `open` and `close`.
    ///
    /// The returned guard writes `close` when dropped or when
    /// [`BracketBlock::close`] is called, whichever comes first.
    pub fn enter_block(&mut self, open: char, close: char) -> Result<BracketBlock<'_>, BufferError> {
        self.append_line_char(open)?;
        self.indent();
        Ok(BracketBlock {
            writer: self,
            close,
            open: true,
        })
    }

    /// Open a `{ ... }` block.
    pub fn enter_braces(&mut self) -> Result<BracketBlock<'_>, BufferError> {
        self.enter_block(OPEN_BRACE, CLOSE_BRACE)
    }

    /// Write a block around the output produced by `f`.
    ///
    /// The closer is written even when `f` fails; the first error wins.
    pub fn block<F>(&mut self, open: char, close: char, f: F) -> Result<(), BufferError>
    where
        F: FnOnce(&mut Self) -> Result<(), BufferError>,
    {
        let mut block = self.enter_block(open, close)?;
        let body = f(&mut *block);
        let closed = block.close();
        body.and(closed)
    }
}

/// Guard returned by [`IndentedWriter::enter_block`].
///
/// Dereferences to the writer so the block body is written through it.
/// If the closer cannot be written while dropping, the error is logged and
/// kept as the writer's deferred error (see [`IndentedWriter::finish`]).
#[must_use = "the block closes as soon as the guard is dropped"]
pub struct BracketBlock<'w> {
    writer: &'w mut IndentedWriter,
    close: char,
    open: bool,
}

impl BracketBlock<'_> {
    /// The delimiter this block will close with.
    pub fn closer(&self) -> char {
        self.close
    }

    /// Close the block now, reporting a failure to write the closer.
    pub fn close(mut self) -> Result<(), BufferError> {
        self.finish_block()
    }

    fn finish_block(&mut self) -> Result<(), BufferError> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        self.writer.dedent();
        self.writer.finish_line()?;
        self.writer.append_line_char(self.close)
    }
}

impl Deref for BracketBlock<'_> {
    type Target = IndentedWriter;

    fn deref(&self) -> &IndentedWriter {
        self.writer
    }
}

impl DerefMut for BracketBlock<'_> {
    fn deref_mut(&mut self) -> &mut IndentedWriter {
        self.writer
    }
}

impl Drop for BracketBlock<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.finish_block() {
            tracing::warn!(closer = %self.close, error = %err, "failed to close bracket block");
            self.writer.defer_error(err);
        }
    }
}
