//! Indentation-Tracking Writer
//!
//! Wraps a [`TextBuffer`] and tracks two pieces of state:
//!
//! - the nesting depth, which determines the indentation width
//! - whether the current output line has started
//!
//! Indentation is written lazily, right before the first character of each
//! output line, so callers never re-scan or re-indent what they emitted.
//!
//! # Append Flavors
//!
//! | Method | Splits on terminators | Break after last line |
//! |--------|-----------------------|-----------------------|
//! | [`append_inline`](IndentedWriter::append_inline) | no | no |
//! | [`append`](IndentedWriter::append) | yes | no |
//! | [`append_line`](IndentedWriter::append_line) | yes | yes |
//!
//! `append_inline` is the only primitive that writes indentation. Use it for
//! verbatim content whose embedded lines must not be re-indented; use the
//! other two when every physical line of the input should be indented.

use std::fmt;
use std::ops::{Deref, DerefMut};

use dentext_lines::split_lines;

use crate::buffer::TextBuffer;
use crate::config::{BufferConfig, Indentation};
use crate::error::BufferError;

/// Text writer that indents every new output line to the current depth.
///
/// Every line break is written with the buffer's newline token, so output
/// line endings are normalized regardless of the terminators found in input.
#[derive(Clone, Debug, Default)]
pub struct IndentedWriter {
    buffer: TextBuffer,
    depth: usize,
    indentation: Indentation,
    /// True once a character was written on the current output line.
    line_started: bool,
    /// Failure recorded by a scope guard that could not report it.
    deferred_error: Option<BufferError>,
}

impl IndentedWriter {
    /// Create a writer with the given indentation and a default buffer.
    pub fn new(indentation: Indentation) -> Self {
        Self::with_buffer(indentation, TextBuffer::new())
    }

    /// Create a writer with a custom buffer configuration.
    pub fn with_config(indentation: Indentation, config: BufferConfig) -> Result<Self, BufferError> {
        Ok(Self::with_buffer(indentation, TextBuffer::with_config(config)?))
    }

    /// Create a writer that appends to an existing buffer.
    ///
    /// The writer assumes it starts at the beginning of a line.
    pub fn with_buffer(indentation: Indentation, buffer: TextBuffer) -> Self {
        Self {
            buffer,
            depth: 0,
            indentation,
            line_started: false,
            deferred_error: None,
        }
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Indentation style.
    pub fn indentation(&self) -> Indentation {
        self.indentation
    }

    /// Whether anything was written on the current output line.
    pub fn is_line_started(&self) -> bool {
        self.line_started
    }

    /// Get a reference to the underlying buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Get the current output without copying.
    pub fn as_str(&self) -> &str {
        self.buffer.as_str()
    }

    /// Materialize the output as an independent `String`.
    ///
    /// The writer stays usable afterwards.
    pub fn render(&self) -> String {
        self.buffer.render()
    }

    /// Consume the writer and return its output.
    ///
    /// Ignores any deferred error; see [`finish`](Self::finish).
    pub fn into_string(self) -> String {
        self.buffer.into_string()
    }

    /// Consume the writer and return its output, or the first error a scope
    /// guard had to swallow while closing.
    pub fn finish(self) -> Result<String, BufferError> {
        match self.deferred_error {
            Some(err) => Err(err),
            None => Ok(self.buffer.into_string()),
        }
    }

    /// Take the error recorded by a scope guard that failed during drop.
    pub fn take_deferred_error(&mut self) -> Option<BufferError> {
        self.deferred_error.take()
    }

    // ========================================================================
    // Appending
    // ========================================================================

    /// Append content belonging to the current line, verbatim.
    ///
    /// Indentation is written first if the line has not started yet. The
    /// text is not scanned: embedded terminators pass straight through and
    /// the lines they start are not indented. Empty text writes nothing,
    /// not even indentation.
    pub fn append_inline(&mut self, text: &str) -> Result<(), BufferError> {
        if text.is_empty() {
            return Ok(());
        }
        self.start_line()?;
        self.buffer.push_str(text)
    }

    /// Append text, indenting every line it contains.
    ///
    /// Line breaks are written between lines but not after the last one, so
    /// the output stays on the final line for further appends.
    pub fn append(&mut self, text: &str) -> Result<(), BufferError> {
        for (index, line) in split_lines(text).enumerate() {
            if index > 0 {
                self.break_line()?;
            }
            self.append_inline(line)?;
        }
        Ok(())
    }

    /// Append text and end the line.
    ///
    /// Each line of `text` is indented and followed by a break. Text without
    /// terminators, including empty text, produces exactly one break.
    pub fn append_line(&mut self, text: &str) -> Result<(), BufferError> {
        if text.is_empty() {
            return self.break_line();
        }
        for line in split_lines(text) {
            self.append_inline(line)?;
            self.break_line()?;
        }
        Ok(())
    }

    /// Append a single character. `\n` and `\r` break the line.
    pub fn append_char(&mut self, c: char) -> Result<(), BufferError> {
        if dentext_lines::is_line_terminator(c) {
            return self.break_line();
        }
        self.start_line()?;
        self.buffer.push(c)
    }

    /// Append a single character and end the line.
    pub fn append_line_char(&mut self, c: char) -> Result<(), BufferError> {
        self.append_char(c)?;
        self.break_line()
    }

    /// End the current line, even if nothing was written on it.
    pub fn break_line(&mut self) -> Result<(), BufferError> {
        self.buffer.push_newline()?;
        self.line_started = false;
        Ok(())
    }

    /// End the current line only if something was written on it.
    pub fn finish_line(&mut self) -> Result<(), BufferError> {
        if self.line_started {
            self.break_line()?;
        }
        Ok(())
    }

    // ========================================================================
    // Formatted Appending
    // ========================================================================

    /// Like [`append_inline`](Self::append_inline), formatting `args` directly
    /// into the buffer.
    pub fn append_inline_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), BufferError> {
        self.write_formatted(args, FmtMode::Inline)
    }

    /// Like [`append`](Self::append), formatting `args` directly into the
    /// buffer.
    pub fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), BufferError> {
        self.write_formatted(args, FmtMode::Lines)
    }

    /// Like [`append_line`](Self::append_line), formatting `args` directly
    /// into the buffer.
    pub fn append_line_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), BufferError> {
        self.append_fmt(args)?;
        self.break_line()
    }

    /// Append any displayable value inline, without building a `String` first.
    pub fn append_display<T: fmt::Display + ?Sized>(&mut self, value: &T) -> Result<(), BufferError> {
        self.append_inline_fmt(format_args!("{value}"))
    }

    fn write_formatted(&mut self, args: fmt::Arguments<'_>, mode: FmtMode) -> Result<(), BufferError> {
        let mut sink = FmtSink {
            writer: self,
            mode,
            after_cr: false,
            error: None,
        };
        if fmt::write(&mut sink, args).is_err() {
            if let Some(err) = sink.error {
                return Err(err);
            }
            tracing::warn!("formatting trait implementation returned an error");
        }
        Ok(())
    }

    // ========================================================================
    // Nesting
    // ========================================================================

    /// Increase the depth by one until the returned guard is dropped.
    ///
    /// The guard dereferences to the writer, so output is written through
    /// it. Guards must be released in reverse order of acquisition, which
    /// block scoping does automatically.
    pub fn enter_nesting(&mut self) -> NestingScope<'_> {
        self.indent();
        NestingScope { writer: self }
    }

    /// Execute a closure with increased depth.
    ///
    /// Depth is restored after the closure completes or unwinds.
    pub fn with_indent<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        let mut scope = self.enter_nesting();
        f(&mut *scope)
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn defer_error(&mut self, err: BufferError) {
        if self.deferred_error.is_none() {
            self.deferred_error = Some(err);
        }
    }

    /// Write indentation if the current line has not started yet.
    fn start_line(&mut self) -> Result<(), BufferError> {
        if !self.line_started {
            let width = self.indentation.width_at(self.depth);
            self.buffer.push_repeated(self.indentation.character, width)?;
            self.line_started = true;
        }
        Ok(())
    }
}

/// Guard returned by [`IndentedWriter::enter_nesting`].
///
/// Decrements the depth when dropped, including during unwinding.
#[must_use = "the nesting ends as soon as the guard is dropped"]
pub struct NestingScope<'w> {
    writer: &'w mut IndentedWriter,
}

impl Deref for NestingScope<'_> {
    type Target = IndentedWriter;

    fn deref(&self) -> &IndentedWriter {
        self.writer
    }
}

impl DerefMut for NestingScope<'_> {
    fn deref_mut(&mut self) -> &mut IndentedWriter {
        self.writer
    }
}

impl Drop for NestingScope<'_> {
    fn drop(&mut self) {
        self.writer.dedent();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FmtMode {
    Inline,
    Lines,
}

/// Streams formatter output into the writer chunk by chunk.
struct FmtSink<'a> {
    writer: &'a mut IndentedWriter,
    mode: FmtMode,
    /// Previous chunk ended in `\r`; a leading `\n` completes that separator.
    after_cr: bool,
    error: Option<BufferError>,
}

impl FmtSink<'_> {
    fn write_chunk(&mut self, chunk: &str) -> Result<(), BufferError> {
        match self.mode {
            FmtMode::Inline => self.writer.append_inline(chunk),
            FmtMode::Lines => {
                let chunk = match chunk.strip_prefix('\n') {
                    Some(rest) if self.after_cr => rest,
                    _ => chunk,
                };
                self.after_cr = chunk.ends_with('\r');
                // Each chunk continues the line the previous one ended on,
                // which is exactly what `append` does with its first line.
                self.writer.append(chunk)
            }
        }
    }
}

impl fmt::Write for FmtSink<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if s.is_empty() {
            return Ok(());
        }
        self.write_chunk(s).map_err(|err| {
            self.error = Some(err);
            fmt::Error
        })
    }
}

#[cfg(test)]
mod tests;
