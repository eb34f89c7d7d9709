//! Growable Text Buffer
//!
//! Owned, append-only UTF-8 storage with an explicit capacity policy.
//! Lengths and capacities are measured in bytes.
//!
//! # Growth
//!
//! When an append would exceed the current capacity, the buffer grows to
//! `max(len + requested, capacity * growth_factor)`. Growth reserves the new
//! storage before releasing anything, so a failed allocation leaves the
//! existing content intact and is reported as [`BufferError::Allocation`].

use std::fmt;

use crate::config::{BufferConfig, Newline, DEFAULT_CAPACITY, DEFAULT_GROWTH_FACTOR};
use crate::error::BufferError;

/// Append-only text storage with amortized O(1) appends.
///
/// The buffer has no notion of indentation or line structure. The only
/// structural thing it knows is its [`Newline`] token, which
/// [`push_newline`](Self::push_newline) writes verbatim.
#[derive(Clone, Debug)]
pub struct TextBuffer {
    storage: String,
    /// Logical capacity. The allocation behind `storage` is at least this large.
    capacity: usize,
    growth_factor: f64,
    newline: Newline,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Create an empty buffer with the default configuration.
    pub fn new() -> Self {
        Self {
            storage: String::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            newline: Newline::default(),
        }
    }

    /// Create an empty buffer with the given initial capacity in bytes.
    pub fn with_capacity(initial_capacity: usize) -> Result<Self, BufferError> {
        Self::with_config(BufferConfig::default().with_initial_capacity(initial_capacity))
    }

    /// Create an empty buffer from a full configuration.
    ///
    /// Fails with [`BufferError::ZeroCapacity`] for a zero initial capacity,
    /// and with [`BufferError::Allocation`] if the initial storage cannot be
    /// reserved.
    pub fn with_config(config: BufferConfig) -> Result<Self, BufferError> {
        if config.initial_capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }

        let mut storage = String::new();
        storage
            .try_reserve_exact(config.initial_capacity)
            .map_err(|err| allocation_failed(config.initial_capacity, &err))?;

        Ok(Self {
            storage,
            capacity: config.initial_capacity,
            growth_factor: config.growth_factor,
            newline: config.newline,
        })
    }

    /// Append a single character.
    pub fn push(&mut self, c: char) -> Result<(), BufferError> {
        self.reserve(c.len_utf8())?;
        self.storage.push(c);
        Ok(())
    }

    /// Append `count` copies of `c`. A zero count is a no-op.
    pub fn push_repeated(&mut self, c: char, count: usize) -> Result<(), BufferError> {
        if count == 0 {
            return Ok(());
        }

        let additional = c.len_utf8().checked_mul(count).unwrap_or(usize::MAX);
        self.reserve(additional)?;
        self.storage.extend(std::iter::repeat(c).take(count));
        Ok(())
    }

    /// Append a string slice.
    pub fn push_str(&mut self, text: &str) -> Result<(), BufferError> {
        self.reserve(text.len())?;
        self.storage.push_str(text);
        Ok(())
    }

    /// Append the configured newline token.
    pub fn push_newline(&mut self) -> Result<(), BufferError> {
        self.push_str(self.newline.as_str())
    }

    /// Append `text` followed by the newline token.
    pub fn push_line(&mut self, text: &str) -> Result<(), BufferError> {
        self.push_str(text)?;
        self.push_newline()
    }

    /// Format `args` straight into the buffer, without an intermediate `String`.
    ///
    /// Text is written exactly as formatted; embedded terminators are not
    /// normalized.
    pub fn push_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), BufferError> {
        let mut sink = FmtSink {
            buffer: self,
            error: None,
        };
        if fmt::write(&mut sink, args).is_err() {
            if let Some(err) = sink.error {
                return Err(err);
            }
            // The error came from a `Display` impl, not from the buffer.
            tracing::warn!("formatting trait implementation returned an error");
        }
        Ok(())
    }

    /// Materialize the content as an independent `String`.
    ///
    /// The buffer stays usable; later appends do not affect the snapshot.
    pub fn render(&self) -> String {
        self.storage.as_str().to_owned()
    }

    /// Get the current content without copying.
    pub fn as_str(&self) -> &str {
        &self.storage
    }

    /// Consume the buffer and return its content.
    pub fn into_string(self) -> String {
        self.storage
    }

    /// Length of the content in bytes.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Current capacity in bytes. Always at least [`len`](Self::len).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Multiplicative growth factor.
    pub fn growth_factor(&self) -> f64 {
        self.growth_factor
    }

    /// Newline token used by [`push_newline`](Self::push_newline).
    pub fn newline(&self) -> Newline {
        self.newline
    }

    /// Change the newline token for subsequent breaks.
    pub fn set_newline(&mut self, newline: Newline) {
        self.newline = newline;
    }

    /// Make room for `additional` more bytes, growing if needed.
    fn reserve(&mut self, additional: usize) -> Result<(), BufferError> {
        let Some(required) = self.storage.len().checked_add(additional) else {
            tracing::warn!(
                len = self.storage.len(),
                additional,
                "text buffer size overflows usize"
            );
            return Err(BufferError::Allocation {
                requested: usize::MAX,
            });
        };
        if required <= self.capacity {
            return Ok(());
        }

        let new_capacity = required.max(self.grown_capacity());
        self.storage
            .try_reserve_exact(new_capacity - self.storage.len())
            .map_err(|err| allocation_failed(new_capacity, &err))?;

        tracing::trace!(
            old_capacity = self.capacity,
            new_capacity,
            "grew text buffer"
        );
        self.capacity = new_capacity;
        Ok(())
    }

    /// Capacity after one growth step, ignoring the request size.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "float-to-int `as` saturates; the request size is the lower bound anyway"
    )]
    fn grown_capacity(&self) -> usize {
        (self.capacity as f64 * self.growth_factor) as usize
    }
}

fn allocation_failed(requested: usize, err: &std::collections::TryReserveError) -> BufferError {
    tracing::warn!(requested, error = %err, "text buffer allocation failed");
    BufferError::Allocation { requested }
}

/// Adapter that keeps the [`BufferError`] which `fmt::Error` cannot carry.
struct FmtSink<'a> {
    buffer: &'a mut TextBuffer,
    error: Option<BufferError>,
}

impl fmt::Write for FmtSink<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buffer.push_str(s).map_err(|err| {
            self.error = Some(err);
            fmt::Error
        })
    }
}

impl fmt::Write for TextBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s).map_err(|_| fmt::Error)
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.push(c).map_err(|_| fmt::Error)
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage)
    }
}
