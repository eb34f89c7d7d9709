//! Construction-time configuration.
//!
//! All knobs are fixed when a buffer or writer is built:
//!
//! - [`Newline`]: the token emitted for every line break
//! - [`BufferConfig`]: initial capacity, growth factor and newline token
//! - [`Indentation`]: indent character and how many of them make one level

/// Default initial capacity of a text buffer, in bytes.
pub const DEFAULT_CAPACITY: usize = 16;

/// Default multiplicative growth factor of a text buffer.
pub const DEFAULT_GROWTH_FACTOR: f64 = 2.0;

/// Default number of indent characters per nesting level.
pub const DEFAULT_INDENT_SIZE: usize = 4;

/// Line-break token written by the buffer.
///
/// Every break the buffer emits uses this token, whatever terminators
/// appeared in appended text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Newline {
    /// `\n`
    Lf,
    /// `\r\n`
    #[default]
    CrLf,
    /// `\r`
    Cr,
}

impl Newline {
    /// The exact token text.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
            Newline::Cr => "\r",
        }
    }

    /// Length of the token in bytes.
    #[inline]
    pub const fn byte_len(self) -> usize {
        self.as_str().len()
    }
}

/// Configuration of a [`TextBuffer`](crate::TextBuffer).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BufferConfig {
    /// Initial capacity in bytes. Must be greater than zero.
    pub initial_capacity: usize,

    /// Multiplier applied to the capacity when the buffer grows.
    ///
    /// A growth never allocates less than the immediate request, so any
    /// value is safe; values at or below `1.0` only lose the amortized
    /// append cost.
    pub growth_factor: f64,

    /// Token emitted for line breaks.
    pub newline: Newline,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            newline: Newline::default(),
        }
    }
}

impl BufferConfig {
    /// Set the initial capacity.
    #[must_use]
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Set the growth factor.
    #[must_use]
    pub fn with_growth_factor(mut self, growth_factor: f64) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// Set the newline token.
    #[must_use]
    pub fn with_newline(mut self, newline: Newline) -> Self {
        self.newline = newline;
        self
    }
}

/// Indentation style: `size` copies of `character` per nesting level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Indentation {
    /// Character repeated to indent a line.
    pub character: char,
    /// Number of `character`s per level. Zero disables indentation.
    pub size: usize,
}

impl Default for Indentation {
    fn default() -> Self {
        Self::spaces(DEFAULT_INDENT_SIZE)
    }
}

impl Indentation {
    /// Create an indentation style.
    pub const fn new(character: char, size: usize) -> Self {
        Self { character, size }
    }

    /// `size` spaces per level.
    pub const fn spaces(size: usize) -> Self {
        Self::new(' ', size)
    }

    /// One tab per level.
    pub const fn tabs() -> Self {
        Self::new('\t', 1)
    }

    /// Number of indent characters for the given nesting depth.
    ///
    /// Saturates instead of overflowing; the buffer then reports the
    /// impossible request as an allocation failure.
    #[inline]
    pub fn width_at(self, depth: usize) -> usize {
        depth.saturating_mul(self.size)
    }
}
