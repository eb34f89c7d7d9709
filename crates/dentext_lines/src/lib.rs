//! Zero-copy line splitting.
//!
//! Splits a borrowed `str` into logical lines, recognizing all three common
//! newline conventions:
//!
//! - `\n` (Unix)
//! - `\r\n` (Windows), consumed as a single separator
//! - `\r` on its own (classic Mac)
//!
//! Separators are consumed, never yielded. Every yielded slice borrows from
//! the source, so no line can outlive the text it was split from.
//!
//! # Counting Rule
//!
//! A non-empty source containing `n` separators yields exactly `n + 1` lines.
//! A trailing separator therefore yields one trailing empty line, and an
//! empty source yields nothing at all:
//!
//! ```
//! use dentext_lines::split_lines;
//!
//! let lines: Vec<&str> = split_lines("a\r\nb\rc\n").collect();
//! assert_eq!(lines, ["a", "b", "c", ""]);
//! assert_eq!(split_lines("").count(), 0);
//! ```

use std::iter::FusedIterator;

/// Iterator over the lines of a borrowed source string.
///
/// Created per call with [`split_lines`] or [`LineSplit::new`]; it keeps no
/// state beyond its own cursor and cannot be rewound. Construct a new one to
/// scan the same text again.
#[derive(Clone, Debug)]
pub struct LineSplit<'a> {
    /// Unscanned tail of the source. `None` once the final line was yielded.
    rest: Option<&'a str>,
}

impl<'a> LineSplit<'a> {
    /// Create a scanner positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            rest: if source.is_empty() { None } else { Some(source) },
        }
    }

    /// The portion of the source not yet scanned.
    ///
    /// Empty once the iterator is exhausted. Right after a trailing
    /// separator was consumed this is also empty, but one empty line is
    /// still pending.
    pub fn remainder(&self) -> &'a str {
        self.rest.unwrap_or("")
    }
}

impl<'a> Iterator for LineSplit<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest?;
        let bytes = rest.as_bytes();

        match memchr::memchr2(b'\n', b'\r', bytes) {
            Some(pos) => {
                let separator_len = if bytes[pos] == b'\r' && bytes.get(pos + 1) == Some(&b'\n') {
                    2
                } else {
                    1
                };
                // Both separator bytes are ASCII, so the split points are
                // always char boundaries.
                self.rest = Some(&rest[pos + separator_len..]);
                Some(&rest[..pos])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.rest {
            None => (0, Some(0)),
            Some(rest) => (1, Some(rest.len() + 1)),
        }
    }
}

impl FusedIterator for LineSplit<'_> {}

/// Split `source` into lines. See the [crate docs](crate) for the rules.
#[inline]
pub fn split_lines(source: &str) -> LineSplit<'_> {
    LineSplit::new(source)
}

/// Returns `true` if `c` is one of the recognized line terminators.
#[inline]
pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r')
}
