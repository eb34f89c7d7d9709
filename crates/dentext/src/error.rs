//! Errors produced while building output.

/// Failure of a buffer construction or growth.
///
/// These are the only two ways text emission can fail. Every other operation
/// is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// An explicit initial capacity of zero was requested.
    #[error("initial buffer capacity must be greater than zero")]
    ZeroCapacity,

    /// Backing storage for `requested` bytes could not be allocated.
    ///
    /// The buffer's previous contents are left untouched. A size that
    /// overflows `usize` is reported with `requested == usize::MAX`.
    #[error("failed to allocate text buffer storage for {requested} bytes")]
    Allocation {
        /// Total capacity, in bytes, the buffer tried to reach.
        requested: usize,
    },
}
