use thiserror::Error;

/// Errors produced by slice, iterator and transform operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceError {
    /// A range or index falls outside the slice, or `start > end`.
    #[error("range {start}..{end} out of bounds for slice of length {len}")]
    OutOfBounds {
        /// Requested start offset.
        start: usize,
        /// Requested end offset.
        end: usize,
        /// Length of the slice the range was applied to.
        len: usize,
    },
    /// A byte offset does not fall on a UTF-8 character boundary.
    #[error("byte index {index} is not a character boundary")]
    InvalidCharBoundary {
        /// Offending byte offset.
        index: usize,
    },
    /// The bytes at `offset` do not form a valid UTF-8 sequence.
    #[error("invalid UTF-8 sequence at byte {offset}")]
    InvalidUtf8 {
        /// Byte offset of the malformed sequence within the iterated slice.
        offset: usize,
    },
    /// `next`/`next_back` was called on an exhausted iterator.
    #[error("iterator exhausted")]
    Exhausted,
    /// A hex digit was expected at `index`.
    #[error("invalid hex digit at byte {index}")]
    InvalidDigit {
        /// Byte offset of the offending digit.
        index: usize,
    },
    /// A parsed number does not fit in 64 bits.
    #[error("number too large to fit in 64 bits")]
    Overflow,
}

impl SliceError {
    pub(crate) const fn out_of_bounds(start: usize, end: usize, len: usize) -> Self {
        SliceError::OutOfBounds { start, end, len }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, SliceError>;
