use core::iter::FusedIterator;

use crate::{
    byte_slice::ByteSlice,
    error::{Result, SliceError},
};

/// Double-ended cursor over the bytes of a [`ByteSlice`].
///
/// All state is the `remaining` view: consuming from the front or back
/// shrinks it, and the iterator is finished exactly when it is empty, however
/// the two ends were interleaved.
#[derive(Debug, Clone)]
pub struct ByteIter<'a> {
    remaining: ByteSlice<'a>,
}

impl<'a> ByteIter<'a> {
    pub(crate) const fn new(slice: ByteSlice<'a>) -> Self {
        Self { remaining: slice }
    }

    /// The bytes not yet consumed from either end.
    #[must_use]
    pub const fn as_slice(&self) -> ByteSlice<'a> {
        self.remaining
    }

    /// Consumes the first remaining byte.
    ///
    /// # Errors
    ///
    /// [`SliceError::Exhausted`] once nothing remains.
    pub fn next_byte(&mut self) -> Result<u8> {
        let [first, rest @ ..] = self.remaining.as_bytes() else {
            return Err(SliceError::Exhausted);
        };
        self.remaining = ByteSlice::new(rest);
        Ok(*first)
    }

    /// Consumes the last remaining byte.
    ///
    /// # Errors
    ///
    /// [`SliceError::Exhausted`] once nothing remains.
    pub fn next_byte_back(&mut self) -> Result<u8> {
        let [rest @ .., last] = self.remaining.as_bytes() else {
            return Err(SliceError::Exhausted);
        };
        self.remaining = ByteSlice::new(rest);
        Ok(*last)
    }
}

impl Iterator for ByteIter<'_> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        self.next_byte().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining.len();
        (len, Some(len))
    }
}

impl DoubleEndedIterator for ByteIter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<u8> {
        self.next_byte_back().ok()
    }
}

impl ExactSizeIterator for ByteIter<'_> {}

impl FusedIterator for ByteIter<'_> {}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn forward_and_backward_visit_every_byte() {
        let s = ByteSlice::from("hello");
        assert_eq!(s.iter().collect::<Vec<_>>(), b"hello");
        assert_eq!(s.iter().rev().collect::<Vec<_>>(), b"olleh");
        assert_eq!(s.iter().len(), 5);
    }

    #[test]
    fn cursors_meeting_in_the_middle_terminate_both_ends() {
        let mut it = ByteSlice::from("abc").iter();
        assert_eq!(it.next_byte(), Ok(b'a'));
        assert_eq!(it.next_byte_back(), Ok(b'c'));
        assert_eq!(it.as_slice(), "b");
        assert_eq!(it.next_byte_back(), Ok(b'b'));
        assert_eq!(it.next_byte(), Err(SliceError::Exhausted));
        assert_eq!(it.next_byte_back(), Err(SliceError::Exhausted));
        assert_eq!(it.next(), None);
        assert!(it.as_slice().is_empty());
    }

    #[test]
    fn empty_slice_is_immediately_exhausted() {
        let mut it = ByteSlice::empty().iter();
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }
}
