use core::iter::FusedIterator;

use crate::{
    char_slice::CharSlice,
    chars::Char,
    error::{Result, SliceError},
    trace::debug,
    utf8,
};

/// Validated, double-ended character cursor over a [`CharSlice`].
///
/// [`next_char`](Self::next_char) and [`next_char_back`](Self::next_char_back)
/// leave the cursor untouched when the edge does not decode, so a caller can
/// inspect [`as_slice`](Self::as_slice) and decide how to recover. The
/// [`Iterator`] impl yields the error once and then stops.
///
/// ```
/// use zslice::{CharSlice, SliceError};
///
/// let mut chars = CharSlice::from_bytes(b"ok\xFF").unwrap().chars();
/// assert_eq!(chars.next_char().unwrap(), 'o');
/// assert_eq!(chars.next_char().unwrap(), 'k');
/// assert_eq!(chars.next_char(), Err(SliceError::InvalidUtf8 { offset: 2 }));
/// assert_eq!(chars.as_slice().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Chars<'a> {
    remaining: CharSlice<'a>,
    // Bytes consumed from the front; error offsets are reported relative to
    // the slice the cursor was created from.
    consumed: usize,
}

impl<'a> Chars<'a> {
    pub(crate) const fn new(slice: CharSlice<'a>) -> Self {
        Self {
            remaining: slice,
            consumed: 0,
        }
    }

    /// The characters not yet consumed from either end.
    #[must_use]
    pub const fn as_slice(&self) -> CharSlice<'a> {
        self.remaining
    }

    /// Decodes and consumes the first remaining character.
    ///
    /// # Errors
    ///
    /// [`SliceError::Exhausted`] once nothing remains;
    /// [`SliceError::InvalidUtf8`] if the front does not decode, in which
    /// case nothing is consumed.
    pub fn next_char(&mut self) -> Result<Char> {
        let bytes = self.remaining.as_bytes();
        if bytes.is_empty() {
            return Err(SliceError::Exhausted);
        }
        match utf8::decode_len(bytes) {
            0 => Err(self.invalid_at(0)),
            len => {
                self.remaining = CharSlice::from_bytes_unchecked(&bytes[len..]);
                self.consumed += len;
                Ok(Char::from_valid(&bytes[..len]))
            }
        }
    }

    /// Decodes and consumes the last remaining character.
    ///
    /// # Errors
    ///
    /// As [`next_char`](Self::next_char).
    pub fn next_char_back(&mut self) -> Result<Char> {
        let bytes = self.remaining.as_bytes();
        if bytes.is_empty() {
            return Err(SliceError::Exhausted);
        }
        match last_char(bytes) {
            (start, true) => {
                self.remaining = CharSlice::from_bytes_unchecked(&bytes[..start]);
                Ok(Char::from_valid(&bytes[start..]))
            }
            (start, false) => Err(self.invalid_at(start)),
        }
    }

    /// Consumes the cursor, counting characters.
    ///
    /// # Errors
    ///
    /// [`SliceError::InvalidUtf8`] at the first sequence that does not decode.
    pub fn char_count(mut self) -> Result<usize> {
        let mut count = 0;
        loop {
            match self.next_char() {
                Ok(_) => count += 1,
                Err(SliceError::Exhausted) => return Ok(count),
                Err(err) => return Err(err),
            }
        }
    }

    /// Consumes the cursor; true if every remaining byte decodes.
    #[must_use]
    pub fn validate_utf8(self) -> bool {
        self.char_count().is_ok()
    }

    fn invalid_at(&self, index: usize) -> SliceError {
        let offset = self.consumed + index;
        debug!(offset, "invalid utf-8 sequence");
        SliceError::InvalidUtf8 { offset }
    }

    fn halt(&mut self) {
        let rest = self.remaining.as_bytes();
        self.consumed += rest.len();
        self.remaining = CharSlice::from_bytes_unchecked(&rest[rest.len()..]);
    }
}

impl Iterator for Chars<'_> {
    type Item = Result<Char>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_char() {
            Err(SliceError::Exhausted) => None,
            Err(err) => {
                self.halt();
                Some(Err(err))
            }
            ok => Some(ok),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // The first error ends iteration, so one item is all that is certain.
        let len = self.remaining.len();
        (usize::from(len > 0), Some(len))
    }
}

impl DoubleEndedIterator for Chars<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match self.next_char_back() {
            Err(SliceError::Exhausted) => None,
            Err(err) => {
                self.halt();
                Some(Err(err))
            }
            ok => Some(ok),
        }
    }
}

impl FusedIterator for Chars<'_> {}

/// Unvalidated, double-ended character cursor over a [`CharSlice`].
///
/// Steps by the leading-byte length at the front and by skipping back over up
/// to three continuation bytes at the back; a longer run of continuation bytes
/// is stepped over one byte at a time. Malformed input yields invalid
/// [`Char`]s (length 0) rather than errors, and the cursor always advances.
#[derive(Debug, Clone)]
pub struct UncheckedChars<'a> {
    remaining: CharSlice<'a>,
}

impl<'a> UncheckedChars<'a> {
    pub(crate) const fn new(slice: CharSlice<'a>) -> Self {
        Self { remaining: slice }
    }

    /// The bytes not yet consumed from either end.
    #[must_use]
    pub const fn as_slice(&self) -> CharSlice<'a> {
        self.remaining
    }
}

impl Iterator for UncheckedChars<'_> {
    type Item = Char;

    fn next(&mut self) -> Option<Char> {
        let bytes = self.remaining.as_bytes();
        if bytes.is_empty() {
            return None;
        }
        let (ch, step) = Char::decode_unchecked(bytes);
        self.remaining = CharSlice::from_bytes_unchecked(&bytes[step..]);
        Some(ch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining.len();
        (len.div_ceil(4), Some(len))
    }
}

impl DoubleEndedIterator for UncheckedChars<'_> {
    fn next_back(&mut self) -> Option<Char> {
        let bytes = self.remaining.as_bytes();
        if bytes.is_empty() {
            return None;
        }
        let (start, valid) = last_char(bytes);
        let tail = &bytes[start..];
        self.remaining = CharSlice::from_bytes_unchecked(&bytes[..start]);
        Some(if valid {
            Char::from_valid(tail)
        } else {
            Char::invalid(tail)
        })
    }
}

impl FusedIterator for UncheckedChars<'_> {}

/// Start of the last character of a non-empty `bytes`, and whether it decodes
/// exactly to the end.
///
/// Looks at the last four bytes for a non-continuation byte. When that byte
/// starts a complete character followed by stray continuation bytes, the
/// strays are the malformed tail and the reported start moves past the
/// character. Four trailing continuation bytes cannot all belong to one
/// character, so in that case only the last byte is reported.
fn last_char(bytes: &[u8]) -> (usize, bool) {
    let end = bytes.len();
    let Some(start) = (end.saturating_sub(4)..end)
        .rev()
        .find(|&i| !utf8::is_continuation(bytes[i]))
    else {
        return (end - 1, false);
    };
    match utf8::decode_len(&bytes[start..]) {
        len if len == end - start => (start, true),
        0 => (start, false),
        len => (start + len, false),
    }
}
