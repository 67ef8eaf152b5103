//! UTF-8 aware views.
//!
//! A [`CharSlice`] is a [`ByteSlice`] whose two edges are character
//! boundaries. Every operation that narrows the view checks the edges it
//! introduces, so the invariant holds for every value handed out. Interior
//! bytes are not validated up front; [`CharSlice::chars`] reports malformed
//! sequences as it reaches them.

use alloc::vec::Vec;
use core::{fmt, iter::FusedIterator};

use bstr::BStr;

use crate::{
    ascii,
    byte_iter::ByteIter,
    byte_slice::{ByteSlice, count_matches, join_bytes},
    char_iter::{Chars, UncheckedChars},
    chars::Char,
    error::{Result, SliceError},
    mem,
    trace::trace,
    utf8,
};

/// A borrowed view whose start and end fall on UTF-8 character boundaries.
///
/// ```
/// use zslice::{CharSlice, SliceError};
///
/// let s = CharSlice::new("naïve");
/// assert_eq!(s.len(), 6);
/// assert_eq!(s.char_count(), Ok(5));
/// assert_eq!(
///     s.split_at(3),
///     Err(SliceError::InvalidCharBoundary { index: 3 })
/// );
/// let (head, tail) = s.split_at(4).unwrap();
/// assert_eq!((head, tail), (CharSlice::new("naï"), CharSlice::new("ve")));
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharSlice<'a> {
    inner: ByteSlice<'a>,
}

impl<'a> CharSlice<'a> {
    /// Views a `str`; always valid.
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self {
            inner: ByteSlice::new(text.as_bytes()),
        }
    }

    /// Views `bytes`, checking that they start on a character boundary.
    ///
    /// The end of the buffer is always a boundary. Interior bytes are not
    /// validated.
    ///
    /// # Errors
    ///
    /// [`SliceError::InvalidCharBoundary`] if `bytes` is non-empty and does
    /// not begin with a complete, valid character.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        if !bytes.is_empty() && utf8::decode_len(bytes) == 0 {
            return Err(SliceError::InvalidCharBoundary { index: 0 });
        }
        Ok(Self::from_bytes_unchecked(bytes))
    }

    /// Views `bytes` without checking the start edge.
    ///
    /// Memory safety does not depend on the edges; a caller that passes a
    /// misaligned buffer gets boundary errors or invalid chars later rather
    /// than undefined behaviour.
    #[must_use]
    pub const fn from_bytes_unchecked(bytes: &'a [u8]) -> Self {
        Self {
            inner: ByteSlice::new(bytes),
        }
    }

    /// The underlying byte view.
    #[must_use]
    pub const fn as_byte_slice(&self) -> ByteSlice<'a> {
        self.inner
    }

    /// The viewed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.inner.as_bytes()
    }

    /// Address of the first viewed byte.
    #[must_use]
    pub const fn as_ptr(&self) -> *const u8 {
        self.inner.as_ptr()
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the view has no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// The view as `&str` when every byte is valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        core::str::from_utf8(self.as_bytes()).ok()
    }

    /// Whether `index` is a character boundary of this view.
    ///
    /// `len()` always is; indices past the end never are.
    #[must_use]
    pub fn is_char_boundary(&self, index: usize) -> bool {
        match index.cmp(&self.len()) {
            core::cmp::Ordering::Less => utf8::decode_len(&self.as_bytes()[index..]) != 0,
            core::cmp::Ordering::Equal => true,
            core::cmp::Ordering::Greater => false,
        }
    }

    /// The character starting at byte `index`.
    ///
    /// # Errors
    ///
    /// [`SliceError::OutOfBounds`] if `index >= len()`;
    /// [`SliceError::InvalidCharBoundary`] if no valid character starts there.
    pub fn get(&self, index: usize) -> Result<Char> {
        if index >= self.len() {
            return Err(SliceError::out_of_bounds(
                index,
                index.saturating_add(1),
                self.len(),
            ));
        }
        let ch = Char::decode(&self.as_bytes()[index..]);
        if ch.is_valid_utf8() {
            Ok(ch)
        } else {
            Err(SliceError::InvalidCharBoundary { index })
        }
    }

    /// Splits into `[..mid]` and `[mid..]`.
    ///
    /// # Errors
    ///
    /// [`SliceError::OutOfBounds`] if `mid > len()`;
    /// [`SliceError::InvalidCharBoundary`] if `mid` is inside a character.
    pub fn split_at(&self, mid: usize) -> Result<(Self, Self)> {
        let (head, tail) = self.inner.split_at(mid)?;
        self.check_boundary(mid)?;
        Ok((Self { inner: head }, Self { inner: tail }))
    }

    /// The sub-view `[start..end]`.
    ///
    /// # Errors
    ///
    /// [`SliceError::OutOfBounds`] for inverted or overlong ranges;
    /// [`SliceError::InvalidCharBoundary`] if either edge is inside a
    /// character.
    pub fn get_subslice(&self, start: usize, end: usize) -> Result<Self> {
        let inner = self.inner.get_subslice(start, end)?;
        self.check_boundary(start)?;
        self.check_boundary(end)?;
        Ok(Self { inner })
    }

    /// The sub-view `[..end]`.
    ///
    /// # Errors
    ///
    /// As [`get_subslice`](Self::get_subslice).
    pub fn get_before(&self, end: usize) -> Result<Self> {
        self.get_subslice(0, end)
    }

    /// The sub-view `[start..]`.
    ///
    /// # Errors
    ///
    /// As [`get_subslice`](Self::get_subslice).
    pub fn get_after(&self, start: usize) -> Result<Self> {
        self.get_subslice(start, self.len())
    }

    /// Offset of the first match of `pattern` that does not cut a character
    /// in half.
    #[must_use]
    pub fn find(&self, pattern: impl AsRef<[u8]>) -> Option<usize> {
        let pattern = pattern.as_ref();
        let bytes = self.as_bytes();
        let mut from = 0;
        loop {
            let at = from + mem::find(&bytes[from..], pattern)?;
            if !self.cuts_match(at, pattern.len()) {
                return Some(at);
            }
            from = at + 1;
        }
    }

    /// Offset of the last match of `pattern` that does not cut a character
    /// in half.
    #[must_use]
    pub fn rfind(&self, pattern: impl AsRef<[u8]>) -> Option<usize> {
        let pattern = pattern.as_ref();
        let bytes = self.as_bytes();
        let mut end = bytes.len();
        loop {
            let at = mem::rfind(&bytes[..end], pattern)?;
            if !self.cuts_match(at, pattern.len()) {
                return Some(at);
            }
            // Any earlier match ends strictly before this one does.
            end = (at + pattern.len()).checked_sub(1)?;
        }
    }

    /// Whether `pattern` occurs without cutting a character.
    #[must_use]
    pub fn contains(&self, pattern: impl AsRef<[u8]>) -> bool {
        self.find(pattern).is_some()
    }

    /// Whether the view begins with `prefix` without cutting a character.
    #[must_use]
    pub fn starts_with(&self, prefix: impl AsRef<[u8]>) -> bool {
        let prefix = prefix.as_ref();
        self.inner.starts_with(prefix) && !self.cuts_char(prefix.len())
    }

    /// Whether the view ends with `suffix` without cutting a character.
    #[must_use]
    pub fn ends_with(&self, suffix: impl AsRef<[u8]>) -> bool {
        let suffix = suffix.as_ref();
        self.inner.ends_with(suffix) && !self.cuts_char(self.len() - suffix.len())
    }

    /// The view without `prefix`, or unchanged if it does not start with it.
    #[must_use]
    pub fn strip_prefix(&self, prefix: impl AsRef<[u8]>) -> Self {
        let prefix = prefix.as_ref();
        if self.starts_with(prefix) {
            self.tail(prefix.len())
        } else {
            *self
        }
    }

    /// The view without `suffix`, or unchanged if it does not end with it.
    #[must_use]
    pub fn strip_suffix(&self, suffix: impl AsRef<[u8]>) -> Self {
        let suffix = suffix.as_ref();
        if self.ends_with(suffix) {
            self.head(self.len() - suffix.len())
        } else {
            *self
        }
    }

    /// Splits around the first match, excluding it.
    ///
    /// Not found: `(false, self, empty)`.
    #[must_use]
    pub fn split_once(&self, pattern: impl AsRef<[u8]>) -> (bool, Self, Self) {
        let pattern = pattern.as_ref();
        match self.find(pattern) {
            Some(at) => (true, self.head(at), self.tail(at + pattern.len())),
            None => (false, *self, self.tail(self.len())),
        }
    }

    /// Splits around the last match, excluding it.
    ///
    /// Not found: `(false, empty, self)`.
    #[must_use]
    pub fn rsplit_once(&self, pattern: impl AsRef<[u8]>) -> (bool, Self, Self) {
        let pattern = pattern.as_ref();
        match self.rfind(pattern) {
            Some(at) => (true, self.head(at), self.tail(at + pattern.len())),
            None => (false, self.head(0), *self),
        }
    }

    /// Number of non-overlapping matches, left to right.
    ///
    /// An empty pattern counts `len() + 1`, one for every byte gap, even
    /// though [`split`](Self::split) treats an empty delimiter as "no split".
    #[must_use]
    pub fn count(&self, pattern: impl AsRef<[u8]>) -> usize {
        let pattern = pattern.as_ref();
        if pattern.is_empty() {
            return count_matches(self.as_bytes(), pattern);
        }
        let mut rest = *self;
        let mut count = 0;
        while let Some(at) = rest.find(pattern) {
            count += 1;
            rest = rest.tail(at + pattern.len());
        }
        count
    }

    /// Lazily splits on every match of `delimiter`.
    ///
    /// An empty delimiter yields the whole view once.
    ///
    /// ```
    /// use zslice::CharSlice;
    ///
    /// let parts: Vec<_> = CharSlice::new("a,b,c").split(",").collect();
    /// assert_eq!(parts, ["a", "b", "c"]);
    /// let parts: Vec<_> = CharSlice::new("abc").split("").collect();
    /// assert_eq!(parts, ["abc"]);
    /// ```
    pub fn split<P: AsRef<[u8]>>(&self, delimiter: P) -> CharSplit<'a, P> {
        CharSplit {
            rest: *self,
            delimiter,
            done: false,
        }
    }

    /// Validated character iterator.
    #[must_use]
    pub fn chars(&self) -> Chars<'a> {
        Chars::new(*self)
    }

    /// Character iterator that skips validation; malformed input yields
    /// invalid [`Char`]s instead of errors.
    #[must_use]
    pub fn chars_unchecked(&self) -> UncheckedChars<'a> {
        UncheckedChars::new(*self)
    }

    /// Double-ended iterator over the raw bytes.
    #[must_use]
    pub fn bytes(&self) -> ByteIter<'a> {
        self.inner.iter()
    }

    /// Number of characters.
    ///
    /// # Errors
    ///
    /// [`SliceError::InvalidUtf8`] at the first malformed sequence.
    pub fn char_count(&self) -> Result<usize> {
        self.chars().char_count()
    }

    /// Whether every byte belongs to a valid character.
    #[must_use]
    pub fn is_valid_utf8(&self) -> bool {
        self.chars().validate_utf8()
    }

    /// A new buffer with up to `n` leftmost non-overlapping matches of
    /// `pattern` replaced by `replacement`.
    ///
    /// An empty pattern or `n == 0` returns an unchanged copy. When the
    /// replacement is no longer than the pattern, the output never grows past
    /// `len()` and is compacted in place.
    ///
    /// ```
    /// use zslice::CharSlice;
    ///
    /// let s = CharSlice::new("one, two, three");
    /// assert_eq!(s.replacen(", ", "/", 1), b"one/two, three");
    /// assert_eq!(s.replacen(", ", " and ", 5), b"one and two and three");
    /// ```
    #[must_use]
    pub fn replacen(
        &self,
        pattern: impl AsRef<[u8]>,
        replacement: impl AsRef<[u8]>,
        n: usize,
    ) -> Vec<u8> {
        let (pattern, replacement) = (pattern.as_ref(), replacement.as_ref());
        if pattern.is_empty() || n == 0 {
            return self.to_vec();
        }
        trace!(
            pattern_len = pattern.len(),
            replacement_len = replacement.len(),
            limit = n,
            "replacen"
        );
        if replacement.len() <= pattern.len() {
            self.replacen_compacting(pattern, replacement, n)
        } else {
            self.replacen_growing(pattern, replacement, n)
        }
    }

    fn replacen_compacting(&self, pattern: &[u8], replacement: &[u8], n: usize) -> Vec<u8> {
        let mut out = self.to_vec();
        let mut rest = *self;
        // `read` walks the unscanned input, `write` the compacted output; the
        // replacement is never longer than the match so `write <= read`.
        let (mut read, mut write) = (0, 0);
        for _ in 0..n {
            let Some(at) = rest.find(pattern) else {
                break;
            };
            let matched = read + at;
            mem::move_words(&mut out, read..matched, write);
            write += matched - read;
            mem::copy_words(&mut out[write..write + replacement.len()], replacement);
            write += replacement.len();
            read = matched + pattern.len();
            rest = rest.tail(at + pattern.len());
        }
        let len = out.len();
        mem::move_words(&mut out, read..len, write);
        out.truncate(write + (len - read));
        out
    }

    fn replacen_growing(&self, pattern: &[u8], replacement: &[u8], n: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        let mut rest = *self;
        for _ in 0..n {
            let Some(at) = rest.find(pattern) else {
                break;
            };
            out.extend_from_slice(&rest.as_bytes()[..at]);
            out.extend_from_slice(replacement);
            rest = rest.tail(at + pattern.len());
        }
        out.extend_from_slice(rest.as_bytes());
        out
    }

    /// A new buffer holding `self` followed by `other`.
    #[must_use]
    pub fn add(&self, other: impl AsRef<[u8]>) -> Vec<u8> {
        self.inner.add(other)
    }

    /// A new buffer holding `parts` with `self` between consecutive elements.
    #[must_use]
    pub fn join(&self, parts: &[CharSlice<'_>]) -> Vec<u8> {
        join_bytes(self.as_bytes(), parts.iter().map(CharSlice::as_bytes))
    }

    /// An owned copy of the viewed bytes.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.inner.to_vec()
    }

    /// The view without leading or trailing ASCII whitespace.
    ///
    /// Whitespace bytes are single-byte characters, so both new edges stay
    /// on boundaries.
    #[must_use]
    pub fn trim(&self) -> Self {
        Self::from_bytes_unchecked(ascii::trim(self.inner).as_bytes())
    }

    /// The view without leading ASCII whitespace.
    #[must_use]
    pub fn trim_start(&self) -> Self {
        Self::from_bytes_unchecked(ascii::trim_start(self.inner).as_bytes())
    }

    /// The view without trailing ASCII whitespace.
    #[must_use]
    pub fn trim_end(&self) -> Self {
        Self::from_bytes_unchecked(ascii::trim_end(self.inner).as_bytes())
    }

    /// A deterministic digest of the content; see
    /// [`ByteSlice::content_digest`].
    #[must_use]
    pub fn content_digest(&self) -> u64 {
        self.inner.content_digest()
    }

    fn check_boundary(&self, index: usize) -> Result<()> {
        if self.is_char_boundary(index) {
            Ok(())
        } else {
            Err(SliceError::InvalidCharBoundary { index })
        }
    }

    fn cuts_match(&self, at: usize, len: usize) -> bool {
        self.cuts_char(at) || self.cuts_char(at + len)
    }

    // True when `index` falls inside a complete, decodable character. Stray
    // or truncated sequences are not characters, so offsets next to them are
    // never cuts.
    fn cuts_char(&self, index: usize) -> bool {
        let bytes = self.as_bytes();
        if index == 0 || index >= bytes.len() {
            return false;
        }
        (index.saturating_sub(3)..index)
            .rev()
            .find(|&lead| !utf8::is_continuation(bytes[lead]))
            .is_some_and(|lead| utf8::decode_len(&bytes[lead..]) > index - lead)
    }

    // Callers pass offsets that do not cut a character.
    fn head(&self, end: usize) -> Self {
        Self::from_bytes_unchecked(&self.as_bytes()[..end])
    }

    fn tail(&self, start: usize) -> Self {
        Self::from_bytes_unchecked(&self.as_bytes()[start..])
    }
}

/// Iterator returned by [`CharSlice::split`].
#[derive(Debug, Clone)]
pub struct CharSplit<'a, P> {
    rest: CharSlice<'a>,
    delimiter: P,
    done: bool,
}

impl<'a, P: AsRef<[u8]>> Iterator for CharSplit<'a, P> {
    type Item = CharSlice<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let delimiter = self.delimiter.as_ref();
        if delimiter.is_empty() {
            self.done = true;
            return Some(self.rest);
        }
        let (found, head, tail) = self.rest.split_once(delimiter);
        if found {
            self.rest = tail;
        } else {
            self.done = true;
        }
        Some(head)
    }
}

impl<P: AsRef<[u8]>> FusedIterator for CharSplit<'_, P> {}

macro_rules! impl_eq_text {
    ($($rhs:ty),* $(,)?) => {
        $(
            impl PartialEq<$rhs> for CharSlice<'_> {
                fn eq(&self, other: &$rhs) -> bool {
                    self.inner == *other
                }
            }
        )*
    };
}

impl_eq_text!([u8], &[u8], str, &str, Vec<u8>);

impl PartialEq<ByteSlice<'_>> for CharSlice<'_> {
    fn eq(&self, other: &ByteSlice<'_>) -> bool {
        self.inner == *other
    }
}

impl AsRef<[u8]> for CharSlice<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<'a> From<&'a str> for CharSlice<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}

impl<'a> TryFrom<&'a [u8]> for CharSlice<'a> {
    type Error = SliceError;

    fn try_from(bytes: &'a [u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl<'a> TryFrom<ByteSlice<'a>> for CharSlice<'a> {
    type Error = SliceError;

    fn try_from(slice: ByteSlice<'a>) -> Result<Self> {
        Self::from_bytes(slice.as_bytes())
    }
}

impl<'a> From<CharSlice<'a>> for ByteSlice<'a> {
    fn from(slice: CharSlice<'a>) -> Self {
        slice.inner
    }
}

impl fmt::Debug for CharSlice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(BStr::new(self.as_bytes()), f)
    }
}

impl fmt::Display for CharSlice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(BStr::new(self.as_bytes()), f)
    }
}
