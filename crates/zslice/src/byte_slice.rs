use alloc::{vec, vec::Vec};
use core::{
    borrow::Borrow,
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    iter::FusedIterator,
};

use bstr::BStr;

use crate::{
    byte_iter::ByteIter,
    error::{Result, SliceError},
    mem,
    trace::trace,
};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// A borrowed, non-owning view over a run of bytes.
///
/// `ByteSlice` is a `Copy` value; narrowing operations return new views into
/// the same buffer and never copy. Only [`add`](Self::add),
/// [`join`](Self::join) and [`to_vec`](Self::to_vec) allocate.
///
/// ```
/// use zslice::ByteSlice;
///
/// let s = ByteSlice::from("key=value");
/// let (found, key, value) = s.split_once("=");
/// assert!(found);
/// assert_eq!(key, "key");
/// assert_eq!(value, "value");
/// ```
#[derive(Clone, Copy, Default)]
pub struct ByteSlice<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteSlice<'a> {
    /// Wraps `bytes` without copying.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// The empty view.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bytes: &[] }
    }

    /// The viewed bytes, with the lifetime of the backing buffer.
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Address of the first viewed byte.
    #[must_use]
    pub const fn as_ptr(&self) -> *const u8 {
        self.bytes.as_ptr()
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the view has no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lexicographic ordering with the shorter view first on a shared prefix.
    #[must_use]
    pub fn compare(&self, other: ByteSlice<'_>) -> Ordering {
        mem::compare(self.bytes, other.bytes)
    }

    /// A deterministic 64-bit FNV-1a digest of the viewed bytes.
    ///
    /// Depends only on content, so a view and an owned copy of the same bytes
    /// digest identically.
    #[must_use]
    pub fn content_digest(&self) -> u64 {
        digest(self.bytes)
    }

    /// Offset of the first occurrence of `pattern`.
    ///
    /// An empty pattern matches at 0.
    #[must_use]
    pub fn find(&self, pattern: impl AsRef<[u8]>) -> Option<usize> {
        mem::find(self.bytes, pattern.as_ref())
    }

    /// Offset of the last occurrence of `pattern`.
    ///
    /// An empty pattern matches at `len()`.
    #[must_use]
    pub fn rfind(&self, pattern: impl AsRef<[u8]>) -> Option<usize> {
        mem::rfind(self.bytes, pattern.as_ref())
    }

    /// Whether `pattern` occurs anywhere in the view.
    #[must_use]
    pub fn contains(&self, pattern: impl AsRef<[u8]>) -> bool {
        self.find(pattern).is_some()
    }

    /// Whether the view begins with `prefix`.
    #[must_use]
    pub fn starts_with(&self, prefix: impl AsRef<[u8]>) -> bool {
        let prefix = prefix.as_ref();
        prefix.len() <= self.len() && mem::equal(&self.bytes[..prefix.len()], prefix)
    }

    /// Whether the view ends with `suffix`.
    #[must_use]
    pub fn ends_with(&self, suffix: impl AsRef<[u8]>) -> bool {
        let suffix = suffix.as_ref();
        suffix.len() <= self.len()
            && mem::equal(&self.bytes[self.len() - suffix.len()..], suffix)
    }

    /// The view without `prefix`, or the view unchanged if it does not start
    /// with it.
    #[must_use]
    pub fn strip_prefix(&self, prefix: impl AsRef<[u8]>) -> Self {
        let prefix = prefix.as_ref();
        if self.starts_with(prefix) {
            Self::new(&self.bytes[prefix.len()..])
        } else {
            *self
        }
    }

    /// The view without `suffix`, or the view unchanged if it does not end
    /// with it.
    #[must_use]
    pub fn strip_suffix(&self, suffix: impl AsRef<[u8]>) -> Self {
        let suffix = suffix.as_ref();
        if self.ends_with(suffix) {
            Self::new(&self.bytes[..self.len() - suffix.len()])
        } else {
            *self
        }
    }

    /// Splits into `[..mid]` and `[mid..]`.
    ///
    /// # Errors
    ///
    /// [`SliceError::OutOfBounds`] if `mid > len()`.
    pub fn split_at(&self, mid: usize) -> Result<(Self, Self)> {
        if mid > self.len() {
            return Err(SliceError::out_of_bounds(0, mid, self.len()));
        }
        let (head, tail) = self.bytes.split_at(mid);
        Ok((Self::new(head), Self::new(tail)))
    }

    /// The sub-view `[start..end]`.
    ///
    /// # Errors
    ///
    /// [`SliceError::OutOfBounds`] if `start > end` or `end > len()`.
    pub fn get_subslice(&self, start: usize, end: usize) -> Result<Self> {
        if start > end || end > self.len() {
            return Err(SliceError::out_of_bounds(start, end, self.len()));
        }
        Ok(Self::new(&self.bytes[start..end]))
    }

    /// The sub-view `[..end]`.
    ///
    /// # Errors
    ///
    /// [`SliceError::OutOfBounds`] if `end > len()`.
    pub fn get_before(&self, end: usize) -> Result<Self> {
        self.get_subslice(0, end)
    }

    /// The sub-view `[start..]`.
    ///
    /// # Errors
    ///
    /// [`SliceError::OutOfBounds`] if `start > len()`.
    pub fn get_after(&self, start: usize) -> Result<Self> {
        self.get_subslice(start, self.len())
    }

    /// Splits around the first occurrence of `pattern`, excluding the match.
    ///
    /// Returns `(found, prefix, suffix)`. When the pattern is absent the
    /// whole view is returned as the prefix and the suffix is empty.
    #[must_use]
    pub fn split_once(&self, pattern: impl AsRef<[u8]>) -> (bool, Self, Self) {
        let pattern = pattern.as_ref();
        match self.find(pattern) {
            Some(at) => (true, self.head(at), self.tail(at + pattern.len())),
            None => (false, *self, self.tail(self.len())),
        }
    }

    /// Splits around the last occurrence of `pattern`, excluding the match.
    ///
    /// Returns `(found, prefix, suffix)`. When the pattern is absent the
    /// prefix is empty and the whole view is returned as the suffix.
    #[must_use]
    pub fn rsplit_once(&self, pattern: impl AsRef<[u8]>) -> (bool, Self, Self) {
        let pattern = pattern.as_ref();
        match self.rfind(pattern) {
            Some(at) => (true, self.head(at), self.tail(at + pattern.len())),
            None => (false, self.head(0), *self),
        }
    }

    /// Number of non-overlapping occurrences of `pattern`, scanning left to
    /// right.
    ///
    /// An empty pattern counts every gap: `len() + 1`.
    #[must_use]
    pub fn count(&self, pattern: impl AsRef<[u8]>) -> usize {
        count_matches(self.bytes, pattern.as_ref())
    }

    /// Lazily splits on every occurrence of `delimiter`.
    ///
    /// An empty delimiter yields the whole view once.
    ///
    /// ```
    /// use zslice::ByteSlice;
    ///
    /// let parts: Vec<_> = ByteSlice::from("a,b,,c").split(",").collect();
    /// assert_eq!(parts, ["a", "b", "", "c"]);
    /// ```
    pub fn split<P: AsRef<[u8]>>(&self, delimiter: P) -> Split<'a, P> {
        Split {
            rest: *self,
            delimiter,
            done: false,
        }
    }

    /// A new buffer holding `self` followed by `other`.
    #[must_use]
    pub fn add(&self, other: impl AsRef<[u8]>) -> Vec<u8> {
        join_bytes(&[], [self.bytes, other.as_ref()].into_iter())
    }

    /// A new buffer holding `parts` with `self` between consecutive elements.
    ///
    /// ```
    /// use zslice::ByteSlice;
    ///
    /// let sep = ByteSlice::from(", ");
    /// let parts = ["a", "b", "c"].map(ByteSlice::from);
    /// assert_eq!(sep.join(&parts), b"a, b, c");
    /// assert!(sep.join(&[]).is_empty());
    /// ```
    #[must_use]
    pub fn join(&self, parts: &[ByteSlice<'_>]) -> Vec<u8> {
        join_bytes(self.bytes, parts.iter().map(ByteSlice::as_bytes))
    }

    /// A double-ended iterator over the bytes.
    #[must_use]
    pub fn iter(&self) -> ByteIter<'a> {
        ByteIter::new(*self)
    }

    /// An owned copy of the viewed bytes.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    // In-bounds by construction at every call site.
    fn head(&self, end: usize) -> Self {
        Self::new(&self.bytes[..end])
    }

    fn tail(&self, start: usize) -> Self {
        Self::new(&self.bytes[start..])
    }
}

pub(crate) fn digest(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

pub(crate) fn count_matches(mut haystack: &[u8], pattern: &[u8]) -> usize {
    if pattern.is_empty() {
        return haystack.len() + 1;
    }
    let mut count = 0;
    while let Some(at) = mem::find(haystack, pattern) {
        count += 1;
        haystack = &haystack[at + pattern.len()..];
    }
    count
}

/// Concatenates `parts` with `sep` between neighbours into a buffer sized up
/// front.
pub(crate) fn join_bytes<'p, I>(sep: &[u8], parts: I) -> Vec<u8>
where
    I: Iterator<Item = &'p [u8]> + Clone,
{
    let (count, body) = parts
        .clone()
        .fold((0usize, 0usize), |(n, total), part| (n + 1, total + part.len()));
    let total = body + sep.len() * count.saturating_sub(1);
    trace!(parts = count, bytes = total, "join");

    let mut out = vec![0u8; total];
    let mut pos = 0;
    for (i, part) in parts.enumerate() {
        if i > 0 {
            pos = fill(&mut out, pos, sep);
        }
        pos = fill(&mut out, pos, part);
    }
    debug_assert_eq!(pos, total);
    out
}

fn fill(out: &mut [u8], pos: usize, bytes: &[u8]) -> usize {
    let end = pos + bytes.len();
    mem::copy_words(&mut out[pos..end], bytes);
    end
}

/// Iterator returned by [`ByteSlice::split`].
#[derive(Debug, Clone)]
pub struct Split<'a, P> {
    rest: ByteSlice<'a>,
    delimiter: P,
    done: bool,
}

impl<'a, P: AsRef<[u8]>> Iterator for Split<'a, P> {
    type Item = ByteSlice<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let delimiter = self.delimiter.as_ref();
        if delimiter.is_empty() {
            self.done = true;
            return Some(self.rest);
        }
        match self.rest.split_once(delimiter) {
            (true, head, tail) => {
                self.rest = tail;
                Some(head)
            }
            (false, whole, _) => {
                self.done = true;
                Some(whole)
            }
        }
    }
}

impl<P: AsRef<[u8]>> FusedIterator for Split<'_, P> {}

impl PartialEq for ByteSlice<'_> {
    fn eq(&self, other: &Self) -> bool {
        mem::equal(self.bytes, other.bytes)
    }
}

impl Eq for ByteSlice<'_> {}

impl PartialOrd for ByteSlice<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByteSlice<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(*other)
    }
}

// Hashes exactly like `[u8]` so `Borrow<[u8]>` lookups stay consistent.
impl Hash for ByteSlice<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

macro_rules! impl_eq_bytes {
    ($($rhs:ty),* $(,)?) => {
        $(
            impl PartialEq<$rhs> for ByteSlice<'_> {
                fn eq(&self, other: &$rhs) -> bool {
                    mem::equal(self.bytes, AsRef::<[u8]>::as_ref(other))
                }
            }
        )*
    };
}

impl_eq_bytes!([u8], &[u8], str, &str, Vec<u8>);

impl<const N: usize> PartialEq<[u8; N]> for ByteSlice<'_> {
    fn eq(&self, other: &[u8; N]) -> bool {
        mem::equal(self.bytes, other)
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for ByteSlice<'_> {
    fn eq(&self, other: &&[u8; N]) -> bool {
        mem::equal(self.bytes, *other)
    }
}

impl AsRef<[u8]> for ByteSlice<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl Borrow<[u8]> for ByteSlice<'_> {
    fn borrow(&self) -> &[u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for ByteSlice<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for ByteSlice<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::new(bytes)
    }
}

impl<'a> From<&'a str> for ByteSlice<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl<'a> From<&'a Vec<u8>> for ByteSlice<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl<'a> IntoIterator for ByteSlice<'a> {
    type Item = u8;
    type IntoIter = ByteIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for ByteSlice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(BStr::new(self.bytes), f)
    }
}

impl fmt::Display for ByteSlice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(BStr::new(self.bytes), f)
    }
}
