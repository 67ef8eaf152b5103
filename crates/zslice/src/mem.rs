//! Raw memory primitives: byte search, block compare, move and copy.
//!
//! Everything above this module composes from these functions. Ranges shorter
//! than a machine word are handled with plain byte loops; longer ranges are
//! processed a `usize` at a time so that each step touches one word instead of
//! eight bytes. Partial-word tails are loaded zero-padded, which keeps the
//! observable results identical to the byte-at-a-time definitions.
//!
//! Word loads go through a small stack array (`load_le`/`load_be`) rather than
//! pointer casts, so no alignment assumptions are made about the input.

use core::{cmp::Ordering, ops::Range};

use crate::error::{Result, SliceError};

const WORD: usize = core::mem::size_of::<usize>();
/// `0x0101…01`: one in every byte lane.
const LO: usize = usize::MAX / 0xFF;
/// `0x8080…80`: the high bit of every byte lane.
const HI: usize = LO << 7;

#[inline(always)]
fn load_le(chunk: &[u8]) -> usize {
    let mut word = [0u8; WORD];
    word[..chunk.len()].copy_from_slice(chunk);
    usize::from_le_bytes(word)
}

// Big-endian loads make numeric word order equal lexicographic byte order.
#[inline(always)]
fn load_be(chunk: &[u8]) -> usize {
    let mut word = [0u8; WORD];
    word[..chunk.len()].copy_from_slice(chunk);
    usize::from_be_bytes(word)
}

/// Sets the high bit of each lane that is zero in `x`. Exact for the lowest
/// zero lane; lanes above it may report false positives.
#[inline(always)]
const fn zero_lanes(x: usize) -> usize {
    x.wrapping_sub(LO) & !x & HI
}

#[inline(always)]
const fn splat(byte: u8) -> usize {
    LO * byte as usize
}

/// Returns the index of the first occurrence of `target` in `haystack`.
///
/// ```
/// assert_eq!(zslice::mem::find_byte(b"hello, world", b','), Some(5));
/// assert_eq!(zslice::mem::find_byte(b"hello", b'z'), None);
/// ```
#[must_use]
pub fn find_byte(haystack: &[u8], target: u8) -> Option<usize> {
    if haystack.len() < WORD {
        return haystack.iter().position(|&b| b == target);
    }

    let pattern = splat(target);
    let mut chunks = haystack.chunks_exact(WORD);
    let mut offset = 0;
    for chunk in &mut chunks {
        let hits = zero_lanes(load_le(chunk) ^ pattern);
        if hits != 0 {
            // Little-endian: the lowest lane is the lowest address.
            return Some(offset + hits.trailing_zeros() as usize / 8);
        }
        offset += WORD;
    }
    chunks
        .remainder()
        .iter()
        .position(|&b| b == target)
        .map(|i| offset + i)
}

/// Returns the index of the last occurrence of `target` in `haystack`.
#[must_use]
pub fn rfind_byte(haystack: &[u8], target: u8) -> Option<usize> {
    if haystack.len() < WORD {
        return haystack.iter().rposition(|&b| b == target);
    }

    let pattern = splat(target);
    let mut chunks = haystack.rchunks_exact(WORD);
    let mut end = haystack.len();
    for chunk in &mut chunks {
        let start = end - WORD;
        if zero_lanes(load_le(chunk) ^ pattern) != 0 {
            // The highest flagged lane may be a false positive, so resolve the
            // hit inside this word byte by byte.
            if let Some(i) = chunk.iter().rposition(|&b| b == target) {
                return Some(start + i);
            }
        }
        end = start;
    }
    chunks.remainder().iter().rposition(|&b| b == target)
}

/// Orders two byte ranges lexicographically.
///
/// The shared prefix is compared in ascending address order; when it is equal
/// the shorter range sorts first.
///
/// ```
/// use core::cmp::Ordering;
/// use zslice::mem::compare;
///
/// assert_eq!(compare(b"1", b"12"), Ordering::Less);
/// assert_eq!(compare(b"", b"1"), Ordering::Less);
/// assert_eq!(compare(b"abc", b"abc"), Ordering::Equal);
/// assert_eq!(compare(b"abd", b"abc"), Ordering::Greater);
/// ```
#[must_use]
pub fn compare(a: &[u8], b: &[u8]) -> Ordering {
    let shared = a.len().min(b.len());
    let (pa, pb) = (&a[..shared], &b[..shared]);
    let prefix = if shared < WORD {
        compare_bytes(pa, pb)
    } else {
        compare_words(pa, pb)
    };
    prefix.then(a.len().cmp(&b.len()))
}

fn compare_bytes(a: &[u8], b: &[u8]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        if x != y {
            return x.cmp(y);
        }
    }
    Ordering::Equal
}

// Both inputs have the same length.
fn compare_words(a: &[u8], b: &[u8]) -> Ordering {
    let mut ca = a.chunks_exact(WORD);
    let mut cb = b.chunks_exact(WORD);
    for (x, y) in (&mut ca).zip(&mut cb) {
        let (x, y) = (load_be(x), load_be(y));
        if x != y {
            return x.cmp(&y);
        }
    }
    load_be(ca.remainder()).cmp(&load_be(cb.remainder()))
}

/// Byte equality with a length short-circuit before any content is read.
#[must_use]
pub fn equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    if a.len() < WORD {
        return a == b;
    }
    let mut ca = a.chunks_exact(WORD);
    let mut cb = b.chunks_exact(WORD);
    for (x, y) in (&mut ca).zip(&mut cb) {
        if load_le(x) != load_le(y) {
            return false;
        }
    }
    load_le(ca.remainder()) == load_le(cb.remainder())
}

/// Copies `src` into `dst`. The two ranges are disjoint by construction.
///
/// # Errors
///
/// Returns [`SliceError::OutOfBounds`] when the lengths differ.
pub fn copy(dst: &mut [u8], src: &[u8]) -> Result<()> {
    if dst.len() != src.len() {
        return Err(SliceError::out_of_bounds(0, src.len(), dst.len()));
    }
    copy_words(dst, src);
    Ok(())
}

/// [`copy`] for callers that sized `dst` themselves.
pub(crate) fn copy_words(dst: &mut [u8], src: &[u8]) {
    debug_assert_eq!(dst.len(), src.len());
    let mut d = dst.chunks_exact_mut(WORD);
    let mut s = src.chunks_exact(WORD);
    for (d, s) in (&mut d).zip(&mut s) {
        d.copy_from_slice(s);
    }
    d.into_remainder().copy_from_slice(s.remainder());
}

/// Moves the bytes of `src` to offset `dst` inside `buf`.
///
/// Overlapping source and destination ranges are handled (`memmove`
/// semantics): the destination ends up holding the bytes the source held
/// before the call.
///
/// ```
/// let mut buf = *b"abcdef";
/// zslice::mem::move_within(&mut buf, 0..4, 2).unwrap();
/// assert_eq!(&buf, b"ababcd");
/// ```
///
/// # Errors
///
/// Returns [`SliceError::OutOfBounds`] when either range does not fit in
/// `buf` or `src` is inverted.
pub fn move_within(buf: &mut [u8], src: Range<usize>, dst: usize) -> Result<()> {
    let Range { start, end } = src;
    if start > end || end > buf.len() {
        return Err(SliceError::out_of_bounds(start, end, buf.len()));
    }
    let count = end - start;
    match dst.checked_add(count) {
        Some(dst_end) if dst_end <= buf.len() => {}
        _ => {
            return Err(SliceError::out_of_bounds(
                dst,
                dst.saturating_add(count),
                buf.len(),
            ));
        }
    }
    move_words(buf, start..end, dst);
    Ok(())
}

/// [`move_within`] for ranges already known to fit in `buf`.
pub(crate) fn move_words(buf: &mut [u8], src: Range<usize>, dst: usize) {
    let Range { start, end } = src;
    let count = end - start;
    if count == 0 || dst == start {
        return;
    }

    if dst < start {
        // Forward: every word is read before the write that could clobber it.
        let mut i = 0;
        while i + WORD <= count {
            let word = load_word(buf, start + i);
            buf[dst + i..dst + i + WORD].copy_from_slice(&word);
            i += WORD;
        }
        for i in i..count {
            buf[dst + i] = buf[start + i];
        }
    } else {
        let mut rem = count;
        while rem >= WORD {
            rem -= WORD;
            let word = load_word(buf, start + rem);
            buf[dst + rem..dst + rem + WORD].copy_from_slice(&word);
        }
        for i in (0..rem).rev() {
            buf[dst + i] = buf[start + i];
        }
    }
}

#[inline(always)]
fn load_word(buf: &[u8], at: usize) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word.copy_from_slice(&buf[at..at + WORD]);
    word
}

/// Returns the offset of the first occurrence of `needle` in `haystack`.
///
/// An empty needle matches at offset 0.
#[must_use]
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let Some((&first, rest)) = needle.split_first() else {
        return Some(0);
    };
    if needle.len() > haystack.len() {
        return None;
    }
    let last_start = haystack.len() - needle.len();
    let mut from = 0;
    while from <= last_start {
        let i = from + find_byte(&haystack[from..=last_start], first)?;
        if equal(&haystack[i + 1..i + needle.len()], rest) {
            return Some(i);
        }
        from = i + 1;
    }
    None
}

/// Returns the offset of the last occurrence of `needle` in `haystack`.
///
/// An empty needle matches at `haystack.len()`.
#[must_use]
pub fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let Some((&last, rest)) = needle.split_last() else {
        return Some(haystack.len());
    };
    if needle.len() > haystack.len() {
        return None;
    }
    // Candidates are positions of the needle's last byte.
    let min_last = needle.len() - 1;
    let mut end = haystack.len();
    while end > min_last {
        let j = min_last + rfind_byte(&haystack[min_last..end], last)?;
        let start = j - min_last;
        if equal(&haystack[start..j], rest) {
            return Some(start);
        }
        end = j;
    }
    None
}
