//! ASCII-only transforms over byte views.
//!
//! Bytes at or above `0x80` pass through untouched, so applying any of these
//! to UTF-8 text keeps it valid.

use alloc::{format, string::String, vec::Vec};

use crate::{
    byte_slice::ByteSlice,
    error::{Result, SliceError},
};

/// Space, `\t`, `\n`, `\r`, vertical tab and form feed.
#[must_use]
pub const fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

/// A copy with `a..=z` mapped to `A..=Z`.
#[must_use]
pub fn to_ascii_uppercase(slice: ByteSlice<'_>) -> Vec<u8> {
    slice.as_bytes().to_ascii_uppercase()
}

/// A copy with `A..=Z` mapped to `a..=z`.
#[must_use]
pub fn to_ascii_lowercase(slice: ByteSlice<'_>) -> Vec<u8> {
    slice.as_bytes().to_ascii_lowercase()
}

/// The view without leading ASCII whitespace.
#[must_use]
pub fn trim_start(slice: ByteSlice<'_>) -> ByteSlice<'_> {
    let bytes = slice.as_bytes();
    let start = bytes
        .iter()
        .position(|&b| !is_whitespace(b))
        .unwrap_or(bytes.len());
    ByteSlice::new(&bytes[start..])
}

/// The view without trailing ASCII whitespace.
#[must_use]
pub fn trim_end(slice: ByteSlice<'_>) -> ByteSlice<'_> {
    let bytes = slice.as_bytes();
    let end = bytes
        .iter()
        .rposition(|&b| !is_whitespace(b))
        .map_or(0, |i| i + 1);
    ByteSlice::new(&bytes[..end])
}

/// The view without leading or trailing ASCII whitespace.
#[must_use]
pub fn trim(slice: ByteSlice<'_>) -> ByteSlice<'_> {
    trim_end(trim_start(slice))
}

/// `n` back-to-back copies of the view.
#[must_use]
pub fn repeat(slice: ByteSlice<'_>, n: usize) -> Vec<u8> {
    slice.as_bytes().repeat(n)
}

/// The view preceded by enough `fill` bytes to reach `width` bytes.
#[must_use]
pub fn pad_start(slice: ByteSlice<'_>, width: usize, fill: u8) -> Vec<u8> {
    let bytes = slice.as_bytes();
    let mut out = Vec::with_capacity(width.max(bytes.len()));
    out.resize(width.saturating_sub(bytes.len()), fill);
    out.extend_from_slice(bytes);
    out
}

/// The view followed by enough `fill` bytes to reach `width` bytes.
#[must_use]
pub fn pad_end(slice: ByteSlice<'_>, width: usize, fill: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(width.max(slice.len()));
    out.extend_from_slice(slice.as_bytes());
    out.resize(out.len().max(width), fill);
    out
}

/// Formats `value` as `0x`-prefixed lowercase hex.
///
/// ```
/// assert_eq!(zslice::ascii::to_hex_string(0xdead_beef), "0xdeadbeef");
/// assert_eq!(zslice::ascii::to_hex_string(0), "0x0");
/// ```
#[must_use]
pub fn to_hex_string(value: u64) -> String {
    format!("{value:#x}")
}

/// Parses hex digits, with an optional `0x` or `0X` prefix, into a `u64`.
///
/// # Errors
///
/// [`SliceError::InvalidDigit`] at the offending byte offset (offset of the
/// first digit position when there are no digits at all);
/// [`SliceError::Overflow`] when the value does not fit in 64 bits.
///
/// ```
/// use zslice::{ByteSlice, SliceError, ascii::parse_hex_address};
///
/// assert_eq!(parse_hex_address(ByteSlice::from("0x7fFF")), Ok(0x7fff));
/// assert_eq!(
///     parse_hex_address(ByteSlice::from("0x12g")),
///     Err(SliceError::InvalidDigit { index: 4 })
/// );
/// ```
pub fn parse_hex_address(slice: ByteSlice<'_>) -> Result<u64> {
    let bytes = slice.as_bytes();
    let skip = match bytes {
        [b'0', b'x' | b'X', ..] => 2,
        _ => 0,
    };
    let digits = &bytes[skip..];
    if digits.is_empty() {
        return Err(SliceError::InvalidDigit { index: skip });
    }
    digits.iter().enumerate().try_fold(0u64, |acc, (i, &b)| {
        let digit = hex_value(b).ok_or(SliceError::InvalidDigit { index: skip + i })?;
        acc.checked_mul(16)
            .map(|shifted| shifted | u64::from(digit))
            .ok_or(SliceError::Overflow)
    })
}

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
