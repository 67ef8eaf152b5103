//! Strict UTF-8 (RFC 3629) decoding of a single character.
//!
//! [`decode_len`] is the only place that decides whether bytes start a valid
//! character; boundary checks and the validated iterators all call it.

/// Returns the encoded length (1–4) of the character starting at
/// `window[0]`, or 0 if the window does not begin with a complete, valid
/// UTF-8 sequence.
///
/// Overlong encodings, surrogates, code points above U+10FFFF, stray
/// continuation bytes and truncated sequences all yield 0. Bytes past the
/// first character are ignored.
///
/// ```
/// use zslice::utf8::decode_len;
///
/// assert_eq!(decode_len(b"a"), 1);
/// assert_eq!(decode_len("é".as_bytes()), 2);
/// assert_eq!(decode_len("€".as_bytes()), 3);
/// assert_eq!(decode_len("🦀".as_bytes()), 4);
/// assert_eq!(decode_len(&[0x80]), 0);
/// assert_eq!(decode_len(&[0xC0, 0x80]), 0); // overlong NUL
/// assert_eq!(decode_len(&[0xED, 0xA0, 0x80]), 0); // surrogate
/// assert_eq!(decode_len(&[]), 0);
/// ```
#[must_use]
pub const fn decode_len(window: &[u8]) -> usize {
    let [b0, rest @ ..] = window else {
        return 0;
    };
    let b0 = *b0;
    match b0 {
        0x00..=0x7F => 1,
        0xC2..=0xDF => match rest {
            [b1, ..] if is_continuation(*b1) => 2,
            _ => 0,
        },
        0xE0..=0xEF => {
            let (lo, hi) = match b0 {
                0xE0 => (0xA0, 0xBF),
                0xED => (0x80, 0x9F),
                _ => (0x80, 0xBF),
            };
            match rest {
                [b1, b2, ..] if *b1 >= lo && *b1 <= hi && is_continuation(*b2) => 3,
                _ => 0,
            }
        }
        0xF0..=0xF4 => {
            let (lo, hi) = match b0 {
                0xF0 => (0x90, 0xBF),
                0xF4 => (0x80, 0x8F),
                _ => (0x80, 0xBF),
            };
            match rest {
                [b1, b2, b3, ..]
                    if *b1 >= lo && *b1 <= hi && is_continuation(*b2) && is_continuation(*b3) =>
                {
                    4
                }
                _ => 0,
            }
        }
        _ => 0,
    }
}

/// Decodes the character at the start of `window`, returning its code point
/// and encoded length.
#[must_use]
pub const fn decode(window: &[u8]) -> Option<(u32, usize)> {
    let len = decode_len(window);
    if len == 0 {
        return None;
    }
    Some((assemble(window, len), len))
}

/// Builds the code point from `len` bytes that were already validated.
pub(crate) const fn assemble(bytes: &[u8], len: usize) -> u32 {
    let b0 = bytes[0] as u32;
    match len {
        1 => b0,
        2 => ((b0 & 0x1F) << 6) | (bytes[1] as u32 & 0x3F),
        3 => ((b0 & 0x0F) << 12) | ((bytes[1] as u32 & 0x3F) << 6) | (bytes[2] as u32 & 0x3F),
        _ => {
            ((b0 & 0x07) << 18)
                | ((bytes[1] as u32 & 0x3F) << 12)
                | ((bytes[2] as u32 & 0x3F) << 6)
                | (bytes[3] as u32 & 0x3F)
        }
    }
}

/// Length announced by a leading byte, without looking at what follows.
///
/// Used by the unchecked iterators. Continuation and never-valid leading
/// bytes report 1 so that a scan always makes progress.
#[must_use]
pub const fn lead_len(byte: u8) -> usize {
    match byte {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// True for `10xxxxxx` bytes.
#[inline]
#[must_use]
pub const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Encodes a `char` into a zero-padded 4-byte array, returning the length.
pub(crate) fn encode(ch: char) -> ([u8; 4], usize) {
    let mut buf = [0u8; 4];
    let len = ch.encode_utf8(&mut buf).len();
    (buf, len)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn accepts_the_edges_of_every_range() {
        for ch in [
            '\0', '\u{7F}', '\u{80}', '\u{7FF}', '\u{800}', '\u{D7FF}', '\u{E000}', '\u{FFFF}',
            '\u{10000}', '\u{10FFFF}',
        ] {
            let (buf, len) = encode(ch);
            assert_eq!(decode_len(&buf[..len]), len, "{ch:?}");
            assert_eq!(decode(&buf[..len]), Some((u32::from(ch), len)));
        }
    }

    #[test]
    fn rejects_malformed_sequences() {
        let bad: [&[u8]; 12] = [
            &[0x80],
            &[0xBF],
            &[0xC0, 0xAF],
            &[0xC1, 0xBF],
            &[0xE0, 0x80, 0x80],
            &[0xED, 0xBF, 0xBF],
            &[0xF0, 0x8F, 0xBF, 0xBF],
            &[0xF4, 0x90, 0x80, 0x80],
            &[0xF5, 0x80, 0x80, 0x80],
            &[0xFF],
            &[0xE2, 0x82],
            &[0xC3, 0x28],
        ];
        for bytes in bad {
            assert_eq!(decode_len(bytes), 0, "{bytes:02X?}");
            assert_eq!(decode(bytes), None);
        }
    }

    #[test]
    fn lead_len_always_progresses() {
        for b in 0..=u8::MAX {
            assert!((1..=4).contains(&lead_len(b)));
        }
    }

    #[quickcheck]
    fn agrees_with_core_on_first_char(bytes: Vec<u8>) -> bool {
        let take = bytes.len().min(4);
        let window = &bytes[..take];
        let expected = (1..=take)
            .find(|&n| core::str::from_utf8(&window[..n]).is_ok())
            .unwrap_or(0);
        decode_len(window) == expected
    }

    #[quickcheck]
    fn agrees_with_bstr(bytes: Vec<u8>) -> bool {
        let (ch, len) = bstr::decode_utf8(&bytes);
        match ch {
            Some(ch) => decode(&bytes) == Some((u32::from(ch), len)),
            None => decode_len(&bytes) == 0,
        }
    }
}
