use core::{cmp::Ordering, fmt};

use crate::utf8;

/// A single UTF-8 encoded character copied out of a slice.
///
/// A `Char` is either valid (1–4 bytes decoding to a Unicode scalar value) or
/// invalid, in which case [`len`](Self::len) is 0 and the raw bytes that were
/// examined are kept for ordering and inspection. Unused trailing bytes are
/// always zero.
///
/// Ordering: every valid character sorts before every invalid one; valid
/// characters order by code point, invalid ones by their raw bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Char {
    bytes: [u8; 4],
    len: u8,
    valid: bool,
}

impl Char {
    /// Decodes the character at the start of `window`.
    ///
    /// On failure the result is invalid and holds the bytes a leading-byte
    /// heuristic would have consumed (at least one, at most four, clamped to
    /// the window). An empty window produces an invalid char with no bytes.
    #[must_use]
    pub fn decode(window: &[u8]) -> Self {
        match utf8::decode_len(window) {
            0 => Self::invalid(window),
            len => Self::from_valid(&window[..len]),
        }
    }

    /// Takes up to [`utf8::lead_len`] bytes from `window` without validating.
    pub(crate) fn decode_unchecked(window: &[u8]) -> (Self, usize) {
        let Some(&b0) = window.first() else {
            return (Self::invalid(window), 0);
        };
        let take = utf8::lead_len(b0).min(window.len());
        let ch = if utf8::decode_len(&window[..take]) == take {
            Self::from_valid(&window[..take])
        } else {
            Self::invalid(&window[..take])
        };
        (ch, take)
    }

    pub(crate) fn from_valid(encoded: &[u8]) -> Self {
        debug_assert_eq!(utf8::decode_len(encoded), encoded.len());
        let mut bytes = [0u8; 4];
        bytes[..encoded.len()].copy_from_slice(encoded);
        Self {
            bytes,
            len: encoded.len() as u8,
            valid: true,
        }
    }

    pub(crate) fn invalid(window: &[u8]) -> Self {
        let take = window
            .first()
            .map_or(0, |&b0| utf8::lead_len(b0).min(window.len()));
        let mut bytes = [0u8; 4];
        bytes[..take].copy_from_slice(&window[..take]);
        Self {
            bytes,
            len: 0,
            valid: false,
        }
    }

    /// Encoded length in bytes; 0 for an invalid character.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// True only for invalid characters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the stored bytes form a valid UTF-8 character.
    #[must_use]
    pub const fn is_valid_utf8(&self) -> bool {
        self.valid
    }

    /// True for single-byte characters below `0x80`.
    #[must_use]
    pub const fn is_ascii(&self) -> bool {
        self.len == 1 && self.bytes[0] < 0x80
    }

    /// The encoded bytes. Empty for invalid characters; see
    /// [`raw_bytes`](Self::raw_bytes).
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }

    /// All four storage bytes, including those of an invalid character.
    #[must_use]
    pub const fn raw_bytes(&self) -> [u8; 4] {
        self.bytes
    }

    /// The Unicode scalar value, or U+FFFD for an invalid character.
    #[must_use]
    pub const fn code_point(&self) -> u32 {
        if self.valid {
            utf8::assemble(&self.bytes, self.len as usize)
        } else {
            char::REPLACEMENT_CHARACTER as u32
        }
    }

    /// The character as a `char`, if valid.
    #[must_use]
    pub fn to_char(&self) -> Option<char> {
        if self.valid {
            char::from_u32(self.code_point())
        } else {
            None
        }
    }
}

impl From<char> for Char {
    fn from(ch: char) -> Self {
        let (bytes, len) = utf8::encode(ch);
        Self {
            bytes,
            len: len as u8,
            valid: true,
        }
    }
}

impl Ord for Char {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.valid, other.valid) {
            (true, true) => self.code_point().cmp(&other.code_point()),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.bytes.cmp(&other.bytes),
        }
    }
}

impl PartialOrd for Char {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<char> for Char {
    fn eq(&self, other: &char) -> bool {
        self.to_char() == Some(*other)
    }
}

impl fmt::Debug for Char {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_char() {
            Some(ch) => write!(f, "Char({ch:?})"),
            None => write!(f, "Char(invalid {:02X?})", self.bytes),
        }
    }
}

impl fmt::Display for Char {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = self.to_char().unwrap_or(char::REPLACEMENT_CHARACTER);
        fmt::Display::fmt(&ch, f)
    }
}
