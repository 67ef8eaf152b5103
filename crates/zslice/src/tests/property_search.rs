use alloc::{vec, vec::Vec};

use quickcheck::{QuickCheck, TestResult};

use super::{
    arbitrary::{Text, Utf8ish},
    case_count,
};
use crate::{ByteSlice, CharSlice, utf8};

/// Property: on valid text, byte and char search agree with `str`.
#[test]
fn search_matches_str() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(haystack: Text, needle: Text) -> bool {
        let (h, n) = (haystack.0.as_str(), needle.0.as_str());
        let bytes = ByteSlice::from(h);
        let chars = CharSlice::new(h);
        bytes.find(n) == h.find(n)
            && bytes.rfind(n) == h.rfind(n)
            && chars.find(n) == h.find(n)
            && chars.rfind(n) == h.rfind(n)
            && chars.starts_with(n) == h.starts_with(n)
            && chars.ends_with(n) == h.ends_with(n)
    }

    QuickCheck::new()
        .tests(case_count())
        .quickcheck(prop as fn(Text, Text) -> bool);
}

/// Offsets that fall strictly inside a decodable character, found by walking
/// the haystack from the front.
fn interior_offsets(bytes: &[u8]) -> Vec<bool> {
    let mut interior = vec![false; bytes.len() + 1];
    let mut at = 0;
    while at < bytes.len() {
        let len = utf8::decode_len(&bytes[at..]).max(1);
        interior[at + 1..at + len].fill(true);
        at += len;
    }
    interior
}

/// Property: char search returns exactly the byte matches that do not cut a
/// character, first and last respectively.
#[test]
fn char_search_filters_misaligned_matches() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(haystack: Utf8ish, needle: Utf8ish) -> TestResult {
        let (h, n) = (haystack.0.as_slice(), needle.0.as_slice());
        let Ok(chars) = CharSlice::from_bytes(h) else {
            return TestResult::discard();
        };
        let interior = interior_offsets(h);
        let aligned: Vec<usize> = (0..=h.len().saturating_sub(n.len()))
            .filter(|&at| h.len() >= n.len() && &h[at..at + n.len()] == n)
            .filter(|&at| !interior[at] && !interior[at + n.len()])
            .collect();
        TestResult::from_bool(
            chars.find(n) == aligned.first().copied()
                && chars.rfind(n) == aligned.last().copied(),
        )
    }

    QuickCheck::new()
        .tests(case_count())
        .quickcheck(prop as fn(Utf8ish, Utf8ish) -> TestResult);
}

/// Property: views order, compare and hash like the bytes they cover.
#[test]
fn ordering_matches_byte_slices() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(a: Vec<u8>, b: Vec<u8>) -> bool {
        use core::hash::BuildHasher;
        use std::collections::hash_map::RandomState;

        let (va, vb) = (ByteSlice::from(&a), ByteSlice::from(&b));
        let state = RandomState::new();
        va.cmp(&vb) == a.cmp(&b)
            && (va == vb) == (a == b)
            && state.hash_one(va) == state.hash_one(a.as_slice())
            && (a != b || va.content_digest() == vb.content_digest())
    }

    QuickCheck::new()
        .tests(case_count())
        .quickcheck(prop as fn(Vec<u8>, Vec<u8>) -> bool);
}
