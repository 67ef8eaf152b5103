#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use zslice::{ByteSlice, CharSlice, SliceError, mem};

/// One operation to run against both zslice and the standard library.
#[derive(Debug, Arbitrary)]
enum Op {
    Find(Vec<u8>),
    Split(Vec<u8>),
    Replace(Vec<u8>, Vec<u8>, u8),
    Subslice(usize, usize),
    Chars,
    Move(usize, usize, usize),
    Compare(Vec<u8>),
}

#[derive(Debug, Arbitrary)]
struct Input {
    text: Vec<u8>,
    ops: Vec<Op>,
}

fn naive_find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn naive_rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(haystack.len());
    }
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

fn run(input: &Input) {
    let bytes = input.text.as_slice();
    let view = ByteSlice::new(bytes);
    let text = core::str::from_utf8(bytes).ok();

    for op in &input.ops {
        match op {
            Op::Find(needle) => {
                assert_eq!(view.find(needle), naive_find(bytes, needle));
                assert_eq!(view.rfind(needle), naive_rfind(bytes, needle));
                if let (Some(t), Ok(n)) = (text, core::str::from_utf8(needle)) {
                    let chars = CharSlice::new(t);
                    assert_eq!(chars.find(n), t.find(n));
                    assert_eq!(chars.rfind(n), t.rfind(n));
                }
            }
            Op::Split(delimiter) => {
                let parts: Vec<&[u8]> = view.split(delimiter).map(|p| p.as_bytes()).collect();
                if delimiter.is_empty() {
                    assert_eq!(parts, [bytes]);
                } else {
                    assert_eq!(parts.join(delimiter.as_slice()), bytes);
                    assert_eq!(parts.len(), view.count(delimiter) + 1);
                }
            }
            Op::Replace(pattern, replacement, n) => {
                let (Some(t), Ok(p), Ok(r)) = (
                    text,
                    core::str::from_utf8(pattern),
                    core::str::from_utf8(replacement),
                ) else {
                    continue;
                };
                if p.is_empty() {
                    continue;
                }
                let n = usize::from(*n);
                let ours = CharSlice::new(t).replacen(p, r, n);
                assert_eq!(ours, t.replacen(p, r, n).into_bytes());
            }
            Op::Subslice(start, end) => {
                let got = view.get_subslice(*start, *end);
                match bytes.get(*start..*end) {
                    Some(expected) => assert_eq!(got.map(|v| v.as_bytes()), Ok(expected)),
                    None => assert!(matches!(got, Err(SliceError::OutOfBounds { .. }))),
                }
                if let Some(t) = text {
                    let got = CharSlice::new(t).get_subslice(*start, *end);
                    assert_eq!(got.ok().and_then(|v| v.as_str()), t.get(*start..*end));
                }
            }
            Op::Chars => {
                let chars = CharSlice::from_bytes_unchecked(bytes);
                match core::str::from_utf8(bytes) {
                    Ok(t) => assert_eq!(chars.char_count(), Ok(t.chars().count())),
                    Err(err) => assert_eq!(
                        chars.char_count(),
                        Err(SliceError::InvalidUtf8 {
                            offset: err.valid_up_to()
                        })
                    ),
                }
                assert!(chars.chars_unchecked().count() <= bytes.len());
                assert!(chars.chars_unchecked().rev().count() <= bytes.len());
            }
            Op::Move(start, end, dst) => {
                let mut ours = bytes.to_vec();
                let mut theirs = bytes.to_vec();
                let result = mem::move_within(&mut ours, *start..*end, *dst);
                let in_range = start <= end
                    && *end <= bytes.len()
                    && dst.checked_add(end - start).is_some_and(|e| e <= bytes.len());
                assert_eq!(result.is_ok(), in_range);
                if in_range {
                    theirs.copy_within(*start..*end, *dst);
                    assert_eq!(ours, theirs);
                }
            }
            Op::Compare(other) => {
                assert_eq!(mem::compare(bytes, other), bytes.cmp(other.as_slice()));
                assert_eq!(mem::equal(bytes, other), bytes == other.as_slice());
            }
        }
    }
}

fuzz_target!(|input: Input| run(&input));
