#![expect(missing_docs)]

use std::time::Duration;

use rstest::rstest;
use zslice::{ByteSlice, CharSlice, SliceError, ascii};

#[rstest]
#[case("hello", "l", Some(2), Some(3))]
#[case("hello", "", Some(0), Some(5))]
#[case("hello", "hello!", None, None)]
#[case("", "", Some(0), Some(0))]
#[case("aaa", "aa", Some(0), Some(1))]
#[case("a\u{20AC}b\u{20AC}", "\u{20AC}", Some(1), Some(5))]
fn find_and_rfind(
    #[case] haystack: &str,
    #[case] needle: &str,
    #[case] first: Option<usize>,
    #[case] last: Option<usize>,
) {
    let bytes = ByteSlice::from(haystack);
    assert_eq!(bytes.find(needle), first);
    assert_eq!(bytes.rfind(needle), last);
    let chars = CharSlice::new(haystack);
    assert_eq!(chars.find(needle), first);
    assert_eq!(chars.rfind(needle), last);
}

#[rstest]
#[case(0, 1, Ok("a"))]
#[case(1, 4, Ok("\u{20AC}"))]
#[case(0, 2, Err(SliceError::InvalidCharBoundary { index: 2 }))]
#[case(2, 4, Err(SliceError::InvalidCharBoundary { index: 2 }))]
#[case(4, 6, Err(SliceError::OutOfBounds { start: 4, end: 6, len: 5 }))]
#[case(3, 1, Err(SliceError::OutOfBounds { start: 3, end: 1, len: 5 }))]
fn char_subslices_check_edges(
    #[case] start: usize,
    #[case] end: usize,
    #[case] expected: Result<&str, SliceError>,
) {
    let s = CharSlice::new("a\u{20AC}b");
    let got = s.get_subslice(start, end).map(|v| v.as_str().unwrap_or_default());
    assert_eq!(got, expected);
}

#[rstest]
#[case("a,b,c", ",", (true, "a", "b,c"), (true, "a,b", "c"))]
#[case("abc", ",", (false, "abc", ""), (false, "", "abc"))]
#[case(",", ",", (true, "", ""), (true, "", ""))]
fn split_once_both_ways(
    #[case] text: &str,
    #[case] delimiter: &str,
    #[case] first: (bool, &str, &str),
    #[case] last: (bool, &str, &str),
) {
    let s = CharSlice::new(text);
    let (found, head, tail) = s.split_once(delimiter);
    assert_eq!((found, head.as_str(), tail.as_str()), (first.0, Some(first.1), Some(first.2)));
    let (found, head, tail) = s.rsplit_once(delimiter);
    assert_eq!((found, head.as_str(), tail.as_str()), (last.0, Some(last.1), Some(last.2)));
}

#[rstest]
#[case("Hello, world!", Ok(13))]
#[case("na\u{EF}ve", Ok(5))]
#[case("\u{1F980}", Ok(1))]
fn char_counts(#[case] text: &str, #[case] expected: Result<usize, SliceError>) {
    assert_eq!(CharSlice::new(text).char_count(), expected);
}

#[rstest]
#[case(&[0x80], 0)]
#[case(b"ab\xC0\x80", 2)]
#[case(b"\xED\xA0\x80", 0)]
#[case(b"ok\xF4\x90\x80\x80", 2)]
#[case(b"abc\xE2\x82", 3)]
fn malformed_input_reports_offset(#[case] bytes: &[u8], #[case] offset: usize) {
    let s = CharSlice::from_bytes_unchecked(bytes);
    assert_eq!(s.char_count(), Err(SliceError::InvalidUtf8 { offset }));
    assert!(!s.is_valid_utf8());
    assert!(s.as_str().is_none());
}

#[rstest]
#[timeout(Duration::from_millis(1_000))]
fn replacen_large_input() {
    let text = "ab".repeat(50_000);
    let s = CharSlice::new(&text);
    let shrunk = s.replacen("ab", "x", usize::MAX);
    assert_eq!(shrunk.len(), 50_000);
    let grown = s.replacen("b", "bbb", 10);
    assert_eq!(grown.len(), text.len() + 20);
    assert!(grown.starts_with(b"abbbabbb"));
}

#[rstest]
fn views_never_copy() {
    let text = String::from("  key = value  ");
    let s = CharSlice::new(&text).trim();
    let (_, key, value) = s.split_once(" = ");
    let base = text.as_ptr() as usize;
    assert_eq!(key.as_ptr() as usize - base, 2);
    assert_eq!(value.as_ptr() as usize - base, 8);
    assert_eq!(value, "value");
}

#[rstest]
#[case("0x0", Ok(0))]
#[case("DEADbeef", Ok(0xDEAD_BEEF))]
#[case("0xffffffffffffffff", Ok(u64::MAX))]
#[case("0x1ffffffffffffffff", Err(SliceError::Overflow))]
#[case("0xz", Err(SliceError::InvalidDigit { index: 2 }))]
#[case("", Err(SliceError::InvalidDigit { index: 0 }))]
fn hex_addresses(#[case] text: &str, #[case] expected: Result<u64, SliceError>) {
    assert_eq!(ascii::parse_hex_address(ByteSlice::from(text)), expected);
}

#[test]
fn error_messages() {
    assert_eq!(
        SliceError::OutOfBounds { start: 4, end: 9, len: 5 }.to_string(),
        "range 4..9 out of bounds for slice of length 5"
    );
    assert_eq!(
        SliceError::InvalidUtf8 { offset: 3 }.to_string(),
        "invalid UTF-8 sequence at byte 3"
    );
}
