use alloc::{string::String, vec::Vec};

use quickcheck::{QuickCheck, TestResult};

use super::{arbitrary::Text, case_count};
use crate::CharSlice;

/// Property: non-empty delimiters split, count and replace like `str`.
#[test]
fn split_count_replace_match_str() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: Text, delimiter: Text, replacement: Text, n: u8) -> TestResult {
        let (t, d, r) = (text.0.as_str(), delimiter.0.as_str(), replacement.0.as_str());
        if d.is_empty() {
            return TestResult::discard();
        }
        let n = usize::from(n % 4);
        let s = CharSlice::new(t);
        let ours: Vec<&[u8]> = s.split(d).map(|part| part.as_bytes()).collect();
        let theirs: Vec<&[u8]> = t.split(d).map(str::as_bytes).collect();
        TestResult::from_bool(
            ours == theirs
                && s.count(d) == t.matches(d).count()
                && s.replacen(d, r, n) == t.replacen(d, r, n).into_bytes(),
        )
    }

    QuickCheck::new()
        .tests(case_count())
        .quickcheck(prop as fn(Text, Text, Text, u8) -> TestResult);
}

/// Property: `split_once` and `rsplit_once` partition the input around the
/// first and last match.
#[test]
fn split_once_partitions() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: Text, delimiter: Text) -> bool {
        let (t, d) = (text.0.as_str(), delimiter.0.as_str());
        let s = CharSlice::new(t);
        let first = match s.split_once(d) {
            (true, head, tail) => Some((head.as_str(), tail.as_str())),
            (false, whole, rest) => {
                assert_eq!(whole, s);
                assert!(rest.is_empty());
                None
            }
        };
        let last = match s.rsplit_once(d) {
            (true, head, tail) => Some((head.as_str(), tail.as_str())),
            (false, rest, whole) => {
                assert_eq!(whole, s);
                assert!(rest.is_empty());
                None
            }
        };
        fn wrap<'a>((a, b): (&'a str, &'a str)) -> (Option<&'a str>, Option<&'a str>) {
            (Some(a), Some(b))
        }
        first == t.split_once(d).map(wrap) && last == t.rsplit_once(d).map(wrap)
    }

    QuickCheck::new()
        .tests(case_count())
        .quickcheck(prop as fn(Text, Text) -> bool);
}

/// Property: `join` agrees with `[String]::join`.
#[test]
fn join_matches_std() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(parts: Vec<Text>, separator: Text) -> bool {
        let owned: Vec<String> = parts.into_iter().map(|p| p.0).collect();
        let views: Vec<CharSlice<'_>> = owned.iter().map(|p| CharSlice::new(p)).collect();
        CharSlice::new(&separator.0).join(&views) == owned.join(separator.0.as_str()).into_bytes()
    }

    QuickCheck::new()
        .tests(case_count())
        .quickcheck(prop as fn(Vec<Text>, Text) -> bool);
}
