mod property_search;
mod property_split;

/// Number of quickcheck cases per property: more on CI, a handful under the
/// fast or miri configurations.
pub(crate) fn case_count() -> u64 {
    if cfg!(any(miri, feature = "test-fast")) {
        16
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}
