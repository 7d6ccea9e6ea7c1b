#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A plain path segment: never empty, never `.` or `..`.
pub fn arb_segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

/// Relative paths of one to four plain segments.
pub fn arb_relative_path() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_segment(), 1..=4)
}

/// A relative path with a `..` segment spliced in somewhere.
pub fn arb_traversal_path() -> impl Strategy<Value = String> {
    (arb_relative_path(), any::<prop::sample::Index>(), any::<bool>()).prop_map(
        |(mut segments, index, backslash)| {
            let at = index.index(segments.len() + 1);
            segments.insert(at, "..".to_string());
            segments.join(if backslash { "\\" } else { "/" })
        },
    )
}

/// Distinct `.txt` file names.
pub fn arb_file_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(arb_segment(), 1..8)
        .prop_map(|names| names.into_iter().map(|n| format!("{}.txt", n)).collect())
}
