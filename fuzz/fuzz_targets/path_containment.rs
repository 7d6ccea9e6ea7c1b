//! Fuzz target for the root containment check.
//!
//! Any path the check accepts must be free of `..` segments and must not be
//! absolute, whichever separator it uses.

#![no_main]

use std::path::Path;

use labelprobe::detection::fuzz_is_path_within_root;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 4096 {
        return;
    }

    let Ok(path) = std::str::from_utf8(data) else {
        return;
    };

    if fuzz_is_path_within_root(path) {
        assert!(!path.split(['/', '\\']).any(|segment| segment == ".."));
        assert!(!path.starts_with('/') && !path.starts_with('\\'));
        assert!(!Path::new(path).is_absolute());
    }
});
