//! Fuzz target for YOLO label row checking.
//!
//! This fuzzer feeds arbitrary UTF-8 lines to the row check, looking for
//! panics or hangs.

#![no_main]

use labelprobe::formats::yolo::fuzz_parse_label_row;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fuzz_parse_label_row(line);
});
