//! Fuzz target for the full profiling pipeline.
//!
//! This fuzzer tests that the profiler:
//! 1. Never panics on any decoded row input
//! 2. Keeps the quality score within bounds
//! 3. Regex-based date detection doesn't crash on pathological input

#![no_main]

use assay::{Profiler, RowTable};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs
    if data.len() > 10_000 {
        return;
    }

    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    // Raw text as every cell of a three-column table
    let json = serde_json::json!([
        {"col1": content, "col2": content, "col3": content},
        {"col1": content, "col2": null, "col3": 1.5},
    ]);
    if let Ok(table) = RowTable::from_json_value(&json) {
        if let Ok(profile) = Profiler::new().profile(&table, "fuzz") {
            assert!((0.0..=100.0).contains(&profile.insights.data_quality));
        }
    }

    // Raw bytes as a JSON row array
    if let Ok(table) = RowTable::from_json_str(content) {
        let _ = Profiler::new().profile(&table, "fuzz");
    }
});
