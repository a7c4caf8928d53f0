//! Fuzz target for loading and typing data files.
//!
//! This fuzzer tests that the CSV/TSV loader:
//! 1. Never panics on malformed input
//! 2. Handles all delimiter combinations
//! 3. Always yields equally long typed columns when it succeeds

#![no_main]

use driftscope::input::Parser;
use driftscope::Dataset;
use libfuzzer_sys::fuzz_target;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(mut temp_file) = tempfile::NamedTempFile::new() {
        if temp_file.write_all(data).is_ok() {
            let parser = Parser::new();
            if let Ok((table, _)) = parser.parse_file(temp_file.path()) {
                if let Ok(dataset) = Dataset::from_table(&table) {
                    assert!(dataset.columns().all(|c| c.len() == dataset.row_count()));
                }
            }
        }
    }
});
