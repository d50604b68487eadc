//! Fuzz testing for the read engine.
//!
//! Feeds arbitrary bytes to `DbReader` construction and lookup to ensure
//! malformed files are handled gracefully: every outcome must be a typed
//! error or a clean miss, never a panic or an out-of-bounds read.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use rofldb::DbReader;

#[derive(Debug, Arbitrary)]
struct ReaderInput {
    file: Vec<u8>,
    keys: Vec<Vec<u8>>,
}

fuzz_target!(|input: ReaderInput| {
    let Ok(reader) = DbReader::new(&input.file) else {
        return;
    };

    for key in &input.keys {
        let _ = reader.get(key);
    }
    let _ = reader.get("");
    let _ = reader.get([0xFF; 70000]);
});
