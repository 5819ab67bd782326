//! Fuzz target for the spec document parser.
//!
//! Run with: cargo +nightly fuzz run fuzz_document_parser
//!
//! Feeds arbitrary bytes to `document::parse`. Anything that parses must
//! export and parse again to the same entries.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tunespec_core::document;

fuzz_target!(|data: &[u8]| {
    let Ok(entries) = document::parse(data) else {
        return;
    };
    let exported = document::serialize(&entries).expect("parsed entries must serialize");
    let reparsed = document::parse(exported.as_bytes()).expect("exported document must parse");
    assert_eq!(entries, reparsed);
});
