//! Fuzz target for `KmerLength::parse`.
//!
//! Any string must either parse to a positive length or be rejected with
//! an `InvalidK` error; parsing must never panic.

#![no_main]

use kmerctx::error::KmerCtxError;
use kmerctx::kmer::KmerLength;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    match KmerLength::parse(text) {
        Ok(k) => {
            assert!(k.get() >= 1);
            assert_eq!(text.trim().parse::<usize>().ok(), Some(k.get()));
        }
        Err(err) => assert!(matches!(err, KmerCtxError::InvalidK { .. })),
    }
});
