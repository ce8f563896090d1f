//! Fuzz target for `Kmers` and `ContextTable::add_sequence`.
//!
//! The first byte picks k; the rest is treated as a raw sequence, so any
//! byte value, ambiguity code or lower-case letter ends up in a k-mer.

#![no_main]

use bytes::Bytes;
use kmerctx::kmer::{KmerLength, Kmers, NextChar};
use kmerctx::ContextTable;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    let Ok(k) = KmerLength::new(usize::from(first % 16) + 1) else {
        return;
    };
    let seq = Bytes::copy_from_slice(rest);

    let pairs: Vec<_> = Kmers::new(seq.clone(), k).collect();
    assert_eq!(pairs.len(), Kmers::window_count(seq.len(), k));

    for (i, (kmer, next)) in pairs.iter().enumerate() {
        assert_eq!(kmer.as_ref(), &rest[i..i + k.get()]);
        let expected = NextChar::from(rest.get(i + k.get()).copied());
        assert_eq!(*next, expected);
    }

    let mut table = ContextTable::new(k);
    table.add_sequence(&seq);
    let sum: u64 = table.frequencies().values().sum();
    assert_eq!(sum, pairs.len() as u64);
});
