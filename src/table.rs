//! K-mer frequency and next-character context tables.
//!
//! [`ContextTable`] is the aggregator of a run: it is fed every
//! `(k-mer, next character)` pair produced by [`Kmers`] and keeps two
//! mappings, k-mer -> count and k-mer -> (next byte -> count).
//!
//! Both mappings iterate in first-seen order, which is the order reports
//! use by default.
//!
//! # Example
//!
//! ```rust
//! use bytes::Bytes;
//! use kmerctx::{kmer::KmerLength, table::ContextTable};
//!
//! let mut table = ContextTable::new(KmerLength::new(2)?);
//! table.add_sequence(&Bytes::from_static(b"ATGTCTGTCTGAA"));
//!
//! assert_eq!(table.frequency(b"TG"), 3);
//! assert_eq!(table.next_count(b"TG", b'T'), 2);
//! assert_eq!(table.next_count(b"TG", b'A'), 1);
//! assert_eq!(table.terminal_count(b"AA"), 1);
//! # Ok::<(), kmerctx::error::KmerLengthError>(())
//! ```

use std::hash::BuildHasherDefault;

use bytes::Bytes;
use indexmap::IndexMap;
use rustc_hash::FxHasher;

use crate::{
    error::KmerCtxError,
    kmer::{KmerLength, Kmers, NextChar},
};

#[cfg(feature = "tracing")]
use tracing::debug;

/// An `IndexMap` w/ `FxHasher`.
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Next byte -> count, for one k-mer.
pub type NextCounts = FxIndexMap<u8, u64>;

/// K-mer -> total number of occurrences.
pub type FrequencyTable = FxIndexMap<Bytes, u64>;

/// K-mer -> next-character counts. K-mers seen only at the end of a
/// sequence have no entry.
pub type ContextCounts = FxIndexMap<Bytes, NextCounts>;

/// Accumulated k-mer statistics for one run.
#[derive(Debug, Clone)]
pub struct ContextTable {
    k: KmerLength,
    frequencies: FrequencyTable,
    contexts: ContextCounts,
    recorded: u64,
    sequences: u64,
    skipped_short: u64,
}

impl ContextTable {
    /// Creates empty tables for k-mers of length `k`.
    pub fn new(k: KmerLength) -> Self {
        Self {
            k,
            frequencies: FrequencyTable::default(),
            contexts: ContextCounts::default(),
            recorded: 0,
            sequences: 0,
            skipped_short: 0,
        }
    }

    pub const fn k(&self) -> KmerLength {
        self.k
    }

    /// Records one occurrence of `kmer`.
    ///
    /// The frequency is always incremented. The context count is incremented
    /// only when `next` is a real byte.
    pub fn record(&mut self, kmer: Bytes, next: NextChar) {
        match next {
            NextChar::Base(base) => {
                *self
                    .contexts
                    .entry(kmer.clone())
                    .or_default()
                    .entry(base)
                    .or_insert(0) += 1;
            }
            NextChar::Absent => {}
        }
        *self.frequencies.entry(kmer).or_insert(0) += 1;
        self.recorded += 1;
    }

    /// Runs the k-mer generator over `seq` and records every pair.
    ///
    /// Returns the number of pairs recorded; sequences shorter than k
    /// record nothing.
    pub fn add_sequence(&mut self, seq: &Bytes) -> usize {
        self.sequences += 1;

        if seq.len() < self.k.get() {
            self.skipped_short += 1;
            #[cfg(feature = "tracing")]
            debug!(len = seq.len(), k = %self.k, "Skipping sequence shorter than k");
            return 0;
        }

        let kmers = Kmers::new(seq.clone(), self.k);
        let pairs = kmers.len();
        for (kmer, next) in kmers {
            self.record(kmer, next);
        }
        pairs
    }

    /// Records every sequence in order; returns the total number of pairs.
    pub fn add_sequences<'a, I>(&mut self, sequences: I) -> usize
    where
        I: IntoIterator<Item = &'a Bytes>,
    {
        sequences
            .into_iter()
            .map(|seq| self.add_sequence(seq))
            .sum()
    }

    /// Sums another table into this one.
    ///
    /// K-mers new to `self` are appended in `other`'s first-seen order, so
    /// merging per-partition tables in input order reproduces the order a
    /// single pass would give.
    pub fn merge(&mut self, other: Self) -> Result<(), KmerCtxError> {
        if other.k != self.k {
            return Err(KmerCtxError::InvalidK {
                value: other.k.to_string(),
                reason: format!("cannot merge into a table built with k={}", self.k),
            });
        }

        for (kmer, count) in other.frequencies {
            *self.frequencies.entry(kmer).or_insert(0) += count;
        }
        for (kmer, nexts) in other.contexts {
            let entry = self.contexts.entry(kmer).or_default();
            for (base, count) in nexts {
                *entry.entry(base).or_insert(0) += count;
            }
        }
        self.recorded += other.recorded;
        self.sequences += other.sequences;
        self.skipped_short += other.skipped_short;
        Ok(())
    }

    /// Total occurrences of `kmer`; zero if never seen.
    pub fn frequency(&self, kmer: &[u8]) -> u64 {
        self.frequencies.get(kmer).copied().unwrap_or(0)
    }

    /// Next-character counts of `kmer`, if it was ever followed by a byte.
    pub fn contexts(&self, kmer: &[u8]) -> Option<&NextCounts> {
        self.contexts.get(kmer)
    }

    /// How often `kmer` was followed by `next`.
    pub fn next_count(&self, kmer: &[u8], next: u8) -> u64 {
        self.contexts(kmer)
            .and_then(|nexts| nexts.get(&next))
            .copied()
            .unwrap_or(0)
    }

    /// How often `kmer` ended its sequence (next character absent).
    pub fn terminal_count(&self, kmer: &[u8]) -> u64 {
        let with_context: u64 = self.contexts(kmer).map_or(0, |nexts| nexts.values().sum());
        self.frequency(kmer).saturating_sub(with_context)
    }

    pub const fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub const fn context_counts(&self) -> &ContextCounts {
        &self.contexts
    }

    /// Number of pairs recorded so far.
    pub const fn total(&self) -> u64 {
        self.recorded
    }

    /// Number of distinct k-mers.
    pub fn distinct(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Sequences passed to [`add_sequence`](Self::add_sequence), short ones included.
    pub const fn sequences(&self) -> u64 {
        self.sequences
    }

    /// Sequences that were shorter than k.
    pub const fn skipped_short(&self) -> u64 {
        self.skipped_short
    }

    /// `(k-mer, frequency)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&Bytes, u64)> + '_ {
        self.frequencies.iter().map(|(kmer, count)| (kmer, *count))
    }
}
