//! # kmerctx
//!
//! K-mer frequencies and next-character context distributions for DNA
//! sequences in FASTA files.
//!
//! For every k-mer in the input, kmerctx counts how often it occurs and which
//! byte follows each occurrence. The final k-mer of a sequence has no
//! following byte; it is still counted, and reported as a terminal
//! occurrence rather than as a context.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kmerctx::run::count_kmer_contexts;
//!
//! let table = count_kmer_contexts("reads.fa", 2)?;
//! for (kmer, count) in table.iter() {
//!     println!("{}: {count}", String::from_utf8_lossy(kmer));
//! }
//! # Ok::<(), kmerctx::error::KmerCtxError>(())
//! ```
//!
//! ## Builder API
//!
//! ```rust,no_run
//! use kmerctx::builder::ContextCounter;
//! use kmerctx::cli::{KmerOrder, OutputFormat};
//!
//! ContextCounter::new()
//!     .k(3)?
//!     .format(OutputFormat::Json)
//!     .order(KmerOrder::Lexicographic)
//!     .count_to_file("reads.fa", "contexts.json")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Case and alphabet
//!
//! Bytes are compared exactly as read: `a` and `A` are different, and
//! ambiguous codes such as `N` are counted like any other base. Use
//! [`ContextCounter::uppercase`](builder::ContextCounter::uppercase) or
//! `--uppercase` to fold soft-masked bases.
//!
//! ## Features
//!
//! - `rust-bio` (default): FASTA parsing with rust-bio
//! - `needletail`: FASTA parsing with needletail
//! - `gzip`: read `.gz` inputs
//! - `tracing` (default): structured logging via `tracing`

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod kmer;
pub mod reader;
pub mod report;
pub mod run;
pub mod table;

pub use error::KmerCtxError;
pub use kmer::{KmerLength, Kmers, NextChar};
pub use table::ContextTable;
