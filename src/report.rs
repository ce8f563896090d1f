//! Report serialization.
//!
//! A report has two sections: total k-mer frequencies, then per-k-mer
//! next-character frequencies. Output is deterministic for identical tables
//! and options.

use std::io::{BufWriter, Write};

use bytes::Bytes;
use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    cli::{KmerOrder, OutputFormat},
    error::KmerCtxError,
    table::ContextTable,
};

/// How a [`ContextTable`] is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub format: OutputFormat,
    pub order: KmerOrder,
    /// K-mers with a lower total count are left out of both sections.
    pub min_count: u64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            order: KmerOrder::FirstSeen,
            min_count: 1,
        }
    }
}

/// A k-mer with its count, used for JSON serialization.
#[derive(Serialize)]
struct KmerCount {
    kmer: String,
    count: u64,
}

/// A k-mer with its next-character counts, used for JSON serialization.
#[derive(Serialize)]
struct KmerContext {
    kmer: String,
    next: IndexMap<String, u64>,
    terminal: u64,
}

#[derive(Serialize)]
struct JsonReport {
    k: usize,
    frequencies: Vec<KmerCount>,
    contexts: Vec<KmerContext>,
}

/// Writes `table` to `writer` in the layout selected by `options`.
///
/// # Example
///
/// ```rust
/// use bytes::Bytes;
/// use kmerctx::{kmer::KmerLength, report::{write_report, ReportOptions}, table::ContextTable};
///
/// let mut table = ContextTable::new(KmerLength::new(2)?);
/// table.add_sequence(&Bytes::from_static(b"ACA"));
///
/// let mut out = Vec::new();
/// write_report(&table, &ReportOptions::default(), &mut out)?;
/// assert_eq!(
///     String::from_utf8(out)?,
///     "# k-mer frequencies\nAC: 1\nCA: 1\n# next-character frequencies\nAC -> A: 1\n"
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_report<W: Write>(
    table: &ContextTable,
    options: &ReportOptions,
    writer: W,
) -> Result<(), KmerCtxError> {
    let mut buf = BufWriter::new(writer);
    let entries = ordered_entries(table, options);

    match options.format {
        OutputFormat::Text => {
            writeln!(buf, "# k-mer frequencies")?;
            for (kmer, count) in &entries {
                writeln!(buf, "{}: {count}", kmer_label(kmer))?;
            }
            writeln!(buf, "# next-character frequencies")?;
            for (kmer, _) in &entries {
                for (next, count) in table.contexts(kmer).into_iter().flatten() {
                    writeln!(buf, "{} -> {}: {count}", kmer_label(kmer), next_label(*next))?;
                }
            }
        }
        OutputFormat::Tsv => {
            writeln!(buf, "#kmer\tcount")?;
            for (kmer, count) in &entries {
                writeln!(buf, "{}\t{count}", kmer_label(kmer))?;
            }
            writeln!(buf, "#kmer\tnext\tcount")?;
            for (kmer, _) in &entries {
                for (next, count) in table.contexts(kmer).into_iter().flatten() {
                    writeln!(buf, "{}\t{}\t{count}", kmer_label(kmer), next_label(*next))?;
                }
            }
        }
        OutputFormat::Json => {
            let report = JsonReport {
                k: table.k().get(),
                frequencies: entries
                    .iter()
                    .map(|(kmer, count)| KmerCount {
                        kmer: kmer_label(kmer),
                        count: *count,
                    })
                    .collect(),
                contexts: entries
                    .iter()
                    .map(|(kmer, _)| KmerContext {
                        kmer: kmer_label(kmer),
                        next: table
                            .contexts(kmer)
                            .into_iter()
                            .flatten()
                            .map(|(next, count)| (next_label(*next), *count))
                            .collect(),
                        terminal: table.terminal_count(kmer),
                    })
                    .collect(),
            };
            serde_json::to_writer_pretty(&mut buf, &report)?;
            writeln!(buf)?;
        }
    }

    buf.flush()?;
    Ok(())
}

/// Selects and orders the k-mers that appear in the report.
fn ordered_entries<'a>(table: &'a ContextTable, options: &ReportOptions) -> Vec<(&'a Bytes, u64)> {
    let mut entries: Vec<_> = table
        .iter()
        .filter(|(_, count)| *count >= options.min_count)
        .collect();

    match options.order {
        KmerOrder::FirstSeen => {}
        KmerOrder::Lexicographic => entries.sort_by(|a, b| a.0.cmp(b.0)),
        KmerOrder::Count => entries.sort_by(|a, b| b.1.cmp(&a.1)),
    }

    entries
}

/// ASCII bytes print as-is; anything else as `\xNN`, so distinct k-mers keep distinct labels.
fn kmer_label(kmer: &[u8]) -> String {
    let mut label = String::with_capacity(kmer.len());
    for &byte in kmer {
        push_byte(&mut label, byte);
    }
    label
}

fn next_label(byte: u8) -> String {
    let mut label = String::with_capacity(1);
    push_byte(&mut label, byte);
    label
}

fn push_byte(label: &mut String, byte: u8) {
    if byte.is_ascii() {
        label.push(char::from(byte));
    } else {
        label.push_str(&format!("\\x{byte:02x}"));
    }
}
