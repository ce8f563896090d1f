//! K-mer context counting and report output.
//!
//! A run parses the whole input, feeds every sequence through one
//! [`ContextTable`], and only then writes the report. File reports are
//! written to a temporary file next to the destination and moved into place
//! once complete, so a failed run never leaves a partial report behind.

use std::{fs, io::stdout, path::Path};

use bytes::Bytes;
use tempfile::Builder;

use crate::{
    config::Config,
    error::KmerCtxError,
    input::Input,
    kmer::KmerLength,
    reader::{read_sequences, uppercase},
    report::{write_report, ReportOptions},
    table::ContextTable,
};

#[cfg(feature = "tracing")]
use tracing::{info, info_span};

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Sequences read from the input.
    pub sequences: u64,
    /// Sequences shorter than k, which contributed nothing.
    pub skipped_short: u64,
    /// K-mer occurrences counted.
    pub total_kmers: u64,
    /// Distinct k-mers.
    pub distinct_kmers: usize,
}

impl From<&ContextTable> for RunSummary {
    fn from(table: &ContextTable) -> Self {
        Self {
            sequences: table.sequences(),
            skipped_short: table.skipped_short(),
            total_kmers: table.total(),
            distinct_kmers: table.distinct(),
        }
    }
}

/// Executes a validated [`Config`]: count, then write the report.
///
/// # Errors
///
/// Returns `KmerCtxError::InputNotFound` or `KmerCtxError::MalformedInput`
/// if the input cannot be read, and `KmerCtxError::WriteError` if the report
/// cannot be written. Nothing is written on error.
pub fn run(config: &Config) -> Result<RunSummary, KmerCtxError> {
    #[cfg(feature = "tracing")]
    info!(k = %config.k, input = %config.input, "Starting k-mer context counting");

    let table = count_contexts(&config.input, config.k, config.uppercase)?;

    match &config.output {
        Some(path) => write_report_atomically(&table, &config.report, path)?,
        None => write_report(&table, &config.report, stdout().lock())?,
    }

    let summary = RunSummary::from(&table);

    #[cfg(feature = "tracing")]
    info!(
        sequences = summary.sequences,
        skipped_short = summary.skipped_short,
        total_kmers = summary.total_kmers,
        distinct_kmers = summary.distinct_kmers,
        "K-mer context counting complete"
    );

    Ok(summary)
}

/// Counts k-mers and their next characters in a FASTA file.
///
/// This is the main library API for counting without writing a report.
///
/// # Arguments
///
/// * `path` - Path to the FASTA file
/// * `k` - K-mer length (must be positive)
///
/// # Errors
///
/// Returns an error if:
/// - `k` is zero
/// - The file cannot be opened
/// - The file is not valid FASTA or holds no sequence data
///
/// # Example
///
/// ```rust,no_run
/// use kmerctx::run::count_kmer_contexts;
///
/// let table = count_kmer_contexts("reads.fa", 2)?;
/// println!("{} distinct k-mers", table.distinct());
/// # Ok::<(), kmerctx::error::KmerCtxError>(())
/// ```
pub fn count_kmer_contexts<P>(path: P, k: usize) -> Result<ContextTable, KmerCtxError>
where
    P: AsRef<Path>,
{
    let k = KmerLength::new(k)?;
    count_contexts(&Input::from_path(path.as_ref()), k, false)
}

/// Counts k-mers and their next characters from any [`Input`].
///
/// With `uppercase` set, sequences are upper-cased before counting.
pub fn count_contexts(
    input: &Input,
    k: KmerLength,
    uppercase_input: bool,
) -> Result<ContextTable, KmerCtxError> {
    let mut sequences = read_sequences(input)?;
    if uppercase_input {
        sequences = sequences.iter().map(uppercase).collect();
    }

    Ok(count_from_sequences(sequences.iter(), k))
}

/// Counts k-mers and their next characters from in-memory sequences.
///
/// # Example
///
/// ```rust
/// use bytes::Bytes;
/// use kmerctx::{kmer::KmerLength, run::count_from_sequences};
///
/// let sequences = vec![Bytes::from_static(b"ACGT"), Bytes::from_static(b"A")];
/// let table = count_from_sequences(sequences.iter(), KmerLength::new(2)?);
///
/// assert_eq!(table.total(), 3);
/// assert_eq!(table.skipped_short(), 1);
/// # Ok::<(), kmerctx::error::KmerLengthError>(())
/// ```
pub fn count_from_sequences<'a, I>(sequences: I, k: KmerLength) -> ContextTable
where
    I: Iterator<Item = &'a Bytes>,
{
    let mut table = ContextTable::new(k);

    #[cfg(feature = "tracing")]
    let _count_span = info_span!("count_kmers", k = %k).entered();

    table.add_sequences(sequences);
    table
}

/// Writes the report to a temporary file beside `path`, then renames it over `path`.
pub fn write_report_atomically(
    table: &ContextTable,
    options: &ReportOptions,
    path: &Path,
) -> Result<(), KmerCtxError> {
    #[cfg(feature = "tracing")]
    let _write_span = info_span!("write_report", path = %path.display()).entered();

    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = report_builder().tempfile_in(dir)?;
    write_report(table, options, &mut tmp)?;
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }
    tmp.persist(path)
        .map_err(|e| KmerCtxError::WriteError { source: e.error })?;

    Ok(())
}

/// Temp files default to owner-only; reports get the usual 0666 less umask.
fn report_builder() -> Builder<'static, 'static> {
    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder
}
