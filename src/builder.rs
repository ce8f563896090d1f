//! Builder pattern API for ergonomic k-mer context counting.
//!
//! # Example
//!
//! ```rust,no_run
//! use kmerctx::builder::ContextCounter;
//!
//! let table = ContextCounter::new()
//!     .k(2)?
//!     .count("reads.fa")?;
//!
//! for (kmer, count) in table.iter() {
//!     println!("{}: {count}", String::from_utf8_lossy(kmer));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::{io::Write, path::Path};

use bytes::Bytes;

use crate::{
    cli::{KmerOrder, OutputFormat},
    error::{BuilderError, KmerLengthError},
    input::Input,
    kmer::KmerLength,
    reader::uppercase,
    report::{write_report, ReportOptions},
    run::{count_contexts, count_from_sequences, write_report_atomically},
    table::ContextTable,
};

/// A builder for configuring k-mer context counting.
///
/// Use [`ContextCounter::new()`] to create a builder, configure it with the
/// fluent API, then call [`count()`](ContextCounter::count) or one of the
/// report-writing methods.
#[derive(Debug, Clone, Default)]
pub struct ContextCounter {
    k: Option<KmerLength>,
    report: ReportOptions,
    uppercase: bool,
}

impl ContextCounter {
    /// Creates a builder with default settings.
    ///
    /// Default settings:
    /// - `k`: None (must be set before counting)
    /// - `min_count`: 1 (report every k-mer)
    /// - `format`: text
    /// - `order`: first-seen
    /// - `uppercase`: false (bytes are counted exactly as read)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the k-mer length.
    ///
    /// # Errors
    ///
    /// Returns [`KmerLengthError`] if `k` is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kmerctx::builder::ContextCounter;
    ///
    /// let counter = ContextCounter::new().k(21)?;
    /// # Ok::<(), kmerctx::error::KmerLengthError>(())
    /// ```
    pub fn k(mut self, k: usize) -> Result<Self, KmerLengthError> {
        self.k = Some(KmerLength::new(k)?);
        Ok(self)
    }

    /// Sets the k-mer length from a pre-validated `KmerLength`.
    #[must_use]
    pub const fn k_validated(mut self, k: KmerLength) -> Self {
        self.k = Some(k);
        self
    }

    /// Sets the minimum count a k-mer needs to appear in written reports.
    ///
    /// The counted [`ContextTable`] itself is never filtered.
    #[must_use]
    pub const fn min_count(mut self, min_count: u64) -> Self {
        self.report.min_count = min_count;
        self
    }

    #[must_use]
    pub const fn format(mut self, format: OutputFormat) -> Self {
        self.report.format = format;
        self
    }

    #[must_use]
    pub const fn order(mut self, order: KmerOrder) -> Self {
        self.report.order = order;
        self
    }

    /// Upper-case sequences before counting, so soft-masked bases match.
    #[must_use]
    pub const fn uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    fn kmer_length(&self) -> Result<KmerLength, BuilderError> {
        self.k.ok_or(BuilderError::KmerLengthNotSet)
    }

    /// Counts k-mers and next characters in the specified FASTA file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `k` has not been set
    /// - The file cannot be read
    /// - The file is not valid FASTA
    pub fn count<P>(&self, path: P) -> Result<ContextTable, BuilderError>
    where
        P: AsRef<Path>,
    {
        let k = self.kmer_length()?;
        Ok(count_contexts(
            &Input::from_path(path.as_ref()),
            k,
            self.uppercase,
        )?)
    }

    /// Counts k-mers and next characters in in-memory sequences.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bytes::Bytes;
    /// use kmerctx::builder::ContextCounter;
    ///
    /// let table = ContextCounter::new()
    ///     .k(3)?
    ///     .uppercase(true)
    ///     .count_sequences(&[Bytes::from_static(b"acgT")])?;
    ///
    /// assert_eq!(table.frequency(b"ACG"), 1);
    /// assert_eq!(table.next_count(b"ACG", b'T'), 1);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn count_sequences<'a, I>(&self, sequences: I) -> Result<ContextTable, BuilderError>
    where
        I: IntoIterator<Item = &'a Bytes>,
    {
        let k = self.kmer_length()?;
        if self.uppercase {
            let upper: Vec<Bytes> = sequences.into_iter().map(uppercase).collect();
            Ok(count_from_sequences(upper.iter(), k))
        } else {
            Ok(count_from_sequences(sequences.into_iter(), k))
        }
    }

    /// Counts the FASTA file at `path` and writes the report to `writer`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kmerctx::builder::ContextCounter;
    /// use kmerctx::cli::OutputFormat;
    ///
    /// ContextCounter::new()
    ///     .k(2)?
    ///     .format(OutputFormat::Tsv)
    ///     .count_to_writer("reads.fa", std::io::stdout())?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn count_to_writer<P, W>(&self, path: P, writer: W) -> Result<ContextTable, BuilderError>
    where
        P: AsRef<Path>,
        W: Write,
    {
        let table = self.count(path)?;
        write_report(&table, &self.report, writer)?;
        Ok(table)
    }

    /// Counts the FASTA file at `path` and writes the report to `output`.
    ///
    /// `output` is only replaced once the whole report has been written.
    pub fn count_to_file<P, Q>(&self, path: P, output: Q) -> Result<ContextTable, BuilderError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let table = self.count(path)?;
        write_report_atomically(&table, &self.report, output.as_ref())?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn temp_fasta(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn count_without_k_fails() {
        let fasta = temp_fasta(">s\nACGT\n");
        let err = ContextCounter::new().count(fasta.path()).unwrap_err();
        assert!(matches!(err, BuilderError::KmerLengthNotSet));
    }

    /// A path wrapper without a `Debug` impl.
    struct FastaPath(std::path::PathBuf);

    impl AsRef<Path> for FastaPath {
        fn as_ref(&self) -> &Path {
            &self.0
        }
    }

    #[test]
    fn count_accepts_any_path_like() {
        let fasta = temp_fasta(">s\nACGT\n");
        let path = FastaPath(fasta.path().to_path_buf());
        let table = ContextCounter::new().k(2).unwrap().count(&path).unwrap();
        assert_eq!(table.total(), 3);

        let mut out = Vec::new();
        ContextCounter::new()
            .k(2)
            .unwrap()
            .count_to_writer(&path, &mut out)
            .unwrap();
        assert!(!out.is_empty());
    }

    #[test]
    fn k_zero_is_rejected() {
        assert!(ContextCounter::new().k(0).is_err());
    }

    #[test]
    fn count_reads_file() {
        let fasta = temp_fasta(">seq1\nATGTCTGTCTGAA\n");
        let table = ContextCounter::new().k(2).unwrap().count(fasta.path()).unwrap();
        assert_eq!(table.frequency(b"TG"), 3);
        assert_eq!(table.total(), 12);
    }

    #[test]
    fn count_to_writer_applies_report_options() {
        let fasta = temp_fasta(">seq1\nATGTCTGTCTGAA\n");
        let mut out = Vec::new();
        let table = ContextCounter::new()
            .k(2)
            .unwrap()
            .min_count(3)
            .format(OutputFormat::Tsv)
            .count_to_writer(fasta.path(), &mut out)
            .unwrap();

        assert_eq!(table.distinct(), 7);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "#kmer\tcount\nTG\t3\n#kmer\tnext\tcount\nTG\tT\t2\nTG\tA\t1\n"
        );
    }

    #[test]
    fn count_to_file_writes_report() {
        let fasta = temp_fasta(">s\nACA\n");
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.txt");

        ContextCounter::new()
            .k(2)
            .unwrap()
            .order(KmerOrder::Lexicographic)
            .count_to_file(fasta.path(), &output)
            .unwrap();

        let report = std::fs::read_to_string(&output).unwrap();
        assert!(report.contains("AC -> A: 1"));
    }

    #[test]
    fn count_to_file_with_missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.txt");

        let result = ContextCounter::new()
            .k(2)
            .unwrap()
            .count_to_file("/nonexistent/reads.fa", &output);

        assert!(result.is_err());
        assert!(!output.exists());
    }
}
