//! Command-line interface definition.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// K-mer frequencies and next-character contexts for DNA sequences in FASTA files.
#[derive(Parser, Debug)]
#[command(name = "kmerctx")]
#[command(version, author, about, long_about = None)]
pub struct Args {
    /// Path to a FASTA file ("-" reads stdin)
    pub input: PathBuf,

    /// Path of the report to write ("-" writes stdout)
    pub output: PathBuf,

    /// K-mer length (a positive integer)
    #[arg(allow_negative_numbers = true)]
    pub k: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Order of k-mers in the report
    #[arg(short, long, value_enum, default_value = "first-seen")]
    pub order: KmerOrder,

    /// Minimum count threshold (k-mers below this are excluded from the report)
    #[arg(short, long, default_value = "1")]
    pub min_count: u64,

    /// Upper-case sequences before counting (default: count bytes exactly as read)
    #[arg(short, long)]
    pub uppercase: bool,

    /// Suppress informational output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Two plain-text sections ("kmer: count", then "kmer -> next: count")
    #[default]
    Text,
    /// Two tab-separated sections
    Tsv,
    /// JSON object with `frequencies` and `contexts` arrays
    Json,
}

/// Iteration order of k-mers in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum KmerOrder {
    /// Order in which k-mers were first seen in the input
    #[default]
    FirstSeen,
    /// Byte-wise lexicographic order
    Lexicographic,
    /// Descending count, ties in first-seen order
    Count,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_positional_arguments() {
        let args = Args::try_parse_from(["kmerctx", "in.fa", "out.txt", "3"]).unwrap();
        assert_eq!(args.input, PathBuf::from("in.fa"));
        assert_eq!(args.output, PathBuf::from("out.txt"));
        assert_eq!(args.k, "3");
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.order, KmerOrder::FirstSeen);
        assert_eq!(args.min_count, 1);
        assert!(!args.uppercase);
    }

    #[test]
    fn negative_k_reaches_validation() {
        let args = Args::try_parse_from(["kmerctx", "in.fa", "out.txt", "-1"]).unwrap();
        assert_eq!(args.k, "-1");
    }

    #[test]
    fn parses_options() {
        let args = Args::try_parse_from([
            "kmerctx",
            "in.fa",
            "-",
            "5",
            "--format",
            "json",
            "--order",
            "lexicographic",
            "--min-count",
            "2",
            "--uppercase",
            "--quiet",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.order, KmerOrder::Lexicographic);
        assert_eq!(args.min_count, 2);
        assert!(args.uppercase);
        assert!(args.quiet);
    }
}
