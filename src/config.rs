use std::path::PathBuf;

use crate::{
    cli::Args, error::KmerCtxError, input::Input, kmer::KmerLength, report::ReportOptions,
};

/// Validated run parameters.
#[derive(Debug, Clone)]
pub struct Config {
    pub k: KmerLength,
    pub input: Input,
    /// `None` writes the report to stdout.
    pub output: Option<PathBuf>,
    pub report: ReportOptions,
    pub uppercase: bool,
}

impl Config {
    /// Validates parsed arguments: k first, then the input path.
    pub fn new(args: &Args) -> Result<Self, KmerCtxError> {
        let k = KmerLength::parse(&args.k)?;

        let input = Input::from_path(&args.input);
        input.ensure_readable()?;

        let output = (args.output.as_os_str() != "-").then(|| args.output.clone());

        Ok(Self {
            k,
            input,
            output,
            report: ReportOptions {
                format: args.format,
                order: args.order,
                min_count: args.min_count,
            },
            uppercase: args.uppercase,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn args(items: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("kmerctx").chain(items.iter().copied())).unwrap()
    }

    #[test]
    fn invalid_k_is_reported_before_input() {
        let err = Config::new(&args(&["/nonexistent.fa", "out.txt", "0"])).unwrap_err();
        assert!(matches!(err, KmerCtxError::InvalidK { .. }));
    }

    #[test]
    fn missing_input_is_reported() {
        let err = Config::new(&args(&["/nonexistent.fa", "out.txt", "3"])).unwrap_err();
        assert!(matches!(err, KmerCtxError::InputNotFound { .. }));
    }

    #[test]
    fn valid_arguments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ">s\nACGT").unwrap();
        let path = file.path().to_str().unwrap();

        let config = Config::new(&args(&[path, "out.txt", "2"])).unwrap();
        assert_eq!(config.k.get(), 2);
        assert_eq!(config.output, Some(PathBuf::from("out.txt")));
        assert!(!config.uppercase);

        let config = Config::new(&args(&[path, "-", "2"])).unwrap();
        assert!(config.output.is_none());
    }

    #[test]
    fn stdin_input_skips_existence_check() {
        let config = Config::new(&args(&["-", "-", "4"])).unwrap();
        assert!(config.input.is_stdin());
    }
}
