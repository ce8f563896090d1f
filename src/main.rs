use std::process;

use clap::Parser;
use colored::Colorize;
use kmerctx::{cli::Args, config::Config, reader, run};

fn main() {
    let args = Args::parse();

    #[cfg(feature = "tracing")]
    init_tracing();

    let config = Config::new(&args).unwrap_or_else(|e| {
        eprintln!();
        eprintln!(
            "{}\n {}",
            "Problem parsing arguments:".blue().bold(),
            e.to_string().blue()
        );
        eprintln!();
        eprintln!(
            "{}\n {}\n  {}\n   {}",
            "Help menu:".blue().bold(),
            "$ cargo run -- --help".bold(),
            "or".underline(),
            "$ kmerctx --help".bold()
        );
        eprintln!();
        process::exit(1);
    });

    if !args.quiet {
        eprintln!("{}: {}", "k-length".bold(), config.k.to_string().blue().bold());
        eprintln!("{}: {}", "data".bold(), config.input.to_string().underline().bold().blue());
        eprintln!(
            "{}: {}",
            "report".bold(),
            args.output.display().to_string().underline().bold().blue()
        );
        eprintln!("{}: {}", "reader".bold(), reader::backend().blue().bold());
        eprintln!();
    }

    match run::run(&config) {
        Ok(summary) => {
            if !args.quiet {
                eprintln!("{}: {}", "sequences".bold(), summary.sequences);
                eprintln!(
                    "{}: {}",
                    "skipped (shorter than k)".bold(),
                    summary.skipped_short
                );
                eprintln!("{}: {}", "k-mers".bold(), summary.total_kmers);
                eprintln!("{}: {}", "distinct k-mers".bold(), summary.distinct_kmers);
            }
        }
        Err(e) => {
            let heading = if e.is_argument_error() {
                "Problem parsing arguments:"
            } else {
                "Application error:"
            };
            eprintln!("{}\n {}", heading.blue().bold(), e.to_string().blue());
            drop(e);
            process::exit(1);
        }
    }
}

/// Logs go to stderr, filtered by `RUST_LOG` (default: warnings only).
#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
