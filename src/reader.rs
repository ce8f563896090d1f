//! FASTA parsing into raw sequences.
//!
//! Headers are discarded; each record's (possibly multi-line) body becomes
//! one [`Bytes`] value. The default backend is `rust-bio`; the `needletail`
//! feature swaps in needletail's parser.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Cursor, Read},
};

use bytes::Bytes;

use crate::{error::KmerCtxError, input::Input};

#[cfg(feature = "tracing")]
use tracing::{debug, info_span};

/// Name of the FASTA backend compiled into this build.
pub const fn backend() -> &'static str {
    if cfg!(feature = "needletail") {
        "needletail"
    } else {
        "rust-bio"
    }
}

/// Reads every record of `input` and returns the sequence bodies in file order.
///
/// Records with an empty body are dropped. An input with no records, or with
/// no record carrying sequence data, is [`KmerCtxError::MalformedInput`].
///
/// # Example
///
/// ```rust,no_run
/// use kmerctx::{input::Input, reader::read_sequences};
/// use std::path::Path;
///
/// let sequences = read_sequences(&Input::from_path(Path::new("reads.fa")))?;
/// println!("{} sequences", sequences.len());
/// # Ok::<(), kmerctx::error::KmerCtxError>(())
/// ```
pub fn read_sequences(input: &Input) -> Result<Vec<Bytes>, KmerCtxError> {
    #[cfg(feature = "tracing")]
    let _read_span = info_span!("read_fasta", input = %input).entered();

    let sequences = match input {
        Input::File(path) => {
            let file = File::open(path).map_err(|source| KmerCtxError::InputNotFound {
                source,
                path: path.clone(),
            })?;
            parse_file(file, path)?
        }
        Input::Stdin => parse(std::io::stdin())?,
    };

    non_empty(sequences)
}

/// Upper-cases every byte of a sequence, leaving non-letters untouched.
pub fn uppercase(seq: &Bytes) -> Bytes {
    if seq.iter().any(u8::is_ascii_lowercase) {
        Bytes::from(seq.to_ascii_uppercase())
    } else {
        seq.clone()
    }
}

#[cfg(all(not(feature = "needletail"), feature = "gzip"))]
fn parse_file(file: File, path: &std::path::Path) -> Result<Vec<Bytes>, KmerCtxError> {
    if path.extension().is_some_and(|ext| ext == "gz") {
        parse(flate2::read::GzDecoder::new(file))
    } else {
        parse(file)
    }
}

#[cfg(not(all(not(feature = "needletail"), feature = "gzip")))]
fn parse_file(file: File, _path: &std::path::Path) -> Result<Vec<Bytes>, KmerCtxError> {
    parse(file)
}

/// Drops whitespace-only lines ahead of the first header.
///
/// Returns the first non-blank line chained in front of the rest of the input.
fn skip_leading_blank_lines<R: Read>(
    reader: R,
) -> Result<io::Chain<Cursor<Vec<u8>>, BufReader<R>>, KmerCtxError> {
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();
    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| KmerCtxError::MalformedInput {
                details: e.to_string(),
            })?;
        if read == 0 || !line.iter().all(u8::is_ascii_whitespace) {
            break;
        }
    }
    Ok(Cursor::new(line).chain(reader))
}

#[cfg(not(feature = "needletail"))]
fn parse<R: Read>(reader: R) -> Result<Vec<Bytes>, KmerCtxError> {
    let reader = skip_leading_blank_lines(reader)?;
    let mut sequences = Vec::new();

    for record in bio::io::fasta::Reader::new(reader).records() {
        let record = record.map_err(|e| KmerCtxError::MalformedInput {
            details: e.to_string(),
        })?;
        sequences.push(Bytes::copy_from_slice(record.seq()));
    }

    Ok(sequences)
}

#[cfg(feature = "needletail")]
fn parse<R: Read + Send + 'static>(reader: R) -> Result<Vec<Bytes>, KmerCtxError> {
    let malformed = |e: needletail::errors::ParseError| KmerCtxError::MalformedInput {
        details: e.to_string(),
    };

    let reader = skip_leading_blank_lines(reader)?;
    let mut reader = needletail::parse_fastx_reader(reader).map_err(malformed)?;
    let mut sequences = Vec::new();
    while let Some(record) = reader.next() {
        let record = record.map_err(malformed)?;
        sequences.push(Bytes::copy_from_slice(&record.seq()));
    }

    Ok(sequences)
}

fn non_empty(sequences: Vec<Bytes>) -> Result<Vec<Bytes>, KmerCtxError> {
    let records = sequences.len();
    if records == 0 {
        return Err(KmerCtxError::MalformedInput {
            details: "no FASTA records found".to_string(),
        });
    }

    let sequences: Vec<Bytes> = sequences.into_iter().filter(|s| !s.is_empty()).collect();

    #[cfg(feature = "tracing")]
    debug!(
        records,
        dropped = records - sequences.len(),
        "Read sequences from input"
    );

    if sequences.is_empty() {
        return Err(KmerCtxError::MalformedInput {
            details: format!("none of the {records} record(s) contain sequence data"),
        });
    }

    Ok(sequences)
}
