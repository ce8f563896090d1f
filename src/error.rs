//! Error types for kmerctx.
//!
//! Every fallible operation in the library returns [`KmerCtxError`], so the
//! binary can tell argument problems apart from input and output failures.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in kmerctx operations.
#[derive(Debug, Error)]
pub enum KmerCtxError {
    /// K-mer length is missing, not an integer, or not positive.
    #[error("invalid k-mer length \"{value}\": {reason}")]
    InvalidK { value: String, reason: String },

    /// Input path does not resolve to a readable file.
    #[error("failed to open input '{}': {source}", path.display())]
    InputNotFound {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// FASTA content violates basic structural expectations.
    #[error("malformed FASTA input: {details}")]
    MalformedInput { details: String },

    /// Failed to write output.
    #[error("failed to write output: {source}")]
    WriteError {
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize JSON output.
    #[error("failed to serialize JSON: {source}")]
    JsonError {
        #[source]
        source: serde_json::Error,
    },
}

impl KmerCtxError {
    /// Returns `true` for errors caused by command-line arguments rather than
    /// by reading or writing data.
    pub const fn is_argument_error(&self) -> bool {
        matches!(self, Self::InvalidK { .. } | Self::InputNotFound { .. })
    }
}

/// Error for a k-mer length of zero.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("k-mer length {k} is out of range: must be at least 1")]
pub struct KmerLengthError {
    /// The invalid k value that was provided.
    pub k: usize,
}

impl From<std::io::Error> for KmerCtxError {
    fn from(source: std::io::Error) -> Self {
        Self::WriteError { source }
    }
}

impl From<serde_json::Error> for KmerCtxError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonError { source }
    }
}

impl From<KmerLengthError> for KmerCtxError {
    fn from(err: KmerLengthError) -> Self {
        Self::InvalidK {
            value: err.k.to_string(),
            reason: "must be a positive integer".to_string(),
        }
    }
}

/// Errors that can occur when using the builder API.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// K-mer length was not set before calling a counting method.
    #[error("k-mer length not set; call .k() first")]
    KmerLengthNotSet,

    /// Invalid k-mer length provided.
    #[error(transparent)]
    KmerLength(#[from] KmerLengthError),

    /// Error reading input or writing the report.
    #[error(transparent)]
    KmerCtx(#[from] KmerCtxError),
}
