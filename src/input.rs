//! Input source abstraction for file and stdin.
//!
//! # Example
//!
//! ```rust
//! use kmerctx::input::Input;
//! use std::path::Path;
//!
//! let input = Input::from_path(Path::new("reads.fa"));
//! assert!(matches!(input, Input::File(_)));
//!
//! let input = Input::from_path(Path::new("-"));
//! assert!(matches!(input, Input::Stdin));
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::KmerCtxError;

/// Where FASTA records are read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Input {
    /// Read from a file at the specified path.
    File(PathBuf),
    /// Read from standard input.
    #[default]
    Stdin,
}

impl Input {
    /// Creates an `Input` from a path; `-` selects stdin.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(path.to_path_buf())
        }
    }

    /// Returns `true` if this input is stdin.
    #[must_use]
    pub const fn is_stdin(&self) -> bool {
        matches!(self, Self::Stdin)
    }

    /// Returns the file path if this is a file input.
    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Stdin => None,
        }
    }

    /// Checks that a file input exists and is a regular file.
    ///
    /// Called before any k-mer generation so a bad path fails fast.
    pub fn ensure_readable(&self) -> Result<(), KmerCtxError> {
        let Self::File(path) = self else {
            return Ok(());
        };

        let not_found = |source| KmerCtxError::InputNotFound {
            source,
            path: path.clone(),
        };

        let metadata = fs::metadata(path).map_err(not_found)?;
        if metadata.is_dir() {
            return Err(not_found(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "is a directory",
            )));
        }
        fs::File::open(path).map(drop).map_err(not_found)
    }
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => write!(f, "<stdin>"),
        }
    }
}
