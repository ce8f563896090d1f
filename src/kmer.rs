//! K-mer lengths and the sliding-window k-mer generator.
//!
//! [`Kmers`] walks a sequence one base at a time and yields every k-mer
//! together with the byte that follows it, or [`NextChar::Absent`] for the
//! final window.

use std::{fmt, iter::FusedIterator, num::NonZeroUsize};

use bytes::Bytes;

use crate::error::{KmerCtxError, KmerLengthError};

/// A validated, positive k-mer length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KmerLength(NonZeroUsize);

impl KmerLength {
    /// Creates a `KmerLength`, rejecting zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kmerctx::kmer::KmerLength;
    ///
    /// assert_eq!(KmerLength::new(21)?.get(), 21);
    /// assert!(KmerLength::new(0).is_err());
    /// # Ok::<(), kmerctx::error::KmerLengthError>(())
    /// ```
    pub fn new(k: usize) -> Result<Self, KmerLengthError> {
        NonZeroUsize::new(k).map(Self).ok_or(KmerLengthError { k })
    }

    /// Parses a k-mer length as typed on the command line.
    ///
    /// Non-numeric, negative and zero values are all reported as
    /// [`KmerCtxError::InvalidK`].
    pub fn parse(value: &str) -> Result<Self, KmerCtxError> {
        let trimmed = value.trim();
        let invalid = |reason: &str| KmerCtxError::InvalidK {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid("a k-mer length is required"));
        }

        match trimmed.parse::<i128>() {
            Ok(k) if k <= 0 => Err(invalid("must be a positive integer")),
            Ok(k) => usize::try_from(k)
                .map_err(|_| invalid("too large for this platform"))
                .and_then(|k| Self::new(k).map_err(|_| invalid("must be a positive integer"))),
            Err(_) => Err(invalid("not an integer")),
        }
    }

    /// Returns the length as a plain `usize`.
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for KmerLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for KmerLength {
    type Error = KmerLengthError;

    fn try_from(k: usize) -> Result<Self, Self::Error> {
        Self::new(k)
    }
}

/// The byte following a k-mer occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NextChar {
    /// The k-mer is followed by this byte.
    Base(u8),
    /// The k-mer is the suffix of its sequence.
    Absent,
}

impl NextChar {
    /// Returns the following byte, if there is one.
    pub const fn base(self) -> Option<u8> {
        match self {
            Self::Base(b) => Some(b),
            Self::Absent => None,
        }
    }

    pub const fn is_absent(self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<Option<u8>> for NextChar {
    fn from(next: Option<u8>) -> Self {
        next.map_or(Self::Absent, Self::Base)
    }
}

/// Iterator over `(k-mer, next character)` pairs of one sequence.
///
/// Yields `len - k + 1` pairs for a sequence of length `len >= k` and none
/// for shorter sequences. K-mers are zero-copy slices of the sequence.
///
/// # Example
///
/// ```rust
/// use bytes::Bytes;
/// use kmerctx::kmer::{KmerLength, Kmers, NextChar};
///
/// let k = KmerLength::new(2)?;
/// let pairs: Vec<_> = Kmers::new(Bytes::from_static(b"ACG"), k).collect();
///
/// assert_eq!(pairs.len(), 2);
/// assert_eq!(pairs[0], (Bytes::from_static(b"AC"), NextChar::Base(b'G')));
/// assert_eq!(pairs[1], (Bytes::from_static(b"CG"), NextChar::Absent));
/// # Ok::<(), kmerctx::error::KmerLengthError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Kmers {
    seq: Bytes,
    k: usize,
    pos: usize,
}

impl Kmers {
    pub const fn new(seq: Bytes, k: KmerLength) -> Self {
        Self {
            seq,
            k: k.get(),
            pos: 0,
        }
    }

    /// Number of windows a sequence of `len` bases produces.
    pub const fn window_count(len: usize, k: KmerLength) -> usize {
        (len + 1).saturating_sub(k.get())
    }
}

impl Iterator for Kmers {
    type Item = (Bytes, NextChar);

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.pos.checked_add(self.k)?;
        if end > self.seq.len() {
            return None;
        }

        let kmer = self.seq.slice(self.pos..end);
        let next = NextChar::from(self.seq.get(end).copied());
        self.pos += 1;

        Some((kmer, next))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.seq.len() + 1).saturating_sub(self.pos.saturating_add(self.k));
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Kmers {}

impl FusedIterator for Kmers {}

#[cfg(test)]
mod tests {
    use super::*;

    fn k(n: usize) -> KmerLength {
        KmerLength::new(n).unwrap()
    }

    fn pairs(seq: &'static [u8], n: usize) -> Vec<(String, Option<char>)> {
        Kmers::new(Bytes::from_static(seq), k(n))
            .map(|(kmer, next)| {
                (
                    String::from_utf8(kmer.to_vec()).unwrap(),
                    next.base().map(char::from),
                )
            })
            .collect()
    }

    #[test]
    fn windows_with_next_characters() {
        let result = pairs(b"ATGTCTGTCTGAA", 2);
        let expected = [
            ("AT", Some('G')),
            ("TG", Some('T')),
            ("GT", Some('C')),
            ("TC", Some('T')),
            ("CT", Some('G')),
            ("TG", Some('T')),
            ("GT", Some('C')),
            ("TC", Some('T')),
            ("CT", Some('G')),
            ("TG", Some('A')),
            ("GA", Some('A')),
            ("AA", None),
        ];
        assert_eq!(result.len(), 12);
        for (got, (kmer, next)) in result.iter().zip(expected) {
            assert_eq!(got.0, kmer);
            assert_eq!(got.1, next);
        }
    }

    #[test]
    fn sequence_shorter_than_k_yields_nothing() {
        assert!(pairs(b"A", 2).is_empty());
        assert!(pairs(b"", 1).is_empty());
    }

    #[test]
    fn sequence_equal_to_k_yields_one_absent_pair() {
        assert_eq!(pairs(b"ACGT", 4), vec![("ACGT".to_string(), None)]);
    }

    #[test]
    fn exact_size_matches_window_count() {
        let seq = Bytes::from_static(b"ACGTACGTNN");
        let mut iter = Kmers::new(seq.clone(), k(3));
        assert_eq!(iter.len(), Kmers::window_count(seq.len(), k(3)));
        iter.next();
        assert_eq!(iter.len(), 7);
        assert_eq!(iter.by_ref().count(), 7);
        assert_eq!(iter.len(), 0);
        assert!(iter.next().is_none());
    }

    #[test]
    fn generator_restarts_per_call() {
        let seq = Bytes::from_static(b"GATTACA");
        let first: Vec<_> = Kmers::new(seq.clone(), k(3)).collect();
        let second: Vec<_> = Kmers::new(seq, k(3)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn ambiguous_and_lowercase_bytes_are_literal() {
        let result = pairs(b"aNa", 1);
        insta::assert_snapshot!(format!("{result:?}"), @r###"[("a", Some('N')), ("N", Some('a')), ("a", None)]"###);
    }

    #[test]
    fn kmer_length_rejects_zero() {
        assert_eq!(KmerLength::new(0), Err(KmerLengthError { k: 0 }));
    }

    #[test]
    fn parse_accepts_positive_integers() {
        assert_eq!(KmerLength::parse("21").unwrap().get(), 21);
        assert_eq!(KmerLength::parse(" 3 ").unwrap().get(), 3);
    }

    #[test]
    fn parse_rejects_invalid_values() {
        for value in ["0", "-1", "abc", "2.5", ""] {
            let err = KmerLength::parse(value).unwrap_err();
            assert!(
                matches!(err, KmerCtxError::InvalidK { .. }),
                "{value:?} should be InvalidK"
            );
        }
    }

    #[test]
    fn next_char_from_option() {
        assert_eq!(NextChar::from(Some(b'A')), NextChar::Base(b'A'));
        assert!(NextChar::from(None).is_absent());
    }
}
