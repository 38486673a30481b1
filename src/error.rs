// barcode-trie/src/error.rs

use std::fmt;

/// Errors reported by trie construction, insertion and search.
///
/// Every failure is also recorded in the owning trie's last-error slot,
/// readable through `Trie::check_error_and_reset`. A push failure during
/// traversal is only visible there: the search keeps going and the hit
/// set may be incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrieError {
    /// Requested tau exceeds the trie's maxtau (or the hard limit of 8)
    TauTooLarge,

    /// Sequence to insert is longer than `MAX_BARCODE_LEN`
    TooLong,

    /// Query is longer than `MAX_BARCODE_LEN`
    QueryTooLong,

    /// Character outside the A/C/G/T/N alphabet during insertion
    BadSymbol(u8),

    /// Refused to index the empty sequence (it would alias the root)
    EmptyString,

    /// Allocation failure while growing a node array or the node arena
    OutOfMemory,
}

impl fmt::Display for TrieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrieError::TauTooLarge => write!(f, "requested tau greater than maxtau"),
            TrieError::TooLong => write!(f, "sequence longer than allowed max"),
            TrieError::QueryTooLong => write!(f, "query longer than allowed max"),
            TrieError::BadSymbol(byte) => {
                write!(f, "character {:?} is not a valid nucleotide", *byte as char)
            }
            TrieError::EmptyString => write!(f, "cannot index the empty sequence"),
            TrieError::OutOfMemory => write!(f, "allocation failure"),
        }
    }
}

impl std::error::Error for TrieError {}
