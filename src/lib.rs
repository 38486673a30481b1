// barcode-trie/src/lib.rs
//
// Radix trie over the A/C/G/T/N alphabet answering bounded Levenshtein
// queries, with per-depth frontier caching for queries sharing a prefix.

pub mod alphabet;
pub mod error;
pub mod narray;
pub mod search;
pub mod trie;

pub use error::TrieError;
pub use narray::NodeArray;
pub use trie::{NodeId, Trie, TrieNode, ROOT_ID};
