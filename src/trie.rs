// barcode-trie/src/trie.rs

use crate::alphabet::{M, MAX_BARCODE_LEN, MAX_TAU, TRANSLATE};
use crate::error::TrieError;
use crate::narray::NodeArray;

#[path = "trie_test.rs"]
mod trie_test;

/// Index of a node in the trie's arena. The root is always [`ROOT_ID`].
pub type NodeId = u32;

/// Arena index of the root node.
pub const ROOT_ID: NodeId = 0;

/// Widest cache any node can carry (maxtau = 8).
pub(crate) const MAX_CACHE_WIDTH: usize = 2 * MAX_TAU as usize + 3;

/// A trie node: up to five typed children plus an always-empty sixth
/// slot, the packed path word, an optional caller payload and the
/// edit-distance band cache.
pub struct TrieNode<T> {
    /// Child slots indexed by symbol id. Slots 0-4 are populated by
    /// insertion; slot 5 never is.
    pub child: [Option<NodeId>; 6],

    /// Last eight edge symbols on the root path, 4 bits each, most
    /// recent in the low nibble.
    pub path: u32,

    /// Caller-owned payload. `None` at interior nodes; attached by the
    /// caller after `insert_string` hands back the terminal id.
    pub data: Option<T>,

    /// One anti-diagonal of the edit-distance table: 2*maxtau+3 cells
    /// centred on index maxtau+1.
    pub(crate) cache: Box<[u8]>,
}

impl<T> TrieNode<T> {
    /// Fresh node with no children, no payload, and the cache holding
    /// the trivial costs |i - (maxtau+1)|. Fails with `OutOfMemory`
    /// when the cache cannot be allocated.
    pub(crate) fn new(maxtau: u8) -> Result<Self, TrieError> {
        let width = 2 * maxtau as usize + 3;
        let center = maxtau as i32 + 1;
        let mut cache = Vec::new();
        cache
            .try_reserve_exact(width)
            .map_err(|_| TrieError::OutOfMemory)?;
        for i in 0..width {
            cache.push((i as i32 - center).unsigned_abs() as u8);
        }
        Ok(TrieNode {
            child: [None; 6],
            path: 0,
            data: None,
            cache: cache.into_boxed_slice(),
        })
    }
}

/// Radix trie over the five-symbol nucleotide alphabet supporting
/// bounded Levenshtein search.
///
/// Nodes live in a flat arena addressed by [`NodeId`]; children are
/// always created after their parent, so child ids are strictly greater
/// than parent ids. Dropping the trie drops every attached payload.
pub struct Trie<T> {
    pub(crate) nodes: Vec<TrieNode<T>>,
    pub(crate) maxtau: u8,
    pub(crate) bottom: usize,
    /// Per-depth frontier caches, allocated at the first search.
    /// `miles[d]` holds the nodes alive at query depth `d` during the
    /// most recent search with `trail >= d`.
    pub(crate) miles: Vec<NodeArray>,
    pub(crate) last_error: Option<TrieError>,
}

impl<T> Trie<T> {
    /// Create an empty trie. `maxtau` fixes the cache width of every
    /// node and caps the tau of later searches; `bottom` is the depth at
    /// which hits are emitted, i.e. the indexed string length.
    pub fn new(maxtau: u8, bottom: usize) -> Result<Self, TrieError> {
        if maxtau > MAX_TAU {
            // The path word holds eight 4-bit symbols, which bounds the
            // DP look-back and therefore tau.
            log::error!(
                "requested maxtau {} exceeds the hard limit of {}",
                maxtau,
                MAX_TAU
            );
            return Err(TrieError::TauTooLarge);
        }
        debug_assert!(bottom >= 1 && bottom < M, "bottom out of range");
        let root = TrieNode::new(maxtau)?;
        let mut nodes = Vec::new();
        nodes.try_reserve(1).map_err(|_| TrieError::OutOfMemory)?;
        nodes.push(root);
        log::debug!("new trie (maxtau = {}, bottom = {})", maxtau, bottom);
        Ok(Trie {
            nodes,
            maxtau,
            bottom,
            miles: Vec::new(),
            last_error: None,
        })
    }

    pub fn maxtau(&self) -> u8 {
        self.maxtau
    }

    pub fn bottom(&self) -> usize {
        self.bottom
    }

    /// Number of nodes in the arena, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &TrieNode<T> {
        &self.nodes[id as usize]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut TrieNode<T> {
        &mut self.nodes[id as usize]
    }

    pub fn data(&self, id: NodeId) -> Option<&T> {
        self.nodes[id as usize].data.as_ref()
    }

    /// Attach a payload to a node, returning the previous one.
    pub fn set_data(&mut self, id: NodeId, payload: T) -> Option<T> {
        self.nodes[id as usize].data.replace(payload)
    }

    /// Read and clear the pending error, if any. This is the only way to
    /// detect a hit set left incomplete by a push failure mid-search.
    pub fn check_error_and_reset(&mut self) -> Option<TrieError> {
        self.last_error.take()
    }

    pub(crate) fn fail(&mut self, err: TrieError) -> TrieError {
        self.last_error = Some(err);
        err
    }

    /// Index `string` and return its terminal node. Existing edges are
    /// followed as far as they match; fresh nodes are appended from the
    /// first mismatch on. Inserting the same string twice returns the
    /// same id without mutating the trie.
    ///
    /// Neither `miles` nor any payload is touched; attaching data to the
    /// returned terminal is the caller's responsibility.
    pub fn insert_string(&mut self, string: &[u8]) -> Result<NodeId, TrieError> {
        if string.is_empty() {
            // The empty string would terminate at the root, handing out
            // an id whose payload slot the trie does not own.
            return Err(self.fail(TrieError::EmptyString));
        }
        if string.len() > MAX_BARCODE_LEN {
            return Err(self.fail(TrieError::TooLong));
        }
        let mut node = ROOT_ID;
        for &byte in string {
            let c = TRANSLATE[byte as usize];
            if c > 4 {
                return Err(self.fail(TrieError::BadSymbol(byte)));
            }
            node = match self.nodes[node as usize].child[c as usize] {
                Some(child) => child,
                None => self.insert(node, c)?,
            };
        }
        Ok(node)
    }

    /// Append a fresh child under `parent` at symbol slot `c`. The slot
    /// must be empty; `insert_string` guarantees it.
    fn insert(&mut self, parent: NodeId, c: u8) -> Result<NodeId, TrieError> {
        if self.nodes.try_reserve(1).is_err() {
            return Err(self.fail(TrieError::OutOfMemory));
        }
        let mut child = match TrieNode::new(self.maxtau) {
            Ok(child) => child,
            Err(err) => return Err(self.fail(err)),
        };
        child.path = (self.nodes[parent as usize].path << 4) | c as u32;
        let id = self.nodes.len() as NodeId;
        self.nodes.push(child);
        self.nodes[parent as usize].child[c as usize] = Some(id);
        Ok(id)
    }

    pub(crate) fn init_miles(&mut self) -> Result<(), TrieError> {
        let mut miles = Vec::new();
        miles
            .try_reserve_exact(M)
            .map_err(|_| TrieError::OutOfMemory)?;
        for _ in 0..M {
            miles.push(NodeArray::new()?);
        }
        // The root is the only node ever cached at depth 0.
        miles[0].nodes.push(ROOT_ID);
        self.miles = miles;
        Ok(())
    }
}
