// barcode-trie/src/narray.rs

use crate::error::TrieError;
use crate::trie::NodeId;

/// Growable stack of node ids, used both for search hits and for the
/// per-depth frontier caches.
#[derive(Debug, Default)]
pub struct NodeArray {
    pub(crate) nodes: Vec<NodeId>,
}

impl NodeArray {
    /// Fresh stack with room for 32 node ids, or `OutOfMemory` when the
    /// initial reservation fails.
    pub fn new() -> Result<Self, TrieError> {
        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(32)
            .map_err(|_| TrieError::OutOfMemory)?;
        Ok(NodeArray { nodes })
    }

    /// Append a node id, doubling the capacity on overflow. A failed
    /// reservation drops the push and reports `OutOfMemory`; the caller
    /// decides whether to keep going with an incomplete stack.
    pub fn push(&mut self, node: NodeId) -> Result<(), TrieError> {
        if self.nodes.len() == self.nodes.capacity() {
            let grow = self.nodes.capacity().max(32);
            self.nodes
                .try_reserve(grow)
                .map_err(|_| TrieError::OutOfMemory)?;
        }
        self.nodes.push(node);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Reset the position without releasing storage.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }
}

impl<'a> IntoIterator for &'a NodeArray {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter().copied()
    }
}
