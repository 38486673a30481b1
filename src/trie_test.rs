// barcode-trie/src/trie_test.rs

#[cfg(test)]
mod tests {
    use crate::alphabet::{ALTRANSLATE, EOS, MAX_BARCODE_LEN, TRANSLATE};
    use crate::error::TrieError;
    use crate::narray::NodeArray;
    use crate::trie::{Trie, TrieNode, ROOT_ID};

    #[test]
    fn test_translate_table() {
        for (upper, lower, symbol) in [
            (b'A', b'a', 0u8),
            (b'C', b'c', 1),
            (b'G', b'g', 2),
            (b'T', b't', 3),
            (b'N', b'n', 4),
        ] {
            assert_eq!(TRANSLATE[upper as usize], symbol);
            assert_eq!(TRANSLATE[lower as usize], symbol);
        }
        assert_eq!(TRANSLATE[b'X' as usize], 6);
        assert_eq!(TRANSLATE[b'-' as usize], 6);
        assert_eq!(TRANSLATE[0], 6);
    }

    #[test]
    fn test_altranslate_folds_wildcard_and_unknowns() {
        for (upper, lower, symbol) in [
            (b'A', b'a', 0u8),
            (b'C', b'c', 1),
            (b'G', b'g', 2),
            (b'T', b't', 3),
        ] {
            assert_eq!(ALTRANSLATE[upper as usize], symbol);
            assert_eq!(ALTRANSLATE[lower as usize], symbol);
        }
        // A query N must match neither a stored N (symbol 4) nor EOS.
        assert_eq!(ALTRANSLATE[b'N' as usize], 6);
        assert_eq!(ALTRANSLATE[b'n' as usize], 6);
        for &value in ALTRANSLATE.iter() {
            assert_ne!(value, 4);
            assert_ne!(value as i32, EOS);
        }
    }

    #[test]
    fn test_fresh_cache_holds_trivial_costs() {
        for maxtau in 0..=8u8 {
            let node: TrieNode<()> = TrieNode::new(maxtau).unwrap();
            let width = 2 * maxtau as usize + 3;
            assert_eq!(node.cache.len(), width);
            for i in 0..width {
                let expected = (i as i32 - (maxtau as i32 + 1)).unsigned_abs() as u8;
                assert_eq!(node.cache[i], expected, "cell {} at maxtau {}", i, maxtau);
            }
            assert!(node.data.is_none());
            assert_eq!(node.path, 0);
            assert!(node.child.iter().all(|slot| slot.is_none()));
        }
    }

    #[test]
    fn test_new_trie_rejects_large_maxtau() {
        assert_eq!(Trie::<()>::new(9, 4).err(), Some(TrieError::TauTooLarge));
        assert!(Trie::<()>::new(8, 4).is_ok());
    }

    #[test]
    fn test_insert_builds_packed_path() {
        let mut trie: Trie<()> = Trie::new(3, 4).unwrap();
        let node = trie.insert_string(b"ACGT").unwrap();
        // A=0, C=1, G=2, T=3, most recent edge in the low nibble.
        assert_eq!(trie.node(node).path, 0x0123);

        // Only the last eight edges survive in the word.
        let deep = trie.insert_string(b"ACGTACGTACGT").unwrap();
        assert_eq!(trie.node(deep).path, 0x0123_0123);
    }

    #[test]
    fn test_insert_walks_existing_edges() {
        let mut trie: Trie<()> = Trie::new(2, 4).unwrap();
        let first = trie.insert_string(b"ACGT").unwrap();
        let count = trie.node_count();

        // Same string: same terminal, no new nodes.
        let again = trie.insert_string(b"ACGT").unwrap();
        assert_eq!(first, again);
        assert_eq!(trie.node_count(), count);

        // Shared prefix: only the divergent suffix is appended.
        trie.insert_string(b"ACGA").unwrap();
        assert_eq!(trie.node_count(), count + 1);
    }

    #[test]
    fn test_insert_wildcard_goes_to_slot_four() {
        let mut trie: Trie<()> = Trie::new(1, 4).unwrap();
        let node = trie.insert_string(b"ACGN").unwrap();
        let parent = trie.insert_string(b"ACG").unwrap();
        assert_eq!(trie.node(parent).child[4], Some(node));
    }

    #[test]
    fn test_insert_rejects_empty_string() {
        let mut trie: Trie<()> = Trie::new(1, 4).unwrap();
        assert_eq!(trie.insert_string(b"").err(), Some(TrieError::EmptyString));
    }

    #[test]
    fn test_insert_rejects_bad_symbol() {
        let mut trie: Trie<()> = Trie::new(1, 4).unwrap();
        assert_eq!(
            trie.insert_string(b"ACXT").err(),
            Some(TrieError::BadSymbol(b'X'))
        );
    }

    #[test]
    fn test_insert_rejects_over_long_string() {
        let mut trie: Trie<()> = Trie::new(1, 4).unwrap();
        let long = vec![b'A'; MAX_BARCODE_LEN + 1];
        assert_eq!(trie.insert_string(&long).err(), Some(TrieError::TooLong));
        assert!(trie.insert_string(&long[..MAX_BARCODE_LEN]).is_ok());
    }

    #[test]
    fn test_error_probe_reads_and_clears() {
        let mut trie: Trie<()> = Trie::new(1, 4).unwrap();
        assert_eq!(trie.check_error_and_reset(), None);
        let _ = trie.insert_string(b"");
        assert_eq!(trie.check_error_and_reset(), Some(TrieError::EmptyString));
        assert_eq!(trie.check_error_and_reset(), None);
    }

    #[test]
    fn test_payload_attachment() {
        let mut trie: Trie<String> = Trie::new(1, 4).unwrap();
        let node = trie.insert_string(b"ACGT").unwrap();
        assert!(trie.data(node).is_none());
        assert_eq!(trie.set_data(node, "read-42".to_string()), None);
        assert_eq!(trie.data(node).map(String::as_str), Some("read-42"));
        // Re-attaching hands back the old payload.
        let old = trie.set_data(node, "read-43".to_string());
        assert_eq!(old.as_deref(), Some("read-42"));
    }

    #[test]
    fn test_node_array_push_and_clear() {
        let mut stack = NodeArray::new().unwrap();
        assert!(stack.is_empty());
        for id in 0..100 {
            stack.push(id).unwrap();
        }
        assert_eq!(stack.len(), 100);
        assert_eq!(stack.as_slice()[99], 99);
        assert_eq!(stack.iter().sum::<u32>(), (0..100u32).sum::<u32>());

        stack.clear();
        assert!(stack.is_empty());
        stack.push(ROOT_ID).unwrap();
        assert_eq!(stack.as_slice(), &[ROOT_ID]);
    }
}
