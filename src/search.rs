// barcode-trie/src/search.rs

use crate::alphabet::{ALTRANSLATE, EOS, M, MAX_BARCODE_LEN};
use crate::error::TrieError;
use crate::narray::NodeArray;
use crate::trie::{NodeId, Trie, TrieNode, MAX_CACHE_WIDTH};

#[path = "search_test.rs"]
mod search_test;

impl<T> Trie<T> {
    /// Append to `hits` every node at depth `bottom` whose spelled
    /// string lies within Levenshtein distance `tau` of `query`.
    ///
    /// `start` is the depth at which `query` diverges from the previous
    /// query on this trie; the traversal resumes from the frontier
    /// cached at that depth instead of the root. Frontiers for depths in
    /// `(start, trail]` are re-recorded during this search so the next
    /// query may resume anywhere up to `trail`. Caller contract:
    /// `start <= trail < query.len()`, and `query` agrees with the
    /// previous query on its first `start` characters.
    ///
    /// Hits are appended in DFS order over child slots, deterministic
    /// for a given trie and query. A push failure mid-traversal does not
    /// abort the search; probe `check_error_and_reset` afterwards.
    pub fn search(
        &mut self,
        query: &[u8],
        tau: u8,
        hits: &mut NodeArray,
        start: usize,
        trail: usize,
    ) -> Result<(), TrieError> {
        if tau > self.maxtau {
            // Node caches hold a band sized for maxtau; a larger tau
            // would step outside it.
            log::error!("requested tau {} greater than maxtau {}", tau, self.maxtau);
            return Err(self.fail(TrieError::TauTooLarge));
        }
        let length = query.len();
        if length > MAX_BARCODE_LEN {
            log::error!(
                "query of {} characters exceeds the maximum of {}",
                length,
                MAX_BARCODE_LEN
            );
            return Err(self.fail(TrieError::QueryTooLong));
        }
        debug_assert!(start <= trail && trail < length, "bad start/trail");

        if self.miles.is_empty() {
            if let Err(err) = self.init_miles() {
                return Err(self.fail(err));
            }
        }
        // Frontiers this search will overwrite. Storage is kept.
        for frontier in &mut self.miles[start + 1..=trail] {
            frontier.clear();
        }

        // Translate the query. The first cell keeps the length, which
        // shifts the symbols by one position; every cell past the query
        // stays EOS. Positions before start - maxtau cannot reach the
        // band, so translation starts there.
        let mut translated = [EOS; M];
        translated[0] = length as i32;
        let from = start.saturating_sub(self.maxtau as usize);
        for i in from..length {
            translated[i + 1] = ALTRANSLATE[query[i] as usize] as i32;
        }

        let mut ctx = SearchContext {
            nodes: &mut self.nodes,
            query: &translated,
            tau,
            maxtau: self.maxtau,
            bottom: self.bottom,
            trail,
            miles: &mut self.miles,
            hits,
            last_error: &mut self.last_error,
        };
        for i in 0..ctx.miles[start].len() {
            let node = ctx.miles[start].nodes[i];
            ctx.recursive_search(node, start + 1);
        }
        Ok(())
    }
}

/// Everything the recursion needs, threaded explicitly so that tries in
/// the same process stay independent.
struct SearchContext<'a, T> {
    nodes: &'a mut Vec<TrieNode<T>>,
    query: &'a [i32; M],
    tau: u8,
    maxtau: u8,
    bottom: usize,
    trail: usize,
    miles: &'a mut Vec<NodeArray>,
    hits: &'a mut NodeArray,
    last_error: &'a mut Option<TrieError>,
}

impl<T> SearchContext<'_, T> {
    /// Propagate the band one level down from `node`, whose cache holds
    /// the anti-diagonal for depth - 1, into each of its children.
    fn recursive_search(&mut self, node: NodeId, depth: usize) {
        let center = self.maxtau as usize + 1;
        let maxa = (depth - 1).min(self.tau as usize);

        // Parent snapshot: its cache is read while child caches are
        // written, so copy it out of the arena first.
        let (path, children, pcache) = {
            let n = &self.nodes[node as usize];
            let mut pcache = [0u8; MAX_CACHE_WIDTH];
            pcache[..n.cache.len()].copy_from_slice(&n.cache);
            (n.path, n.child, pcache)
        };

        // Right arm of the band, identical for every child: it depends
        // on the parent path, not on the edge symbol. Cells above maxa
        // keep their boundary values |a|.
        let mut common: [u8; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        let mut cmindist = u8::MAX;
        for a in (1..=maxa).rev() {
            let nibble = (path >> (4 * (a - 1)) & 0xF) as i32;
            let rmatch = pcache[center + a] + (nibble != self.query[depth]) as u8;
            let rshift = pcache[center + a - 1].min(common[a + 1]) + 1;
            common[a] = rmatch.min(rshift);
            cmindist = cmindist.min(common[a]);
        }

        for (i, slot) in children.iter().enumerate() {
            let child = match slot {
                Some(child) => *child,
                None => continue,
            };

            let mut mindist = cmindist;
            let cdist;
            {
                let ccache = &mut self.nodes[child as usize].cache;
                let w = self.maxtau as usize;
                if w > 0 {
                    ccache[center + 1..center + w].copy_from_slice(&common[1..w]);
                }
                // Band boundary for the left arm; also heals the cell
                // when an earlier, larger-tau search left values there.
                ccache[center - maxa - 1] = maxa as u8 + 1;

                for a in (1..=maxa).rev() {
                    let lmatch =
                        pcache[center - a] + ((i as i32) != self.query[depth - a]) as u8;
                    let lshift = pcache[center - a + 1].min(ccache[center - a - 1]) + 1;
                    ccache[center - a] = lmatch.min(lshift);
                    mindist = mindist.min(ccache[center - a]);
                }

                let cmatch = pcache[center] + ((i as i32) != self.query[depth]) as u8;
                let cshift = ccache[center - 1].min(ccache[center + 1]) + 1;
                cdist = cmatch.min(cshift);
                ccache[center] = cdist;
                mindist = mindist.min(cdist);
            }

            // The whole band is past tau: nothing below this child can
            // come back within the bound.
            if mindist > self.tau {
                continue;
            }

            // Cache the frontier while trailing.
            if depth <= self.trail {
                if let Err(err) = self.miles[depth].push(child) {
                    *self.last_error = Some(err);
                }
            }

            // Once the band minimum reaches tau, no further mismatch or
            // indel is affordable, and only the exact continuation of
            // the centre alignment can still land a hit.
            if mindist == self.tau && depth > self.trail {
                if cdist == self.tau {
                    self.dash(child, depth + 1);
                }
                continue;
            }

            if depth == self.bottom && cdist <= self.tau {
                if let Err(err) = self.hits.push(child) {
                    *self.last_error = Some(err);
                }
            }

            self.recursive_search(child, depth + 1);
        }
    }

    /// Exact-completion shortcut: follow the translated query suffix one
    /// symbol at a time, emitting the landing node iff it carries data.
    /// A missing edge, or any symbol the trie cannot store, aborts.
    fn dash(&mut self, node: NodeId, from: usize) {
        let mut node = node;
        let mut i = from;
        loop {
            let c = self.query[i];
            if c == EOS {
                break;
            }
            if c > 4 {
                return;
            }
            match self.nodes[node as usize].child[c as usize] {
                Some(child) => node = child,
                None => return,
            }
            i += 1;
        }
        if self.nodes[node as usize].data.is_some() {
            if let Err(err) = self.hits.push(node) {
                *self.last_error = Some(err);
            }
        }
    }
}
