// Copyright (c) 2018 King's College London
// created by the Software Development Team <http://soft-dev.org/>
//
// The Universal Permissive License (UPL), Version 1.0
//
// Subject to the condition set forth below, permission is hereby granted to any person obtaining a
// copy of this software, associated documentation and/or data (collectively the "Software"), free
// of charge and under any and all copyright rights in the Software, and any and all patent rights
// owned or freely licensable by each licensor hereunder covering either (i) the unmodified
// Software as contributed to or provided by such licensor, or (ii) the Larger Works (as defined
// below), to deal in both
//
// (a) the Software, and
// (b) any piece of software and/or hardware listed in the lrgrwrks.txt file
// if one is included with the Software (each a "Larger Work" to which the Software is contributed
// by such licensors),
//
// without restriction, including without limitation the rights to copy, create derivative works
// of, display, perform, and distribute the Software and make, use, sell, offer for sale, import,
// export, have made, and have sold the Software and the Larger Work(s), and to sublicense the
// foregoing rights on either these or other terms.
//
// This license is subject to the following condition: The above copyright notice and either this
// complete permission notice or at a minimum a reference to the UPL must be included in all copies
// or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
// BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;

use cache::Cache;
use configuration::Configuration;
use outcome::Outcome;

struct TrieNode<T> {
    outcome: Option<Outcome>,
    children: IndexMap<T, TrieNode<T>>
}

impl<T: Clone + Eq + Hash> TrieNode<T> {
    fn new() -> TrieNode<T> {
        TrieNode {
            outcome: None,
            children: IndexMap::new()
        }
    }
}

/// A verdict memo storing configurations in a trie keyed by the element sequence, with the verdict
/// at the terminal node. Behaviourally equivalent to [`HashCache`](struct.HashCache.html), but
/// configurations sharing prefixes share storage, which pays off when a tree-structured algorithm
/// generates many candidates with a common stem.
pub struct TreeCache<T> {
    root: TrieNode<T>,
    len: usize
}

impl<T: Clone + Eq + Hash> TreeCache<T> {
    pub fn new() -> TreeCache<T> {
        TreeCache {
            root: TrieNode::new(),
            len: 0
        }
    }

    /// Number of distinct configurations with a memoised verdict.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T: Clone + Eq + Hash> Cache<T> for TreeCache<T> {
    fn get(&self, config: &Configuration<T>) -> Option<Outcome> {
        let mut node = &self.root;
        for e in config.iter() {
            match node.children.get(e) {
                Some(n) => node = n,
                None => return None
            }
        }
        node.outcome
    }

    fn put(&mut self, config: &Configuration<T>, outcome: Outcome) {
        let mut node = &mut self.root;
        for e in config.iter() {
            node = node.children.entry(e.clone()).or_insert_with(TrieNode::new);
        }
        debug_assert!(node.outcome.map_or(true, |o| o == outcome));
        if node.outcome.is_none() {
            self.len += 1;
        }
        node.outcome = Some(outcome);
    }
}

impl<T> fmt::Display for TreeCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TreeCache")
    }
}

#[cfg(test)]
mod test {
    use super::TreeCache;
    use cache::Cache;
    use configuration::Configuration;
    use outcome::Outcome;

    #[test]
    fn test_get_put() {
        let mut cache = TreeCache::new();
        let c1 = Configuration::new(vec![1u8, 2, 3]);
        let c2 = Configuration::new(vec![1u8, 2]);
        let c3 = Configuration::new(vec![1u8, 2, 4]);
        assert_eq!(cache.get(&c1), None);
        cache.put(&c1, Outcome::Fail);
        // A stored configuration must not make its prefixes look stored.
        assert_eq!(cache.get(&c2), None);
        cache.put(&c2, Outcome::Pass);
        cache.put(&c3, Outcome::Unresolved);
        assert_eq!(cache.get(&c1), Some(Outcome::Fail));
        assert_eq!(cache.get(&c2), Some(Outcome::Pass));
        assert_eq!(cache.get(&c3), Some(Outcome::Unresolved));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_restore_does_not_grow() {
        let mut cache = TreeCache::new();
        let c = Configuration::new(vec!['a', 'b']);
        cache.put(&c, Outcome::Fail);
        cache.put(&c, Outcome::Fail);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_empty_configuration_is_a_key() {
        let mut cache = TreeCache::new();
        let empty = Configuration::<char>::new(vec![]);
        assert_eq!(cache.get(&empty), None);
        cache.put(&empty, Outcome::Unresolved);
        assert_eq!(cache.get(&empty), Some(Outcome::Unresolved));
    }
}
