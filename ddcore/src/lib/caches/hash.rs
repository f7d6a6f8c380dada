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

use fnv::FnvHashMap;

use cache::Cache;
use configuration::Configuration;
use outcome::Outcome;

/// A straightforward verdict memo: one map entry per configuration, the configuration hashed as a
/// sequence.
pub struct HashCache<T> {
    map: FnvHashMap<Configuration<T>, Outcome>
}

impl<T: Clone + Eq + Hash> HashCache<T> {
    pub fn new() -> HashCache<T> {
        HashCache {
            map: FnvHashMap::default()
        }
    }

    /// Number of distinct configurations with a memoised verdict.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<T: Clone + Eq + Hash> Cache<T> for HashCache<T> {
    fn get(&self, config: &Configuration<T>) -> Option<Outcome> {
        self.map.get(config).cloned()
    }

    fn put(&mut self, config: &Configuration<T>, outcome: Outcome) {
        debug_assert!(self.map.get(config).map_or(true, |o| *o == outcome));
        self.map.insert(config.clone(), outcome);
    }
}

impl<T> fmt::Display for HashCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "HashCache")
    }
}

#[cfg(test)]
mod test {
    use super::HashCache;
    use cache::Cache;
    use configuration::Configuration;
    use outcome::Outcome;

    #[test]
    fn test_get_put() {
        let mut cache = HashCache::new();
        let c1 = Configuration::new(vec![1u8, 2]);
        let c2 = Configuration::new(vec![1u8]);
        assert_eq!(cache.get(&c1), None);
        cache.put(&c1, Outcome::Fail);
        cache.put(&c2, Outcome::Unresolved);
        assert_eq!(cache.get(&c1), Some(Outcome::Fail));
        assert_eq!(cache.get(&c2), Some(Outcome::Unresolved));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_empty_configuration_is_a_key() {
        let mut cache = HashCache::new();
        let empty = Configuration::<u8>::new(vec![]);
        cache.put(&empty, Outcome::Pass);
        assert_eq!(cache.get(&empty), Some(Outcome::Pass));
    }
}
