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

use cache::Cache;
use configuration::Configuration;
use outcome::Outcome;

/// A reduction algorithm. Implementations are single-threaded and synchronous: oracle requests
/// are issued strictly sequentially, and all tie-breaks are fixed, so the same input and oracle
/// always produce the same output and the same invocation count.
pub trait Algorithm<T: Clone + Eq + Hash>: fmt::Display {
    /// Reduce `config`, consulting `cache` (if given) before each oracle request.
    ///
    /// The caller must ensure `oracle(config)` is `FAIL`; `run` does not retest the input.
    /// Provided that precondition holds and the oracle is deterministic, the result also elicits
    /// `FAIL` and is no longer than `config`.
    fn run(
        &mut self,
        config: &Configuration<T>,
        oracle: &mut FnMut(&Configuration<T>) -> Outcome,
        cache: Option<&mut Cache<T>>
    ) -> Result<Configuration<T>, AlgorithmError>;

    /// How often the last `run` actually invoked the oracle. Cache hits are not counted.
    fn count(&self) -> u64;
}

/// An error raised by an algorithm before any reduction has happened.
#[derive(Debug)]
pub enum AlgorithmError {
    /// The input could not be turned into the structure the algorithm reduces over.
    Parse(String)
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AlgorithmError::Parse(ref s) => write!(f, "{}", s)
        }
    }
}

/// The oracle-invocation plumbing every algorithm shares: consult the cache first; only on a miss
/// invoke the oracle, memoise its verdict, and bump the invocation count. Each `run` constructs a
/// fresh `Tester`, which is what resets the count per run.
pub struct Tester<'a, 'b, T: 'a + 'b + Clone + Eq + Hash> {
    oracle: &'a mut (FnMut(&Configuration<T>) -> Outcome + 'a),
    cache: Option<&'b mut (Cache<T> + 'b)>,
    count: u64
}

impl<'a, 'b, T: 'a + 'b + Clone + Eq + Hash> Tester<'a, 'b, T> {
    pub fn new(
        oracle: &'a mut (FnMut(&Configuration<T>) -> Outcome + 'a),
        cache: Option<&'b mut (Cache<T> + 'b)>
    ) -> Tester<'a, 'b, T> {
        Tester {
            oracle,
            cache,
            count: 0
        }
    }

    /// The verdict for `config`.
    pub fn outcome_of(&mut self, config: &Configuration<T>) -> Outcome {
        if let Some(ref cache) = self.cache {
            if let Some(outcome) = cache.get(config) {
                return outcome;
            }
        }
        let outcome = (self.oracle)(config);
        self.count += 1;
        if let Some(ref mut cache) = self.cache {
            cache.put(config, outcome);
        }
        outcome
    }

    /// How often the oracle has been invoked through this tester.
    pub fn count(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use super::Tester;
    use caches::HashCache;
    use configuration::Configuration;
    use outcome::Outcome;

    #[test]
    fn test_cache_hit_skips_oracle() {
        let invocations = Cell::new(0);
        let mut oracle = |_: &Configuration<u8>| {
            invocations.set(invocations.get() + 1);
            Outcome::Unresolved
        };
        let mut cache = HashCache::new();
        let config = Configuration::new(vec![1u8, 2]);
        {
            let mut tester = Tester::new(&mut oracle, Some(&mut cache));
            assert_eq!(tester.outcome_of(&config), Outcome::Unresolved);
            assert_eq!(tester.outcome_of(&config), Outcome::Unresolved);
            assert_eq!(tester.count(), 1);
        }
        assert_eq!(invocations.get(), 1);
        // A fresh tester over the same cache must not need the oracle at all.
        let mut tester = Tester::new(&mut oracle, Some(&mut cache));
        assert_eq!(tester.outcome_of(&config), Outcome::Unresolved);
        assert_eq!(tester.count(), 0);
    }

    #[test]
    fn test_uncached_tester_reinvokes() {
        let mut invocations = 0;
        let mut oracle = |_: &Configuration<u8>| {
            invocations += 1;
            Outcome::Pass
        };
        let config = Configuration::new(vec![9u8]);
        let mut tester = Tester::new(&mut oracle, None);
        tester.outcome_of(&config);
        tester.outcome_of(&config);
        assert_eq!(tester.count(), 2);
        assert_eq!(invocations, 2);
    }
}
