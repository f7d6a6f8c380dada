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

use std::cmp;
use std::fmt;
use std::hash::Hash;
use std::time::{Duration, Instant};

use algorithm::{Algorithm, AlgorithmError, Tester};
use algorithms::out_of_time;
use cache::Cache;
use configuration::Configuration;
use outcome::Outcome;

/// The classic Zeller-Hildebrandt minimising delta debugging algorithm, working over a granularity
/// `n` (initially 2):
///
///   1. Split the configuration into `n` blocks of equal size (the last block absorbs any
///      remainder) and retest with one block at a time removed. A `FAIL` commits the removal and
///      restarts with `n := max(n - 1, 2)`.
///   2. Otherwise retest each block on its own. A `FAIL` commits and restarts with `n := 2`.
///   3. Otherwise double the granularity (capped at the configuration length), or terminate once
///      `n` has reached it.
///
/// The result is 1-minimal: no single element of it can be removed while retaining `FAIL`.
pub struct DDMin {
    budget: Option<Duration>,
    count: u64
}

impl DDMin {
    pub fn new() -> DDMin {
        DDMin {
            budget: None,
            count: 0
        }
    }

    /// Bound each `run` by a wall-clock budget. On exhaustion the best configuration found so far
    /// is returned.
    pub fn with_budget(mut self, budget: Duration) -> DDMin {
        self.budget = Some(budget);
        self
    }
}

impl fmt::Display for DDMin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ddmin")
    }
}

impl<T: Clone + Eq + Hash> Algorithm<T> for DDMin {
    fn run(
        &mut self,
        config: &Configuration<T>,
        oracle: &mut FnMut(&Configuration<T>) -> Outcome,
        cache: Option<&mut Cache<T>>
    ) -> Result<Configuration<T>, AlgorithmError> {
        self.count = 0;
        let finish_by = self.budget.map(|b| Instant::now() + b);
        let mut tester = Tester::new(oracle, cache);
        let mut cfg = config.elems().to_vec();
        let mut n = 2;
        'outer: while cfg.len() >= 2 && !out_of_time(finish_by) {
            let len = cfg.len();
            n = cmp::min(n, len);
            let size = len / n;
            // Drop one block at a time.
            for b in 0..n {
                let (start, end) = block_bounds(b, n, size, len);
                let mut elems = Vec::with_capacity(len - (end - start));
                elems.extend_from_slice(&cfg[..start]);
                elems.extend_from_slice(&cfg[end..]);
                let cand = Configuration::new(elems);
                if tester.outcome_of(&cand) == Outcome::Fail {
                    debug!("ddmin: removed block {}/{} ({} elements left)", b, n, cand.len());
                    cfg = cand.into_elems();
                    n = cmp::max(n - 1, 2);
                    continue 'outer;
                }
            }
            // Keep one block at a time.
            for b in 0..n {
                let (start, end) = block_bounds(b, n, size, len);
                let cand = Configuration::new(cfg[start..end].to_vec());
                if tester.outcome_of(&cand) == Outcome::Fail {
                    debug!("ddmin: reduced to block {}/{} ({} elements)", b, n, cand.len());
                    cfg = cand.into_elems();
                    n = 2;
                    continue 'outer;
                }
            }
            if n < len {
                n = cmp::min(2 * n, len);
            } else {
                break;
            }
        }
        self.count = tester.count();
        Ok(Configuration::new(cfg))
    }

    fn count(&self) -> u64 {
        self.count
    }
}

fn block_bounds(b: usize, n: usize, size: usize, len: usize) -> (usize, usize) {
    let start = b * size;
    let end = if b == n - 1 { len } else { (b + 1) * size };
    (start, end)
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::DDMin;
    use algorithm::Algorithm;
    use algorithms::test::{as_string, assert_one_minimal, digits, interval, printables};
    use caches::{HashCache, TreeCache};
    use configuration::Configuration;
    use outcome::Outcome;

    #[test]
    fn test_printables() {
        let mut algorithm = DDMin::new();
        let mut oracle = digits;
        let reduced = algorithm.run(&printables(), &mut oracle, None).unwrap();
        assert_eq!(as_string(&reduced), "1234567890");
        assert!(Algorithm::<char>::count(&algorithm) > 0);
        assert_one_minimal(&reduced, &mut oracle);
    }

    #[test]
    fn test_interval() {
        let mut algorithm = DDMin::new();
        let mut oracle = interval;
        let input = Configuration::new((0u32..10).collect::<Vec<_>>());
        let reduced = algorithm.run(&input, &mut oracle, None).unwrap();
        assert_eq!(reduced.elems(), &[3, 5, 7]);
    }

    #[test]
    fn test_already_minimal() {
        let mut algorithm = DDMin::new();
        let mut oracle = interval;
        let input = Configuration::new(vec![3u32, 5, 7]);
        let mut cache = HashCache::new();
        let reduced = algorithm
            .run(&input, &mut oracle, Some(&mut cache))
            .unwrap();
        assert_eq!(reduced, input);
        assert!(
            Algorithm::<u32>::count(&algorithm) <= 6,
            "count was {}",
            Algorithm::<u32>::count(&algorithm)
        );
    }

    #[test]
    fn test_shared_cache_makes_rerun_free() {
        let mut oracle = digits;
        let mut cache = HashCache::new();
        let mut first = DDMin::new();
        let r1 = first
            .run(&printables(), &mut oracle, Some(&mut cache))
            .unwrap();
        assert!(Algorithm::<char>::count(&first) > 0);
        let mut second = DDMin::new();
        let r2 = second
            .run(&printables(), &mut oracle, Some(&mut cache))
            .unwrap();
        assert_eq!(Algorithm::<char>::count(&second), 0);
        assert_eq!(r1, r2);
    }

    #[test]
    fn test_tree_cache_is_equivalent() {
        let mut oracle = digits;
        let mut hash_cache = HashCache::new();
        let mut tree_cache = TreeCache::new();
        let mut a1 = DDMin::new();
        let r1 = a1
            .run(&printables(), &mut oracle, Some(&mut hash_cache))
            .unwrap();
        let mut a2 = DDMin::new();
        let r2 = a2
            .run(&printables(), &mut oracle, Some(&mut tree_cache))
            .unwrap();
        assert_eq!(r1, r2);
        assert_eq!(Algorithm::<char>::count(&a1), Algorithm::<char>::count(&a2));
    }

    #[test]
    fn test_deterministic() {
        let mut oracle = digits;
        let mut a1 = DDMin::new();
        let r1 = a1.run(&printables(), &mut oracle, None).unwrap();
        let mut a2 = DDMin::new();
        let r2 = a2.run(&printables(), &mut oracle, None).unwrap();
        assert_eq!(r1, r2);
        assert_eq!(Algorithm::<char>::count(&a1), Algorithm::<char>::count(&a2));
    }

    #[test]
    fn test_oracle_invoked_once_per_configuration() {
        use std::collections::HashSet;
        let mut seen = HashSet::new();
        let mut oracle = |config: &Configuration<char>| {
            assert!(seen.insert(config.clone()), "oracle invoked twice for one configuration");
            digits(config)
        };
        let mut cache = HashCache::new();
        DDMin::new()
            .run(&printables(), &mut oracle, Some(&mut cache))
            .unwrap();
        DDMin::new()
            .run(&printables(), &mut oracle, Some(&mut cache))
            .unwrap();
    }

    #[test]
    fn test_short_inputs_need_no_oracle() {
        let mut algorithm = DDMin::new();
        let mut oracle = |_: &Configuration<u8>| Outcome::Fail;
        let input = Configuration::new(vec![42u8]);
        let reduced = algorithm.run(&input, &mut oracle, None).unwrap();
        assert_eq!(reduced, input);
        assert_eq!(Algorithm::<u8>::count(&algorithm), 0);
    }

    #[test]
    fn test_exhausted_budget_returns_input() {
        let mut algorithm = DDMin::new().with_budget(Duration::from_secs(0));
        let mut oracle = digits;
        let reduced = algorithm.run(&printables(), &mut oracle, None).unwrap();
        assert_eq!(reduced, printables());
        assert_eq!(Algorithm::<char>::count(&algorithm), 0);
    }
}
