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
use std::time::{Duration, Instant};

use algorithm::{Algorithm, AlgorithmError, Tester};
use algorithms::out_of_time;
use cache::Cache;
use configuration::Configuration;
use outcome::Outcome;

// The prior probability that an element is required for the failure.
const PRIOR: f64 = 0.1;

/// Probabilistic delta debugging. Every element carries a probability `p` that it is required for
/// the failure, initialised to a uniform prior. Each round deletes in one go the set of elements
/// currently most likely to be inessential: elements are ordered by ascending `(p, index)` -- the
/// index makes every tie-break, and hence the whole run, deterministic -- and the deletion set is
/// grown while that increases the expected gain `k * prod(1 - p_i)`. A `FAIL` commits the
/// deletion; anything else is evidence that the set contained a required element, so each member's
/// probability is divided by `1 - prod(1 - p_j)`, the prior probability that the deletion would
/// succeed. A set of one that fails to delete is thereby pinned to `p = 1`. The round loop ends
/// when no element's probability remains below 1.
///
/// Every survivor was either pinned by a rejected singleton deletion or deleted-and-restored, so
/// the result is 1-minimal under the single-element policy.
pub struct ProbDD {
    budget: Option<Duration>,
    count: u64
}

impl ProbDD {
    pub fn new() -> ProbDD {
        ProbDD {
            budget: None,
            count: 0
        }
    }

    /// Bound each `run` by a wall-clock budget. On exhaustion the best configuration found so far
    /// is returned.
    pub fn with_budget(mut self, budget: Duration) -> ProbDD {
        self.budget = Some(budget);
        self
    }
}

impl fmt::Display for ProbDD {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ProbDD")
    }
}

impl<T: Clone + Eq + Hash> Algorithm<T> for ProbDD {
    fn run(
        &mut self,
        config: &Configuration<T>,
        oracle: &mut FnMut(&Configuration<T>) -> Outcome,
        cache: Option<&mut Cache<T>>
    ) -> Result<Configuration<T>, AlgorithmError> {
        self.count = 0;
        let finish_by = self.budget.map(|b| Instant::now() + b);
        let mut tester = Tester::new(oracle, cache);

        let mut elems = config.elems().to_vec();
        let mut probs = vec![PRIOR; elems.len()];
        loop {
            if out_of_time(finish_by) {
                break;
            }
            let mut live: Vec<usize> = (0..elems.len()).filter(|&i| probs[i] < 1.0).collect();
            if live.is_empty() {
                break;
            }
            live.sort_by(|&a, &b| probs[a].partial_cmp(&probs[b]).unwrap().then(a.cmp(&b)));

            // Extending the deletion set by the next element multiplies the expected gain by
            // (k + 1)/k * (1 - p); grow while that exceeds 1.
            let mut k = 1;
            while k < live.len() && (1.0 - probs[live[k]]) * ((k + 1) as f64) > k as f64 {
                k += 1;
            }
            let mut is_deleted = vec![false; elems.len()];
            for &i in &live[..k] {
                is_deleted[i] = true;
            }

            let cand: Vec<T> = elems
                .iter()
                .enumerate()
                .filter(|&(i, _)| !is_deleted[i])
                .map(|(_, e)| e.clone())
                .collect();
            if tester.outcome_of(&Configuration::new(cand)) == Outcome::Fail {
                debug!("probdd: deleted {} elements ({} left)", k, elems.len() - k);
                let mut kept_elems = Vec::with_capacity(elems.len() - k);
                let mut kept_probs = Vec::with_capacity(elems.len() - k);
                for (i, e) in elems.into_iter().enumerate() {
                    if !is_deleted[i] {
                        kept_elems.push(e);
                        kept_probs.push(probs[i]);
                    }
                }
                elems = kept_elems;
                probs = kept_probs;
            } else {
                // The deletion was rejected, so the set held at least one essential element:
                // condition every member on that evidence. P(evidence) = 1 - P(none essential).
                let mut none_essential = 1.0;
                for &i in &live[..k] {
                    none_essential *= 1.0 - probs[i];
                }
                let evidence = 1.0 - none_essential;
                for &i in &live[..k] {
                    let p = probs[i] / evidence;
                    probs[i] = if p < 1.0 { p } else { 1.0 };
                }
                debug!("probdd: kept {} elements, probabilities raised", k);
            }
        }

        self.count = tester.count();
        Ok(Configuration::new(elems))
    }

    fn count(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::ProbDD;
    use algorithm::Algorithm;
    use algorithms::test::{as_string, assert_one_minimal, digits, printables};
    use caches::HashCache;
    use configuration::Configuration;
    use outcome::Outcome;

    #[test]
    fn test_printables() {
        let mut algorithm = ProbDD::new();
        let mut oracle = digits;
        let reduced = algorithm.run(&printables(), &mut oracle, None).unwrap();
        assert_eq!(as_string(&reduced), "1234567890");
        assert_one_minimal(&reduced, &mut oracle);
    }

    #[test]
    fn test_single_culprit() {
        // A bisection-shaped oracle: one element alone causes the failure.
        let mut algorithm = ProbDD::new();
        let mut oracle = |config: &Configuration<u32>| {
            if config.iter().any(|&x| x == 42) {
                Outcome::Fail
            } else {
                Outcome::Pass
            }
        };
        let input = Configuration::new((0u32..100).collect::<Vec<_>>());
        let reduced = algorithm.run(&input, &mut oracle, None).unwrap();
        assert_eq!(reduced.elems(), &[42]);
    }

    #[test]
    fn test_unresolved_rejects_removal() {
        let mut algorithm = ProbDD::new();
        // 0 must stay (its absence is UNRESOLVED); 1 and 2 are noise.
        let mut oracle = |config: &Configuration<u32>| {
            if !config.iter().any(|&x| x == 0) {
                Outcome::Unresolved
            } else {
                Outcome::Fail
            }
        };
        let input = Configuration::new(vec![0u32, 1, 2]);
        let reduced = algorithm.run(&input, &mut oracle, None).unwrap();
        assert_eq!(reduced.elems(), &[0]);
    }

    #[test]
    fn test_deterministic() {
        let mut oracle = digits;
        let mut a1 = ProbDD::new();
        let r1 = a1.run(&printables(), &mut oracle, None).unwrap();
        let mut a2 = ProbDD::new();
        let r2 = a2.run(&printables(), &mut oracle, None).unwrap();
        assert_eq!(r1, r2);
        assert_eq!(Algorithm::<char>::count(&a1), Algorithm::<char>::count(&a2));
    }

    #[test]
    fn test_shared_cache_makes_rerun_free() {
        let mut oracle = digits;
        let mut cache = HashCache::new();
        let mut first = ProbDD::new();
        let r1 = first
            .run(&printables(), &mut oracle, Some(&mut cache))
            .unwrap();
        let mut second = ProbDD::new();
        let r2 = second
            .run(&printables(), &mut oracle, Some(&mut cache))
            .unwrap();
        assert_eq!(Algorithm::<char>::count(&second), 0);
        assert_eq!(r1, r2);
    }

    #[test]
    fn test_empty_input() {
        let mut algorithm = ProbDD::new();
        let mut oracle = |_: &Configuration<u8>| Outcome::Fail;
        let reduced = algorithm
            .run(&Configuration::new(vec![]), &mut oracle, None)
            .unwrap();
        assert!(reduced.is_empty());
        assert_eq!(Algorithm::<u8>::count(&algorithm), 0);
    }

    #[test]
    fn test_exhausted_budget_returns_input() {
        let mut algorithm = ProbDD::new().with_budget(Duration::from_secs(0));
        let mut oracle = digits;
        let reduced = algorithm.run(&printables(), &mut oracle, None).unwrap();
        assert_eq!(reduced, printables());
        assert_eq!(Algorithm::<char>::count(&algorithm), 0);
    }
}
