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

/// An alternating reducer. Even ("tic") steps sweep the middle of the configuration in fragments
/// of the current length, deleting in situ every fragment whose removal retains `FAIL`; odd
/// ("toc") steps try to shorten the middle from its tail, moving each element that turns out to be
/// needed onto a protected suffix. The tail trimming is rationed by a *deficit*: one attempt for
/// every fragment test of the preceding sweep that was not paid for by a removal. The fragment
/// length starts at half the input and is halved whenever a sweep removes nothing; the run ends
/// when it reaches 0 or the middle is exhausted.
///
/// The deficit formula and the halving policy are load-bearing: the algorithm's behaviour is
/// defined by exactly these rules, not derived from a principle they could be re-derived from.
pub struct TicTocMin {
    budget: Option<Duration>,
    count: u64
}

impl TicTocMin {
    pub fn new() -> TicTocMin {
        TicTocMin {
            budget: None,
            count: 0
        }
    }

    /// Bound each `run` by a wall-clock budget. On exhaustion the best configuration found so far
    /// is returned.
    pub fn with_budget(mut self, budget: Duration) -> TicTocMin {
        self.budget = Some(budget);
        self
    }
}

impl fmt::Display for TicTocMin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TicTocMin")
    }
}

impl<T: Clone + Eq + Hash> Algorithm<T> for TicTocMin {
    fn run(
        &mut self,
        config: &Configuration<T>,
        oracle: &mut FnMut(&Configuration<T>) -> Outcome,
        cache: Option<&mut Cache<T>>
    ) -> Result<Configuration<T>, AlgorithmError> {
        self.count = 0;
        let finish_by = self.budget.map(|b| Instant::now() + b);
        let mut tester = Tester::new(oracle, cache);

        let prefix: Vec<T> = Vec::new();
        let mut middle = config.elems().to_vec();
        let mut suffix: Vec<T> = Vec::new();
        let mut length = middle.len() / 2;
        let mut deficit = 0;
        let mut step = 0u64;

        while length > 0 && !middle.is_empty() && !out_of_time(finish_by) {
            if step % 2 != 0 {
                for _ in 0..deficit {
                    if middle.is_empty() {
                        break;
                    }
                    trim_last(&mut tester, &prefix, &mut middle, &mut suffix);
                }
                deficit = 0;
            } else {
                let (kept, d) = drop_fragments(&mut tester, &prefix, &middle, &suffix, length);
                deficit = d;
                if kept.len() == middle.len() {
                    length /= 2;
                    debug!("tictocmin: nothing removed, fragment length now {}", length);
                }
                middle = kept;
            }
            step += 1;
        }

        let mut elems = prefix;
        elems.extend(middle);
        elems.extend(suffix);
        self.count = tester.count();
        Ok(Configuration::new(elems))
    }

    fn count(&self) -> u64 {
        self.count
    }
}

/// One tail-trim attempt: retest without the middle's last element, and either commit the removal
/// or move the element to the front of the suffix, where later steps leave it alone.
fn trim_last<T: Clone + Eq + Hash>(
    tester: &mut Tester<T>,
    prefix: &[T],
    middle: &mut Vec<T>,
    suffix: &mut Vec<T>
) {
    let last = match middle.pop() {
        Some(e) => e,
        None => return
    };
    let mut elems = Vec::with_capacity(prefix.len() + middle.len() + suffix.len());
    elems.extend_from_slice(prefix);
    elems.extend_from_slice(middle);
    elems.extend_from_slice(suffix);
    if tester.outcome_of(&Configuration::new(elems)) == Outcome::Fail {
        debug!("tictocmin: trimmed trailing element ({} left in middle)", middle.len());
    } else {
        suffix.insert(0, last);
    }
}

/// One fragment sweep over the middle. Every fragment is retested against the elements kept so
/// far plus the untouched remainder and suffix; a `FAIL` commits its removal. Returns the
/// surviving middle and the deficit: fragment tests not paid for by a removed element, clamped at
/// zero.
fn drop_fragments<T: Clone + Eq + Hash>(
    tester: &mut Tester<T>,
    prefix: &[T],
    middle: &[T],
    suffix: &[T],
    length: usize
) -> (Vec<T>, usize) {
    let mut kept: Vec<T> = Vec::new();
    let mut tested = 0;
    let mut i = 0;
    while i < middle.len() {
        let end = cmp::min(i + length, middle.len());
        let mut elems =
            Vec::with_capacity(prefix.len() + kept.len() + (middle.len() - end) + suffix.len());
        elems.extend_from_slice(prefix);
        elems.extend_from_slice(&kept);
        elems.extend_from_slice(&middle[end..]);
        elems.extend_from_slice(suffix);
        if tester.outcome_of(&Configuration::new(elems)) == Outcome::Fail {
            debug!("tictocmin: removed fragment of {} elements", end - i);
        } else {
            kept.extend_from_slice(&middle[i..end]);
        }
        tested += 1;
        i = end;
    }
    let removed = middle.len() - kept.len();
    (kept, tested - cmp::min(tested, removed))
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::TicTocMin;
    use algorithm::Algorithm;
    use algorithms::test::{as_string, digits, interval, printables};
    use caches::HashCache;
    use configuration::Configuration;
    use outcome::Outcome;

    #[test]
    fn test_printables() {
        let mut algorithm = TicTocMin::new();
        let mut oracle = digits;
        let reduced = algorithm.run(&printables(), &mut oracle, None).unwrap();
        assert_eq!(as_string(&reduced), "1234567890");
    }

    #[test]
    fn test_interval() {
        let mut algorithm = TicTocMin::new();
        let mut oracle = interval;
        let input = Configuration::new((0u32..10).collect::<Vec<_>>());
        let reduced = algorithm.run(&input, &mut oracle, None).unwrap();
        assert_eq!(reduced.elems(), &[3, 5, 7]);
    }

    #[test]
    fn test_trailing_edge() {
        // The failure-inducing element sits at the very end once everything else is gone; only
        // the toc phase can uncover it.
        let mut algorithm = TicTocMin::new();
        let mut oracle = |config: &Configuration<char>| {
            if config.iter().any(|&c| c == 'b') {
                Outcome::Fail
            } else {
                Outcome::Pass
            }
        };
        let reduced = algorithm
            .run(&Configuration::from("abc"), &mut oracle, None)
            .unwrap();
        assert_eq!(as_string(&reduced), "b");
    }

    #[test]
    fn test_shared_cache_makes_rerun_free() {
        let mut oracle = digits;
        let mut cache = HashCache::new();
        let mut first = TicTocMin::new();
        let r1 = first
            .run(&printables(), &mut oracle, Some(&mut cache))
            .unwrap();
        let mut second = TicTocMin::new();
        let r2 = second
            .run(&printables(), &mut oracle, Some(&mut cache))
            .unwrap();
        assert_eq!(Algorithm::<char>::count(&second), 0);
        assert_eq!(r1, r2);
    }

    #[test]
    fn test_deterministic() {
        let mut oracle = digits;
        let mut a1 = TicTocMin::new();
        let r1 = a1.run(&printables(), &mut oracle, None).unwrap();
        let mut a2 = TicTocMin::new();
        let r2 = a2.run(&printables(), &mut oracle, None).unwrap();
        assert_eq!(r1, r2);
        assert_eq!(Algorithm::<char>::count(&a1), Algorithm::<char>::count(&a2));
    }

    #[test]
    fn test_monotone_shrinking() {
        let mut algorithm = TicTocMin::new();
        let mut oracle = digits;
        let reduced = algorithm.run(&printables(), &mut oracle, None).unwrap();
        assert!(reduced.len() <= printables().len());
        assert_eq!(oracle(&reduced), Outcome::Fail);
    }

    #[test]
    fn test_exhausted_budget_returns_input() {
        let mut algorithm = TicTocMin::new().with_budget(Duration::from_secs(0));
        let mut oracle = digits;
        let reduced = algorithm.run(&printables(), &mut oracle, None).unwrap();
        assert_eq!(reduced, printables());
        assert_eq!(Algorithm::<char>::count(&algorithm), 0);
    }
}
