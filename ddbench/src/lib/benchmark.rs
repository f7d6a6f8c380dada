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
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use ddcore::{Algorithm, Cache, Configuration, HashCache, Outcome, TreeCache};
use result::{ResultCollection, RunResult};

/// Which kind of cache a benchmark run should use. A fresh instance is built per run, so the
/// (algorithm x cache) combinations of one benchmark cannot contaminate each other's invocation
/// counts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CacheChoice {
    None,
    Hash,
    Tree
}

impl CacheChoice {
    pub fn build<T: 'static + Clone + Eq + Hash>(&self) -> Option<Box<Cache<T>>> {
        match *self {
            CacheChoice::None => None,
            CacheChoice::Hash => Some(Box::new(HashCache::new())),
            CacheChoice::Tree => Some(Box::new(TreeCache::new()))
        }
    }
}

impl fmt::Display for CacheChoice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CacheChoice::None => write!(f, "None"),
            CacheChoice::Hash => write!(f, "HashCache"),
            CacheChoice::Tree => write!(f, "TreeCache")
        }
    }
}

impl FromStr for CacheChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<CacheChoice, String> {
        match s {
            "none" => Ok(CacheChoice::None),
            "hash" => Ok(CacheChoice::Hash),
            "tree" => Ok(CacheChoice::Tree),
            _ => Err(format!("Unknown cache '{}'", s))
        }
    }
}

/// One labelled failing input, the oracle reproducing its failure, and the algorithm/cache
/// combinations to measure on it.
pub struct TestCase<T> {
    file: String,
    input: Configuration<T>,
    algorithms: Vec<Box<Algorithm<T>>>,
    caches: Vec<CacheChoice>,
    oracle: Box<FnMut(&Configuration<T>) -> Outcome>
}

impl<T: 'static + Clone + Eq + Hash> TestCase<T> {
    pub fn new(
        file: &str,
        input: Configuration<T>,
        algorithms: Vec<Box<Algorithm<T>>>,
        caches: Vec<CacheChoice>,
        oracle: Box<FnMut(&Configuration<T>) -> Outcome>
    ) -> TestCase<T> {
        TestCase {
            file: file.to_string(),
            input,
            algorithms,
            caches,
            oracle
        }
    }
}

/// Runs every (algorithm x cache) combination of every test case, timing each run and recording a
/// [`RunResult`](struct.RunResult.html) for it.
pub struct Benchmark<T> {
    cases: Vec<TestCase<T>>,
    file: Option<PathBuf>,
    results: ResultCollection
}

impl<T: 'static + Clone + Eq + Hash> Benchmark<T> {
    pub fn new(cases: Vec<TestCase<T>>) -> Benchmark<T> {
        Benchmark {
            cases,
            file: None,
            results: ResultCollection::new()
        }
    }

    /// As `new`, but `run` also stores the collected records to `file` as JSON.
    pub fn with_file(cases: Vec<TestCase<T>>, file: PathBuf) -> Benchmark<T> {
        Benchmark {
            cases,
            file: Some(file),
            results: ResultCollection::new()
        }
    }

    /// Ask each case's oracle about its unreduced input. Reducing a case whose input does not
    /// elicit `FAIL` would be meaningless, so callers should check this before `run`.
    pub fn validate(&mut self) -> Vec<bool> {
        self.cases
            .iter_mut()
            .map(|case| (case.oracle)(&case.input) == Outcome::Fail)
            .collect()
    }

    pub fn run(&mut self) {
        let mut recorded = Vec::new();
        for case in &mut self.cases {
            let TestCase {
                ref file,
                ref input,
                ref mut algorithms,
                ref caches,
                ref mut oracle
            } = *case;
            for algorithm in algorithms.iter_mut() {
                for choice in caches {
                    let mut cache = choice.build();
                    let start = Instant::now();
                    let run_result = match cache {
                        Some(ref mut c) => algorithm.run(input, &mut **oracle, Some(&mut **c)),
                        None => algorithm.run(input, &mut **oracle, None)
                    };
                    match run_result {
                        Ok(reduced) => {
                            let elapsed = start.elapsed();
                            let time = elapsed.as_secs() as f64
                                + f64::from(elapsed.subsec_nanos()) * 1e-9;
                            debug!(
                                "benchmark: {} with {} on {}: {} -> {} elements",
                                algorithm,
                                choice,
                                file,
                                input.len(),
                                reduced.len()
                            );
                            recorded.push(RunResult::new(
                                file,
                                &format!("{}", algorithm),
                                &format!("{}", choice),
                                input.len(),
                                reduced.len(),
                                algorithm.count(),
                                time
                            ));
                        }
                        Err(e) => {
                            error!("benchmark: {} failed on {}: {}", algorithm, file, e);
                        }
                    }
                }
            }
        }
        for result in recorded {
            self.results.add(result);
        }
        if let Some(ref path) = self.file {
            if let Err(e) = self.results.store(path) {
                error!("Cannot write benchmark results to {}: {}", path.display(), e);
            }
        }
    }

    pub fn results(&self) -> &ResultCollection {
        &self.results
    }
}

#[cfg(test)]
mod test {
    use tempfile::tempdir;

    use super::{Benchmark, CacheChoice, TestCase};
    use ddcore::{Configuration, DDMin, Outcome, TicTocMin};
    use result::ResultCollection;

    fn digits_oracle() -> Box<FnMut(&Configuration<char>) -> Outcome> {
        Box::new(|config: &Configuration<char>| {
            for d in "0123456789".chars() {
                if !config.iter().any(|&c| c == d) {
                    return Outcome::Pass;
                }
            }
            Outcome::Fail
        })
    }

    fn printables() -> Configuration<char> {
        Configuration::from("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz1234567890ABCDEFGHI")
    }

    #[test]
    fn test_runs_every_combination() {
        let case = TestCase::new(
            "printables",
            printables(),
            vec![Box::new(DDMin::new()), Box::new(TicTocMin::new())],
            vec![CacheChoice::None, CacheChoice::Hash],
            digits_oracle()
        );
        let mut benchmark = Benchmark::new(vec![case]);
        assert_eq!(benchmark.validate(), vec![true]);
        benchmark.run();
        assert_eq!(benchmark.results().len(), 4);
        for r in benchmark.results().results() {
            assert_eq!(r.input_size(), printables().len());
            assert_eq!(r.output_size(), 10);
            assert!(r.count() > 0);
        }
    }

    #[test]
    fn test_validate_spots_passing_input() {
        let case = TestCase::new(
            "letters",
            Configuration::from("abc"),
            vec![Box::new(DDMin::new())],
            vec![CacheChoice::None],
            digits_oracle()
        );
        let mut benchmark = Benchmark::new(vec![case]);
        assert_eq!(benchmark.validate(), vec![false]);
    }

    #[test]
    fn test_results_are_stored_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.json");
        let case = TestCase::new(
            "printables",
            printables(),
            vec![Box::new(DDMin::new())],
            vec![CacheChoice::Hash],
            digits_oracle()
        );
        let mut benchmark = Benchmark::with_file(vec![case], path.clone());
        benchmark.run();
        let loaded = ResultCollection::load(&path);
        assert_eq!(loaded.results(), benchmark.results().results());
    }
}
