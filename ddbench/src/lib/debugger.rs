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
use std::io;

use ddcore::{Algorithm, AlgorithmError, Cache, Configuration, Outcome};

#[derive(Debug)]
pub enum DebugError {
    /// The initial input did not elicit `FAIL`; reducing it would be meaningless.
    InputNotFailing(Outcome),
    /// The command an oracle should run was empty.
    EmptyCommand,
    AlgorithmError(AlgorithmError),
    IoError(io::Error)
}

impl From<AlgorithmError> for DebugError {
    fn from(err: AlgorithmError) -> DebugError {
        DebugError::AlgorithmError(err)
    }
}

impl From<io::Error> for DebugError {
    fn from(err: io::Error) -> DebugError {
        DebugError::IoError(err)
    }
}

impl fmt::Display for DebugError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DebugError::InputNotFailing(o) => {
                write!(f, "The initial input did not elicit FAIL (the oracle said {})", o)
            }
            DebugError::EmptyCommand => write!(f, "The oracle command is empty"),
            DebugError::AlgorithmError(ref e) => e.fmt(f),
            DebugError::IoError(ref e) => e.fmt(f)
        }
    }
}

/// The façade callers reduce through: owns an algorithm and (optionally) a cache, checks the
/// failing-input precondition, and keeps the reduced configuration around afterwards.
pub struct Debugger<T> {
    algorithm: Box<Algorithm<T>>,
    cache: Option<Box<Cache<T>>>,
    result: Option<Configuration<T>>
}

impl<T: 'static + Clone + Eq + Hash> Debugger<T> {
    pub fn new(algorithm: Box<Algorithm<T>>, cache: Option<Box<Cache<T>>>) -> Debugger<T> {
        Debugger {
            algorithm,
            cache,
            result: None
        }
    }

    /// Reduce `input`. The oracle is asked about `input` first: anything but `FAIL` is an error,
    /// since the algorithms require a failing input as a precondition. That verdict is memoised
    /// (if a cache is present) but not charged to the algorithm's invocation count.
    pub fn debug(
        &mut self,
        input: &Configuration<T>,
        oracle: &mut FnMut(&Configuration<T>) -> Outcome
    ) -> Result<&Configuration<T>, DebugError> {
        let initial = match self.cache {
            Some(ref mut cache) => match cache.get(input) {
                Some(o) => o,
                None => {
                    let o = (*oracle)(input);
                    cache.put(input, o);
                    o
                }
            },
            None => (*oracle)(input)
        };
        if initial != Outcome::Fail {
            return Err(DebugError::InputNotFailing(initial));
        }
        let reduced = match self.cache {
            Some(ref mut cache) => self.algorithm.run(input, oracle, Some(&mut **cache)),
            None => self.algorithm.run(input, oracle, None)
        }?;
        debug!(
            "debugger: {} reduced {} elements to {}",
            self.algorithm,
            input.len(),
            reduced.len()
        );
        self.result = Some(reduced);
        Ok(self.result.as_ref().unwrap())
    }

    /// The most recent reduction, if `debug` has succeeded.
    pub fn result(&self) -> Option<&Configuration<T>> {
        self.result.as_ref()
    }

    pub fn algorithm(&self) -> &Algorithm<T> {
        &*self.algorithm
    }

    /// Oracle invocations made by the last reduction.
    pub fn count(&self) -> u64 {
        self.algorithm.count()
    }

    /// Label of the cache in use, for result records.
    pub fn cache_name(&self) -> String {
        match self.cache {
            Some(ref c) => format!("{}", c),
            None => "None".to_string()
        }
    }
}

#[cfg(test)]
mod test {
    use super::{DebugError, Debugger};
    use ddcore::{Configuration, DDMin, HashCache, Outcome};

    fn interval(config: &Configuration<u32>) -> Outcome {
        if !config.iter().any(|&x| x == 5) {
            Outcome::Unresolved
        } else if config.iter().any(|&x| x == 3) && config.iter().any(|&x| x == 7) {
            Outcome::Fail
        } else {
            Outcome::Pass
        }
    }

    #[test]
    fn test_debug_reduces() {
        let mut debugger = Debugger::new(
            Box::new(DDMin::new()),
            Some(Box::new(HashCache::new()))
        );
        let mut oracle = interval;
        let input = Configuration::new((0u32..10).collect::<Vec<_>>());
        {
            let reduced = debugger.debug(&input, &mut oracle).unwrap();
            assert_eq!(reduced.elems(), &[3, 5, 7]);
        }
        assert!(debugger.count() > 0);
        assert_eq!(debugger.result().unwrap().elems(), &[3, 5, 7]);
        assert_eq!(debugger.cache_name(), "HashCache");
    }

    #[test]
    fn test_non_failing_input_is_rejected() {
        let mut debugger: Debugger<u32> = Debugger::new(Box::new(DDMin::new()), None);
        let mut oracle = interval;
        let input = Configuration::new(vec![5u32]);
        match debugger.debug(&input, &mut oracle) {
            Err(DebugError::InputNotFailing(Outcome::Pass)) => (),
            r => panic!("expected InputNotFailing, got {:?}", r.map(|c| c.len()))
        }
        assert!(debugger.result().is_none());
    }
}
