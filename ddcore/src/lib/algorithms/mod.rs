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

//! The flat reduction algorithms. Each of these works directly on the element sequence of a
//! configuration; for tree-structured reduction see the companion crate driving them over parsed
//! inputs.

mod ddmin;
mod probdd;
mod tictocmin;

pub use self::ddmin::DDMin;
pub use self::probdd::ProbDD;
pub use self::tictocmin::TicTocMin;

use std::time::Instant;

// Cancellation is cooperative: algorithms poll this at pass boundaries and, once the caller's
// wall-clock budget is gone, return the best configuration found so far (which still fails,
// because only verified removals are ever committed).
fn out_of_time(finish_by: Option<Instant>) -> bool {
    finish_by.map_or(false, |f| Instant::now() >= f)
}

#[cfg(test)]
pub mod test {
    use std::hash::Hash;

    use configuration::Configuration;
    use outcome::Outcome;

    /// The printable-characters input of the classic minimisation example.
    pub fn printables() -> Configuration<char> {
        Configuration::from("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz1234567890ABCDEFGHI")
    }

    /// `FAIL` iff every digit '0'..'9' appears; the minimal failing fragment of `printables()` is
    /// therefore exactly "1234567890".
    pub fn digits(config: &Configuration<char>) -> Outcome {
        for d in "0123456789".chars() {
            if !config.iter().any(|&c| c == d) {
                return Outcome::Pass;
            }
        }
        Outcome::Fail
    }

    /// `UNRESOLVED` without 5; `FAIL` with both 3 and 7; `PASS` otherwise.
    pub fn interval(config: &Configuration<u32>) -> Outcome {
        if !config.iter().any(|&x| x == 5) {
            Outcome::Unresolved
        } else if config.iter().any(|&x| x == 3) && config.iter().any(|&x| x == 7) {
            Outcome::Fail
        } else {
            Outcome::Pass
        }
    }

    pub fn as_string(config: &Configuration<char>) -> String {
        config.iter().collect()
    }

    /// Assert that no single-element removal of `config` still elicits `FAIL`.
    pub fn assert_one_minimal<T, F>(config: &Configuration<T>, oracle: &mut F)
    where
        T: Clone + Eq + Hash,
        F: FnMut(&Configuration<T>) -> Outcome
    {
        for i in 0..config.len() {
            let mut elems = config.elems().to_vec();
            elems.remove(i);
            assert_ne!(
                oracle(&Configuration::new(elems)),
                Outcome::Fail,
                "removing element {} still fails",
                i
            );
        }
    }
}
