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

//! A library for minimising failure-inducing test inputs. Given an input that makes some program
//! fail, and an *oracle* that classifies arbitrary candidate inputs, the algorithms in this crate
//! search for a small fragment of the input that still makes the program fail.
//!
//! Terminology in the delta debugging literature is not entirely uniform, so this library uses the
//! following terms consistently:
//!
//!   * A *configuration* is an ordered sequence of opaque elements (bytes, characters, tokens, or
//!     tree node indices) constituting a candidate input.
//!   * An *oracle* is a function classifying a configuration as `FAIL` (the failure of interest
//!     was reproduced), `PASS` (it was not), or `UNRESOLVED` (the run tells us nothing, e.g.
//!     because the program timed out or died in an unrelated way).
//!   * A configuration is *1-minimal* if removing any single element of it no longer elicits
//!     `FAIL`.
//!
//! ddcore makes the following guarantees about every algorithm it provides:
//!
//!   * If the input configuration elicits `FAIL` and the oracle is deterministic, the result still
//!     elicits `FAIL`.
//!   * The result is never longer than the input.
//!   * Reduction is deterministic: the same input and oracle produce the same result and the same
//!     number of oracle invocations. Oracle requests are issued strictly sequentially and all
//!     tie-breaks are fixed.
//!
//! Oracles are typically expensive (most run a child process), so algorithms can be handed a
//! [`Cache`](trait.Cache.html) which memoises verdicts per configuration and is consulted before
//! the oracle. The only verdict an algorithm ever acts on is `FAIL`: an `UNRESOLVED` retest
//! rejects a removal exactly as a `PASS` does.

extern crate fnv;
extern crate indexmap;
#[macro_use]
extern crate log;

mod algorithm;
pub mod algorithms;
mod cache;
pub mod caches;
mod configuration;
mod outcome;

pub use algorithm::{Algorithm, AlgorithmError, Tester};
pub use algorithms::{DDMin, ProbDD, TicTocMin};
pub use cache::Cache;
pub use caches::{HashCache, TreeCache};
pub use configuration::Configuration;
pub use outcome::Outcome;
