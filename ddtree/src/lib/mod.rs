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

//! Hierarchical reduction over parsed inputs. Flat delta debugging treats a configuration as an
//! unstructured sequence, which wastes most of its oracle budget on candidates that no parser of
//! the input format would ever accept. This crate parses the configuration once into an ordered
//! tree of fragments and reduces it level by level with any flat algorithm from `ddcore` --
//! hierarchical delta debugging. Kept nodes reconstruct the candidate input by concatenating, in
//! pre-order, the values of their kept leaves; removing a node removes its whole subtree from the
//! reconstruction.

extern crate ddcore;
extern crate fnv;
#[macro_use]
extern crate log;
extern crate num_traits;
extern crate vob;

mod hdd;
mod idxnewtype;
mod parser;
pub mod parsers;
mod tree;

pub use hdd::HDD;
pub use idxnewtype::NIdx;
pub use parser::{ParseError, ParseErrorKind, Parser};
pub use parsers::{ChunkParser, DelimParser};
pub use tree::{Node, Tree};
