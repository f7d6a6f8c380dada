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

use ddcore::Configuration;
use parser::{ParseError, Parser};
use tree::Node;

/// Splits a configuration into `fanout` roughly equal chunks, recursively, until a chunk is no
/// longer than `min_len`. The input's grammar plays no role, which makes this the parser of last
/// resort for opaque binary inputs: it cannot follow field boundaries, but it still lets
/// hierarchical reduction discard large spans with single oracle requests.
pub struct ChunkParser {
    fanout: usize,
    min_len: usize
}

impl ChunkParser {
    pub fn new(fanout: usize, min_len: usize) -> ChunkParser {
        assert!(fanout >= 2 && min_len >= 1);
        ChunkParser { fanout, min_len }
    }

    fn split<T: Clone + Eq + Hash>(&self, elems: &[T]) -> Node<T> {
        if elems.len() <= self.min_len {
            return Node::leaf(Configuration::new(elems.to_vec()));
        }
        // Ceiling division, so there are never more than `fanout` chunks.
        let size = (elems.len() + self.fanout - 1) / self.fanout;
        let children = elems.chunks(size).map(|c| self.split(c)).collect();
        Node::inner(Configuration::new(elems.to_vec()), children)
    }
}

impl fmt::Display for ChunkParser {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ChunkParser")
    }
}

impl<T: Clone + Eq + Hash> Parser<T> for ChunkParser {
    fn parse(&self, config: &Configuration<T>) -> Result<Node<T>, ParseError> {
        Ok(self.split(config.elems()))
    }
}
