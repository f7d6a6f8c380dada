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
use parser::{ParseError, ParseErrorKind, Parser};
use tree::Node;

/// Nests a configuration on balanced delimiter pairs, the way source text nests on brackets. Runs
/// of elements between delimiters become leaves; a delimited group becomes an inner node whose
/// children are the opening delimiter, the group's contents and the closing delimiter, so a single
/// node removal takes out the group as a whole. Unbalanced input is a parse error.
pub struct DelimParser<T> {
    pairs: Vec<(T, T)>
}

impl<T: Clone + Eq> DelimParser<T> {
    pub fn new(pairs: Vec<(T, T)>) -> DelimParser<T> {
        DelimParser { pairs }
    }

    fn open_of(&self, e: &T) -> Option<&(T, T)> {
        self.pairs.iter().find(|&&(ref o, _)| o == e)
    }

    fn is_close(&self, e: &T) -> bool {
        self.pairs.iter().any(|&(_, ref c)| c == e)
    }

    /// Parse siblings from `i` up to (exclusively) `close` or the end of the input; the caller is
    /// responsible for deciding whether stopping at the end was legitimate.
    fn parse_siblings(
        &self,
        elems: &[T],
        mut i: usize,
        close: Option<&T>
    ) -> Result<(Vec<Node<T>>, usize), ParseError> {
        let mut out = Vec::new();
        let mut run_start = i;
        while i < elems.len() {
            if close.map_or(false, |c| elems[i] == *c) {
                break;
            }
            if let Some(pair) = self.open_of(&elems[i]) {
                if run_start < i {
                    out.push(Node::leaf(Configuration::new(elems[run_start..i].to_vec())));
                }
                let open_idx = i;
                let (inner, stop) = self.parse_siblings(elems, i + 1, Some(&pair.1))?;
                if stop == elems.len() {
                    return Err(ParseError::new(ParseErrorKind::UnmatchedOpen, open_idx));
                }
                let mut children = Vec::with_capacity(inner.len() + 2);
                children.push(Node::leaf(Configuration::new(vec![elems[open_idx].clone()])));
                children.extend(inner);
                children.push(Node::leaf(Configuration::new(vec![elems[stop].clone()])));
                out.push(Node::inner(
                    Configuration::new(elems[open_idx..stop + 1].to_vec()),
                    children
                ));
                i = stop + 1;
                run_start = i;
            } else if self.is_close(&elems[i]) {
                return Err(ParseError::new(ParseErrorKind::UnmatchedClose, i));
            } else {
                i += 1;
            }
        }
        if run_start < i {
            out.push(Node::leaf(Configuration::new(elems[run_start..i].to_vec())));
        }
        Ok((out, i))
    }
}

impl DelimParser<char> {
    /// A parser over the usual bracket pairs.
    pub fn brackets() -> DelimParser<char> {
        DelimParser::new(vec![('(', ')'), ('[', ']'), ('{', '}')])
    }
}

impl<T> fmt::Display for DelimParser<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DelimParser")
    }
}

impl<T: Clone + Eq + Hash> Parser<T> for DelimParser<T> {
    fn parse(&self, config: &Configuration<T>) -> Result<Node<T>, ParseError> {
        let elems = config.elems();
        let (children, stop) = self.parse_siblings(elems, 0, None)?;
        debug_assert_eq!(stop, elems.len());
        Ok(Node::inner(config.clone(), children))
    }
}
