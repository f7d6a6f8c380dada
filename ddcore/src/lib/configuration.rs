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

use std::iter::FromIterator;
use std::slice;

/// An ordered sequence of opaque elements constituting a candidate input. Two configurations are
/// equal iff they are element-wise equal in order; the empty sequence is valid. A configuration is
/// immutable once constructed: reduction algorithms take one and hand back a new,
/// shorter-or-equal, one.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Configuration<T> {
    elems: Vec<T>
}

impl<T> Configuration<T> {
    pub fn new(elems: Vec<T>) -> Configuration<T> {
        Configuration { elems }
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    pub fn elems(&self) -> &[T] {
        &self.elems
    }

    pub fn iter(&self) -> slice::Iter<T> {
        self.elems.iter()
    }

    pub fn into_elems(self) -> Vec<T> {
        self.elems
    }
}

impl<T> From<Vec<T>> for Configuration<T> {
    fn from(elems: Vec<T>) -> Configuration<T> {
        Configuration::new(elems)
    }
}

impl<T> FromIterator<T> for Configuration<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Configuration<T> {
        Configuration::new(iter.into_iter().collect())
    }
}

impl<'a> From<&'a str> for Configuration<char> {
    fn from(s: &'a str) -> Configuration<char> {
        Configuration::new(s.chars().collect())
    }
}

#[cfg(test)]
mod test {
    use super::Configuration;

    #[test]
    fn test_equality_is_sequence_equality() {
        let c1 = Configuration::new(vec![1u8, 2, 3]);
        let c2 = Configuration::new(vec![1u8, 2, 3]);
        let c3 = Configuration::new(vec![3u8, 2, 1]);
        assert_eq!(c1, c2);
        assert_ne!(c1, c3);
        assert!(Configuration::<u8>::new(vec![]).is_empty());
    }

    #[test]
    fn test_from_str() {
        let c = Configuration::from("ab");
        assert_eq!(c.elems(), &['a', 'b']);
        assert_eq!(c.len(), 2);
    }
}
