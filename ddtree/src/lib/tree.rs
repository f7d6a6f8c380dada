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

use std::hash::Hash;

use num_traits::{AsPrimitive, PrimInt, Unsigned};
use vob::Vob;

use ddcore::Configuration;
use idxnewtype::NIdx;

/// A parser's view of a configuration: the fragment this node covers plus the ordered subtrees it
/// splits into. A node without children is a leaf; the leaves of a well-formed tree, concatenated
/// left to right, are exactly the configuration that was parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node<T> {
    pub value: Configuration<T>,
    pub children: Vec<Node<T>>
}

impl<T> Node<T> {
    pub fn leaf(value: Configuration<T>) -> Node<T> {
        Node {
            value,
            children: Vec::new()
        }
    }

    pub fn inner(value: Configuration<T>, children: Vec<Node<T>>) -> Node<T> {
        Node { value, children }
    }
}

struct TreeNode<StorageT, T> {
    value: Configuration<T>,
    children: Vec<NIdx<StorageT>>,
    level: usize
}

/// An arena of tree nodes indexed by pre-order id (the root is id 0), each node caching its level
/// (the root is level 0). The arena itself is immutable during a reduction run; which nodes are
/// still part of the candidate input is tracked in a separate present-set (a `Vob` with one bit
/// per id) that callers narrow as nodes are removed.
pub struct Tree<StorageT, T> {
    nodes: Vec<TreeNode<StorageT, T>>,
    depth: usize
}

impl<StorageT: 'static + PrimInt + Unsigned, T: Clone + Eq + Hash> Tree<StorageT, T>
where
    usize: AsPrimitive<StorageT>
{
    /// Flatten `root` into a pre-order arena. A leaf covering more than one element is expanded
    /// with one single-element child per element, so the deepest level of every tree is
    /// element-granular and level-wise reduction bottoms out at single elements.
    pub fn new(root: &Node<T>) -> Tree<StorageT, T> {
        let mut tree = Tree {
            nodes: Vec::new(),
            depth: 0
        };
        tree.flatten(root, 0);
        tree
    }

    fn flatten(&mut self, node: &Node<T>, level: usize) -> NIdx<StorageT> {
        let id = self.nodes.len();
        debug_assert!(StorageT::from(id).is_some());
        if level > self.depth {
            self.depth = level;
        }
        self.nodes.push(TreeNode {
            value: node.value.clone(),
            children: Vec::new(),
            level
        });
        let mut children = Vec::new();
        if node.children.is_empty() {
            if node.value.len() > 1 {
                for e in node.value.iter() {
                    let cid = self.nodes.len();
                    debug_assert!(StorageT::from(cid).is_some());
                    if level + 1 > self.depth {
                        self.depth = level + 1;
                    }
                    self.nodes.push(TreeNode {
                        value: Configuration::new(vec![e.clone()]),
                        children: Vec::new(),
                        level: level + 1
                    });
                    children.push(NIdx(cid.as_()));
                }
            }
        } else {
            for c in &node.children {
                children.push(self.flatten(c, level + 1));
            }
        }
        self.nodes[id].children = children;
        NIdx(id.as_())
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The deepest level of the arena.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn level(&self, nidx: NIdx<StorageT>) -> usize {
        self.nodes[usize::from(nidx)].level
    }

    /// The fragment `nidx` covers.
    pub fn value(&self, nidx: NIdx<StorageT>) -> &Configuration<T> {
        &self.nodes[usize::from(nidx)].value
    }

    pub fn children(&self, nidx: NIdx<StorageT>) -> &[NIdx<StorageT>] {
        &self.nodes[usize::from(nidx)].children
    }

    /// A present-set covering every node.
    pub fn all_present(&self) -> Vob {
        Vob::from_elem(self.nodes.len(), true)
    }

    /// The ids of present nodes at `level`, in document order.
    pub fn level_nodes(&self, level: usize, present: &Vob) -> Vec<NIdx<StorageT>> {
        (0..self.nodes.len())
            .filter(|&i| present[i] && self.nodes[i].level == level)
            .map(|i| NIdx(i.as_()))
            .collect()
    }

    /// Remove `nidx` and its whole subtree from `present`.
    pub fn prune(&self, present: &mut Vob, nidx: NIdx<StorageT>) {
        let i = usize::from(nidx);
        present.set(i, false);
        for &c in &self.nodes[i].children {
            self.prune(present, c);
        }
    }

    /// Concatenate, in pre-order, the values of the kept leaves. A node whose bit is unset
    /// contributes nothing; neither does anything below it.
    pub fn reconstruct(&self, present: &Vob) -> Configuration<T> {
        let mut elems = Vec::new();
        if !self.nodes.is_empty() && present[0] {
            self.reconstruct_into(present, 0, &mut elems);
        }
        Configuration::new(elems)
    }

    fn reconstruct_into(&self, present: &Vob, i: usize, elems: &mut Vec<T>) {
        let node = &self.nodes[i];
        if node.children.is_empty() {
            elems.extend_from_slice(node.value.elems());
        } else {
            for &c in &node.children {
                let ci = usize::from(c);
                if present[ci] {
                    self.reconstruct_into(present, ci, elems);
                }
            }
        }
    }
}
