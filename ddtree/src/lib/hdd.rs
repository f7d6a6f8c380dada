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

use fnv::FnvHashSet;
use num_traits::{AsPrimitive, PrimInt, Unsigned};

use ddcore::{Algorithm, AlgorithmError, Cache, Configuration, Outcome, Tester};
use idxnewtype::NIdx;
use parser::Parser;
use tree::Tree;

/// Hierarchical delta debugging: parse the input once into a tree, then, level by level from just
/// below the root, hand that level's node ids to an inner flat algorithm. The inner algorithm
/// never sees the input itself -- its oracle is an adapter that prunes the node subset it asks
/// about from the tree, reconstructs the remaining leaves and asks the real oracle about the
/// result. Whatever the inner algorithm removes at one level is gone, subtree and all, before the
/// next level is processed.
///
/// After a level has been processed no single node at that or any shallower level can be removed
/// while keeping the reconstruction failing (to the extent the inner algorithm guarantees
/// 1-minimality). Because the deepest level of the arena is element-granular, the last pass
/// degenerates to flat reduction of the surviving fragment.
///
/// All reconstructions, at every level, go through one [`Tester`](../ddcore/struct.Tester.html)
/// holding the caller's cache: distinct levels produce distinct reconstructions, so sharing the
/// cache across them is sound, and repeated reconstructions are free.
pub struct HDD<StorageT, T> {
    parser: Box<Parser<T>>,
    inner: Box<Algorithm<NIdx<StorageT>>>,
    count: u64
}

impl<StorageT, T> HDD<StorageT, T> {
    pub fn new(parser: Box<Parser<T>>, inner: Box<Algorithm<NIdx<StorageT>>>) -> HDD<StorageT, T> {
        HDD {
            parser,
            inner,
            count: 0
        }
    }
}

impl<StorageT, T> fmt::Display for HDD<StorageT, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "HDD({}, {})", self.parser, self.inner)
    }
}

impl<StorageT: 'static + Hash + PrimInt + Unsigned, T: Clone + Eq + Hash> Algorithm<T>
    for HDD<StorageT, T>
where
    usize: AsPrimitive<StorageT>
{
    fn run(
        &mut self,
        config: &Configuration<T>,
        oracle: &mut FnMut(&Configuration<T>) -> Outcome,
        cache: Option<&mut Cache<T>>
    ) -> Result<Configuration<T>, AlgorithmError> {
        self.count = 0;
        if config.is_empty() {
            return Ok(config.clone());
        }
        let root = self.parser.parse(config)?;
        let tree: Tree<StorageT, T> = Tree::new(&root);
        let mut present = tree.all_present();
        if &tree.reconstruct(&present) != config {
            return Err(AlgorithmError::Parse(
                "Parser output does not cover the input configuration".to_string()
            ));
        }
        let mut tester = Tester::new(oracle, cache);
        for level in 1..tree.depth() + 1 {
            let ids = tree.level_nodes(level, &present);
            if ids.is_empty() {
                continue;
            }
            debug!("hdd: level {} has {} nodes", level, ids.len());
            let kept = {
                let base = present.clone();
                let tree_ref = &tree;
                let tester_ref = &mut tester;
                let ids_ref = &ids;
                let mut adapter = move |keep: &Configuration<NIdx<StorageT>>| -> Outcome {
                    let keep_set: FnvHashSet<NIdx<StorageT>> = keep.iter().cloned().collect();
                    let mut cand = base.clone();
                    for &n in ids_ref {
                        if !keep_set.contains(&n) {
                            tree_ref.prune(&mut cand, n);
                        }
                    }
                    tester_ref.outcome_of(&tree_ref.reconstruct(&cand))
                };
                self.inner
                    .run(&Configuration::new(ids.clone()), &mut adapter, None)?
            };
            let keep_set: FnvHashSet<NIdx<StorageT>> = kept.iter().cloned().collect();
            for &n in &ids {
                if !keep_set.contains(&n) {
                    tree.prune(&mut present, n);
                }
            }
        }
        let reduced = tree.reconstruct(&present);
        self.count = tester.count();
        Ok(reduced)
    }

    fn count(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod test {
    use std::fmt;

    use super::HDD;
    use ddcore::{Algorithm, AlgorithmError, Configuration, DDMin, HashCache, Outcome, TicTocMin};
    use parser::{ParseError, Parser};
    use parsers::DelimParser;
    use tree::Node;

    fn printables() -> Configuration<char> {
        Configuration::from("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz1234567890ABCDEFGHI")
    }

    fn digits(config: &Configuration<char>) -> Outcome {
        for d in "0123456789".chars() {
            if !config.iter().any(|&c| c == d) {
                return Outcome::Pass;
            }
        }
        Outcome::Fail
    }

    fn as_string(config: &Configuration<char>) -> String {
        config.iter().collect()
    }

    /// A root with a single leaf holding the whole input.
    struct WholeLeafParser;

    impl fmt::Display for WholeLeafParser {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "WholeLeafParser")
        }
    }

    impl Parser<char> for WholeLeafParser {
        fn parse(&self, config: &Configuration<char>) -> Result<Node<char>, ParseError> {
            Ok(Node::inner(config.clone(), vec![Node::leaf(config.clone())]))
        }
    }

    #[test]
    fn test_trivial_tree_equals_flat_reduction() {
        let mut hdd: HDD<u32, char> =
            HDD::new(Box::new(WholeLeafParser), Box::new(DDMin::new()));
        let mut oracle = digits;
        let hier = hdd.run(&printables(), &mut oracle, None).unwrap();
        assert_eq!(as_string(&hier), "1234567890");
        let mut flat = DDMin::new();
        let direct = flat.run(&printables(), &mut oracle, None).unwrap();
        assert_eq!(hier, direct);
    }

    #[test]
    fn test_nested_input() {
        let mut hdd: HDD<u32, char> =
            HDD::new(Box::new(DelimParser::brackets()), Box::new(DDMin::new()));
        let mut oracle = |config: &Configuration<char>| {
            if config.iter().filter(|&&c| c == 'c').count() >= 2 {
                Outcome::Fail
            } else {
                Outcome::Pass
            }
        };
        let reduced = hdd
            .run(&Configuration::from("aa(bb(cc)dd)ee"), &mut oracle, None)
            .unwrap();
        assert_eq!(as_string(&reduced), "cc");
        assert!(hdd.count() > 0);
        // Element-level 1-minimality of the final reconstruction.
        for i in 0..reduced.len() {
            let mut elems = reduced.elems().to_vec();
            elems.remove(i);
            assert_ne!(oracle(&Configuration::new(elems)), Outcome::Fail);
        }
    }

    #[test]
    fn test_inner_tictocmin() {
        let mut hdd: HDD<u32, char> =
            HDD::new(Box::new(WholeLeafParser), Box::new(TicTocMin::new()));
        let mut oracle = digits;
        let reduced = hdd.run(&printables(), &mut oracle, None).unwrap();
        assert_eq!(as_string(&reduced), "1234567890");
    }

    #[test]
    fn test_cache_is_shared_across_levels_and_runs() {
        let mut oracle = |config: &Configuration<char>| {
            if config.iter().filter(|&&c| c == 'c').count() >= 2 {
                Outcome::Fail
            } else {
                Outcome::Pass
            }
        };
        let input = Configuration::from("aa(bb(cc)dd)ee");
        let mut cache = HashCache::new();
        let mut first: HDD<u32, char> =
            HDD::new(Box::new(DelimParser::brackets()), Box::new(DDMin::new()));
        let r1 = first.run(&input, &mut oracle, Some(&mut cache)).unwrap();
        assert!(first.count() > 0);
        let mut second: HDD<u32, char> =
            HDD::new(Box::new(DelimParser::brackets()), Box::new(DDMin::new()));
        let r2 = second.run(&input, &mut oracle, Some(&mut cache)).unwrap();
        assert_eq!(second.count(), 0);
        assert_eq!(r1, r2);
    }

    #[test]
    fn test_parse_failure_is_surfaced() {
        let mut hdd: HDD<u32, char> =
            HDD::new(Box::new(DelimParser::brackets()), Box::new(DDMin::new()));
        let mut oracle = |_: &Configuration<char>| Outcome::Fail;
        match hdd.run(&Configuration::from("((("), &mut oracle, None) {
            Err(AlgorithmError::Parse(_)) => (),
            _ => panic!("expected a parse error")
        }
    }

    #[test]
    fn test_display() {
        let hdd: HDD<u32, char> =
            HDD::new(Box::new(DelimParser::brackets()), Box::new(DDMin::new()));
        assert_eq!(format!("{}", hdd), "HDD(DelimParser, ddmin)");
    }
}
