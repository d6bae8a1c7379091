//! Source constructors: turning nodes and iterators into a stream.

use std::collections::VecDeque;

use super::merge::{merge_target, MergeFrames};
use super::{Iter, Pull, Result};
use crate::document::node::NodeRef;

/// Yields one node, dereferenced if it is an alias.
struct Single<'a> {
    node: Option<NodeRef<'a>>,
}

impl<'a> Pull<'a> for Single<'a> {
    fn pull(&mut self) -> Result<Option<NodeRef<'a>>> {
        self.node.take().map(NodeRef::resolve).transpose()
    }
}

/// Yields a list of nodes, dereferencing aliases and splicing merge keys.
struct FromNodes<'a> {
    nodes: Vec<NodeRef<'a>>,
    pos: usize,
    merges: MergeFrames<'a>,
}

impl<'a> Pull<'a> for FromNodes<'a> {
    fn pull(&mut self) -> Result<Option<NodeRef<'a>>> {
        loop {
            if let Some(node) = self.merges.next()? {
                return Ok(Some(node));
            }

            let Some(&node) = self.nodes.get(self.pos) else {
                return Ok(None);
            };

            if node.is_merge_key() {
                let target = merge_target(node, self.nodes.get(self.pos + 1).copied())?;
                self.pos += 2;
                self.merges.splice(target);
                continue;
            }

            self.pos += 1;
            return node.resolve().map(Some);
        }
    }
}

/// Drains each iterator in turn.
struct Concat<'a> {
    iters: VecDeque<Iter<'a>>,
}

impl<'a> Pull<'a> for Concat<'a> {
    fn pull(&mut self) -> Result<Option<NodeRef<'a>>> {
        while let Some(current) = self.iters.front_mut() {
            if let Some(node) = current.next_node()? {
                return Ok(Some(node));
            }
            self.iters.pop_front();
        }
        Ok(None)
    }
}

impl<'a> Iter<'a> {
    /// An iterator yielding `node` once (its target, if `node` is an alias).
    ///
    /// A lone merge key is yielded as is: there is nothing after it to merge.
    pub fn from_node(node: NodeRef<'a>) -> Self {
        Self::new(Single { node: Some(node) })
    }

    /// An iterator over `nodes` in order.
    ///
    /// Aliases are replaced by their targets. A merge key followed by an
    /// alias to a mapping is replaced by that mapping's entries (with nested
    /// merge keys expanded); entries inside a merged block are yielded as
    /// declared.
    ///
    /// # Example
    ///
    /// ```
    /// use yit::document::parser::parse_yaml;
    /// use yit::iter::Iter;
    ///
    /// let yaml = "dummy: &var {a: b, c: d}\nhello: {<<: *var, e: f}\n";
    /// let trees = parse_yaml(yaml).unwrap();
    /// let hello = trees[0].root().unwrap().child(3).unwrap();
    ///
    /// let values: Vec<&str> = Iter::from_nodes(hello.children())
    ///     .map(|n| n.unwrap().value())
    ///     .collect();
    /// assert_eq!(values, vec!["a", "b", "c", "d", "e", "f"]);
    /// ```
    pub fn from_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = NodeRef<'a>>,
    {
        Self::new(FromNodes {
            nodes: nodes.into_iter().collect(),
            pos: 0,
            merges: MergeFrames::new(),
        })
    }

    /// Concatenates iterators, pulling from each only after the previous one is exhausted.
    pub fn from_iterators<I>(iters: I) -> Self
    where
        I: IntoIterator<Item = Iter<'a>>,
    {
        Self::new(Concat {
            iters: iters.into_iter().collect(),
        })
    }
}
