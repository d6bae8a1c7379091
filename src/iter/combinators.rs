//! Structural combinators: each wraps an upstream [`Iter`] and pulls from it on demand.

use super::merge::expanded_content;
use super::{BoxedPredicate, Iter, Pull, Result};
use crate::document::node::NodeRef;

struct Filter<'a> {
    upstream: Iter<'a>,
    predicate: BoxedPredicate<'a>,
}

impl<'a> Pull<'a> for Filter<'a> {
    fn pull(&mut self) -> Result<Option<NodeRef<'a>>> {
        while let Some(node) = self.upstream.next_node()? {
            if (self.predicate)(node) {
                return Ok(Some(node));
            }
        }
        Ok(None)
    }
}

/// Walks the key/value pairs of every non-empty mapping produced upstream.
struct MappingPairs<'a> {
    upstream: Iter<'a>,
    parent: Option<NodeRef<'a>>,
    pos: usize,
}

impl<'a> MappingPairs<'a> {
    fn new(upstream: Iter<'a>) -> Self {
        Self {
            upstream,
            parent: None,
            pos: 0,
        }
    }

    fn next_pair(&mut self) -> Result<Option<(NodeRef<'a>, NodeRef<'a>)>> {
        loop {
            if let Some(parent) = self.parent {
                if let (Some(key), Some(value)) = (parent.child(self.pos), parent.child(self.pos + 1)) {
                    self.pos += 2;
                    return Ok(Some((key, value)));
                }
                self.parent = None;
            }

            let parent = loop {
                match self.upstream.next_node()? {
                    Some(node) if node.is_mapping() && !node.is_empty() => break node,
                    Some(_) => continue,
                    None => return Ok(None),
                }
            };
            self.parent = Some(parent);
            self.pos = 0;
        }
    }
}

enum Projection<'a> {
    Keys,
    Values,
    Matching {
        key: BoxedPredicate<'a>,
        value: BoxedPredicate<'a>,
    },
}

struct MapEntries<'a> {
    pairs: MappingPairs<'a>,
    projection: Projection<'a>,
}

impl<'a> Pull<'a> for MapEntries<'a> {
    fn pull(&mut self) -> Result<Option<NodeRef<'a>>> {
        while let Some((key, value)) = self.pairs.next_pair()? {
            match &self.projection {
                Projection::Keys => return Ok(Some(key)),
                Projection::Values => return Ok(Some(value)),
                Projection::Matching {
                    key: key_predicate,
                    value: value_predicate,
                } => {
                    if key_predicate(key) && value_predicate(value) {
                        return Ok(Some(value));
                    }
                }
            }
        }
        Ok(None)
    }
}

/// Direct children of every upstream node.
struct Values<'a> {
    upstream: Iter<'a>,
    parent: Option<NodeRef<'a>>,
    pos: usize,
}

impl<'a> Pull<'a> for Values<'a> {
    fn pull(&mut self) -> Result<Option<NodeRef<'a>>> {
        loop {
            if let Some(parent) = self.parent {
                if let Some(child) = parent.child(self.pos) {
                    self.pos += 1;
                    return Ok(Some(child));
                }
                self.parent = None;
            }

            let parent = loop {
                match self.upstream.next_node()? {
                    Some(node) if !node.is_empty() => break node,
                    Some(_) => continue,
                    None => return Ok(None),
                }
            };
            self.parent = Some(parent);
            self.pos = 0;
        }
    }
}

/// Depth-first, pre-order walk with an explicit stack.
struct RecurseNodes<'a> {
    upstream: Iter<'a>,
    stack: Vec<NodeRef<'a>>,
}

impl<'a> Pull<'a> for RecurseNodes<'a> {
    fn pull(&mut self) -> Result<Option<NodeRef<'a>>> {
        let node = match self.stack.pop() {
            Some(node) => node,
            None => match self.upstream.next_node()? {
                Some(node) => node,
                None => return Ok(None),
            },
        };

        let node = node.resolve()?;

        // Reversed so popping restores declaration order.
        let children = expanded_content(node)?;
        self.stack.extend(children.into_iter().rev());

        Ok(Some(node))
    }
}

impl<'a> Iter<'a> {
    /// Keeps the nodes matching `predicate`.
    pub fn filter<P>(self, predicate: P) -> Iter<'a>
    where
        P: Fn(NodeRef<'a>) -> bool + 'a,
    {
        Iter::new(Filter {
            upstream: self,
            predicate: Box::new(predicate),
        })
    }

    /// Keys of every non-empty mapping, in declared order.
    ///
    /// Non-mapping nodes are skipped. Pairs are taken literally: a merge key
    /// is yielded as the `<<` scalar.
    pub fn map_keys(self) -> Iter<'a> {
        Iter::new(MapEntries {
            pairs: MappingPairs::new(self),
            projection: Projection::Keys,
        })
    }

    /// Values of every non-empty mapping, in declared order.
    pub fn map_values(self) -> Iter<'a> {
        Iter::new(MapEntries {
            pairs: MappingPairs::new(self),
            projection: Projection::Values,
        })
    }

    /// Values whose key matches `key_predicate` and which match `value_predicate`.
    ///
    /// # Example
    ///
    /// ```
    /// use yit::document::parser::parse_yaml;
    /// use yit::iter::Iter;
    /// use yit::predicate::{all, with_value};
    ///
    /// let trees = parse_yaml("- {kind: a, id: 1}\n- {kind: b, id: 2}\n").unwrap();
    /// let ids: Vec<&str> = Iter::from_node(trees[0].root().unwrap())
    ///     .values()
    ///     .values_for_map(with_value("id"), all())
    ///     .map(|n| n.unwrap().value())
    ///     .collect();
    /// assert_eq!(ids, vec!["1", "2"]);
    /// ```
    pub fn values_for_map<K, V>(self, key_predicate: K, value_predicate: V) -> Iter<'a>
    where
        K: Fn(NodeRef<'a>) -> bool + 'a,
        V: Fn(NodeRef<'a>) -> bool + 'a,
    {
        Iter::new(MapEntries {
            pairs: MappingPairs::new(self),
            projection: Projection::Matching {
                key: Box::new(key_predicate),
                value: Box::new(value_predicate),
            },
        })
    }

    /// Direct children of each node (mapping content includes keys).
    pub fn values(self) -> Iter<'a> {
        Iter::new(Values {
            upstream: self,
            parent: None,
            pos: 0,
        })
    }

    /// Every node of each upstream subtree, depth-first and pre-order.
    ///
    /// Aliases are yielded as their targets, and merge keys inside mappings
    /// are replaced by the entries they merge.
    pub fn recurse_nodes(self) -> Iter<'a> {
        Iter::new(RecurseNodes {
            upstream: self,
            stack: Vec::new(),
        })
    }

    /// Applies a custom combinator.
    pub fn iterate<F>(self, transform: F) -> Iter<'a>
    where
        F: FnOnce(Iter<'a>) -> Iter<'a>,
    {
        transform(self)
    }
}
