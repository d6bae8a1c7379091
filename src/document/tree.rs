//! Arena storage for YAML documents.
//!
//! A [`Tree`] owns every node of one document. Trees are built bottom-up with
//! a [`TreeBuilder`]: children and alias targets must exist before the node
//! that refers to them. Because of this, alias and merge references always
//! point backwards in the arena and can never form a cycle.
//!
//! # Example
//!
//! ```
//! use yit::document::tree::TreeBuilder;
//!
//! let mut builder = TreeBuilder::new();
//! let a = builder.scalar("a");
//! let b = builder.scalar("b");
//! let defaults = builder.mapping([(a, b)]);
//! let merge = builder.merge_key();
//! let alias = builder.alias(defaults);
//! let child = builder.mapping([(merge, alias)]);
//! let tree = builder.finish(Some(child));
//!
//! assert_eq!(tree.root().unwrap().len(), 2);
//! assert!(tree.root().unwrap().child(0).unwrap().is_merge_key());
//! ```

use super::node::{NodeData, NodeId, NodeKind, NodeRef, Position};
use super::tag;

/// A complete YAML document.
///
/// The document node sits at the end of the arena and holds the root value
/// (if any) as its only child.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<NodeData>,
    document: NodeId,
}

impl Tree {
    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    /// The document node wrapping the root value.
    pub fn document(&self) -> NodeRef<'_> {
        NodeRef::new(self, self.document)
    }

    /// The root value of the document, `None` for an empty document.
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.document().child(0)
    }

    /// Gets the node with the given id, or `None` if the id is out of range.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then(|| NodeRef::new(self, id))
    }

    /// Number of nodes in the arena, including the document node.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builds a [`Tree`] bottom-up.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, data: NodeData) -> NodeId {
        debug_assert!(
            data.content
                .iter()
                .chain(data.alias.iter())
                .all(|id| id.0 < self.nodes.len()),
            "node refers to an id that was not built by this builder"
        );
        let id = NodeId(self.nodes.len());
        self.nodes.push(data);
        id
    }

    /// Adds a plain scalar; its tag is resolved from the value (`!!int`, `!!str`, ...).
    pub fn scalar(&mut self, value: impl Into<String>) -> NodeId {
        let value = value.into();
        let tag = tag::resolve_plain(&value);
        self.tagged_scalar(tag, value)
    }

    /// Adds a scalar with an explicit tag.
    pub fn tagged_scalar(&mut self, tag: impl Into<String>, value: impl Into<String>) -> NodeId {
        let mut data = NodeData::new(NodeKind::Scalar, tag);
        data.value = value.into();
        self.push(data)
    }

    /// Adds a `<<` merge key.
    pub fn merge_key(&mut self) -> NodeId {
        self.tagged_scalar(tag::MERGE, "<<")
    }

    pub fn sequence(&mut self, items: impl IntoIterator<Item = NodeId>) -> NodeId {
        let mut data = NodeData::new(NodeKind::Sequence, tag::SEQ);
        data.content = items.into_iter().collect();
        self.push(data)
    }

    /// Adds a mapping. Pairs are flattened into alternating key/value content.
    pub fn mapping(&mut self, pairs: impl IntoIterator<Item = (NodeId, NodeId)>) -> NodeId {
        let mut data = NodeData::new(NodeKind::Mapping, tag::MAP);
        data.content = pairs.into_iter().flat_map(|(k, v)| [k, v]).collect();
        self.push(data)
    }

    /// Adds an alias referring to an already built node.
    pub fn alias(&mut self, target: NodeId) -> NodeId {
        let mut data = NodeData::new(NodeKind::Alias, "");
        data.alias = Some(target);
        self.push(data)
    }

    /// Adds an alias whose target is unknown.
    pub fn dangling_alias(&mut self) -> NodeId {
        self.push(NodeData::new(NodeKind::Alias, ""))
    }

    /// Wraps `root` in a document node and returns the finished tree.
    pub fn finish(self, root: Option<NodeId>) -> Tree {
        self.finish_at(root, None)
    }

    pub(crate) fn finish_at(mut self, root: Option<NodeId>, position: Option<Position>) -> Tree {
        let mut data = NodeData::new(NodeKind::Document, "");
        data.content = root.into_iter().collect();
        data.position = position;
        let document = self.push(data);
        Tree {
            nodes: self.nodes,
            document,
        }
    }
}
