//! YAML node representation.
//!
//! Nodes live in a [`Tree`] arena and are addressed by [`NodeId`]. Callers
//! never hold node data directly; they work with [`NodeRef`], a cheap `Copy`
//! handle pairing a tree with an id. Alias nodes refer to their target by id,
//! so a tree owns every node exactly once even when aliases share structure.
//!
//! # Example
//!
//! ```
//! use yit::document::node::NodeKind;
//! use yit::document::tree::TreeBuilder;
//!
//! let mut builder = TreeBuilder::new();
//! let key = builder.scalar("name");
//! let value = builder.scalar("yit");
//! let map = builder.mapping([(key, value)]);
//! let tree = builder.finish(Some(map));
//!
//! let root = tree.root().unwrap();
//! assert_eq!(root.kind(), NodeKind::Mapping);
//! assert_eq!(root.child(1).unwrap().value(), "yit");
//! ```

use std::fmt;

use super::tag;
use super::tree::Tree;
use crate::iter::TraverseError;

/// The structural kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Sequence,
    Mapping,
    Scalar,
    Alias,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Sequence => "sequence",
            NodeKind::Mapping => "mapping",
            NodeKind::Scalar => "scalar",
            NodeKind::Alias => "alias",
        }
    }

    /// Looks up a kind by its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "document" => Some(NodeKind::Document),
            "sequence" | "seq" => Some(NodeKind::Sequence),
            "mapping" | "map" => Some(NodeKind::Mapping),
            "scalar" => Some(NodeKind::Scalar),
            "alias" => Some(NodeKind::Alias),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A line/column position in the original YAML source (both 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Where a node sits, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// The node was loaded from source text.
    Source(Position),
    /// The node was built programmatically.
    Node(NodeId),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Source(pos) => write!(f, "line {}, column {}", pos.line, pos.column),
            Location::Node(id) => write!(f, "node #{}", id.0),
        }
    }
}

/// Raw node storage inside the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) tag: String,
    pub(crate) value: String,
    /// Children; for mappings, alternating keys and values.
    pub(crate) content: Vec<NodeId>,
    /// Target of an alias node. Never owning.
    pub(crate) alias: Option<NodeId>,
    pub(crate) position: Option<Position>,
}

impl NodeData {
    pub(crate) fn new(kind: NodeKind, tag: impl Into<String>) -> Self {
        Self {
            kind,
            tag: tag.into(),
            value: String::new(),
            content: Vec::new(),
            alias: None,
            position: None,
        }
    }
}

/// A borrowed handle to a node of a [`Tree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(tree: &'a Tree, id: NodeId) -> Self {
        Self { tree, id }
    }

    fn data(&self) -> &'a NodeData {
        self.tree.data(self.id)
    }

    /// The tree this node belongs to.
    pub fn tree(&self) -> &'a Tree {
        self.tree
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    pub fn tag(&self) -> &'a str {
        &self.data().tag
    }

    /// Scalar payload. Empty for non-scalar nodes.
    pub fn value(&self) -> &'a str {
        &self.data().value
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.data().content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data().content.is_empty()
    }

    /// Returns the child at `index`, or `None` when out of range.
    pub fn child(&self, index: usize) -> Option<NodeRef<'a>> {
        let tree = self.tree;
        self.data()
            .content
            .get(index)
            .map(|&id| NodeRef::new(tree, id))
    }

    /// Direct children in declared order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.data()
            .content
            .iter()
            .map(move |&id| NodeRef::new(tree, id))
    }

    /// The node an alias refers to. `None` for non-alias nodes and dangling aliases.
    pub fn alias(&self) -> Option<NodeRef<'a>> {
        let tree = self.tree;
        self.data().alias.map(|id| NodeRef::new(tree, id))
    }

    pub fn position(&self) -> Option<Position> {
        self.data().position
    }

    pub fn location(&self) -> Location {
        match self.position() {
            Some(pos) => Location::Source(pos),
            None => Location::Node(self.id),
        }
    }

    pub fn is_alias(&self) -> bool {
        self.kind() == NodeKind::Alias
    }

    pub fn is_mapping(&self) -> bool {
        self.kind() == NodeKind::Mapping
    }

    pub fn is_sequence(&self) -> bool {
        self.kind() == NodeKind::Sequence
    }

    pub fn is_scalar(&self) -> bool {
        self.kind() == NodeKind::Scalar
    }

    /// Returns true if this node is tagged as a `<<` merge key.
    pub fn is_merge_key(&self) -> bool {
        tag::is_merge(self.tag())
    }

    /// Follows aliases until a non-alias node is reached.
    ///
    /// Non-alias nodes resolve to themselves.
    ///
    /// # Errors
    ///
    /// Returns [`TraverseError::DanglingAlias`] when an alias on the way has no target.
    pub fn resolve(self) -> Result<NodeRef<'a>, TraverseError> {
        let mut node = self;
        // Alias targets always precede the alias in the arena, so this terminates.
        while node.is_alias() {
            node = node.alias().ok_or(TraverseError::DanglingAlias {
                location: node.location(),
            })?;
        }
        Ok(node)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id.0)
            .field("kind", &self.kind())
            .field("tag", &self.tag())
            .field("value", &self.value())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::tree::TreeBuilder;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in [
            NodeKind::Document,
            NodeKind::Sequence,
            NodeKind::Mapping,
            NodeKind::Scalar,
            NodeKind::Alias,
        ] {
            assert_eq!(NodeKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(NodeKind::from_name("map"), Some(NodeKind::Mapping));
        assert_eq!(NodeKind::from_name("table"), None);
    }

    #[test]
    fn test_location_display() {
        let source = Location::Source(Position { line: 3, column: 5 });
        assert_eq!(source.to_string(), "line 3, column 5");
        assert_eq!(Location::Node(NodeId(7)).to_string(), "node #7");
    }

    #[test]
    fn test_resolve_follows_alias_chain() {
        let mut builder = TreeBuilder::new();
        let target = builder.scalar("shared");
        let first = builder.alias(target);
        let second = builder.alias(first);
        let tree = builder.finish(Some(second));

        let resolved = tree.get(second).unwrap().resolve().unwrap();
        assert_eq!(resolved.id(), target);
        assert_eq!(resolved.value(), "shared");
    }

    #[test]
    fn test_resolve_dangling_alias() {
        let mut builder = TreeBuilder::new();
        let dangling = builder.dangling_alias();
        let tree = builder.finish(Some(dangling));

        let err = tree.get(dangling).unwrap().resolve().unwrap_err();
        assert_eq!(
            err,
            TraverseError::DanglingAlias {
                location: Location::Node(dangling)
            }
        );
    }

    #[test]
    fn test_node_refs_compare_by_tree_and_id() {
        let mut builder = TreeBuilder::new();
        let a = builder.scalar("a");
        let tree = builder.finish(Some(a));
        let other = tree.clone();

        assert_eq!(tree.get(a), tree.get(a));
        assert_ne!(tree.get(a), other.get(a));
    }
}
