//! Reusable node predicates for [`Iter::filter`](crate::iter::Iter::filter)
//! and [`Iter::values_for_map`](crate::iter::Iter::values_for_map).
//!
//! Every function returns a closure that works for nodes of any tree.
//!
//! # Example
//!
//! ```
//! use yit::document::node::NodeKind;
//! use yit::document::parser::parse_yaml;
//! use yit::iter::Iter;
//! use yit::predicate::{intersect, with_kind, with_prefix};
//!
//! let trees = parse_yaml("[alpha, beta, [also]]").unwrap();
//! let hits: Vec<&str> = Iter::from_node(trees[0].root().unwrap())
//!     .recurse_nodes()
//!     .filter(intersect(with_kind(NodeKind::Scalar), with_prefix("a")))
//!     .map(|n| n.unwrap().value())
//!     .collect();
//! assert_eq!(hits, vec!["alpha", "also"]);
//! ```

use crate::document::node::{NodeKind, NodeRef};

/// Matches every node.
pub fn all() -> impl Fn(NodeRef<'_>) -> bool + Clone {
    |_: NodeRef<'_>| true
}

/// Matches no node.
pub fn none() -> impl Fn(NodeRef<'_>) -> bool + Clone {
    |_: NodeRef<'_>| false
}

pub fn with_kind(kind: NodeKind) -> impl Fn(NodeRef<'_>) -> bool + Clone {
    move |node: NodeRef<'_>| node.kind() == kind
}

/// Matches nodes whose tag equals `tag` (short form, e.g. `!!str`).
pub fn with_tag(tag: impl Into<String>) -> impl Fn(NodeRef<'_>) -> bool + Clone {
    let tag = tag.into();
    move |node: NodeRef<'_>| node.tag() == tag
}

/// Matches scalars whose value equals `value`.
pub fn with_value(value: impl Into<String>) -> impl Fn(NodeRef<'_>) -> bool + Clone {
    let value = value.into();
    move |node: NodeRef<'_>| node.is_scalar() && node.value() == value
}

pub fn with_prefix(prefix: impl Into<String>) -> impl Fn(NodeRef<'_>) -> bool + Clone {
    let prefix = prefix.into();
    move |node: NodeRef<'_>| node.is_scalar() && node.value().starts_with(prefix.as_str())
}

pub fn with_suffix(suffix: impl Into<String>) -> impl Fn(NodeRef<'_>) -> bool + Clone {
    let suffix = suffix.into();
    move |node: NodeRef<'_>| node.is_scalar() && node.value().ends_with(suffix.as_str())
}

/// Matches mappings that declare `key` directly (merged keys are not considered).
pub fn with_map_key(key: impl Into<String>) -> impl Fn(NodeRef<'_>) -> bool + Clone {
    let key = key.into();
    move |node: NodeRef<'_>| {
        node.is_mapping()
            && node
                .children()
                .step_by(2)
                .any(|k| k.is_scalar() && k.value() == key)
    }
}

/// Matches mappings that declare `key` with the scalar value `value`.
pub fn with_map_key_value(
    key: impl Into<String>,
    value: impl Into<String>,
) -> impl Fn(NodeRef<'_>) -> bool + Clone {
    let key = key.into();
    let value = value.into();
    move |node: NodeRef<'_>| {
        if !node.is_mapping() {
            return false;
        }
        let content: Vec<NodeRef<'_>> = node.children().collect();
        content
            .chunks_exact(2)
            .any(|pair| pair[0].value() == key && pair[1].is_scalar() && pair[1].value() == value)
    }
}

pub fn negate<P>(predicate: P) -> impl Fn(NodeRef<'_>) -> bool + Clone
where
    P: for<'x> Fn(NodeRef<'x>) -> bool + Clone,
{
    move |node: NodeRef<'_>| !predicate(node)
}

/// Matches nodes accepted by either predicate.
pub fn union<P, Q>(first: P, second: Q) -> impl Fn(NodeRef<'_>) -> bool + Clone
where
    P: for<'x> Fn(NodeRef<'x>) -> bool + Clone,
    Q: for<'x> Fn(NodeRef<'x>) -> bool + Clone,
{
    move |node: NodeRef<'_>| first(node) || second(node)
}

/// Matches nodes accepted by both predicates.
pub fn intersect<P, Q>(first: P, second: Q) -> impl Fn(NodeRef<'_>) -> bool + Clone
where
    P: for<'x> Fn(NodeRef<'x>) -> bool + Clone,
    Q: for<'x> Fn(NodeRef<'x>) -> bool + Clone,
{
    move |node: NodeRef<'_>| first(node) && second(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::tree::{Tree, TreeBuilder};

    // {name: yit, tags: [rust]}
    fn sample() -> Tree {
        let mut builder = TreeBuilder::new();
        let name = builder.scalar("name");
        let yit = builder.scalar("yit");
        let tags = builder.scalar("tags");
        let rust = builder.scalar("rust");
        let seq = builder.sequence([rust]);
        let map = builder.mapping([(name, yit), (tags, seq)]);
        builder.finish(Some(map))
    }

    #[test]
    fn test_kind_and_value() {
        let tree = sample();
        let root = tree.root().unwrap();
        let yit = root.child(1).unwrap();

        assert!(with_kind(NodeKind::Mapping)(root));
        assert!(with_value("yit")(yit));
        assert!(!with_value("yit")(root));
        assert!(with_prefix("y")(yit));
        assert!(with_suffix("it")(yit));
        assert!(with_tag("!!str")(yit));
    }

    #[test]
    fn test_map_key_predicates() {
        let tree = sample();
        let root = tree.root().unwrap();

        assert!(with_map_key("tags")(root));
        assert!(!with_map_key("missing")(root));
        assert!(with_map_key_value("name", "yit")(root));
        assert!(!with_map_key_value("tags", "rust")(root));
    }

    #[test]
    fn test_combinators() {
        let tree = sample();
        let yit = tree.root().unwrap().child(1).unwrap();

        assert!(all()(yit));
        assert!(!none()(yit));
        assert!(!negate(all())(yit));
        assert!(union(none(), with_value("yit"))(yit));
        assert!(!intersect(all(), with_value("other"))(yit));
    }
}
