use yit::document::node::Location;
use yit::document::parser::parse_yaml;
use yit::iter::{Iter, TraverseError};
use yit::predicate::with_kind;
use yit::{NodeKind, TreeBuilder};

#[test]
fn test_recurse_yields_alias_target() {
    let trees = parse_yaml("base: &b [1, 2]\ncopy: *b\n").unwrap();
    let root = trees[0].root().unwrap();
    let base = root.child(1).unwrap();

    let nodes: Vec<_> = Iter::from_node(root)
        .recurse_nodes()
        .map(|n| n.unwrap())
        .collect();

    assert_eq!(nodes.len(), 9);
    assert!(nodes.iter().all(|n| !n.is_alias()));
    assert_eq!(nodes.iter().filter(|n| **n == base).count(), 2);
}

#[test]
fn test_aliased_scalars_are_dereferenced() {
    let trees = parse_yaml("name: &n yit\nlabels: [*n, *n]\n").unwrap();
    let it = Iter::from_node(trees[0].root().unwrap())
        .recurse_nodes()
        .filter(with_kind(NodeKind::Scalar));

    let values: Vec<&str> = it.map(|n| n.unwrap().value()).collect();
    assert_eq!(values, vec!["name", "yit", "labels", "yit", "yit"]);
}

#[test]
fn test_alias_chain_is_followed() {
    let mut builder = TreeBuilder::new();
    let target = builder.scalar("end");
    let first = builder.alias(target);
    let second = builder.alias(first);
    let tree = builder.finish(None);

    let node = Iter::from_node(tree.get(second).unwrap())
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(node.id(), target);
}

#[test]
fn test_dangling_alias_is_an_error() {
    let mut builder = TreeBuilder::new();
    let alias = builder.dangling_alias();
    let seq = builder.sequence([alias]);
    let tree = builder.finish(Some(seq));

    let mut it = Iter::from_node(tree.root().unwrap()).recurse_nodes();
    assert!(it.next().unwrap().is_ok());
    assert_eq!(
        it.next(),
        Some(Err(TraverseError::DanglingAlias {
            location: Location::Node(alias)
        }))
    );
    assert_eq!(it.next(), None);
}

#[test]
fn test_values_do_not_dereference() {
    let trees = parse_yaml("a: &x 1\nb: *x\n").unwrap();
    let it = Iter::from_node(trees[0].root().unwrap()).map_values();

    let kinds: Vec<NodeKind> = it.map(|n| n.unwrap().kind()).collect();
    assert_eq!(kinds, vec![NodeKind::Scalar, NodeKind::Alias]);
}
