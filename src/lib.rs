//! yit - lazy traversal of YAML node trees.
//!
//! A YAML stream is parsed into one [`Tree`] per document. Traversals are
//! built from [`Iter`] values: sources such as [`Iter::from_node`] feed
//! combinators such as [`Iter::filter`] and [`Iter::recurse_nodes`], and
//! nothing is visited until a result is pulled. Aliases are resolved and
//! `<<` merge keys are spliced in while traversing.
//!
//! # Example
//!
//! ```
//! use yit::document::parser::parse_yaml;
//! use yit::iter::Iter;
//! use yit::predicate;
//!
//! let yaml = "defaults: &d {retries: 3}\njob: {<<: *d, name: build}\n";
//! let trees = parse_yaml(yaml).unwrap();
//!
//! let names: Vec<String> = Iter::from_node(trees[0].root().unwrap())
//!     .values_for_map(predicate::with_value("job"), predicate::all())
//!     .recurse_nodes()
//!     .filter(predicate::with_kind(yit::NodeKind::Scalar))
//!     .map(|n| n.map(|n| n.value().to_string()))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(names, vec!["retries", "3", "name", "build"]);
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod iter;
pub mod output;
pub mod predicate;
pub mod query;

pub use document::node::{NodeId, NodeKind, NodeRef};
pub use document::tree::{Tree, TreeBuilder};
pub use iter::{Iter, Pull, TraverseError};
