//! Query pipelines over YAML documents.
//!
//! A query names a chain of iterator combinators in text form, so that they
//! can be given on the command line.
//!
//! # Supported Steps
//!
//! - `values` - Direct children of each node
//! - `keys` - Keys of each mapping
//! - `map-values` (or `mvalues`) - Values of each mapping
//! - `recurse` - Every node below, depth-first, with aliases and merge keys resolved
//! - `kind:<kind>` - Nodes of a kind (`scalar`, `sequence`, `mapping`, `document`, `alias`)
//! - `tag:<tag>` - Nodes with a tag, e.g. `tag:!!int`
//! - `value:<text>`, `prefix:<text>`, `suffix:<text>` - Scalars by value
//! - `key:<name>` - Values stored under a key
//! - `has-key:<name>` - Mappings that declare a key
//!
//! # Examples
//!
//! ```
//! use yit::document::parser::parse_yaml;
//! use yit::iter::Iter;
//! use yit::query::Query;
//!
//! let trees = parse_yaml("users: [{name: ann}, {name: bob}]").unwrap();
//! let query: Query = "key:users | values | key:name".parse().unwrap();
//!
//! let names: Vec<&str> = query
//!     .apply(Iter::from_node(trees[0].root().unwrap()))
//!     .map(|n| n.unwrap().value())
//!     .collect();
//! assert_eq!(names, vec!["ann", "bob"]);
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{Query, Step};
pub use error::QueryError;
pub use parser::Parser;

impl std::str::FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::parse(s)
    }
}
