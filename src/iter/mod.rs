//! Lazy, composable iterators over YAML nodes.
//!
//! An [`Iter`] is a single-pass pull source of [`NodeRef`]s. Source
//! constructors ([`Iter::from_node`], [`Iter::from_nodes`],
//! [`Iter::from_iterators`]) turn nodes into a stream, resolving aliases
//! along the way; [`Iter::from_nodes`] also splices merge keys.
//! Combinators ([`Iter::filter`], [`Iter::map_keys`],
//! [`Iter::recurse_nodes`], ...) wrap an iterator and pull
//! from it only when they are pulled themselves, so nothing is materialized
//! beyond the children of the node currently being expanded.
//!
//! # Example
//!
//! ```
//! use yit::document::parser::parse_yaml;
//! use yit::iter::Iter;
//! use yit::predicate;
//!
//! let trees = parse_yaml("a: {name: x}\nb: {name: y}\n").unwrap();
//! let names: Vec<&str> = Iter::from_node(trees[0].root().unwrap())
//!     .map_values()
//!     .values_for_map(predicate::with_value("name"), predicate::all())
//!     .map(|n| n.map(|n| n.value()))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(names, vec!["x", "y"]);
//! ```

mod combinators;
mod error;
mod merge;
mod source;

pub use error::{MergeKeyProblem, Result, TraverseError};
pub use merge::expanded_content;
pub(crate) use merge::merge_target;

use std::fmt;
use std::iter::FusedIterator;

use crate::document::node::NodeRef;

/// A boxed node test.
pub type BoxedPredicate<'a> = Box<dyn Fn(NodeRef<'a>) -> bool + 'a>;

/// The pull contract behind every [`Iter`].
///
/// Implement this to plug a custom source into the combinator chain via
/// [`Iter::new`].
pub trait Pull<'a> {
    /// Produces the next node, or `Ok(None)` once the source is exhausted.
    fn pull(&mut self) -> Result<Option<NodeRef<'a>>>;
}

/// A lazy, single-pass stream of nodes.
///
/// Once an `Iter` has reported exhaustion or an error, every further pull
/// returns `Ok(None)`.
pub struct Iter<'a> {
    source: Box<dyn Pull<'a> + 'a>,
    finished: bool,
}

impl<'a> Iter<'a> {
    pub fn new<P>(source: P) -> Self
    where
        P: Pull<'a> + 'a,
    {
        Self {
            source: Box::new(source),
            finished: false,
        }
    }

    /// An iterator that yields nothing.
    pub fn empty() -> Self {
        Self::from_nodes(Vec::new())
    }

    /// Pulls the next node.
    ///
    /// # Errors
    ///
    /// Returns a [`TraverseError`] when the document is malformed; the
    /// iterator is finished afterwards.
    pub fn next_node(&mut self) -> Result<Option<NodeRef<'a>>> {
        if self.finished {
            return Ok(None);
        }
        let pulled = self.source.pull();
        if !matches!(pulled, Ok(Some(_))) {
            self.finished = true;
        }
        pulled
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Result<NodeRef<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node().transpose()
    }
}

impl FusedIterator for Iter<'_> {}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
