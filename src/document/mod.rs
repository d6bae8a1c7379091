//! Document model: nodes, trees, parsing and emission.
//!
//! Trees are read-only once built and can be shared between threads; every
//! [`Iter`](crate::iter::Iter) over them keeps its own traversal state.

pub mod emit;
pub mod node;
pub mod parser;
pub mod tag;
pub mod tree;
