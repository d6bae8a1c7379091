//! Abstract syntax tree types for query pipelines.

use crate::document::node::NodeKind;

/// One stage of a query pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Direct children of each node (`values`)
    Values,
    /// Keys of each mapping (`keys`)
    Keys,
    /// Values of each mapping (`map-values`)
    MapValues,
    /// Every node below each node, depth-first (`recurse`)
    Recurse,
    /// Nodes of the given kind (`kind:mapping`)
    Kind(NodeKind),
    /// Nodes with the given tag (`tag:!!str`)
    Tag(String),
    /// Scalars with the given value (`value:x`)
    Value(String),
    /// Scalars starting with the text (`prefix:x`)
    Prefix(String),
    /// Scalars ending with the text (`suffix:x`)
    Suffix(String),
    /// Values stored under the key in each mapping (`key:name`)
    Key(String),
    /// Mappings declaring the key (`has-key:name`)
    HasKey(String),
}

/// A parsed query: steps applied left to right.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub steps: Vec<Step>,
}

impl Query {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// A query with no steps passes its input through unchanged.
    pub fn is_identity(&self) -> bool {
        self.steps.is_empty()
    }
}
