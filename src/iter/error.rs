//! Errors raised while traversing malformed documents.

use std::fmt;

use thiserror::Error;

use crate::document::node::{Location, NodeKind};

pub type Result<T, E = TraverseError> = std::result::Result<T, E>;

/// What is wrong with a merge key's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeKeyProblem {
    /// The merge key is followed by something other than an alias.
    NotAnAlias(NodeKind),
    /// The alias after the merge key has no target.
    MissingTarget,
    /// The alias targets something other than a mapping.
    NotAMapping(NodeKind),
}

impl fmt::Display for MergeKeyProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeKeyProblem::NotAnAlias(kind) => {
                write!(f, "expected an alias after the merge key, found a {}", kind)
            }
            MergeKeyProblem::MissingTarget => write!(f, "the merged alias has no target"),
            MergeKeyProblem::NotAMapping(kind) => {
                write!(f, "the merged alias refers to a {}, not a mapping", kind)
            }
        }
    }
}

/// A structural error in the traversed document.
///
/// Errors end the traversal: the iterator that reported one yields nothing afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraverseError {
    #[error("invalid merge key at {location}: {problem}")]
    InvalidMergeKey {
        location: Location,
        problem: MergeKeyProblem,
    },

    #[error("merge key at {location} is the last entry and has nothing to merge")]
    MergeKeyAtEnd { location: Location },

    #[error("alias at {location} does not refer to any node")]
    DanglingAlias { location: Location },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::Position;

    #[test]
    fn test_error_messages() {
        let location = Location::Source(Position { line: 4, column: 3 });

        let err = TraverseError::InvalidMergeKey {
            location,
            problem: MergeKeyProblem::NotAMapping(NodeKind::Sequence),
        };
        assert_eq!(
            err.to_string(),
            "invalid merge key at line 4, column 3: the merged alias refers to a sequence, not a mapping"
        );

        let err = TraverseError::MergeKeyAtEnd { location };
        assert!(err.to_string().contains("last entry"));
    }
}
