//! Error types for query parsing.

use thiserror::Error;

/// Errors that can occur while parsing a query pipeline.
///
/// `position` is the byte offset of the offending step in the query text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Empty step at position {position}")]
    EmptyStep { position: usize },

    #[error("Unknown step '{name}' at position {position}")]
    UnknownStep { position: usize, name: String },

    #[error("Step '{step}' at position {position} needs an argument, e.g. {step}:<text>")]
    MissingArgument { position: usize, step: String },

    #[error("Step '{step}' at position {position} does not take an argument")]
    UnexpectedArgument { position: usize, step: String },

    #[error(
        "Unknown node kind '{kind}' at position {position}, expected scalar, sequence, mapping, document or alias"
    )]
    InvalidKind { position: usize, kind: String },
}
