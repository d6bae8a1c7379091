//! Query pipeline parser.
//!
//! A query is a list of steps separated by `|`. A step is a name, optionally
//! followed by `:` and an argument: `values | recurse | key:name`.

use super::ast::{Query, Step};
use super::error::QueryError;
use crate::document::node::NodeKind;

/// Parser for query strings.
pub struct Parser<'q> {
    input: &'q str,
    position: usize,
}

impl<'q> Parser<'q> {
    /// Creates a new parser for the given query string.
    pub fn new(query: &'q str) -> Self {
        Self {
            input: query,
            position: 0,
        }
    }

    /// Parses the query string into a [`Query`].
    ///
    /// An empty (or all-whitespace) query parses to the identity query.
    pub fn parse(query: &str) -> Result<Query, QueryError> {
        let mut parser = Parser::new(query);
        parser.parse_query()
    }

    fn parse_query(&mut self) -> Result<Query, QueryError> {
        if self.input.trim().is_empty() {
            return Ok(Query::default());
        }

        let mut steps = Vec::new();
        while let Some((position, text)) = self.next_step() {
            steps.push(parse_step(position, text)?);
        }
        Ok(Query::new(steps))
    }

    /// Returns the next raw step and the offset where its text starts.
    fn next_step(&mut self) -> Option<(usize, &'q str)> {
        if self.position > self.input.len() {
            return None;
        }

        let rest = &self.input[self.position..];
        let (raw, consumed) = match rest.find('|') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len() + 1),
        };

        let leading = raw.len() - raw.trim_start().len();
        let position = self.position + leading;
        self.position += consumed;
        Some((position, raw.trim()))
    }
}

fn parse_step(position: usize, text: &str) -> Result<Step, QueryError> {
    if text.is_empty() {
        return Err(QueryError::EmptyStep { position });
    }

    let (name, argument) = match text.split_once(':') {
        Some((name, argument)) => (name.trim(), Some(argument.trim())),
        None => (text, None),
    };

    let bare = |step: Step| match argument {
        Some(_) => Err(QueryError::UnexpectedArgument {
            position,
            step: name.to_string(),
        }),
        None => Ok(step),
    };
    let required = || {
        argument.map(str::to_string).ok_or_else(|| QueryError::MissingArgument {
            position,
            step: name.to_string(),
        })
    };

    match name {
        "values" => bare(Step::Values),
        "keys" => bare(Step::Keys),
        "map-values" | "mvalues" => bare(Step::MapValues),
        "recurse" => bare(Step::Recurse),
        "kind" => {
            let kind = required()?;
            NodeKind::from_name(&kind)
                .map(Step::Kind)
                .ok_or(QueryError::InvalidKind { position, kind })
        }
        "tag" => required().map(Step::Tag),
        "value" => required().map(Step::Value),
        "prefix" => required().map(Step::Prefix),
        "suffix" => required().map(Step::Suffix),
        "key" => required().map(Step::Key),
        "has-key" => required().map(Step::HasKey),
        _ => Err(QueryError::UnknownStep {
            position,
            name: name.to_string(),
        }),
    }
}
