use super::ast::{Query, Step};
use crate::iter::Iter;
use crate::predicate;

impl Step {
    /// Wraps `input` in the combinator this step stands for.
    pub fn apply<'a>(&self, input: Iter<'a>) -> Iter<'a> {
        match self {
            Step::Values => input.values(),
            Step::Keys => input.map_keys(),
            Step::MapValues => input.map_values(),
            Step::Recurse => input.recurse_nodes(),
            Step::Kind(kind) => input.filter(predicate::with_kind(*kind)),
            Step::Tag(tag) => input.filter(predicate::with_tag(tag.clone())),
            Step::Value(value) => input.filter(predicate::with_value(value.clone())),
            Step::Prefix(prefix) => input.filter(predicate::with_prefix(prefix.clone())),
            Step::Suffix(suffix) => input.filter(predicate::with_suffix(suffix.clone())),
            Step::Key(key) => {
                input.values_for_map(predicate::with_value(key.clone()), predicate::all())
            }
            Step::HasKey(key) => input.filter(predicate::with_map_key(key.clone())),
        }
    }
}

impl Query {
    /// Chains every step onto `input`.
    ///
    /// Nothing is evaluated until the returned iterator is pulled.
    pub fn apply<'a>(&self, input: Iter<'a>) -> Iter<'a> {
        self.steps
            .iter()
            .fold(input, |it, step| it.iterate(|it| step.apply(it)))
    }
}
