//! Conversion of nodes into `serde_yaml` values for output.
//!
//! Aliases are expanded and merge keys are applied with YAML's precedence:
//! keys declared directly in a mapping win over merged ones, and among
//! merged mappings the first one to provide a key wins.

use serde_yaml::{Mapping, Number, Value};

use super::node::{NodeKind, NodeRef};
use super::tag;
use crate::iter::{merge_target, TraverseError};

/// Pending work for [`to_value`].
enum Task<'a> {
    /// Convert a node, pushing its value (or more tasks).
    Visit(NodeRef<'a>),
    /// Collect the last `len` values into a sequence.
    Sequence(usize),
    /// Collect `merges` merged mappings followed by `pairs` key/value pairs.
    Mapping { merges: usize, pairs: usize },
}

/// Converts a node (and everything below it) into a `serde_yaml::Value`.
///
/// The conversion keeps its own work stack, so deep trees do not exhaust the
/// call stack here. Serializing or dropping a very deep `Value` still
/// recurses; [`render`](crate::output::render) refuses such trees up front.
///
/// # Example
///
/// ```
/// use yit::document::emit::to_value;
/// use yit::document::parser::parse_yaml;
///
/// let trees = parse_yaml("base: &b {x: 1, y: 2}\nchild: {<<: *b, y: 3}\n").unwrap();
/// let child = trees[0].root().unwrap().child(3).unwrap();
///
/// let value = to_value(child).unwrap();
/// assert_eq!(value["x"], serde_yaml::Value::from(1));
/// assert_eq!(value["y"], serde_yaml::Value::from(3));
/// ```
///
/// # Errors
///
/// Fails on dangling aliases and malformed merge keys.
pub fn to_value(node: NodeRef<'_>) -> Result<Value, TraverseError> {
    let mut tasks = vec![Task::Visit(node)];
    let mut values: Vec<Value> = Vec::new();

    while let Some(task) = tasks.pop() {
        match task {
            Task::Visit(node) => visit(node.resolve()?, &mut tasks, &mut values)?,
            Task::Sequence(len) => {
                let items = values.split_off(values.len() - len);
                values.push(Value::Sequence(items));
            }
            Task::Mapping { merges, pairs } => {
                let items = values.split_off(values.len() - merges - 2 * pairs);
                values.push(Value::Mapping(build_mapping(items, merges)));
            }
        }
    }

    Ok(values.pop().unwrap_or(Value::Null))
}

fn visit<'a>(
    node: NodeRef<'a>,
    tasks: &mut Vec<Task<'a>>,
    values: &mut Vec<Value>,
) -> Result<(), TraverseError> {
    match node.kind() {
        NodeKind::Scalar => values.push(scalar_value(node.tag(), node.value())),
        NodeKind::Sequence => {
            let items: Vec<NodeRef<'a>> = node.children().collect();
            tasks.push(Task::Sequence(items.len()));
            tasks.extend(items.into_iter().rev().map(Task::Visit));
        }
        NodeKind::Mapping => {
            let content: Vec<NodeRef<'a>> = node.children().collect();
            let mut merges = Vec::new();
            let mut pairs = Vec::new();
            for (index, key) in content.iter().enumerate().step_by(2) {
                if key.is_merge_key() {
                    merges.push(merge_target(*key, content.get(index + 1).copied())?);
                    continue;
                }
                let Some(&value) = content.get(index + 1) else {
                    break;
                };
                pairs.push((*key, value));
            }

            // Pushed in reverse so values come back as merges, then k1, v1, k2, v2...
            tasks.push(Task::Mapping {
                merges: merges.len(),
                pairs: pairs.len(),
            });
            for (key, value) in pairs.into_iter().rev() {
                tasks.push(Task::Visit(value));
                tasks.push(Task::Visit(key));
            }
            tasks.extend(merges.into_iter().rev().map(Task::Visit));
        }
        NodeKind::Document => match node.child(0) {
            Some(root) => tasks.push(Task::Visit(root)),
            None => values.push(Value::Null),
        },
        // resolve() never returns an alias
        NodeKind::Alias => values.push(Value::Null),
    }
    Ok(())
}

fn build_mapping(items: Vec<Value>, merges: usize) -> Mapping {
    let mut items = items.into_iter();

    let mut merged = Mapping::new();
    for value in items.by_ref().take(merges) {
        if let Value::Mapping(entries) = value {
            for (k, v) in entries {
                if !merged.contains_key(&k) {
                    merged.insert(k, v);
                }
            }
        }
    }

    let mut map = Mapping::new();
    while let (Some(k), Some(v)) = (items.next(), items.next()) {
        map.insert(k, v);
    }

    if merged.is_empty() {
        return map;
    }

    // Merged entries come first, then the explicitly declared ones override.
    for (k, v) in map {
        merged.insert(k, v);
    }
    merged
}

fn scalar_value(tag: &str, value: &str) -> Value {
    match tag {
        tag::NULL => Value::Null,
        tag::BOOL => Value::Bool(value.eq_ignore_ascii_case("true")),
        tag::INT => match tag::parse_int(value) {
            Some(i) => Value::Number(Number::from(i)),
            None => value
                .parse::<u64>()
                .map(|u| Value::Number(Number::from(u)))
                .unwrap_or_else(|_| Value::String(value.to_string())),
        },
        tag::FLOAT => match tag::parse_float(value) {
            Some(f) => Value::Number(Number::from(f)),
            None => Value::String(value.to_string()),
        },
        _ => Value::String(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_yaml;

    #[test]
    fn test_scalars_are_typed() {
        let trees = parse_yaml("[1, 2.5, true, ~, text, '7', 0x10]").unwrap();
        let value = to_value(trees[0].root().unwrap()).unwrap();

        assert_eq!(
            value,
            Value::Sequence(vec![
                Value::from(1),
                Value::from(2.5),
                Value::Bool(true),
                Value::Null,
                Value::String("text".to_string()),
                Value::String("7".to_string()),
                Value::from(16),
            ])
        );
    }

    #[test]
    fn test_aliases_are_expanded() {
        let trees = parse_yaml("a: &x [1, 2]\nb: *x\n").unwrap();
        let value = to_value(trees[0].root().unwrap()).unwrap();

        assert_eq!(value["a"], value["b"]);
    }

    #[test]
    fn test_explicit_keys_win_over_merged() {
        let yaml = "one: &one {a: 1, b: 1}\ntwo: &two {b: 2, c: 2}\nboth: {a: 0, <<: *one, <<: *two}\n";
        // Duplicate `<<` keys are accepted by the event parser.
        let trees = parse_yaml(yaml).unwrap();
        let both = trees[0].root().unwrap().child(5).unwrap();
        let value = to_value(both).unwrap();

        assert_eq!(value["a"], Value::from(0));
        assert_eq!(value["b"], Value::from(1));
        assert_eq!(value["c"], Value::from(2));
    }

    #[test]
    fn test_nested_collections_keep_order() {
        let trees = parse_yaml("a: [1, {b: [2, 3]}]\nc: {}\n").unwrap();
        let value = to_value(trees[0].root().unwrap()).unwrap();

        let expected: Value = serde_yaml::from_str("a: [1, {b: [2, 3]}]\nc: {}\n").unwrap();
        assert_eq!(value, expected);
    }

    #[test]
    fn test_deep_tree_converts_without_recursion() {
        use crate::document::tree::TreeBuilder;

        let mut builder = TreeBuilder::new();
        let mut current = builder.scalar("leaf");
        for _ in 0..1_000 {
            current = builder.sequence([current]);
        }
        let tree = builder.finish(Some(current));

        let mut value = to_value(tree.root().unwrap()).unwrap();
        let mut depth = 0;
        while let Value::Sequence(mut items) = value {
            value = items.pop().unwrap();
            depth += 1;
        }
        assert_eq!(depth, 1_000);
        assert_eq!(value, Value::String("leaf".to_string()));
    }

    #[test]
    fn test_invalid_merge_is_an_error() {
        let trees = parse_yaml("bad: {<<: [1, 2]}\n").unwrap();
        let err = to_value(trees[0].root().unwrap()).unwrap_err();

        assert!(matches!(err, TraverseError::InvalidMergeKey { .. }));
    }
}
