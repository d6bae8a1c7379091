//! Rendering of query results for the command line.
//!
//! Each result node is rendered on its own; aliases are expanded and merge
//! keys applied before printing, so the output never contains anchors.
//!
//! # Examples
//!
//! ```
//! use yit::config::OutputFormat;
//! use yit::document::parser::parse_yaml;
//! use yit::output::render;
//!
//! let trees = parse_yaml("name: yit\nlist: [1, two]\n").unwrap();
//! let root = trees[0].root().unwrap();
//!
//! assert_eq!(render(root.child(1).unwrap(), OutputFormat::Value).unwrap(), "yit");
//! assert_eq!(render(root.child(3).unwrap(), OutputFormat::Json).unwrap(), r#"[1,"two"]"#);
//! ```

use anyhow::{Context, Result};

use crate::config::OutputFormat;
use crate::document::emit::to_value;
use crate::document::node::NodeRef;
use crate::iter::{expanded_content, TraverseError};

/// Deepest nesting `render` accepts. Serializers recurse once per level.
pub const MAX_RENDER_DEPTH: usize = 512;

/// Renders one node in the requested format, without a trailing newline.
///
/// # Errors
///
/// Fails on malformed documents and on results nested deeper than
/// [`MAX_RENDER_DEPTH`].
pub fn render(node: NodeRef<'_>, format: OutputFormat) -> Result<String> {
    let node = node.resolve()?;
    if nested_deeper_than(node, MAX_RENDER_DEPTH)? {
        anyhow::bail!(
            "Result is nested more than {} levels deep and cannot be printed",
            MAX_RENDER_DEPTH
        );
    }
    match format {
        OutputFormat::Value if node.is_scalar() => Ok(node.value().to_string()),
        OutputFormat::Value | OutputFormat::Yaml => {
            let value = to_value(node)?;
            let text = serde_yaml::to_string(&value).context("Failed to serialize YAML")?;
            Ok(text.trim_end_matches('\n').to_string())
        }
        OutputFormat::Json => {
            let value = to_value(node)?;
            serde_json::to_string(&value).context("Failed to serialize JSON")
        }
    }
}

/// Walks the subtree with an explicit stack, stopping as soon as `limit` is passed.
fn nested_deeper_than(node: NodeRef<'_>, limit: usize) -> Result<bool, TraverseError> {
    let mut stack = vec![(node, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        if depth > limit {
            return Ok(true);
        }
        let node = node.resolve()?;
        stack.extend(
            expanded_content(node)?
                .into_iter()
                .map(|child| (child, depth + 1)),
        );
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_yaml;

    #[test]
    fn test_value_format_prints_raw_scalars() {
        let trees = parse_yaml("a: '007'\n").unwrap();
        let value = trees[0].root().unwrap().child(1).unwrap();

        assert_eq!(render(value, OutputFormat::Value).unwrap(), "007");
        assert_eq!(render(value, OutputFormat::Json).unwrap(), r#""007""#);
    }

    #[test]
    fn test_yaml_format_applies_merges() {
        let trees = parse_yaml("base: &b {x: 1}\nchild: {<<: *b, y: 2}\n").unwrap();
        let child = trees[0].root().unwrap().child(3).unwrap();

        assert_eq!(render(child, OutputFormat::Yaml).unwrap(), "x: 1\ny: 2");
    }

    #[test]
    fn test_overly_deep_result_is_refused() {
        use crate::document::tree::TreeBuilder;

        let mut builder = TreeBuilder::new();
        let mut current = builder.scalar("leaf");
        for _ in 0..200_000 {
            current = builder.sequence([current]);
        }
        let tree = builder.finish(Some(current));

        let err = render(tree.root().unwrap(), OutputFormat::Json).unwrap_err();
        assert!(err.to_string().contains("nested more than"));
    }

    #[test]
    fn test_depth_at_limit_renders() {
        use crate::document::tree::TreeBuilder;

        let mut builder = TreeBuilder::new();
        let mut current = builder.scalar("leaf");
        for _ in 0..MAX_RENDER_DEPTH {
            current = builder.sequence([current]);
        }
        let tree = builder.finish(Some(current));

        let json = render(tree.root().unwrap(), OutputFormat::Json).unwrap();
        assert!(json.starts_with("[[[") && json.contains("\"leaf\""));
    }

    #[test]
    fn test_alias_renders_its_target() {
        let trees = parse_yaml("a: &x [1]\nb: *x\n").unwrap();
        let alias = trees[0].root().unwrap().child(3).unwrap();

        assert_eq!(render(alias, OutputFormat::Json).unwrap(), "[1]");
    }
}
