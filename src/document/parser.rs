//! YAML parsing into node trees.
//!
//! Parsing is event driven: `yaml-rust2` reports scalars, collection
//! boundaries and aliases, and [`TreeLoader`] assembles them bottom-up into
//! one [`Tree`] per document. Tags follow the short-form conventions of
//! [`tag`](super::tag): explicit tags are kept, untagged plain scalars get an
//! implicit `!!null`/`!!bool`/`!!int`/`!!float`/`!!merge`/`!!str` tag.
//!
//! An anchor becomes visible to aliases once its node is complete. An alias
//! to a node that encloses it therefore ends up dangling instead of
//! introducing a cycle.
//!
//! # Example
//!
//! ```
//! use yit::document::node::NodeKind;
//! use yit::document::parser::parse_yaml;
//!
//! let trees = parse_yaml("base: &b {x: 1}\ncopy: *b\n").unwrap();
//! let root = trees[0].root().unwrap();
//! let copy = root.child(3).unwrap();
//!
//! assert_eq!(copy.kind(), NodeKind::Alias);
//! assert_eq!(copy.alias(), root.child(1));
//! ```

use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::debug;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use super::node::{NodeData, NodeId, NodeKind, Position};
use super::tag;
use super::tree::{Tree, TreeBuilder};

/// A collection whose end event has not been seen yet.
struct OpenCollection {
    kind: NodeKind,
    tag: String,
    anchor: usize,
    content: Vec<NodeId>,
    position: Position,
}

/// Receives parser events and builds trees from them.
#[derive(Default)]
struct TreeLoader {
    trees: Vec<Tree>,
    builder: TreeBuilder,
    open: Vec<OpenCollection>,
    anchors: HashMap<usize, NodeId>,
    root: Option<NodeId>,
    document_position: Option<Position>,
}

impl TreeLoader {
    fn attach(&mut self, id: NodeId) {
        match self.open.last_mut() {
            Some(parent) => parent.content.push(id),
            None => self.root = Some(id),
        }
    }

    fn register_anchor(&mut self, anchor: usize, id: NodeId) {
        // yaml-rust2 uses 0 for "no anchor".
        if anchor > 0 {
            self.anchors.insert(anchor, id);
        }
    }

    fn add(&mut self, data: NodeData, anchor: usize) {
        let id = self.builder.push(data);
        self.register_anchor(anchor, id);
        self.attach(id);
    }

    fn open(&mut self, kind: NodeKind, anchor: usize, explicit: Option<Tag>, mark: Marker) {
        let tag = match explicit {
            Some(t) => tag::normalize(&t.handle, &t.suffix),
            None if kind == NodeKind::Mapping => tag::MAP.to_string(),
            None => tag::SEQ.to_string(),
        };
        self.open.push(OpenCollection {
            kind,
            tag,
            anchor,
            content: Vec::new(),
            position: position(mark),
        });
    }

    fn close(&mut self) {
        let Some(collection) = self.open.pop() else {
            return;
        };
        let mut data = NodeData::new(collection.kind, collection.tag);
        data.content = collection.content;
        data.position = Some(collection.position);
        self.add(data, collection.anchor);
    }

    fn finish_document(&mut self) {
        let builder = std::mem::take(&mut self.builder);
        let tree = builder.finish_at(self.root.take(), self.document_position.take());
        debug!(
            document = self.trees.len(),
            nodes = tree.len(),
            "loaded YAML document"
        );
        self.trees.push(tree);
        self.anchors.clear();
        self.open.clear();
    }
}

impl MarkedEventReceiver for TreeLoader {
    fn on_event(&mut self, event: Event, mark: Marker) {
        match event {
            Event::DocumentStart { .. } => {
                self.builder = TreeBuilder::new();
                self.root = None;
                self.document_position = Some(position(mark));
            }
            Event::DocumentEnd { .. } => self.finish_document(),
            Event::Scalar(value, style, anchor, explicit) => {
                let tag = match explicit {
                    Some(t) => tag::normalize(&t.handle, &t.suffix),
                    None if matches!(style, TScalarStyle::Plain) => tag::resolve_plain(&value).to_string(),
                    None => tag::STR.to_string(),
                };
                let mut data = NodeData::new(NodeKind::Scalar, tag);
                data.value = value;
                data.position = Some(position(mark));
                self.add(data, anchor);
            }
            Event::SequenceStart(anchor, explicit) => {
                self.open(NodeKind::Sequence, anchor, explicit, mark)
            }
            Event::MappingStart(anchor, explicit) => {
                self.open(NodeKind::Mapping, anchor, explicit, mark)
            }
            Event::SequenceEnd { .. } | Event::MappingEnd { .. } => self.close(),
            Event::Alias(anchor) => {
                let mut data = NodeData::new(NodeKind::Alias, "");
                data.alias = self.anchors.get(&anchor).copied();
                data.position = Some(position(mark));
                self.add(data, 0);
            }
            _ => {}
        }
    }
}

// yaml-rust2 markers have 1-based lines and 0-based columns.
fn position(mark: Marker) -> Position {
    Position {
        line: mark.line(),
        column: mark.col() + 1,
    }
}

/// Parses every document of a YAML stream.
///
/// # Errors
///
/// Returns an error if the text is not well-formed YAML.
///
/// # Examples
///
/// ```
/// use yit::document::parser::parse_yaml;
///
/// let trees = parse_yaml("a: 1\n---\nb: 2\n").unwrap();
/// assert_eq!(trees.len(), 2);
///
/// assert!(parse_yaml("key: [unclosed").is_err());
/// ```
pub fn parse_yaml(text: &str) -> Result<Vec<Tree>> {
    let mut loader = TreeLoader::default();
    let mut parser = Parser::new_from_str(text);
    parser
        .load(&mut loader, true)
        .context("Failed to parse YAML")?;
    Ok(loader.trees)
}
