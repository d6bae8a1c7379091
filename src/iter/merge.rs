//! Merge-key expansion.
//!
//! A `<<: *defaults` entry splices the entries of the aliased mapping into the
//! surrounding mapping at the position of the merge key. Merged mappings may
//! contain merge keys of their own; those are expanded depth-first before the
//! remaining entries. Expansion keeps an explicit stack of frames instead of
//! recursing, so deeply chained merges cost heap, not call stack.

use tracing::trace;

use super::error::{MergeKeyProblem, Result, TraverseError};
use crate::document::node::{NodeKind, NodeRef};

struct Frame<'a> {
    mapping: NodeRef<'a>,
    pos: usize,
}

/// Mappings currently being spliced into an outer stream, innermost last.
pub(crate) struct MergeFrames<'a> {
    frames: Vec<Frame<'a>>,
}

impl<'a> MergeFrames<'a> {
    pub(crate) fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Frames that walk `mapping`'s own content, expanding its merge keys.
    pub(crate) fn starting_at(mapping: NodeRef<'a>) -> Self {
        Self {
            frames: vec![Frame { mapping, pos: 0 }],
        }
    }

    /// Starts emitting `mapping`'s entries before anything that is already queued.
    pub(crate) fn splice(&mut self, mapping: NodeRef<'a>) {
        trace!(
            mapping = mapping.id().index(),
            entries = mapping.len() / 2,
            depth = self.frames.len(),
            "splicing merged mapping"
        );
        self.frames.push(Frame { mapping, pos: 0 });
    }

    /// Next spliced node, expanding nested merge keys as they come up.
    ///
    /// Nodes are returned as declared: aliases inside merged mappings are not resolved.
    pub(crate) fn next(&mut self) -> Result<Option<NodeRef<'a>>> {
        while let Some(frame) = self.frames.last_mut() {
            let Some(node) = frame.mapping.child(frame.pos) else {
                self.frames.pop();
                continue;
            };

            if frame.pos % 2 == 0 && node.is_merge_key() {
                let target = merge_target(node, frame.mapping.child(frame.pos + 1))?;
                frame.pos += 2;
                self.splice(target);
                continue;
            }

            frame.pos += 1;
            return Ok(Some(node));
        }
        Ok(None)
    }
}

/// Checks the node following a merge key and returns the mapping it merges.
pub(crate) fn merge_target<'a>(key: NodeRef<'a>, next: Option<NodeRef<'a>>) -> Result<NodeRef<'a>> {
    let location = key.location();
    let alias = next.ok_or(TraverseError::MergeKeyAtEnd { location })?;

    if !alias.is_alias() {
        return Err(TraverseError::InvalidMergeKey {
            location,
            problem: MergeKeyProblem::NotAnAlias(alias.kind()),
        });
    }

    let target = alias
        .resolve()
        .map_err(|_| TraverseError::InvalidMergeKey {
            location,
            problem: MergeKeyProblem::MissingTarget,
        })?;

    if target.kind() != NodeKind::Mapping {
        return Err(TraverseError::InvalidMergeKey {
            location,
            problem: MergeKeyProblem::NotAMapping(target.kind()),
        });
    }

    Ok(target)
}

/// Returns the children of `node` with merge keys expanded.
///
/// For mappings, every `<<: *alias` pair is replaced by the aliased mapping's
/// own (recursively expanded) content, keeping declaration order. Other
/// kinds return their children unchanged.
///
/// # Example
///
/// ```
/// use yit::document::parser::parse_yaml;
/// use yit::iter::expanded_content;
///
/// let trees = parse_yaml("base: &b {a: 1}\nchild: {<<: *b, c: 2}\n").unwrap();
/// let child = trees[0].root().unwrap().child(3).unwrap();
/// let keys: Vec<&str> = expanded_content(child)
///     .unwrap()
///     .iter()
///     .step_by(2)
///     .map(|n| n.value())
///     .collect();
/// assert_eq!(keys, vec!["a", "c"]);
/// ```
pub fn expanded_content(node: NodeRef<'_>) -> Result<Vec<NodeRef<'_>>> {
    if node.kind() != NodeKind::Mapping {
        return Ok(node.children().collect());
    }

    let mut frames = MergeFrames::starting_at(node);

    let mut content = Vec::with_capacity(node.len());
    while let Some(child) = frames.next()? {
        content.push(child);
    }
    Ok(content)
}
