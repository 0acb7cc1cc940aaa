//! Checkable back-references from declarations into a source unit.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rowan::NodeOrToken;

use super::unit::SourceUnit;
use crate::base::Span;
use crate::error::{ResolveError, ResolveResult};
use crate::parser::{SyntaxKind, SyntaxNode, TextRange};

/// Position-independent pointer to a node: its kind and text range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyntaxNodePtr {
    kind: SyntaxKind,
    range: TextRange,
}

impl SyntaxNodePtr {
    pub fn new(node: &SyntaxNode) -> Self {
        Self {
            kind: node.kind(),
            range: node.text_range(),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Find the node with this kind and range under `root`.
    pub fn to_node(&self, root: &SyntaxNode) -> Option<SyntaxNode> {
        if !root.text_range().contains_range(self.range) {
            return None;
        }
        let start = match root.covering_element(self.range) {
            NodeOrToken::Node(node) => node,
            NodeOrToken::Token(token) => token.parent()?,
        };
        start
            .ancestors()
            .find(|n| n.kind() == self.kind && n.text_range() == self.range)
    }
}

/// A non-owning reference to a node of a [`SourceUnit`].
///
/// The unit owns the tree; a handle only remembers where its node was.
/// [`NodeHandle::node`] re-locates it in the current tree and reports
/// [`ResolveError::StaleNode`] when the node is gone.
#[derive(Clone)]
pub struct NodeHandle {
    unit: Arc<SourceUnit>,
    ptr: SyntaxNodePtr,
}

impl NodeHandle {
    pub fn new(unit: Arc<SourceUnit>, node: &SyntaxNode) -> Self {
        Self {
            unit,
            ptr: SyntaxNodePtr::new(node),
        }
    }

    pub fn unit(&self) -> &Arc<SourceUnit> {
        &self.unit
    }

    pub fn kind(&self) -> SyntaxKind {
        self.ptr.kind
    }

    pub fn range(&self) -> TextRange {
        self.ptr.range
    }

    /// Re-locate the node in the unit's current tree.
    pub fn node(&self) -> ResolveResult<SyntaxNode> {
        self.ptr
            .to_node(&self.unit.syntax())
            .ok_or(ResolveError::StaleNode {
                kind: self.ptr.kind,
                range: self.ptr.range,
            })
    }

    pub fn is_stale(&self) -> bool {
        self.node().is_err()
    }

    /// Handle to another node of the same unit.
    pub fn sibling(&self, node: &SyntaxNode) -> NodeHandle {
        NodeHandle::new(self.unit.clone(), node)
    }

    /// Line/column span of the node, for diagnostics.
    pub fn span(&self) -> Span {
        self.unit.line_index().span(self.ptr.range)
    }
}

impl PartialEq for NodeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.unit.id() == other.unit.id() && self.ptr == other.ptr
    }
}

impl Eq for NodeHandle {}

impl Hash for NodeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unit.id().hash(state);
        self.ptr.hash(state);
    }
}

impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeHandle")
            .field("unit", &self.unit.id().index())
            .field("kind", &self.ptr.kind)
            .field("range", &self.ptr.range)
            .finish()
    }
}
