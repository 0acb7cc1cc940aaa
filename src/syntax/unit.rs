//! Source units: the owning structure for parsed files.
//!
//! A [`SourceUnit`] owns the green tree of one compilation unit. Declarations
//! never own syntax; they hold [`NodeHandle`]s that re-locate their node in
//! the unit's current tree on every access.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::RwLock;

use super::handle::NodeHandle;
use crate::base::{LineIndex, join_qualified};
use crate::parser::ast::{Member, SourceFile, TypeDecl};
use crate::parser::{AstNode, GreenNode, SyntaxError, SyntaxNode, parse};

static NEXT_UNIT_ID: AtomicU32 = AtomicU32::new(0);

/// Process-unique identity of a source unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitId(u32);

impl UnitId {
    fn fresh() -> Self {
        Self(NEXT_UNIT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

#[derive(Debug)]
struct UnitState {
    text: Arc<str>,
    green: GreenNode,
    errors: Vec<SyntaxError>,
    revision: u64,
}

impl UnitState {
    fn parse(text: &str, revision: u64) -> Self {
        let parsed = parse(text);
        Self {
            text: Arc::from(text),
            green: parsed.green,
            errors: parsed.errors,
            revision,
        }
    }
}

/// One parsed compilation unit.
#[derive(Debug)]
pub struct SourceUnit {
    id: UnitId,
    path: Option<PathBuf>,
    state: RwLock<UnitState>,
}

impl SourceUnit {
    /// Parse source text into a new unit with no backing file.
    pub fn parse(text: &str) -> Arc<Self> {
        Arc::new(Self {
            id: UnitId::fresh(),
            path: None,
            state: RwLock::new(UnitState::parse(text, 0)),
        })
    }

    /// Parse source text read from `path`.
    pub fn parse_file(path: impl Into<PathBuf>, text: &str) -> Arc<Self> {
        Arc::new(Self {
            id: UnitId::fresh(),
            path: Some(path.into()),
            state: RwLock::new(UnitState::parse(text, 0)),
        })
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of times the text has been replaced.
    pub fn revision(&self) -> u64 {
        self.state.read().revision
    }

    pub fn text(&self) -> Arc<str> {
        self.state.read().text.clone()
    }

    pub fn errors(&self) -> Vec<SyntaxError> {
        self.state.read().errors.clone()
    }

    pub fn has_errors(&self) -> bool {
        !self.state.read().errors.is_empty()
    }

    pub fn line_index(&self) -> LineIndex {
        LineIndex::new(&self.state.read().text)
    }

    /// A fresh root over the current tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.state.read().green.clone())
    }

    pub fn source_file(&self) -> Option<SourceFile> {
        SourceFile::cast(self.syntax())
    }

    /// Reparse the unit with new text. Existing handles into nodes that no
    /// longer exist become stale.
    pub fn replace_text(&self, text: &str) {
        let mut state = self.state.write();
        let revision = state.revision + 1;
        *state = UnitState::parse(text, revision);
        tracing::debug!(unit = self.id.0, revision, "source unit reparsed");
    }

    /// Create a handle to a node of this unit's current tree.
    pub fn handle(self: &Arc<Self>, node: &SyntaxNode) -> NodeHandle {
        NodeHandle::new(self.clone(), node)
    }

    /// Dotted name from the `package` clause, or `None` for the default package.
    pub fn package_name(&self) -> Option<String> {
        self.source_file()?
            .package_decl()?
            .path()
            .map(|p| p.qualified())
    }

    /// Top-level type declarations in source order.
    pub fn type_declarations(self: &Arc<Self>) -> Vec<NodeHandle> {
        self.source_file()
            .map(|file| {
                file.type_decls()
                    .map(|decl| self.handle(decl.syntax()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Find a type declared in this unit by its path of simple names,
    /// outermost first (`["Outer", "Inner"]`).
    pub fn find_type(self: &Arc<Self>, names: &[&str]) -> Option<NodeHandle> {
        let (first, rest) = names.split_first()?;
        let file = self.source_file()?;
        let mut current = file
            .type_decls()
            .find(|decl| decl.name().as_deref() == Some(*first))?;
        for name in rest {
            current = current.members().into_iter().find_map(|member| match member {
                Member::Type(decl) if decl.name().as_deref() == Some(*name) => {
                    Some(decl)
                }
                _ => None,
            })?;
        }
        Some(self.handle(current.syntax()))
    }
}

/// Iterate over a type declaration and all member types nested in it,
/// paired with their names relative to the outermost type.
pub(crate) fn nested_types(decl: TypeDecl, prefix: String, out: &mut Vec<(String, TypeDecl)>) {
    let Some(name) = decl.name() else {
        return;
    };
    let qualified = join_qualified(&prefix, &name);
    for member in decl.members() {
        if let Member::Type(inner) = member {
            nested_types(inner, qualified.clone(), out);
        }
    }
    out.push((qualified, decl));
}
