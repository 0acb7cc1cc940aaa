//! Symbol source over a source root laid out by package.
//!
//! `a.b.C` is looked for in `<root>/a/b/C.java`. A nested type `a.b.C.D`
//! falls back to `<root>/a/b/C.java` when `<root>/a/b/C/D.java` does not
//! exist. Files are read and parsed lazily, once.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use walkdir::WalkDir;

use super::TypeSolver;
use crate::base::constants::{QUALIFIED_SEPARATOR, SOURCE_EXTENSION};
use crate::model::{SymbolReference, TypeDecl};
use crate::syntax::SourceUnit;

/// Types found by file path under a source root.
#[derive(Debug)]
pub struct DirectoryTypeSolver {
    root: PathBuf,
    extension: String,
    /// Parsed units by path; `None` records a missing or unusable file.
    units: RwLock<FxHashMap<PathBuf, Option<Arc<SourceUnit>>>>,
}

impl DirectoryTypeSolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: SOURCE_EXTENSION.to_string(),
            units: RwLock::new(FxHashMap::default()),
        }
    }

    /// Use a different source file extension (without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All source files under the root, sorted.
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files: Vec<_> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(root = %self.root.display(), error = %err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext == self.extension.as_str())
            })
            .collect();
        files.sort();
        files
    }

    /// Drop every cached unit so files are re-read on the next lookup.
    pub fn clear_cache(&self) {
        self.units.write().clear();
    }

    fn file_for(&self, segments: &[&str]) -> PathBuf {
        let mut path = self.root.clone();
        for segment in segments {
            path.push(segment);
        }
        path.set_extension(&self.extension);
        path
    }

    /// Read and parse `path`, caching the outcome.
    fn load(&self, path: &Path) -> Option<Arc<SourceUnit>> {
        if let Some(cached) = self.units.read().get(path) {
            return cached.clone();
        }
        let unit = match std::fs::read_to_string(path) {
            Ok(text) => {
                let unit = SourceUnit::parse_file(path, &text);
                if unit.has_errors() {
                    tracing::warn!(
                        path = %path.display(),
                        errors = unit.errors().len(),
                        "ignoring source file with syntax errors"
                    );
                    None
                } else {
                    Some(unit)
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read source file");
                None
            }
        };
        self.units
            .write()
            .entry(path.to_path_buf())
            .or_insert(unit)
            .clone()
    }
}

impl TypeSolver for DirectoryTypeSolver {
    fn try_solve_type(&self, qualified_name: &str) -> SymbolReference<TypeDecl> {
        let segments: Vec<&str> = qualified_name.split(QUALIFIED_SEPARATOR).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return SymbolReference::Unsolved;
        }
        // Longest file path first: a/b/C/D.java, then a/b/C.java holding D.
        for split in (1..=segments.len()).rev() {
            let (file_segments, _) = segments.split_at(split);
            let path = self.file_for(file_segments);
            let Some(unit) = self.load(&path) else {
                continue;
            };
            let package = &segments[..split - 1];
            if unit.package_name().unwrap_or_default() != package.join(".") {
                tracing::debug!(
                    path = %path.display(),
                    expected = %package.join("."),
                    "package clause does not match file location"
                );
                continue;
            }
            let type_path = &segments[split - 1..];
            if let Some(handle) = unit.find_type(type_path) {
                return super::decl_from_index(qualified_name, Some(&handle));
            }
        }
        SymbolReference::Unsolved
    }
}
