//! Import resolution
//!
//! Each document may declare `imports`, a list of paths or wildcard
//! patterns. Relative entries are resolved against the directory of the
//! document that declared them, never the process working directory.
//! Resolution follows imported documents recursively, depth first, and
//! records each path the first time it is reached; a path already visited
//! is neither recorded again nor re-read, which is what makes cycles
//! terminate.

use plugd_fs::{NormalizedPath, has_wildcard, io};
use serde::Deserialize;
use std::collections::HashSet;

use crate::{Error, Result};

/// The only part of a document the resolver reads.
#[derive(Debug, Default, Deserialize)]
struct DeclaredImports {
    #[serde(default)]
    imports: Vec<String>,
}

/// Paths already reached during one resolution, plus the order they were
/// reached in.
#[derive(Debug, Default)]
struct ImportTrail {
    visited: HashSet<NormalizedPath>,
    ordered: Vec<NormalizedPath>,
}

impl ImportTrail {
    /// Record `path`, returning false if it was already visited.
    fn visit(&mut self, path: &NormalizedPath) -> bool {
        if !self.visited.insert(path.clone()) {
            return false;
        }
        self.ordered.push(path.clone());
        true
    }
}

/// Resolve the transitive closure of `patterns` declared by `document`.
///
/// Returns absolute, cleaned paths in discovery order with no duplicates.
/// `document` itself counts as visited and is never part of the result,
/// even when something imports it back. Paths that do not exist are kept;
/// they fail later when the loader opens them. A discovered document that
/// cannot be read or parsed contributes no further imports.
///
/// # Errors
///
/// [`Error::InvalidPattern`] for malformed wildcard syntax and
/// [`Error::Path`] if `document` cannot be made absolute.
pub fn resolve_imports(
    document: impl Into<NormalizedPath>,
    patterns: &[String],
) -> Result<Vec<NormalizedPath>> {
    let document = document.into().absolute()?;

    let mut trail = ImportTrail::default();
    trail.visited.insert(document.clone());
    follow(&document, patterns, &mut trail)?;

    Ok(trail.ordered)
}

fn follow(document: &NormalizedPath, patterns: &[String], trail: &mut ImportTrail) -> Result<()> {
    for path in expand_patterns(document, patterns)? {
        if !trail.visit(&path) {
            tracing::trace!(%path, %document, "Import already visited");
            continue;
        }
        tracing::debug!(%path, %document, "Resolved import");

        if let Some(nested) = declared_imports(&path) {
            follow(&path, &nested, trail)?;
        }
    }
    Ok(())
}

/// Resolve the patterns one document declares, without following them.
///
/// Wildcard patterns expand to their sorted filesystem matches; other
/// patterns are joined to the document's directory and cleaned. An absolute
/// pattern replaces the directory entirely.
pub fn expand_patterns(
    document: &NormalizedPath,
    patterns: &[String],
) -> Result<Vec<NormalizedPath>> {
    let document = document.absolute()?;
    let dir = document.parent().ok_or_else(|| Error::Path {
        path: document.to_native(),
        message: "document has no parent directory".to_string(),
    })?;

    let mut resolved = Vec::new();
    for pattern in patterns {
        if has_wildcard(pattern) {
            resolved.extend(plugd_fs::expand(&dir, pattern)?);
        } else {
            resolved.push(dir.join(pattern));
        }
    }
    Ok(resolved)
}

fn declared_imports(path: &NormalizedPath) -> Option<Vec<String>> {
    let content = match io::read_text(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::trace!(%path, error = %e, "Import not readable, not following");
            return None;
        }
    };
    match toml::from_str::<DeclaredImports>(&content) {
        Ok(declared) => Some(declared.imports),
        Err(e) => {
            tracing::trace!(%path, error = %e, "Import not parseable, not following");
            None
        }
    }
}
