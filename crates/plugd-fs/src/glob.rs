//! Wildcard expansion for import patterns
//!
//! Patterns are matched against the filesystem one path component at a
//! time: `*`, `?` and `[...]` never cross a `/`, while `**` spans any
//! number of directories. Only the pattern is interpreted as a glob; the
//! directory it is resolved in is matched literally, whatever characters
//! its name contains.

use globset::GlobBuilder;
use walkdir::WalkDir;

use crate::{Error, NormalizedPath, Result};

const WILDCARD_CHARS: &[char] = &['*', '?', '['];

/// Whether `pattern` contains wildcard syntax and must be expanded.
pub fn has_wildcard(pattern: &str) -> bool {
    pattern.contains(WILDCARD_CHARS)
}

/// Expand `pattern`, relative to `dir` unless absolute, into the existing
/// paths it matches.
///
/// Matches are absolute, sorted lexicographically and deduplicated. A
/// pattern that matches nothing is not an error.
pub fn expand(dir: &NormalizedPath, pattern: &str) -> Result<Vec<NormalizedPath>> {
    let joined = dir.join(pattern).absolute()?;

    // Cleaning leaves `..` only at the front of a relative pattern, so the
    // components from the first wildcard on are the tail of `joined`.
    let cleaned = NormalizedPath::new(pattern);
    let pattern_segments: Vec<&str> = cleaned.as_str().split('/').collect();
    let tail_len = pattern_segments
        .iter()
        .position(|s| has_wildcard(s))
        .map_or(0, |first| pattern_segments.len() - first);

    let segments: Vec<&str> = joined.as_str().split('/').collect();
    let split = segments.len() - tail_len;
    let base = if split <= 1 {
        format!("{}/", segments[0])
    } else {
        segments[..split].join("/")
    };
    let tail = segments[split..].join("/");

    let escaped_base = globset::escape(&base);
    let glob = match (tail.is_empty(), base.ends_with('/')) {
        (true, _) => escaped_base,
        (false, true) => format!("{escaped_base}{tail}"),
        (false, false) => format!("{escaped_base}/{tail}"),
    };
    let matcher = GlobBuilder::new(&glob)
        .literal_separator(true)
        .build()
        .map_err(|e| Error::InvalidPattern {
            pattern: joined.to_string(),
            message: e.kind().to_string(),
        })?
        .compile_matcher();

    let base = NormalizedPath::new(base);
    if !base.exists() {
        tracing::trace!(pattern, %base, "Wildcard base missing");
        return Ok(Vec::new());
    }

    let mut walker = WalkDir::new(base.to_native()).follow_links(true);
    if !tail.contains("**") {
        walker = walker.max_depth(tail_len);
    }

    let mut matches: Vec<NormalizedPath> = walker
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| NormalizedPath::new(entry.path()))
        .filter(|candidate| matcher.is_match(candidate.as_str()))
        .collect();

    matches.sort();
    matches.dedup();
    tracing::trace!(pattern, %dir, count = matches.len(), "Expanded wildcard pattern");
    Ok(matches)
}
