//! Filesystem helpers for plugd
//!
//! Provides lexical path normalization, wildcard expansion for import
//! patterns and path-aware text reads. Nothing here knows about the
//! configuration schema.

pub mod error;
pub mod glob;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use glob::{expand, has_wildcard};
pub use path::NormalizedPath;
