//! Text reads that keep the offending path in the error

use std::fs;

use crate::{Error, NormalizedPath, Result};

/// Read a whole file as UTF-8 text.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

