//! Loading a root document together with everything it imports

use plugd_fs::{NormalizedPath, io};
use std::iter;
use std::path::Path;

use crate::Result;
use crate::document::Config;
use crate::imports::resolve_imports;

/// Load the effective configuration rooted at `path`.
///
/// The root document is parsed first and forms the initial base. Its
/// imports are then resolved transitively and each imported document is
/// merged on top in discovery order, so later imports take precedence over
/// earlier ones and over the root. On success `imports` lists every
/// document that contributed, root first.
///
/// Nothing is cached; two calls on the same path produce equal results.
/// The first failure aborts the load.
///
/// # Example
///
/// ```no_run
/// use plugd_config::load_config;
///
/// let config = load_config("/etc/plugd/config.toml")?;
/// println!("root: {}", config.root);
/// # Ok::<(), plugd_config::Error>(())
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let root_path = NormalizedPath::new(path).absolute()?;
    tracing::debug!(path = %root_path, "Loading root config");

    let mut config = parse_file(&root_path)?;
    let imports = resolve_imports(root_path.clone(), &config.imports)?;

    for (layer, import) in imports.iter().enumerate() {
        tracing::debug!(path = %import, layer = layer + 1, "Merging imported config");
        let child = parse_file(import)?;
        config.merge_from(&child);
    }

    config.imports = iter::once(&root_path)
        .chain(imports.iter())
        .map(NormalizedPath::to_string)
        .collect();
    Ok(config)
}

/// Read and parse a single document without following its imports.
pub fn parse_file(path: &NormalizedPath) -> Result<Config> {
    let content = io::read_text(path)?;
    Config::parse_named(&content, path.as_str())
}
