//! Schema checks for version 2 documents
//!
//! Version 2 addresses plugins by URI, so every plugin name a version 2
//! config mentions must look like `io.containerd.<type>.<version>.<id>`.

use crate::document::Config;
use crate::{Error, Result};

const PLUGIN_URI_PREFIX: &str = "io.containerd.";

impl Config {
    /// Check that plugin references match the declared schema version.
    ///
    /// Legacy configs have nothing to check. Loading does not validate; the
    /// daemon calls this once it has the effective config.
    pub fn validate(&self) -> Result<()> {
        let version = self.effective_version();
        if version < 2 {
            tracing::debug!(version, "Config schema version is deprecated, skipping validation");
            return Ok(());
        }

        for uri in &self.required_plugins {
            check_plugin_uri("required plugin", uri)?;
        }
        for uri in &self.disabled_plugins {
            check_plugin_uri("disabled plugin", uri)?;
        }
        for uri in self.plugins.keys() {
            check_plugin_uri("plugin section", uri)?;
        }
        Ok(())
    }
}

fn check_plugin_uri(what: &str, uri: &str) -> Result<()> {
    if !uri.starts_with(PLUGIN_URI_PREFIX) || uri.splitn(4, '.').count() < 4 {
        return Err(Error::Validation {
            message: format!("invalid {what} URI {uri:?}, expected io.containerd.x.vx"),
        });
    }
    Ok(())
}
