//! The configuration data model and document parsing
//!
//! A [`Config`] is what one TOML document deserializes into, and also what
//! the loader accumulates while folding imported documents together.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::{Error, Result};

/// Schema version assumed when a document does not declare one.
pub const LEGACY_VERSION: i64 = 1;

/// Daemon configuration
///
/// Every field defaults to its zero value so that a document only needs to
/// mention what it changes. Unknown top-level keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Schema version; `0` means the document did not declare one
    pub version: i64,

    /// Persistent data directory
    pub root: String,

    /// Transient state directory
    pub state: String,

    /// Directory holding dynamically loaded plugins
    pub plugin_dir: String,

    pub grpc: GrpcConfig,
    pub ttrpc: TtrpcConfig,
    pub debug: DebugConfig,
    pub metrics: MetricsConfig,
    pub cgroup: CgroupConfig,

    /// OOM score adjustment for the daemon process
    pub oom_score: i64,

    /// Named timeouts, e.g. `"io.containerd.timeout.shim.cleanup" = "5s"`
    pub timeouts: HashMap<String, String>,

    /// Import patterns as written in a document.
    ///
    /// After [`load_config`](crate::load_config) this holds every document
    /// that contributed, root first, as absolute paths. It is diagnostic
    /// only and never takes part in a merge.
    pub imports: Vec<String>,

    /// Plugins that must load for the daemon to start
    pub required_plugins: Vec<String>,

    /// Plugins that must not be loaded
    pub disabled_plugins: Vec<String>,

    /// Stream processors keyed by name
    pub stream_processors: HashMap<String, StreamProcessor>,

    /// Out-of-process plugins keyed by name
    pub proxy_plugins: HashMap<String, ProxyPlugin>,

    /// Per-plugin sections keyed by plugin key (see [`plugin_key`](crate::plugin_key))
    pub plugins: HashMap<String, Value>,
}

/// gRPC endpoint settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcConfig {
    pub address: String,
    pub tcp_address: String,
    pub uid: i64,
    pub gid: i64,
    pub max_recv_message_size: i64,
    pub max_send_message_size: i64,
}

/// ttrpc endpoint settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtrpcConfig {
    pub address: String,
    pub uid: i64,
    pub gid: i64,
}

/// Debug endpoint and log settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub address: String,
    pub uid: i64,
    pub gid: i64,
    pub level: String,
    pub format: String,
}

/// Metrics endpoint settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub address: String,
    pub grpc_histogram: bool,
}

/// Cgroup placement of the daemon itself
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CgroupConfig {
    pub path: String,
}

/// An external binary that transforms a stream of one media type into another
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamProcessor {
    /// Media types this processor accepts
    pub accepts: Vec<String>,
    /// Media type this processor returns
    pub returns: String,
    /// Binary to execute
    pub path: String,
    pub args: Vec<String>,
    pub env: Vec<String>,
}

/// A plugin served by another process over a socket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyPlugin {
    #[serde(rename = "type")]
    pub plugin_type: String,
    pub address: String,
}

impl Config {
    /// Parse a configuration document from TOML text.
    ///
    /// # Example
    ///
    /// ```
    /// use plugd_config::Config;
    ///
    /// let config = Config::parse(r#"
    /// version = 2
    /// root = "/var/lib/plugd"
    ///
    /// [plugins."io.containerd.runtime.v1.linux"]
    /// shim_debug = true
    /// "#).unwrap();
    ///
    /// assert_eq!(config.version, 2);
    /// assert_eq!(config.plugins["io.containerd.runtime.v1.linux"]["shim_debug"], true);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        Self::parse_named(content, "<inline>")
    }

    /// Parse TOML text, naming `origin` in any error.
    pub(crate) fn parse_named(content: &str, origin: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Parse {
            origin: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// The schema version to interpret this config with.
    ///
    /// Documents that do not declare a version are treated as version 1.
    pub fn effective_version(&self) -> i64 {
        if self.version != 0 {
            self.version
        } else {
            LEGACY_VERSION
        }
    }
}
