//! Layered configuration engine for the plugd daemon
//!
//! A daemon configuration is assembled from one root document plus the
//! transitive closure of the documents it imports:
//!
//! - **Import resolution** ([`resolve_imports`]): expands each document's
//!   `imports` patterns relative to that document's directory and follows
//!   them recursively, visiting every path at most once.
//! - **Merging** ([`merge`], [`Config::merge_from`]): folds a donor document
//!   into the accumulated base. Scalars are overwritten by non-zero donor
//!   values, sequences are concatenated, keyed records are replaced
//!   wholesale, and plugin sections are replaced one level below the
//!   plugin id.
//! - **Loading** ([`load_config`]): parses the root, resolves its imports and
//!   merges each imported document in traversal order.
//! - **Plugin sections** ([`Config::decode`]): derives the version-dependent
//!   key for a plugin [`Registration`] and decodes its section into a typed
//!   target.
//!
//! # Example
//!
//! ```no_run
//! use plugd_config::{Registration, load_config};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! #[serde(default)]
//! struct CniConfig {
//!     bin_dir: String,
//! }
//!
//! let config = load_config("/etc/plugd/config.toml")?;
//! let mut cni = CniConfig::default();
//! if !config.decode(&Registration::new("io.containerd.grpc.v1", "cni"), &mut cni)? {
//!     println!("cni: using defaults");
//! }
//! # Ok::<(), plugd_config::Error>(())
//! ```

pub mod document;
pub mod error;
pub mod imports;
pub mod loader;
pub mod merge;
pub mod plugin;
pub mod validate;

pub use document::{
    CgroupConfig, Config, DebugConfig, GrpcConfig, MetricsConfig, ProxyPlugin, StreamProcessor,
    TtrpcConfig,
};
pub use error::{Error, Result};
pub use imports::{expand_patterns, resolve_imports};
pub use loader::{load_config, parse_file};
pub use merge::merge;
pub use plugin::{Registration, plugin_key};
