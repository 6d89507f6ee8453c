//! Field-level merge of two configurations
//!
//! The base is the accumulator and the donor is layered on top of it:
//!
//! - scalars take the donor value unless it is the zero value of its type
//! - sequences are concatenated, base first, without deduplication
//! - `timeouts` is a plain union, the donor winning on shared keys
//! - `stream_processors` and `proxy_plugins` are a union in which a shared
//!   key takes the donor's whole record; fields are never mixed
//! - `plugins` is a union keyed by plugin id. For an id present on both
//!   sides the plugin's direct children are unioned and the donor's value
//!   for a shared child replaces the base's wholesale. Nothing deeper is
//!   merged, so `cni.bin_dir` in one document and `cni.conf_dir` in the
//!   next leaves only `conf_dir`.
//!
//! `imports` is diagnostic and is left as the base has it.

use serde_json::Value;
use std::collections::HashMap;

use crate::document::{CgroupConfig, Config, DebugConfig, GrpcConfig, MetricsConfig, TtrpcConfig};

/// Merge `donor` on top of `base`, returning the result.
///
/// Neither operand is modified. The operation is not commutative: the donor
/// wins every conflict it has a non-zero value for.
pub fn merge(base: &Config, donor: &Config) -> Config {
    let mut merged = base.clone();
    merged.merge_from(donor);
    merged
}

impl Config {
    /// Merge `donor` into this config in place.
    ///
    /// See the [module documentation](self) for the per-field rules.
    pub fn merge_from(&mut self, donor: &Config) {
        overlay(&mut self.version, &donor.version);
        overlay(&mut self.root, &donor.root);
        overlay(&mut self.state, &donor.state);
        overlay(&mut self.plugin_dir, &donor.plugin_dir);
        overlay(&mut self.oom_score, &donor.oom_score);

        self.grpc.merge_from(&donor.grpc);
        self.ttrpc.merge_from(&donor.ttrpc);
        self.debug.merge_from(&donor.debug);
        self.metrics.merge_from(&donor.metrics);
        self.cgroup.merge_from(&donor.cgroup);

        self.required_plugins.extend(donor.required_plugins.iter().cloned());
        self.disabled_plugins.extend(donor.disabled_plugins.iter().cloned());

        replace_entries(&mut self.timeouts, &donor.timeouts);
        replace_entries(&mut self.stream_processors, &donor.stream_processors);
        replace_entries(&mut self.proxy_plugins, &donor.proxy_plugins);

        merge_plugin_sections(&mut self.plugins, &donor.plugins);
    }
}

impl GrpcConfig {
    fn merge_from(&mut self, donor: &Self) {
        overlay(&mut self.address, &donor.address);
        overlay(&mut self.tcp_address, &donor.tcp_address);
        overlay(&mut self.uid, &donor.uid);
        overlay(&mut self.gid, &donor.gid);
        overlay(&mut self.max_recv_message_size, &donor.max_recv_message_size);
        overlay(&mut self.max_send_message_size, &donor.max_send_message_size);
    }
}

impl TtrpcConfig {
    fn merge_from(&mut self, donor: &Self) {
        overlay(&mut self.address, &donor.address);
        overlay(&mut self.uid, &donor.uid);
        overlay(&mut self.gid, &donor.gid);
    }
}

impl DebugConfig {
    fn merge_from(&mut self, donor: &Self) {
        overlay(&mut self.address, &donor.address);
        overlay(&mut self.uid, &donor.uid);
        overlay(&mut self.gid, &donor.gid);
        overlay(&mut self.level, &donor.level);
        overlay(&mut self.format, &donor.format);
    }
}

impl MetricsConfig {
    fn merge_from(&mut self, donor: &Self) {
        overlay(&mut self.address, &donor.address);
        overlay(&mut self.grpc_histogram, &donor.grpc_histogram);
    }
}

impl CgroupConfig {
    fn merge_from(&mut self, donor: &Self) {
        overlay(&mut self.path, &donor.path);
    }
}

/// Take the donor's value unless it is the zero value of its type.
fn overlay<T: Clone + Default + PartialEq>(base: &mut T, donor: &T) {
    if *donor != T::default() {
        *base = donor.clone();
    }
}

/// Union of both maps; a key on both sides takes the donor's whole value.
fn replace_entries<V: Clone>(base: &mut HashMap<String, V>, donor: &HashMap<String, V>) {
    for (key, value) in donor {
        base.insert(key.clone(), value.clone());
    }
}

fn merge_plugin_sections(base: &mut HashMap<String, Value>, donor: &HashMap<String, Value>) {
    for (id, donor_section) in donor {
        if let (Some(Value::Object(base_section)), Value::Object(donor_children)) =
            (base.get_mut(id), donor_section)
        {
            for (child, value) in donor_children {
                base_section.insert(child.clone(), value.clone());
            }
            continue;
        }
        base.insert(id.clone(), donor_section.clone());
    }
}
