//! End-to-end scenarios for a daemon configured through drop-in directories
//!
//! Each test lays out a realistic `/etc`-style tree: a root `config.toml`
//! importing `conf.d/*.toml` fragments, some of which import further
//! fragments, then loads it and resolves plugin sections the way the daemon
//! does at startup.

use plugd_config::{Error, Registration, load_config};
use plugd_test_utils::{ConfigDir, init_tracing};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct CniSettings {
    bin_dir: String,
    conf_dir: String,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct CriSettings {
    sandbox_image: String,
    cni: CniSettings,
}

const ROOT: &str = r#"
version = 2
root = "/var/lib/plugd"
state = "/run/plugd"
imports = ["conf.d/*.toml"]

[grpc]
address = "/run/plugd/plugd.sock"

[plugins."io.containerd.grpc.v1.cri"]
sandbox_image = "registry.k8s.io/pause:3.9"
"#;

fn cri() -> Registration {
    Registration::new("io.containerd.grpc.v1", "cri")
}

#[test]
fn test_drop_in_fragments_layer_in_name_order() {
    init_tracing();
    let dir = ConfigDir::new();
    dir.write_all(&[
        ("config.toml", ROOT),
        (
            "conf.d/20-cni.toml",
            r#"
[plugins."io.containerd.grpc.v1.cri".cni]
bin_dir = "/opt/cni/bin"
conf_dir = "/etc/cni/net.d"
"#,
        ),
        (
            "conf.d/10-debug.toml",
            r#"
[debug]
level = "debug"

[timeouts]
"io.containerd.timeout.shim.cleanup" = "5s"
"#,
        ),
    ]);

    let config = load_config(dir.path("config.toml")).unwrap();

    assert_eq!(config.version, 2);
    assert_eq!(config.root, "/var/lib/plugd");
    assert_eq!(config.grpc.address, "/run/plugd/plugd.sock");
    assert_eq!(config.debug.level, "debug");
    assert_eq!(config.timeouts["io.containerd.timeout.shim.cleanup"], "5s");
    assert_eq!(
        config.imports,
        vec![
            dir.import_entry("config.toml"),
            dir.import_entry("conf.d/10-debug.toml"),
            dir.import_entry("conf.d/20-cni.toml"),
        ]
    );
    config.validate().unwrap();

    let mut cri_settings = CriSettings::default();
    assert!(config.decode(&cri(), &mut cri_settings).unwrap());
    assert_eq!(
        cri_settings,
        CriSettings {
            sandbox_image: "registry.k8s.io/pause:3.9".to_string(),
            cni: CniSettings {
                bin_dir: "/opt/cni/bin".to_string(),
                conf_dir: "/etc/cni/net.d".to_string(),
            },
        }
    );
}

#[test]
fn test_later_fragment_clobbers_same_plugin_child() {
    let dir = ConfigDir::new();
    dir.write_all(&[
        ("config.toml", ROOT),
        (
            "conf.d/10-bin.toml",
            "[plugins.\"io.containerd.grpc.v1.cri\".cni]\nbin_dir = \"/opt/cni/bin\"\n",
        ),
        (
            "conf.d/20-conf.toml",
            "[plugins.\"io.containerd.grpc.v1.cri\".cni]\nconf_dir = \"/etc/cni/net.d\"\n",
        ),
    ]);

    let config = load_config(dir.path("config.toml")).unwrap();

    assert_eq!(
        config.plugins["io.containerd.grpc.v1.cri"],
        json!({
            "sandbox_image": "registry.k8s.io/pause:3.9",
            "cni": { "conf_dir": "/etc/cni/net.d" },
        })
    );
}

#[test]
fn test_nested_fragments_and_cycles_load_each_document_once() {
    let dir = ConfigDir::new();
    dir.write_all(&[
        ("config.toml", ROOT),
        (
            "conf.d/10-runtime.toml",
            r#"
imports = ["../runtimes/*.toml", "../config.toml"]
disabled_plugins = ["io.containerd.snapshotter.v1.btrfs"]
"#,
        ),
        (
            "runtimes/runc.toml",
            r#"
imports = ["../conf.d/10-runtime.toml"]
disabled_plugins = ["io.containerd.snapshotter.v1.zfs"]
"#,
        ),
    ]);

    let config = load_config(dir.path("config.toml")).unwrap();

    assert_eq!(
        config.disabled_plugins,
        vec!["io.containerd.snapshotter.v1.btrfs", "io.containerd.snapshotter.v1.zfs"]
    );
    assert_eq!(
        config.imports,
        vec![
            dir.import_entry("config.toml"),
            dir.import_entry("conf.d/10-runtime.toml"),
            dir.import_entry("runtimes/runc.toml"),
        ]
    );
}

#[test]
fn test_legacy_document_keys_plugins_by_id() {
    let dir = ConfigDir::new();
    let path = dir.write(
        "config.toml",
        r#"
imports = ["legacy.d/*.toml"]

[plugins.cri]
sandbox_image = "pause:3.1"
"#,
    );
    dir.write("legacy.d/cni.toml", "[plugins.cri.cni]\nbin_dir = \"/opt/cni/bin\"\n");

    let config = load_config(&path).unwrap();
    assert_eq!(config.effective_version(), 1);

    let mut cri_settings = CriSettings::default();
    assert!(config.decode(&cri(), &mut cri_settings).unwrap());
    assert_eq!(cri_settings.sandbox_image, "pause:3.1");
    assert_eq!(cri_settings.cni.bin_dir, "/opt/cni/bin");

    let mut untouched = CniSettings {
        bin_dir: "/default".to_string(),
        ..Default::default()
    };
    let found = config
        .decode(&Registration::new("io.containerd.grpc.v1", "cni"), &mut untouched)
        .unwrap();
    assert!(!found);
    assert_eq!(untouched.bin_dir, "/default");
}

#[test]
fn test_bad_fragment_aborts_the_whole_load() {
    let dir = ConfigDir::new();
    dir.write_all(&[
        ("config.toml", ROOT),
        ("conf.d/10-ok.toml", "state = \"/run/ok\""),
        ("conf.d/20-bad.toml", "[plugins\n"),
    ]);

    let err = load_config(dir.path("config.toml")).unwrap_err();

    assert!(
        matches!(err, Error::Parse { ref origin, .. } if origin.ends_with("20-bad.toml")),
        "unexpected error: {err}"
    );
}

#[test]
fn test_section_shape_mismatch_is_decode_error() {
    let dir = ConfigDir::new();
    dir.write_all(&[
        ("config.toml", ROOT),
        ("conf.d/10-cni.toml", "[plugins.\"io.containerd.grpc.v1.cri\"]\ncni = \"off\"\n"),
    ]);
    let config = load_config(dir.path("config.toml")).unwrap();

    let mut cri_settings = CriSettings::default();
    let err = config.decode(&cri(), &mut cri_settings).unwrap_err();

    assert!(
        matches!(err, Error::Decode { ref key, .. } if key == "io.containerd.grpc.v1.cri"),
        "unexpected error: {err}"
    );
    assert_eq!(cri_settings, CriSettings::default());
}
