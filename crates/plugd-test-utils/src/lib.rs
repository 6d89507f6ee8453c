//! Shared test utilities for the plugd workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`config_dir`]: [`ConfigDir`] builder for on-disk configuration documents

pub mod config_dir;

pub use config_dir::ConfigDir;

/// Install a `RUST_LOG`-driven subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
