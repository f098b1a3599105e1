//! Workflow filesystem bridge.
//!
//! A plugin for a node-graph host application. It exposes local
//! filesystem operations over HTTP (`/local_files`,
//! `/file_operations`), serves its frontend assets (`/nz_static`),
//! answers `nz_workflow_manager` messages on the host's websocket bus
//! and declares graph nodes for the host UI.
//!
//! The library never installs a tracing subscriber; the host (or the
//! dev-server binary) owns that.

pub mod bridge;
pub mod constants;
pub mod fileops;
pub mod host;
pub mod nodes;
pub mod server;
pub mod validation;

use std::path::PathBuf;

/// Explicit plugin configuration, passed in at construction.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    /// Directory the `/nz_static` route serves from. The traversal
    /// containment check keeps every resolved path under this root.
    pub web_root: PathBuf,
}

pub use host::{register_when_ready, HostApp, HostError, MessageHandler, Plugin, RetryConfig};
pub use server::router;
