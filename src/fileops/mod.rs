//! File operations module.
//!
//! Everything the plugin does to the filesystem lives here, transport
//! independent; the HTTP layer, the websocket bridge and the graph nodes
//! all call through these functions.
//!
//! - `types.rs` - wire types (actions, requests, responses, listings)
//! - `listing.rs` - directory enumeration and entry info
//! - `commands.rs` - one function per operation
//! - `error.rs` - error type

pub mod commands;
pub mod error;
pub mod listing;
pub mod types;


pub use error::FileOpError;
pub use types::*;
