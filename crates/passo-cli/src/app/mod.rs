//! Application-level utilities for the Passo CLI.
//!
//! This module provides:
//! - Config path resolution and loading
//! - Session setup (device storage, key, cloud backend)
//! - Password ID resolution

mod context;
mod resolver;

pub use context::{AppContext, Session};
pub use resolver::{resolve_config_path, resolve_record};
