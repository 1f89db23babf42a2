//! Application-level utilities for the Vault CLI.
//!
//! - Config path resolution and lazy loading
//! - Master password acquisition

mod context;
mod resolver;

pub use context::AppContext;
pub use resolver::resolve_config_path;
