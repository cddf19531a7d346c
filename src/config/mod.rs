// src/config/mod.rs

//! Startup settings: CLI flags, an optional TOML file, and validation into
//! an immutable [`WatchTarget`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, merge_cli};
pub use model::{RawSettings, Settings, WatchTarget};
pub use validate::validate_with;
