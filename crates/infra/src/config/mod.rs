//! Client configuration loading
//!
//! Environment variables (`GREENLOOP_*`, optionally from `.env`) win; a
//! `config.{json,toml}` or `greenloop.{json,toml}` file is the fallback.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
