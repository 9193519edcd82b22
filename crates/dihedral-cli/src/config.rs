//! Layered plot configuration: built-in defaults, then the TOML file, then
//! command-line flags and `--set` overrides.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;
