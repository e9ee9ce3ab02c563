//! Descriptor file discovery and loading.
//!
//! Pure parsing lives in `domain::config`; this module finds the file,
//! reads it, and merges `--app` flags over it.

mod load_project;

pub use load_project::{LoadedProject, discover_config, load_project};
