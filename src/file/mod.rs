//! Reading YAML streams from files and stdin.

pub mod loader;
