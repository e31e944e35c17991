//! Library half of the `rigmap` CLI: name-list I/O and config discovery.

pub mod names;
pub mod settings;
