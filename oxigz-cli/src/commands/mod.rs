//! Command implementations for OxiGz CLI.

pub mod completions;
pub mod decompress;
pub mod info;

pub use completions::cmd_completions;
pub use decompress::{DecompressOptions, cmd_decompress};
pub use info::cmd_info;
pub use test::cmd_test;
