//! # OxiGz Core
//!
//! Core components shared by the OxiGz crates.
//!
//! - [`error`]: the error type every layer returns
//! - [`crc`]: CRC-32 as used by the gzip trailer and header check
//! - [`traits`]: the [`InflateEngine`] seam between the gzip driver and a
//!   raw DEFLATE decoder
//! - `mmap`: read-only memory-mapped input (feature `mmap`)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! │     oxigz decompress / test / info                      │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Container                                           │
//! │     gzip frame parser, chunked inflate driver           │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     raw DEFLATE engine (InflateEngine impl)             │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Core (this crate)                                   │
//! │     errors, CRC-32, engine trait                        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxigz_core::crc::Crc32;
//!
//! let crc = Crc32::compute(b"Hello, World!");
//! assert_eq!(crc, 0xEC4AC3D0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod crc;
pub mod error;
#[cfg(feature = "mmap")]
pub mod mmap;
pub mod traits;

// Re-exports for convenience
pub use crc::Crc32;
pub use error::{OxiGzError, Result};
#[cfg(feature = "mmap")]
pub use mmap::MappedInput;
pub use traits::{FlushMode, InflateEngine, StepResult, StepStatus};
