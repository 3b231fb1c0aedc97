//! # OxiGz Inflate
//!
//! Raw DEFLATE (RFC 1951) inflate engine for the OxiGz driver.
//!
//! The decoding itself is done by `miniz_oxide`'s streaming inflater, set up
//! for headerless raw streams (no zlib wrapper, no gzip trailer). This crate
//! adapts it to [`oxigz_core::InflateEngine`]: status mapping, running
//! counters and an end-of-stream check on [`finish`](InflateEngine::finish).
//!
//! ## Example
//!
//! ```rust
//! use oxigz_core::{FlushMode, InflateEngine, StepStatus};
//! use oxigz_inflate::MinizInflater;
//!
//! // Stored block: BFINAL=1, BTYPE=00, LEN=5, NLEN=!5, "Hello"
//! let raw = [0x01, 0x05, 0x00, 0xFA, 0xFF, b'H', b'e', b'l', b'l', b'o'];
//! let mut out = [0u8; 16];
//!
//! let mut engine = MinizInflater::new();
//! let step = engine.step(&raw, &mut out, FlushMode::Sync);
//! assert_eq!(step.status, StepStatus::StreamEnd);
//! assert_eq!(&out[..step.produced], b"Hello");
//! engine.finish().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod engine;

pub use engine::MinizInflater;
