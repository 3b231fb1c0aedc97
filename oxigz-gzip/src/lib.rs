//! # OxiGz Gzip
//!
//! In-memory gzip (RFC 1952) member support for OxiGz.
//!
//! - **Parsing**: [`GzipMember::parse`] validates the fixed header, walks the
//!   optional FEXTRA / FNAME / FCOMMENT / FHCRC sections and records where
//!   the compressed payload starts. Nothing is copied; every field borrows
//!   from the caller's buffer.
//! - **Inflating**: [`GzipMember::decompress`] hands the payload to a raw
//!   DEFLATE engine in bounded chunks and writes into a caller-supplied
//!   buffer.
//! - **Verification**: [`GzipMember::decompress_verified`] adds the header
//!   CRC16 and trailer CRC-32 / ISIZE checks.
//!
//! ## Example
//!
//! ```rust
//! use oxigz_gzip::{GzipMember, VerifyConfig};
//!
//! // "Hello" in a stored block.
//! let data = [
//!     0x1f, 0x8b, 0x08, 0x08, 0, 0, 0, 0, 0x00, 0x03,
//!     b'h', b'i', b'.', b't', b'x', b't', 0x00,
//!     0x01, 0x05, 0x00, 0xfa, 0xff, b'H', b'e', b'l', b'l', b'o',
//!     0x82, 0x89, 0xd1, 0xf7, 0x05, 0x00, 0x00, 0x00,
//! ];
//!
//! let member = GzipMember::parse(&data).unwrap();
//! assert_eq!(member.name(), Some(&b"hi.txt"[..]));
//!
//! let mut out = [0u8; 16];
//! let n = member.decompress_verified(&mut out, VerifyConfig::STRICT).unwrap();
//! assert_eq!(&out[..n], b"Hello");
//! ```
//!
//! ## Chunking
//!
//! The engine is offered at most [`GzipMember::chunk_size`] new payload bytes
//! per step ([`DEFAULT_CHUNK_SIZE`] unless changed with
//! [`GzipMember::set_chunk_size`]). The chunk size bounds the work done per
//! step; it never changes the output.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod header;
pub mod member;
mod unpack;
mod verify;

// Re-exports
pub use config::{DEFAULT_CHUNK_SIZE, UnpackConfig, VerifyConfig};
pub use header::{ExtraSubfield, ExtraSubfields, OperatingSystem, Trailer};
pub use member::GzipMember;
pub use oxigz_core::error::{OxiGzError, Result};

/// Decompress a complete gzip member with trailer verification.
///
/// Shorthand for [`GzipMember::parse`] followed by
/// [`GzipMember::decompress_to_vec`] with [`UnpackConfig::DEFAULT`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    GzipMember::parse(data)?.decompress_to_vec(&UnpackConfig::DEFAULT)
}
