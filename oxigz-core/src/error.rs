//! Error types for OxiGz operations.
//!
//! Every failure is reported as a distinct [`OxiGzError`] variant. Parsing
//! errors mean the buffer is not a usable gzip member; driver errors describe
//! what the inflate engine reported; verification errors come from the
//! optional header/trailer checks.

use std::io;
use thiserror::Error;

/// The main error type for OxiGz operations.
#[derive(Debug, Error)]
pub enum OxiGzError {
    /// I/O error from the file layer (memory mapping, CLI).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input does not start with the gzip magic `1F 8B`.
    #[error("Invalid gzip magic: expected [1f, 8b], found {found:02x?}")]
    BadMagic {
        /// The leading bytes that were found (at most two).
        found: Vec<u8>,
    },

    /// Compression method other than DEFLATE (8).
    #[error("Unsupported compression method: {method}")]
    UnsupportedMethod {
        /// The method byte from the header.
        method: u8,
    },

    /// A header field would extend past the end of the input.
    #[error("Truncated header: field at offset {offset} needs {needed} bytes, {available} available")]
    TruncatedHeader {
        /// Offset of the field being read.
        offset: usize,
        /// Bytes the field needs (a NUL-terminated field reports one more
        /// than is available).
        needed: usize,
        /// Bytes left in the input from `offset`.
        available: usize,
    },

    /// The header consumed the whole input; there is nothing to inflate.
    #[error("No compressed payload after the gzip header")]
    EmptyPayload,

    /// The destination buffer cannot hold the decompressed content.
    #[error("Output buffer too small: {capacity} bytes is not enough")]
    OutputTooSmall {
        /// Capacity of the buffer that was supplied.
        capacity: usize,
    },

    /// The inflate engine rejected its parameters.
    #[error("Inflate engine rejected its parameters")]
    BadParameter,

    /// The compressed payload could not be decoded.
    #[error("Corrupted data at payload offset {offset}: {message}")]
    CorruptData {
        /// Payload offset (bytes consumed by the engine) at the failure.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// The engine reported an inconsistent state when it was closed.
    #[error("Inflate finalization failed: {message}")]
    FinalizationError {
        /// Description of the inconsistency.
        message: String,
    },

    /// FHCRC did not match the header bytes.
    #[error("Header CRC mismatch: expected {expected:#06x}, computed {computed:#06x}")]
    HeaderCrcMismatch {
        /// Value stored in the header.
        expected: u16,
        /// Value computed over the header.
        computed: u16,
    },

    /// The trailer CRC-32 did not match the decompressed data.
    #[error("CRC mismatch: expected {expected:#x}, computed {computed:#x}")]
    CrcMismatch {
        /// Value stored in the trailer.
        expected: u32,
        /// Value computed over the output.
        computed: u32,
    },

    /// The trailer ISIZE did not match the decompressed length.
    #[error("Size mismatch: trailer says {expected} bytes (mod 2^32), got {actual}")]
    SizeMismatch {
        /// ISIZE from the trailer.
        expected: u32,
        /// Decompressed length.
        actual: u64,
    },

    /// Verification was requested but the input is too short to hold the
    /// 8-byte trailer.
    #[error("Missing gzip trailer")]
    MissingTrailer,
}

/// Result type alias for OxiGz operations.
pub type Result<T> = std::result::Result<T, OxiGzError>;

impl OxiGzError {
    /// Create a bad magic error.
    pub fn bad_magic(found: impl Into<Vec<u8>>) -> Self {
        Self::BadMagic {
            found: found.into(),
        }
    }

    /// Create a truncated header error.
    pub fn truncated(offset: usize, needed: usize, available: usize) -> Self {
        Self::TruncatedHeader {
            offset,
            needed,
            available,
        }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptData {
            offset,
            message: message.into(),
        }
    }

    /// Create a finalization error.
    pub fn finalization(message: impl Into<String>) -> Self {
        Self::FinalizationError {
            message: message.into(),
        }
    }

    /// Create a CRC mismatch error.
    pub fn crc_mismatch(expected: u32, computed: u32) -> Self {
        Self::CrcMismatch { expected, computed }
    }

    /// Whether the error was raised while parsing the header, i.e. the buffer
    /// is not a gzip member this crate can read.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::BadMagic { .. } | Self::UnsupportedMethod { .. } | Self::TruncatedHeader { .. }
        )
    }
}
