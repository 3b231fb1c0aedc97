//! Tunables for the inflate driver and the integrity checks.

use std::num::NonZeroUsize;

/// Default number of compressed bytes handed to the engine per step.
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(size) => size,
    None => unreachable!(),
};

/// Which integrity checks to run around a decompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyConfig {
    /// Check FHCRC against the header bytes (when the field is present).
    pub header_crc: bool,
    /// Check the trailer CRC-32 and ISIZE against the output.
    pub trailer: bool,
}

impl VerifyConfig {
    /// No checks: the bare driver.
    pub const NONE: Self = Self {
        header_crc: false,
        trailer: false,
    };

    /// Trailer CRC-32 and ISIZE only.
    pub const TRAILER: Self = Self {
        header_crc: false,
        trailer: true,
    };

    /// Every check the format allows.
    pub const STRICT: Self = Self {
        header_crc: true,
        trailer: true,
    };
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self::TRAILER
    }
}

/// Settings for decompressing into a freshly allocated buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnpackConfig {
    /// Checks to run.
    pub verify: VerifyConfig,
    /// Largest output buffer that will be allocated.
    pub max_output: usize,
    /// Cap on the first allocation, whatever ISIZE claims.
    pub initial_capacity_limit: usize,
}

impl UnpackConfig {
    /// Trailer verification, 1 GiB output limit.
    pub const DEFAULT: Self = Self {
        verify: VerifyConfig::TRAILER,
        max_output: 1 << 30,
        initial_capacity_limit: 64 << 20,
    };

    /// Same limits as [`DEFAULT`](Self::DEFAULT) with a custom output limit.
    pub fn with_max_output(max_output: usize) -> Self {
        Self {
            max_output,
            ..Self::DEFAULT
        }
    }

    /// Size of the first output buffer to try.
    ///
    /// ISIZE is only a hint (it wraps at 4 GiB and may be forged), so it is
    /// clamped to both limits. Without a trailer the guess is four times the
    /// compressed size.
    pub fn initial_capacity(&self, size_hint: Option<u32>, compressed_len: usize) -> usize {
        let guess = match size_hint {
            Some(size) => size as usize,
            None => compressed_len.saturating_mul(4),
        };
        guess.min(self.initial_capacity_limit).min(self.max_output)
    }
}

impl Default for UnpackConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
