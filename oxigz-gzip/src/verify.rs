//! Header and trailer integrity checks layered over the driver.

use crate::config::{UnpackConfig, VerifyConfig};
use crate::member::GzipMember;
use oxigz_core::crc::{Crc32, header_crc16};
use oxigz_core::error::{OxiGzError, Result};

/// Smallest buffer tried after an `OutputTooSmall` retry.
const MIN_RETRY_CAPACITY: usize = 4096;

impl GzipMember<'_> {
    /// Check FHCRC against the header bytes that precede it.
    ///
    /// Succeeds trivially when the member carries no header CRC.
    pub fn verify_header_crc(&self) -> Result<()> {
        let Some(expected) = self.header_crc() else {
            return Ok(());
        };

        // The CRC16 field is the last two bytes of the header.
        let covered = &self.input()[..self.payload_start() - 2];
        let computed = header_crc16(covered);
        if computed != expected {
            return Err(OxiGzError::HeaderCrcMismatch { expected, computed });
        }
        Ok(())
    }

    /// Check decompressed `data` against the trailer CRC-32 and ISIZE.
    pub fn verify_trailer(&self, data: &[u8]) -> Result<()> {
        let trailer = self.trailer().ok_or(OxiGzError::MissingTrailer)?;

        let computed = Crc32::compute(data);
        if computed != trailer.crc32 {
            return Err(OxiGzError::crc_mismatch(trailer.crc32, computed));
        }
        if !trailer.size_matches(data.len() as u64) {
            return Err(OxiGzError::SizeMismatch {
                expected: trailer.size,
                actual: data.len() as u64,
            });
        }
        Ok(())
    }

    /// Decompress into `out` and run the checks selected by `verify`.
    ///
    /// The header CRC is checked before any inflating. On a trailer mismatch
    /// `out` still holds the decoded bytes.
    pub fn decompress_verified(&self, out: &mut [u8], verify: VerifyConfig) -> Result<usize> {
        if verify.header_crc {
            self.verify_header_crc()?;
        }

        let written = self.decompress(out)?;

        if verify.trailer {
            self.verify_trailer(&out[..written])?;
        }
        Ok(written)
    }

    /// Decompress into a newly allocated vector.
    ///
    /// The first buffer is sized from ISIZE (see
    /// [`UnpackConfig::initial_capacity`]) and doubled on
    /// [`OxiGzError::OutputTooSmall`] until `max_output` is reached.
    pub fn decompress_to_vec(&self, config: &UnpackConfig) -> Result<Vec<u8>> {
        let size_hint = self.trailer().map(|trailer| trailer.size);
        let mut capacity = config.initial_capacity(size_hint, self.data_len());

        loop {
            let mut buf = vec![0u8; capacity];
            match self.decompress_verified(&mut buf, config.verify) {
                Ok(written) => {
                    buf.truncate(written);
                    return Ok(buf);
                }
                Err(OxiGzError::OutputTooSmall { .. }) if capacity < config.max_output => {
                    capacity = capacity
                        .saturating_mul(2)
                        .max(MIN_RETRY_CAPACITY)
                        .min(config.max_output);
                }
                Err(err) => return Err(err),
            }
        }
    }
}
