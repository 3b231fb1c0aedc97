//! Chunked inflate driver.
//!
//! The payload is already in memory, but it is handed to the engine in
//! windows of at most `chunk_size` new bytes per step. Input the engine leaves
//! unconsumed stays at the front of the next window, so nothing is copied.

use crate::member::GzipMember;
use oxigz_core::error::{OxiGzError, Result};
use oxigz_core::traits::{FlushMode, InflateEngine, StepStatus};
use oxigz_inflate::MinizInflater;

impl GzipMember<'_> {
    /// Decompress the member into `out`, returning the number of bytes
    /// written.
    ///
    /// Uses a fresh [`MinizInflater`]. The trailer is not checked; see
    /// [`decompress_verified`](Self::decompress_verified).
    ///
    /// # Errors
    ///
    /// - [`OxiGzError::EmptyPayload`] if the header consumed the whole input
    /// - [`OxiGzError::OutputTooSmall`] if `out` cannot hold the content
    /// - [`OxiGzError::CorruptData`] if the DEFLATE stream is invalid or cut
    /// - [`OxiGzError::BadParameter`] if the engine rejects its parameters
    /// - [`OxiGzError::FinalizationError`] if the engine closes inconsistently
    ///
    /// # Example
    ///
    /// ```rust
    /// use oxigz_gzip::GzipMember;
    ///
    /// // "Hello" in a stored block, then the trailer.
    /// let data = [
    ///     0x1f, 0x8b, 0x08, 0x00, 0, 0, 0, 0, 0x00, 0xff,
    ///     0x01, 0x05, 0x00, 0xfa, 0xff, b'H', b'e', b'l', b'l', b'o',
    ///     0x82, 0x89, 0xd1, 0xf7, 0x05, 0x00, 0x00, 0x00,
    /// ];
    /// let member = GzipMember::parse(&data).unwrap();
    /// let mut out = [0u8; 32];
    /// let n = member.decompress(&mut out).unwrap();
    /// assert_eq!(&out[..n], b"Hello");
    /// ```
    pub fn decompress(&self, out: &mut [u8]) -> Result<usize> {
        let mut engine = MinizInflater::new();
        self.decompress_with(&mut engine, out)
    }

    /// Decompress with a caller-supplied engine. The engine is reset first,
    /// so one engine can serve many calls.
    pub fn decompress_with<E: InflateEngine>(&self, engine: &mut E, out: &mut [u8]) -> Result<usize> {
        let payload = self.payload();
        if payload.is_empty() {
            return Err(OxiGzError::EmptyPayload);
        }

        engine.reset();

        let chunk_size = self.chunk_size().get();
        let capacity = out.len();
        let mut remaining = payload.len();
        // The engine sees payload[consumed..fed].
        let mut consumed = 0usize;
        let mut fed = 0usize;
        let mut written = 0usize;

        loop {
            let step = chunk_size.min(remaining);
            fed += step;
            remaining -= step;

            let result = engine.step(&payload[consumed..fed], &mut out[written..], FlushMode::Sync);
            consumed += result.consumed;
            written += result.produced;
            let output_full = written == capacity;

            match result.status {
                StepStatus::StreamEnd => break,
                StepStatus::Continue => {
                    // A full output with content still pending stalls the
                    // engine; so does running out of input mid-stream.
                    if !result.made_progress() && (output_full || remaining == 0) {
                        return Err(stalled(output_full, capacity, consumed));
                    }
                }
                StepStatus::ParamError => return Err(OxiGzError::BadParameter),
                StepStatus::DataError => {
                    return Err(OxiGzError::corrupted(
                        consumed as u64,
                        "invalid DEFLATE data",
                    ));
                }
                StepStatus::BufError => {
                    debug_assert!(
                        output_full || remaining == 0,
                        "inflate engine starved with {} payload bytes outstanding",
                        remaining
                    );
                    return Err(stalled(output_full, capacity, consumed));
                }
            }
        }

        engine.finish().map_err(|err| match err {
            err @ OxiGzError::FinalizationError { .. } => err,
            other => OxiGzError::finalization(other.to_string()),
        })?;

        if engine.total_out() != written as u64 {
            return Err(OxiGzError::finalization(format!(
                "engine reports {} bytes produced, driver received {}",
                engine.total_out(),
                written
            )));
        }

        Ok(written)
    }
}

fn stalled(output_full: bool, capacity: usize, consumed: usize) -> OxiGzError {
    if output_full {
        OxiGzError::OutputTooSmall { capacity }
    } else {
        OxiGzError::corrupted(
            consumed as u64,
            "DEFLATE stream ends before its final block",
        )
    }
}
