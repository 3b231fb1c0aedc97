//! `miniz_oxide` backed [`InflateEngine`].

use miniz_oxide::inflate::stream::{InflateState, inflate};
use miniz_oxide::{DataFormat, MZError, MZFlush, MZStatus};
use oxigz_core::error::{OxiGzError, Result};
use oxigz_core::traits::{FlushMode, InflateEngine, StepResult, StepStatus};

/// Raw DEFLATE decompressor.
///
/// Keeps the 32 KiB history window and any decoded-but-undelivered bytes
/// internally, so output may be handed out across several steps.
pub struct MinizInflater {
    state: Box<InflateState>,
    total_in: u64,
    total_out: u64,
    /// Set once the engine reported the end of the final block.
    ended: bool,
    /// Set once the engine reported a data or parameter error.
    failed: bool,
}

impl MinizInflater {
    /// Create an engine for a headerless raw DEFLATE stream.
    pub fn new() -> Self {
        Self {
            state: InflateState::new_boxed(DataFormat::Raw),
            total_in: 0,
            total_out: 0,
            ended: false,
            failed: false,
        }
    }

    /// Whether the end of the DEFLATE stream has been reached.
    pub fn is_finished(&self) -> bool {
        self.ended
    }
}

impl Default for MinizInflater {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MinizInflater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MinizInflater")
            .field("total_in", &self.total_in)
            .field("total_out", &self.total_out)
            .field("ended", &self.ended)
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}

fn map_flush(flush: FlushMode) -> MZFlush {
    match flush {
        FlushMode::None => MZFlush::None,
        FlushMode::Sync => MZFlush::Sync,
        FlushMode::Finish => MZFlush::Finish,
    }
}

fn map_status(status: std::result::Result<MZStatus, MZError>) -> StepStatus {
    match status {
        Ok(MZStatus::Ok) => StepStatus::Continue,
        Ok(MZStatus::StreamEnd) => StepStatus::StreamEnd,
        // Raw streams carry no dictionary id, so a dictionary request can
        // only come from garbage input.
        Ok(_) => StepStatus::DataError,
        Err(MZError::Data) => StepStatus::DataError,
        Err(MZError::Buf) => StepStatus::BufError,
        // Param, Stream (flush misuse), Version, Mem, ErrNo
        Err(_) => StepStatus::ParamError,
    }
}

impl InflateEngine for MinizInflater {
    fn reset(&mut self) {
        self.state.reset(DataFormat::Raw);
        self.total_in = 0;
        self.total_out = 0;
        self.ended = false;
        self.failed = false;
    }

    fn step(&mut self, input: &[u8], output: &mut [u8], flush: FlushMode) -> StepResult {
        if self.ended {
            return StepResult {
                consumed: 0,
                produced: 0,
                status: StepStatus::StreamEnd,
            };
        }

        let result = inflate(&mut self.state, input, output, map_flush(flush));
        let status = map_status(result.status);

        self.total_in += result.bytes_consumed as u64;
        self.total_out += result.bytes_written as u64;
        match status {
            StepStatus::StreamEnd => self.ended = true,
            s if s.is_error() => self.failed = true,
            _ => {}
        }

        StepResult {
            consumed: result.bytes_consumed,
            produced: result.bytes_written,
            status,
        }
    }

    fn finish(&mut self) -> Result<()> {
        if self.failed {
            return Err(OxiGzError::finalization("engine closed after a decode error"));
        }
        if !self.ended {
            return Err(OxiGzError::finalization(format!(
                "stream not terminated after {} input bytes",
                self.total_in
            )));
        }
        Ok(())
    }

    fn total_in(&self) -> u64 {
        self.total_in
    }

    fn total_out(&self) -> u64 {
        self.total_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniz_oxide::deflate::compress_to_vec;

    const STORED_HELLO: [u8; 10] = [
        0x01, // BFINAL=1, BTYPE=00, padding
        0x05, 0x00, // LEN=5
        0xFA, 0xFF, // NLEN
        b'H', b'e', b'l', b'l', b'o',
    ];

    #[test]
    fn test_stored_block() {
        let mut engine = MinizInflater::new();
        let mut out = [0u8; 8];

        let step = engine.step(&STORED_HELLO, &mut out, FlushMode::Sync);
        assert_eq!(step.status, StepStatus::StreamEnd);
        assert_eq!(step.consumed, STORED_HELLO.len());
        assert_eq!(&out[..step.produced], b"Hello");
        assert!(engine.is_finished());
        assert_eq!(engine.total_out(), 5);
        engine.finish().unwrap();
    }

    #[test]
    fn test_byte_at_a_time() {
        let data = b"byte at a time, byte at a time, byte at a time".repeat(20);
        let compressed = compress_to_vec(&data, 6);

        let mut engine = MinizInflater::new();
        let mut out = vec![0u8; data.len()];
        let mut consumed = 0;
        let mut written = 0;
        let mut fed = 0;

        loop {
            fed = (fed + 1).min(compressed.len());
            let step = engine.step(
                &compressed[consumed..fed],
                &mut out[written..],
                FlushMode::Sync,
            );
            consumed += step.consumed;
            written += step.produced;
            if step.status == StepStatus::StreamEnd {
                break;
            }
            assert!(!step.status.is_error());
        }

        assert_eq!(written, data.len());
        assert_eq!(out, data);
        assert_eq!(engine.total_in(), consumed as u64);
        engine.finish().unwrap();
    }

    #[test]
    fn test_invalid_block_type() {
        // BFINAL=1, BTYPE=11 (reserved)
        let mut engine = MinizInflater::new();
        let mut out = [0u8; 8];
        let step = engine.step(&[0x07, 0x00, 0x00], &mut out, FlushMode::Sync);
        assert_eq!(step.status, StepStatus::DataError);
        assert!(engine.finish().is_err());
    }

    #[test]
    fn test_starved_engine() {
        let mut engine = MinizInflater::new();
        let mut out = [0u8; 8];
        // Half of a stored block header, then nothing more.
        let first = engine.step(&STORED_HELLO[..2], &mut out, FlushMode::Sync);
        assert_eq!(first.status, StepStatus::Continue);
        let second = engine.step(&[], &mut out, FlushMode::Sync);
        assert_eq!(second.status, StepStatus::BufError);
    }

    #[test]
    fn test_finish_before_end() {
        let mut engine = MinizInflater::new();
        let mut out = [0u8; 8];
        engine.step(&STORED_HELLO[..3], &mut out, FlushMode::Sync);
        let err = engine.finish().unwrap_err();
        assert!(matches!(err, OxiGzError::FinalizationError { .. }));
    }

    #[test]
    fn test_reset_reuses_engine() {
        let mut engine = MinizInflater::new();
        let mut out = [0u8; 8];
        engine.step(&STORED_HELLO, &mut out, FlushMode::Sync);
        assert!(engine.is_finished());

        engine.reset();
        assert!(!engine.is_finished());
        assert_eq!(engine.total_in(), 0);

        let step = engine.step(&STORED_HELLO, &mut out, FlushMode::Sync);
        assert_eq!(step.status, StepStatus::StreamEnd);
        assert_eq!(&out[..5], b"Hello");
    }

    #[test]
    fn test_output_delivered_across_steps() {
        let data = vec![b'z'; 4096];
        let compressed = compress_to_vec(&data, 9);
        let mut engine = MinizInflater::new();
        let mut out = vec![0u8; data.len()];

        // Small output windows: the engine keeps the rest internally.
        let mut consumed = 0;
        let mut written = 0;
        loop {
            let end = (written + 100).min(out.len());
            let step = engine.step(&compressed[consumed..], &mut out[written..end], FlushMode::Sync);
            consumed += step.consumed;
            written += step.produced;
            if step.status == StepStatus::StreamEnd {
                break;
            }
            assert!(step.made_progress());
        }
        assert_eq!(out, data);
    }
}
