//! The seam between the gzip driver and a raw DEFLATE decoder.
//!
//! The driver never decodes DEFLATE itself. It talks to an [`InflateEngine`]
//! one step at a time, handing it a window of compressed input and the unused
//! tail of the output buffer, and reads back how much was consumed and
//! produced together with a [`StepStatus`].

use crate::error::Result;

/// Flush mode requested for one inflate step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushMode {
    /// No flush - the engine may hold output back.
    #[default]
    None,
    /// Sync flush - emit as much output as possible.
    Sync,
    /// Finish - no more input will follow.
    Finish,
}

/// Outcome reported by the engine for a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Progress was made; call again with more input or output space.
    Continue,
    /// The end of the DEFLATE stream was reached.
    StreamEnd,
    /// The engine was used with invalid parameters.
    ParamError,
    /// The compressed data is invalid.
    DataError,
    /// No progress was possible with the input and output given.
    BufError,
}

impl StepStatus {
    /// Whether the status terminates the stream with an error.
    pub fn is_error(self) -> bool {
        matches!(self, Self::ParamError | Self::DataError)
    }
}

/// Counters and status returned by [`InflateEngine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Bytes of input consumed by this step.
    pub consumed: usize,
    /// Bytes written to the output by this step.
    pub produced: usize,
    /// Engine status after the step.
    pub status: StepStatus,
}

impl StepResult {
    /// Whether the step moved either counter.
    pub fn made_progress(&self) -> bool {
        self.consumed != 0 || self.produced != 0
    }
}

/// A resumable raw DEFLATE decoder.
///
/// Input that an engine does not consume in one step is offered again, at
/// the front of the next step's input slice. Output is always written to the
/// front of the slice passed in.
pub trait InflateEngine {
    /// Return the engine to its initial state for a new stream.
    fn reset(&mut self);

    /// Run one inflate step.
    fn step(&mut self, input: &[u8], output: &mut [u8], flush: FlushMode) -> StepResult;

    /// Close the stream, reporting any inconsistency left in the engine
    /// (stream not terminated, buffered output never delivered, ...).
    fn finish(&mut self) -> Result<()>;

    /// Total bytes consumed since the last reset.
    fn total_in(&self) -> u64;

    /// Total bytes produced since the last reset.
    fn total_out(&self) -> u64;
}

impl<E: InflateEngine + ?Sized> InflateEngine for &mut E {
    fn reset(&mut self) {
        (**self).reset();
    }

    fn step(&mut self, input: &[u8], output: &mut [u8], flush: FlushMode) -> StepResult {
        (**self).step(input, output, flush)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }

    fn total_in(&self) -> u64 {
        (**self).total_in()
    }

    fn total_out(&self) -> u64 {
        (**self).total_out()
    }
}
