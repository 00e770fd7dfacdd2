// In: src/stage/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Stage Driver
// ====================================================================================
//
// The `stage` module is the public-facing orchestration layer of jpegturn. It
// owns the per-instance codec contexts and the output allocator, and drives
// each frame through a fixed sequence:
//
//   1. [GeometryProbe]      -> header only: width, height, subsampling
//         |
//   2. [worst_case_len]     -> one orientation-symmetric capacity bound
//         |
//   3. [OutputAllocator]    -> fixed-capacity output region
//         |
//   4. [TransformExecutor]  -> no-reallocation transform, reports bytes written
//         |
//   5. [FrameBuffer::trim]  -> same allocation, true length
//         |
//   6. [FrameSink]          -> forwarded with the input's timing metadata
//
// Any step's failure short-circuits the rest and surfaces exactly once as a
// `JpegTurnError`; buffers are released on every path. The driver never
// retries; that is a policy decision of the surrounding pipeline.
// ====================================================================================

use log::debug;
use std::sync::{Mutex, MutexGuard};

use crate::buffer::{CompressedFrame, HeapAllocator, OutputAllocator};
use crate::codec::{self, GeometryProbe, TransformExecutor};
use crate::config::StageConfig;
use crate::error::JpegTurnError;
use crate::types::TransformOperation;

/// The downstream collaborator's contract: accept one finished frame.
///
/// A refusal is a stream-level failure for the frame being forwarded; the
/// stage does not retry or buffer.
pub trait FrameSink {
    fn consume(&mut self, frame: CompressedFrame) -> Result<(), JpegTurnError>;
}

/// A plain collector, handy for tests and in-process hosts.
impl FrameSink for Vec<CompressedFrame> {
    fn consume(&mut self, frame: CompressedFrame) -> Result<(), JpegTurnError> {
        self.push(frame);
        Ok(())
    }
}

/// One lossless-transform stage instance.
///
/// Owns the decompressor and transformer contexts for its lifetime and the
/// allocator used for output regions. Processing is synchronous and handles
/// one frame per invocation; the codec contexts are stateless across frames,
/// so a failed frame never corrupts the next one.
pub struct TransformStage {
    probe: GeometryProbe,
    executor: TransformExecutor,
    allocator: Box<dyn OutputAllocator>,
    operation: TransformOperation,
}

impl TransformStage {
    /// A stage with the default configuration (`none`, default ceiling).
    pub fn new() -> Result<Self, JpegTurnError> {
        Self::with_config(&StageConfig::default())
    }

    /// A stage driven by `config`: the operation comes from
    /// `config.operation`, and the default [`HeapAllocator`] takes its
    /// allocation ceiling from `config.max_output_capacity`.
    pub fn with_config(config: &StageConfig) -> Result<Self, JpegTurnError> {
        Self::with_allocator(config, Box::new(HeapAllocator::new(config.max_output_capacity)))
    }

    /// A stage using a host-supplied allocator (or a failing one, in tests).
    pub fn with_allocator(
        config: &StageConfig,
        allocator: Box<dyn OutputAllocator>,
    ) -> Result<Self, JpegTurnError> {
        Ok(Self {
            probe: GeometryProbe::new()?,
            executor: TransformExecutor::new()?,
            allocator,
            operation: config.operation,
        })
    }

    /// Selects the transform applied to the next processed frame.
    pub fn configure(&mut self, operation: TransformOperation) {
        self.operation = operation;
    }

    /// The currently configured transform operation.
    pub fn operation(&self) -> TransformOperation {
        self.operation
    }

    /// Runs one frame through probe → estimate → allocate → transform → trim.
    ///
    /// Consumes the input frame on every path, success or failure, and
    /// returns the trimmed output carrying the input's timing metadata. On
    /// failure the allocated output region (if any) is dropped, never
    /// forwarded.
    pub fn process(&mut self, frame: CompressedFrame) -> Result<CompressedFrame, JpegTurnError> {
        let meta = frame.meta;
        let operation = self.operation;
        let probe = &mut self.probe;
        let executor = &mut self.executor;
        let allocator = &mut *self.allocator;

        // Steps 1-4 run inside the input's read scope; the input buffer is
        // released when `frame` drops at the end of this call.
        let (output, written, in_len) = frame.data.with_mapped_read(|jpeg| {
            // 1. Probe the header for geometry; no pixel decode.
            let geometry = probe.probe(jpeg)?;

            // 2. One symmetric capacity bound covers all eight operations.
            let capacity = codec::worst_case_len(geometry)?;
            debug!(
                "{}x{} {:?}: worst-case output {} bytes for op {}",
                geometry.width, geometry.height, geometry.subsampling, capacity, operation
            );

            // 3. Acquire the fixed-capacity output region.
            let mut output = allocator.allocate(capacity)?;

            // 4. Transform under the no-reallocation contract.
            let written = output
                .with_mapped_write(|dst| executor.transform_into(jpeg, operation, dst))?;

            Ok((output, written, jpeg.len()))
        })?;

        // 5. Trim to the actual produced size; same allocation, true length.
        let trimmed = output.trim(written)?;
        debug!(
            "transform {}: in {} bytes, out {} bytes, delta {}",
            operation,
            in_len,
            written,
            written as i64 - in_len as i64
        );

        // 6. Hand back with the original timing/sequence metadata.
        Ok(CompressedFrame::new(trimmed, meta))
    }

    /// Processes one frame and forwards the result to `sink`.
    ///
    /// On any failure nothing reaches the sink and the error surfaces exactly
    /// once to the caller.
    pub fn push(
        &mut self,
        frame: CompressedFrame,
        sink: &mut dyn FrameSink,
    ) -> Result<(), JpegTurnError> {
        let output = self.process(frame)?;
        sink.consume(output)
    }
}

/// A `TransformStage` behind a mutex, for host frameworks that may deliver
/// frames from multiple threads.
///
/// The codec contexts are not safe for concurrent use against the same
/// handle, so the lock spans the whole probe-to-trim sequence.
pub struct SharedTransformStage {
    inner: Mutex<TransformStage>,
}

impl SharedTransformStage {
    pub fn new(stage: TransformStage) -> Self {
        Self {
            inner: Mutex::new(stage),
        }
    }

    pub fn configure(&self, operation: TransformOperation) -> Result<(), JpegTurnError> {
        self.lock().map(|mut stage| stage.configure(operation))
    }

    pub fn operation(&self) -> Result<TransformOperation, JpegTurnError> {
        self.lock().map(|stage| stage.operation())
    }

    pub fn process(&self, frame: CompressedFrame) -> Result<CompressedFrame, JpegTurnError> {
        self.lock()?.process(frame)
    }

    pub fn push(
        &self,
        frame: CompressedFrame,
        sink: &mut dyn FrameSink,
    ) -> Result<(), JpegTurnError> {
        self.lock()?.push(frame, sink)
    }

    fn lock(&self) -> Result<MutexGuard<'_, TransformStage>, JpegTurnError> {
        self.inner
            .lock()
            .map_err(|_| JpegTurnError::Internal("stage mutex poisoned".to_string()))
    }
}
