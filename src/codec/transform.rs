//! The lossless DCT-domain transform, under the no-reallocation contract.

use crate::error::JpegTurnError;
use crate::types::TransformOperation;

/// Executes lossless transforms against a per-stage transformer context.
///
/// The context is created once at stage construction, released on drop, and
/// stateless across frames. It is not safe for concurrent use from multiple
/// threads; hosts that deliver frames concurrently must serialize access
/// (see `stage::SharedTransformStage`).
pub struct TransformExecutor {
    transformer: turbojpeg::Transformer,
}

// SAFETY: a TurboJPEG handle may be used from any thread as long as it is not
// used concurrently; `&mut self` on every method enforces that here. The
// turbojpeg crate makes the same assertion for its `Compressor` and
// `Decompressor` wrappers but omits it for `Transformer`.
unsafe impl Send for TransformExecutor {}

impl TransformExecutor {
    pub fn new() -> Result<Self, JpegTurnError> {
        let transformer = turbojpeg::Transformer::new()
            .map_err(|e| JpegTurnError::CodecInit(format!("cannot init transformer: {}", e)))?;
        Ok(Self { transformer })
    }

    /// Applies `op` to `jpeg`, writing the result entirely inside `output`.
    ///
    /// Returns the number of bytes written, always `<= output.len()`: the
    /// output region is handed to the engine borrowed, so the engine errors
    /// out rather than reallocating if the result would not fit. The caller
    /// must size `output` from [`crate::codec::worst_case_len`]; an
    /// undersized region is a caller bug that surfaces as a transform error.
    ///
    /// Trim-to-actual-size is always requested, so partial edge blocks that
    /// an axis swap would misplace are dropped rather than corrupted. The
    /// `None` operation runs the same pass as every other operation.
    ///
    /// On failure the contents of `output` are unspecified and must be
    /// discarded; `jpeg` is never modified.
    pub fn transform_into(
        &mut self,
        jpeg: &[u8],
        op: TransformOperation,
        output: &mut [u8],
    ) -> Result<usize, JpegTurnError> {
        let mut descriptor = turbojpeg::Transform::op(op.to_tj());
        descriptor.trim = true;

        let mut dst = turbojpeg::OutputBuf::borrowed(output);
        self.transformer
            .transform(&descriptor, jpeg, &mut dst)
            .map_err(|e| JpegTurnError::Transform(e.to_string()))?;
        Ok(dst.len())
    }
}
