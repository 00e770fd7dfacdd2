// In: src/error.rs

//! This module defines the single, unified error type for the entire jpegturn
//! stage. It uses the `thiserror` crate to provide ergonomic, context-aware
//! error handling.
//!
//! Every variant is non-recoverable *for the current frame*: the stage never
//! retries and never forwards a partial result. The surrounding pipeline
//! decides whether to halt, skip, or terminate the stream.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JpegTurnError {
    // =========================================================================
    // === Per-frame, stream-level failures
    // =========================================================================
    /// The input is not a well-formed JPEG header (truncated, corrupt, or an
    /// unsupported marker sequence).
    #[error("cannot decode JPEG header: {0}")]
    HeaderDecode(String),

    /// The output buffer could not be acquired at the requested capacity.
    #[error("output allocation of {requested} bytes failed: {reason}")]
    Allocation { requested: usize, reason: String },

    /// The transform engine rejected the operation or failed mid-transform
    /// (malformed bitstream past the header, or a subsampling mode the
    /// requested operation does not support).
    #[error("lossless transform failed: {0}")]
    Transform(String),

    /// A scoped map of a buffer region failed.
    #[error("cannot map buffer: {0}")]
    BufferMap(String),

    /// The downstream collaborator refused the forwarded frame.
    #[error("downstream refused frame: {0}")]
    Forward(String),

    // =========================================================================
    // === Configuration & lifecycle failures
    // =========================================================================
    /// A transform operation name from the configuration surface was not one
    /// of the eight recognized values.
    #[error("unrecognized transform operation: {0:?}")]
    UnknownOperation(String),

    /// A per-stage codec handle (decompressor or transformer context) could
    /// not be created at stage construction time.
    #[error("cannot initialize codec context: {0}")]
    CodecInit(String),

    /// An invariant the stage itself must uphold was violated.
    #[error("internal logic error (this is a bug): {0}")]
    Internal(String),
}
