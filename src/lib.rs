//! This file is the root of the `jpegturn` Rust crate.
//!
//! jpegturn is one stage in a streaming media pipeline: it accepts compressed
//! JPEG frames, applies a lossless geometric transform (rotation, flip,
//! transpose, or none) by rearranging encoded DCT coefficient blocks through
//! the TurboJPEG engine (never fully decoding to pixels) and emits a new,
//! correctly-sized compressed frame downstream.
//!
//! The crate's responsibilities are strictly limited to:
//! 1.  Probing just enough of the input bitstream to learn geometry and
//!     subsampling (`codec::probe`).
//! 2.  Computing a safe upper-bound output capacity (`codec::estimate`).
//! 3.  Running the no-reallocation transform inside a caller-supplied region
//!     (`codec::transform`).
//! 4.  Owning the buffer allocate/map/trim lifecycle (`buffer`).
//! 5.  Orchestrating the above per frame and forwarding the trimmed result
//!     with its timing metadata, or surfacing one stream-level error
//!     (`stage`).
//!
//! Pipeline-host concerns (element registration, capability negotiation,
//! event plumbing) stay outside; the host talks to this crate through
//! `StageConfig`, `TransformStage::configure`/`process`, and the `FrameSink`
//! trait.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod buffer;
pub mod codec;
pub mod config;
pub mod stage;
pub mod types;

mod error;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use buffer::{CompressedFrame, FrameBuffer, FrameMeta, HeapAllocator, OutputAllocator};
pub use config::StageConfig;
pub use error::JpegTurnError;
pub use stage::{FrameSink, SharedTransformStage, TransformStage};
pub use types::{ImageGeometry, Subsampling, TransformOperation};
