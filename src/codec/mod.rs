// In: src/codec/mod.rs

//! Safe wrappers around the TurboJPEG engine.
//!
//! Three concerns, one per module: probing a header for geometry
//! (`probe`), bounding the worst-case output size (`estimate`), and running
//! the lossless DCT-domain transform under the no-reallocation contract
//! (`transform`). Nothing in here owns buffer lifecycle or stream policy;
//! that belongs to the stage driver.

pub mod estimate;
pub mod probe;
pub mod transform;

pub use estimate::worst_case_len;
pub use probe::GeometryProbe;
pub use transform::TransformExecutor;
