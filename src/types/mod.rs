//! This module defines the core, strongly-typed data representations used
//! throughout the jpegturn stage.
//!
//! It includes the closed `TransformOperation` enum (replacing the original
//! element's runtime-registered property enum) and the header-derived
//! `ImageGeometry` / `Subsampling` types.

pub mod geometry;
pub mod transform_op;

// Re-export the main types for easier access.
pub use geometry::{ImageGeometry, Subsampling};
pub use transform_op::TransformOperation;
