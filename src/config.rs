// In: src/config.rs

//! The single source of truth for jpegturn stage configuration.
//!
//! This module defines the `StageConfig` struct, designed to be created once
//! at the application boundary (e.g., from a host pipeline's property
//! mechanism or a serialized settings file) and handed to the stage at
//! construction. The transform operation can also be changed later through
//! `TransformStage::configure`, taking effect on the next processed frame.

use crate::types::TransformOperation;
use serde::{Deserialize, Serialize};

/// The unified configuration for a jpegturn stage instance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct StageConfig {
    /// The lossless transform to apply to each frame. Defaults to `none`,
    /// which still runs the full transform-and-trim pass.
    #[serde(default)]
    pub operation: TransformOperation,

    /// Upper bound on a single output allocation, in bytes. The capacity
    /// estimator's worst-case bound must fit under this ceiling or the frame
    /// fails with an allocation error. Guards against malformed headers
    /// declaring absurd dimensions.
    #[serde(default = "default_max_output_capacity")]
    pub max_output_capacity: usize,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            operation: TransformOperation::default(),
            max_output_capacity: default_max_output_capacity(),
        }
    }
}

/// Helper for `serde` to provide the allocation ceiling default. (256 MiB)
fn default_max_output_capacity() -> usize {
    256 * 1024 * 1024
}

//==================================================================================
// Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_for_missing_fields() {
        let config: StageConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.operation, TransformOperation::None);
        assert_eq!(config.max_output_capacity, 256 * 1024 * 1024);
    }

    #[test]
    fn test_operation_parses_from_property_name() {
        let config: StageConfig = serde_json::from_str(r#"{"operation": "rot90"}"#).unwrap();
        assert_eq!(config.operation, TransformOperation::Rot90);
    }
}
