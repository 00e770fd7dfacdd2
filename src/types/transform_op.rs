//! The canonical, type-safe representation of the eight lossless transform
//! operations.
//!
//! The original element registered these as a runtime enum with its property
//! system; here they are a closed tagged type so exhaustive handling is
//! checked at compile time instead of via a default/warn branch.

use crate::error::JpegTurnError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A lossless geometric operation on a compressed JPEG image.
///
/// All eight operations rearrange encoded DCT coefficient blocks; none of
/// them decodes pixel data. `None` is a real operation, not a bypass: the
/// frame still runs through the transform engine so the trim step always
/// applies.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransformOperation {
    /// Do not transform the position of the image pixels.
    #[default]
    None,
    /// Flip (mirror) the image horizontally.
    HFlip,
    /// Flip (mirror) the image vertically.
    VFlip,
    /// Transpose: mirror along the upper-left to lower-right axis.
    Transpose,
    /// Transverse transpose: mirror along the upper-right to lower-left axis.
    Transverse,
    /// Rotate clockwise by 90 degrees.
    Rot90,
    /// Rotate clockwise by 180 degrees.
    Rot180,
    /// Rotate clockwise by 270 degrees.
    Rot270,
}

impl TransformOperation {
    /// All eight operations, in property-surface order.
    pub const ALL: [Self; 8] = [
        Self::None,
        Self::HFlip,
        Self::VFlip,
        Self::Transpose,
        Self::Transverse,
        Self::Rot90,
        Self::Rot180,
        Self::Rot270,
    ];

    /// Whether this operation swaps the output's width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Transverse | Self::Rot90 | Self::Rot270
        )
    }

    /// The operation that undoes this one. Every element of the dihedral
    /// group is its own inverse except the quarter rotations.
    pub fn inverse(self) -> Self {
        match self {
            Self::Rot90 => Self::Rot270,
            Self::Rot270 => Self::Rot90,
            other => other,
        }
    }

    /// The property-surface name of this operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::HFlip => "hflip",
            Self::VFlip => "vflip",
            Self::Transpose => "transpose",
            Self::Transverse => "transverse",
            Self::Rot90 => "rot90",
            Self::Rot180 => "rot180",
            Self::Rot270 => "rot270",
        }
    }

    /// Converts to the transform engine's operation descriptor.
    pub(crate) fn to_tj(self) -> turbojpeg::TransformOp {
        match self {
            Self::None => turbojpeg::TransformOp::None,
            Self::HFlip => turbojpeg::TransformOp::Hflip,
            Self::VFlip => turbojpeg::TransformOp::Vflip,
            Self::Transpose => turbojpeg::TransformOp::Transpose,
            Self::Transverse => turbojpeg::TransformOp::Transverse,
            Self::Rot90 => turbojpeg::TransformOp::Rot90,
            Self::Rot180 => turbojpeg::TransformOp::Rot180,
            Self::Rot270 => turbojpeg::TransformOp::Rot270,
        }
    }
}

/// The canonical string form, identical to the configuration-surface nicks.
impl fmt::Display for TransformOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransformOperation {
    type Err = JpegTurnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "hflip" => Ok(Self::HFlip),
            "vflip" => Ok(Self::VFlip),
            "transpose" => Ok(Self::Transpose),
            "transverse" => Ok(Self::Transverse),
            "rot90" => Ok(Self::Rot90),
            "rot180" => Ok(Self::Rot180),
            "rot270" => Ok(Self::Rot270),
            other => Err(JpegTurnError::UnknownOperation(other.to_string())),
        }
    }
}

//==================================================================================
// Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_names_roundtrip_for_all_operations() {
        for op in TransformOperation::ALL {
            let parsed: TransformOperation = op.as_str().parse().unwrap();
            assert_eq!(parsed, op, "roundtrip failed for {}", op);
        }
    }

    #[test]
    fn test_unknown_operation_name_is_rejected() {
        let result = "rot45".parse::<TransformOperation>();
        assert!(matches!(result, Err(JpegTurnError::UnknownOperation(_))));
    }

    #[test]
    fn test_default_is_none() {
        assert_eq!(TransformOperation::default(), TransformOperation::None);
    }

    #[test]
    fn test_axis_swapping_operations() {
        use TransformOperation::*;
        for op in [Transpose, Transverse, Rot90, Rot270] {
            assert!(op.swaps_axes());
        }
        for op in [None, HFlip, VFlip, Rot180] {
            assert!(!op.swaps_axes());
        }
    }

    #[test]
    fn test_inverse_pairs() {
        use TransformOperation::*;
        assert_eq!(Rot90.inverse(), Rot270);
        assert_eq!(Rot270.inverse(), Rot90);
        // Everything else is an involution.
        for op in [None, HFlip, VFlip, Transpose, Transverse, Rot180] {
            assert_eq!(op.inverse(), op);
        }
    }

    #[test]
    fn test_serde_uses_property_surface_names() {
        let json = serde_json::to_string(&TransformOperation::Rot90).unwrap();
        assert_eq!(json, "\"rot90\"");
        let back: TransformOperation = serde_json::from_str("\"transverse\"").unwrap();
        assert_eq!(back, TransformOperation::Transverse);
    }
}
