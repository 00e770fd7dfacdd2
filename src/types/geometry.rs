//! Image geometry and chroma subsampling, as read from a JPEG header.
//!
//! `Subsampling` replaces the engine's raw subsampling constant with a safe,
//! serializable enum, mapped to and from `turbojpeg::Subsamp` at the codec
//! boundary.

use crate::error::JpegTurnError;
use crate::types::TransformOperation;
use serde::{Deserialize, Serialize};

/// The chroma-downsampling scheme of a compressed image.
///
/// Affects MCU block geometry and therefore the worst-case compressed size.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsampling {
    /// 4:4:4, no chroma subsampling.
    Sub444,
    /// 4:2:2, chroma halved horizontally.
    Sub422,
    /// 4:2:0, chroma halved in both dimensions.
    Sub420,
    /// Grayscale, no chroma components at all.
    Gray,
    /// 4:4:0, chroma halved vertically.
    Sub440,
    /// 4:1:1, chroma quartered horizontally.
    Sub411,
}

impl Subsampling {
    /// Converts the engine's subsampling constant into a `Subsampling`.
    pub(crate) fn from_tj(subsamp: turbojpeg::Subsamp) -> Result<Self, JpegTurnError> {
        match subsamp {
            turbojpeg::Subsamp::None => Ok(Self::Sub444),
            turbojpeg::Subsamp::Sub2x1 => Ok(Self::Sub422),
            turbojpeg::Subsamp::Sub2x2 => Ok(Self::Sub420),
            turbojpeg::Subsamp::Gray => Ok(Self::Gray),
            turbojpeg::Subsamp::Sub1x2 => Ok(Self::Sub440),
            turbojpeg::Subsamp::Sub4x1 => Ok(Self::Sub411),
            other => Err(JpegTurnError::HeaderDecode(format!(
                "unsupported chroma subsampling mode {:?}",
                other
            ))),
        }
    }

    /// Converts back into the engine's subsampling constant.
    pub(crate) fn to_tj(self) -> turbojpeg::Subsamp {
        match self {
            Self::Sub444 => turbojpeg::Subsamp::None,
            Self::Sub422 => turbojpeg::Subsamp::Sub2x1,
            Self::Sub420 => turbojpeg::Subsamp::Sub2x2,
            Self::Gray => turbojpeg::Subsamp::Gray,
            Self::Sub440 => turbojpeg::Subsamp::Sub1x2,
            Self::Sub411 => turbojpeg::Subsamp::Sub4x1,
        }
    }

    /// The subsampling mode after an axis swap. 4:2:2 and 4:4:0 are each
    /// other's transpose; the square modes are unchanged. 4:1:1 has no
    /// transposed counterpart, which is why the engine rejects axis-swapping
    /// operations on 4:1:1 images at transform time.
    pub fn transposed(self) -> Self {
        match self {
            Self::Sub422 => Self::Sub440,
            Self::Sub440 => Self::Sub422,
            other => other,
        }
    }
}

/// The geometry of a compressed image, derived read-only from its header.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageGeometry {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Chroma subsampling mode.
    pub subsampling: Subsampling,
}

impl ImageGeometry {
    /// Predicts the geometry of the output a given operation produces.
    ///
    /// Axis-swapping operations exchange width and height and transpose the
    /// subsampling mode; the rest leave geometry untouched.
    pub fn transformed_by(self, op: TransformOperation) -> Self {
        if op.swaps_axes() {
            Self {
                width: self.height,
                height: self.width,
                subsampling: self.subsampling.transposed(),
            }
        } else {
            self
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
    fn test_axis_swap_exchanges_dimensions_and_transposes_chroma() {
        let geo = ImageGeometry {
            width: 640,
            height: 480,
            subsampling: Subsampling::Sub422,
        };
        let turned = geo.transformed_by(TransformOperation::Rot90);
        assert_eq!(turned.width, 480);
        assert_eq!(turned.height, 640);
        assert_eq!(turned.subsampling, Subsampling::Sub440);
    }

    #[test]
    fn test_non_swapping_operations_preserve_geometry() {
        let geo = ImageGeometry {
            width: 100,
            height: 100,
            subsampling: Subsampling::Sub420,
        };
        for op in [
            TransformOperation::None,
            TransformOperation::HFlip,
            TransformOperation::VFlip,
            TransformOperation::Rot180,
        ] {
            assert_eq!(geo.transformed_by(op), geo);
        }
    }

    #[test]
    fn test_subsampling_engine_mapping_roundtrips() {
        for mode in [
            Subsampling::Sub444,
            Subsampling::Sub422,
            Subsampling::Sub420,
            Subsampling::Gray,
            Subsampling::Sub440,
            Subsampling::Sub411,
        ] {
            assert_eq!(Subsampling::from_tj(mode.to_tj()).unwrap(), mode);
        }
    }

    #[test]
    fn test_transpose_is_an_involution() {
        for mode in [
            Subsampling::Sub444,
            Subsampling::Sub422,
            Subsampling::Sub420,
            Subsampling::Gray,
            Subsampling::Sub440,
            Subsampling::Sub411,
        ] {
            assert_eq!(mode.transposed().transposed(), mode);
        }
    }
}
