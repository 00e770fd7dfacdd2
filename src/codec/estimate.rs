//! Worst-case output sizing for a transformed frame.

use crate::error::JpegTurnError;
use crate::types::ImageGeometry;

/// Returns the codec-defined worst-case compressed size for an image of the
/// given geometry, valid for every one of the eight transform operations.
///
/// The bound is the maximum of the engine's formula over both orientations.
/// Axis-swapping operations exchange width and height and transpose the
/// chroma MCU (4:2:2 becomes 4:4:0), but a transposed MCU over swapped
/// dimensions pads to the same block count the original orientation does, so
/// the two-orientation maximum dominates all eight cases without
/// per-operation branching.
///
/// Pure function of the geometry; cannot fail for geometry obtained from a
/// successful probe (the engine only rejects out-of-range dimensions, which a
/// probe would already have refused).
pub fn worst_case_len(geometry: ImageGeometry) -> Result<usize, JpegTurnError> {
    let subsamp = geometry.subsampling.to_tj();
    let upright = turbojpeg::compressed_buf_len(geometry.width, geometry.height, subsamp)
        .map_err(|e| JpegTurnError::Internal(format!("worst-case bound failed: {}", e)))?;
    let turned = turbojpeg::compressed_buf_len(geometry.height, geometry.width, subsamp)
        .map_err(|e| JpegTurnError::Internal(format!("worst-case bound failed: {}", e)))?;
    Ok(upright.max(turned))
}

//==================================================================================
// Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Subsampling;

    fn geo(width: usize, height: usize, subsampling: Subsampling) -> ImageGeometry {
        ImageGeometry {
            width,
            height,
            subsampling,
        }
    }

    #[test]
    fn test_bound_is_orientation_symmetric() {
        // Dimensions chosen to not be MCU-aligned in either axis, where a
        // naive single-orientation formula would differ after rotation.
        for subsampling in [
            Subsampling::Sub444,
            Subsampling::Sub422,
            Subsampling::Sub420,
            Subsampling::Gray,
            Subsampling::Sub440,
            Subsampling::Sub411,
        ] {
            let a = worst_case_len(geo(17, 9, subsampling)).unwrap();
            let b = worst_case_len(geo(9, 17, subsampling)).unwrap();
            assert_eq!(a, b, "asymmetric bound for {:?}", subsampling);
        }
    }

    #[test]
    fn test_bound_is_positive_even_for_tiny_images() {
        let bound = worst_case_len(geo(1, 1, Subsampling::Sub420)).unwrap();
        assert!(bound > 0);
    }

    #[test]
    fn test_bound_grows_with_area() {
        let small = worst_case_len(geo(64, 64, Subsampling::Sub420)).unwrap();
        let large = worst_case_len(geo(640, 480, Subsampling::Sub420)).unwrap();
        assert!(large > small);
    }
}
