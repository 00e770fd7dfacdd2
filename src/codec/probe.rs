//! Header probing: width, height, and subsampling without pixel decode.

use crate::error::JpegTurnError;
use crate::types::{ImageGeometry, Subsampling};
use log::debug;

/// JPEG header magic bytes: the SOI marker plus the next marker's 0xFF prefix.
const JPEG_MAGIC_BYTES: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Anything shorter cannot even hold SOI plus one marker.
const MIN_PROBE_LEN: usize = 4;

/// Parses a compressed frame's header to extract its geometry.
///
/// Owns the per-stage decompressor context, created once at stage
/// construction and released on drop. The probe reads only the header region
/// and allocates no pixel-sized memory; it is stateless across frames.
pub struct GeometryProbe {
    decompressor: turbojpeg::Decompressor,
}

impl GeometryProbe {
    pub fn new() -> Result<Self, JpegTurnError> {
        let decompressor = turbojpeg::Decompressor::new()
            .map_err(|e| JpegTurnError::CodecInit(format!("cannot init decompressor: {}", e)))?;
        Ok(Self { decompressor })
    }

    /// Reads geometry and subsampling from `jpeg`'s header.
    ///
    /// Fails with [`JpegTurnError::HeaderDecode`] on truncated input, a
    /// missing SOI marker, or anything the engine rejects while parsing the
    /// marker sequence.
    pub fn probe(&mut self, jpeg: &[u8]) -> Result<ImageGeometry, JpegTurnError> {
        // Cheap structural checks before handing the buffer to the engine.
        if jpeg.len() < MIN_PROBE_LEN {
            return Err(JpegTurnError::HeaderDecode(format!(
                "buffer of {} bytes is too short to hold a JPEG header",
                jpeg.len()
            )));
        }
        if jpeg[..3] != JPEG_MAGIC_BYTES {
            return Err(JpegTurnError::HeaderDecode(
                "missing SOI marker at start of buffer".to_string(),
            ));
        }

        let header = self
            .decompressor
            .read_header(jpeg)
            .map_err(|e| JpegTurnError::HeaderDecode(e.to_string()))?;
        let geometry = ImageGeometry {
            width: header.width,
            height: header.height,
            subsampling: Subsampling::from_tj(header.subsamp)?,
        };

        debug!(
            "probed header: {}x{}, subsampling {:?}",
            geometry.width, geometry.height, geometry.subsampling
        );
        Ok(geometry)
    }
}

//==================================================================================
// Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_buffer_fails_header_decode() {
        let mut probe = GeometryProbe::new().unwrap();
        for short in [&[][..], &[0xFF][..], &[0xFF, 0xD8][..], &[0xFF, 0xD8, 0xFF][..]] {
            assert!(matches!(
                probe.probe(short),
                Err(JpegTurnError::HeaderDecode(_))
            ));
        }
    }

    #[test]
    fn test_missing_soi_marker_fails_header_decode() {
        let mut probe = GeometryProbe::new().unwrap();
        let not_a_jpeg = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]; // PNG magic
        assert!(matches!(
            probe.probe(&not_a_jpeg),
            Err(JpegTurnError::HeaderDecode(_))
        ));
    }

    #[test]
    fn test_soi_followed_by_garbage_fails_header_decode() {
        let mut probe = GeometryProbe::new().unwrap();
        let mut garbage = vec![0xFF, 0xD8, 0xFF];
        garbage.extend(std::iter::repeat(0xAB).take(61));
        assert!(matches!(
            probe.probe(&garbage),
            Err(JpegTurnError::HeaderDecode(_))
        ));
    }
}
