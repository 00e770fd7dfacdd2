// In: src/buffer/mod.rs

//! Buffer lifecycle: fixed-capacity regions, scoped mapping, and trimming.
//!
//! The transform engine operates under a strict no-reallocation contract: it
//! must write its entire result inside a caller-supplied region and may never
//! grow it. `FrameBuffer` makes that contract explicit in the type (a fixed
//! capacity set at allocation time plus a separately tracked written length)
//! instead of leaving the capacity/size relationship to convention.
//!
//! Mapping is scoped: payload bytes are only reachable inside a closure
//! passed to `with_mapped_read`/`with_mapped_write`, so a buffer can never be
//! forwarded while a view of it is still live, and "unmap" happens on every
//! exit path including errors.

use crate::error::JpegTurnError;

/// A fixed-capacity byte region with a separately tracked written length.
///
/// Invariant: `len() <= capacity()` at all times; capacity is fixed at
/// allocation and never changes in place. Trimming produces a region over the
/// same allocation that reports a smaller length.
#[derive(Debug)]
pub struct FrameBuffer {
    storage: Box<[u8]>,
    len: usize,
}

impl FrameBuffer {
    /// Allocates a zeroed region of exactly `capacity` bytes with nothing
    /// written yet. Prefer going through an [`OutputAllocator`] so the
    /// allocation ceiling applies.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: vec![0u8; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Wraps an already-produced payload; capacity equals the payload length.
    pub fn from_vec(payload: Vec<u8>) -> Self {
        let len = payload.len();
        Self {
            storage: payload.into_boxed_slice(),
            len,
        }
    }

    /// The fixed capacity of the underlying allocation.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// The number of meaningful bytes written so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no meaningful bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The written payload.
    pub fn as_slice(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// Maps the written payload read-only for the duration of `f`.
    ///
    /// Mapping an in-memory region cannot fail, even for an empty payload;
    /// the closure then sees a zero-length slice and decides for itself
    /// whether that is acceptable.
    pub fn with_mapped_read<R>(
        &self,
        f: impl FnOnce(&[u8]) -> Result<R, JpegTurnError>,
    ) -> Result<R, JpegTurnError> {
        f(&self.storage[..self.len])
    }

    /// Maps the full capacity writable for the duration of `f`.
    ///
    /// The closure sees the entire allocation regardless of the current
    /// written length; the caller records the actual size afterwards via
    /// [`FrameBuffer::trim`].
    pub fn with_mapped_write<R>(
        &mut self,
        f: impl FnOnce(&mut [u8]) -> Result<R, JpegTurnError>,
    ) -> Result<R, JpegTurnError> {
        if self.storage.is_empty() {
            return Err(JpegTurnError::BufferMap(
                "region holds no writable bytes".to_string(),
            ));
        }
        f(&mut self.storage)
    }

    /// Re-reports the region's length as exactly `actual` bytes, keeping the
    /// same underlying allocation. No copy is performed.
    pub fn trim(mut self, actual: usize) -> Result<Self, JpegTurnError> {
        if actual > self.capacity() {
            return Err(JpegTurnError::Internal(format!(
                "trim to {} bytes exceeds capacity {}",
                actual,
                self.capacity()
            )));
        }
        self.len = actual;
        Ok(self)
    }
}

//==================================================================================
// Frame metadata & the frame itself
//==================================================================================

/// Timing and sequence metadata carried from input to output unchanged,
/// mirroring the host pipeline's timestamp-copy semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameMeta {
    /// Presentation timestamp, in host clock units.
    pub pts: Option<u64>,
    /// Decode timestamp, in host clock units.
    pub dts: Option<u64>,
    /// Frame duration, in host clock units.
    pub duration: Option<u64>,
    /// Monotonic sequence number assigned by the upstream collaborator.
    pub sequence: u64,
}

/// A compressed JPEG image plus its stream metadata.
///
/// Ownership is exclusive: the input frame belongs to the stage for the
/// duration of one invocation and is released at the end regardless of
/// outcome; the output frame belongs to the stage until it is handed
/// downstream.
#[derive(Debug)]
pub struct CompressedFrame {
    /// The compressed payload.
    pub data: FrameBuffer,
    /// Timing/sequence metadata, forwarded unchanged.
    pub meta: FrameMeta,
}

impl CompressedFrame {
    pub fn new(data: FrameBuffer, meta: FrameMeta) -> Self {
        Self { data, meta }
    }

    /// Convenience constructor for frames arriving as plain byte vectors.
    pub fn from_bytes(payload: Vec<u8>, meta: FrameMeta) -> Self {
        Self::new(FrameBuffer::from_vec(payload), meta)
    }
}

//==================================================================================
// Output allocation
//==================================================================================

/// The host memory allocator's contract, reduced to the single call this
/// stage needs. Injectable so tests can simulate exhaustion.
pub trait OutputAllocator: Send {
    /// Acquires a writable region of exactly `capacity` bytes.
    fn allocate(&mut self, capacity: usize) -> Result<FrameBuffer, JpegTurnError>;
}

/// The default allocator: plain heap allocations under a configured ceiling.
///
/// The ceiling rejects worst-case bounds computed from malformed headers that
/// declare absurd dimensions, before any memory is committed.
#[derive(Debug, Clone)]
pub struct HeapAllocator {
    ceiling: usize,
}

impl HeapAllocator {
    pub fn new(ceiling: usize) -> Self {
        Self { ceiling }
    }
}

impl OutputAllocator for HeapAllocator {
    fn allocate(&mut self, capacity: usize) -> Result<FrameBuffer, JpegTurnError> {
        if capacity == 0 {
            return Err(JpegTurnError::Allocation {
                requested: 0,
                reason: "zero-capacity output region".to_string(),
            });
        }
        if capacity > self.ceiling {
            return Err(JpegTurnError::Allocation {
                requested: capacity,
                reason: format!("exceeds the {} byte allocation ceiling", self.ceiling),
            });
        }
        Ok(FrameBuffer::with_capacity(capacity))
    }
}

//==================================================================================
// Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_keeps_capacity_and_reports_actual_length() {
        let buf = FrameBuffer::with_capacity(128);
        let trimmed = buf.trim(40).unwrap();
        assert_eq!(trimmed.len(), 40);
        assert_eq!(trimmed.capacity(), 128);
        assert_eq!(trimmed.as_slice().len(), 40);
    }

    #[test]
    fn test_trim_beyond_capacity_is_an_internal_error() {
        let buf = FrameBuffer::with_capacity(16);
        assert!(matches!(buf.trim(17), Err(JpegTurnError::Internal(_))));
    }

    #[test]
    fn test_reading_an_empty_region_maps_a_zero_length_slice() {
        let empty = FrameBuffer::from_vec(Vec::new());
        let seen = empty.with_mapped_read(|region| Ok(region.len())).unwrap();
        assert_eq!(seen, 0);
    }

    #[test]
    fn test_writing_a_zero_capacity_region_fails() {
        let mut zero_cap = FrameBuffer::with_capacity(0);
        let write = zero_cap.with_mapped_write(|_| Ok(()));
        assert!(matches!(write, Err(JpegTurnError::BufferMap(_))));
    }

    #[test]
    fn test_write_scope_sees_full_capacity() {
        let mut buf = FrameBuffer::with_capacity(64);
        let seen = buf
            .with_mapped_write(|region| {
                region[0] = 0xFF;
                Ok(region.len())
            })
            .unwrap();
        assert_eq!(seen, 64);
        let buf = buf.trim(1).unwrap();
        assert_eq!(buf.as_slice(), &[0xFF]);
    }

    #[test]
    fn test_read_scope_propagates_closure_errors() {
        let buf = FrameBuffer::from_vec(vec![1, 2, 3]);
        let result: Result<(), _> = buf.with_mapped_read(|_| {
            Err(JpegTurnError::Transform("boom".to_string()))
        });
        assert!(matches!(result, Err(JpegTurnError::Transform(_))));
    }

    #[test]
    fn test_heap_allocator_enforces_the_ceiling() {
        let mut alloc = HeapAllocator::new(1024);
        assert!(alloc.allocate(1024).is_ok());
        assert!(matches!(
            alloc.allocate(1025),
            Err(JpegTurnError::Allocation { requested: 1025, .. })
        ));
        assert!(matches!(
            alloc.allocate(0),
            Err(JpegTurnError::Allocation { requested: 0, .. })
        ));
    }
}
