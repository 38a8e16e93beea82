use std::sync::Arc;

use crate::foundation::core::{FrameIndex, PixelSize};
use crate::foundation::error::{CineloreError, CineloreResult};

/// Immutable decoded raster captured from the video source.
#[derive(Clone, Debug)]
pub struct VideoFrame {
    index: FrameIndex,
    size: PixelSize,
    /// Straight-alpha RGBA8, row-major, tightly packed.
    rgba8: Arc<Vec<u8>>,
}

impl VideoFrame {
    /// Wrap a captured pixel buffer. The buffer length must match `size`.
    pub fn new(index: FrameIndex, size: PixelSize, rgba8: Vec<u8>) -> CineloreResult<Self> {
        if rgba8.len() != size.rgba8_len() {
            return Err(CineloreError::validation(format!(
                "frame buffer has {} bytes, expected {} for {}x{}",
                rgba8.len(),
                size.rgba8_len(),
                size.width,
                size.height
            )));
        }
        Ok(Self {
            index,
            size,
            rgba8: Arc::new(rgba8),
        })
    }

    /// Ordinal of this frame in extraction order.
    pub fn index(&self) -> FrameIndex {
        self.index
    }

    /// Raster dimensions.
    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Pixel bytes.
    pub fn rgba8(&self) -> &[u8] {
        &self.rgba8
    }

    /// Copy into an `image::RgbaImage`.
    pub fn to_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.size.width, self.size.height, self.rgba8.to_vec())
    }
}

/// Ordered, capacity-bounded store of extracted frames for one video source.
///
/// Frames are appended in strictly increasing index order. Once `len == capacity` the store
/// seals itself and rejects further appends.
#[derive(Debug)]
pub struct FrameStore {
    capacity: u32,
    frames: Vec<VideoFrame>,
    sealed: bool,
}

impl FrameStore {
    /// Create an empty store for `capacity` frames.
    pub fn new(capacity: u32) -> CineloreResult<Self> {
        if capacity == 0 {
            return Err(CineloreError::validation(
                "frame store capacity must be > 0",
            ));
        }
        Ok(Self {
            capacity,
            frames: Vec::with_capacity(capacity as usize),
            sealed: false,
        })
    }

    /// Configured frame count.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Number of frames appended so far.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` when no frame has been appended.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// `true` once every frame is present. The store is read-only from then on.
    pub fn is_ready(&self) -> bool {
        self.sealed
    }

    /// Append the next frame.
    ///
    /// The frame's index must equal the current length; appends after sealing are rejected.
    pub fn push(&mut self, frame: VideoFrame) -> CineloreResult<()> {
        if self.sealed {
            return Err(CineloreError::extraction(
                "frame store is sealed; no further frames accepted",
            ));
        }
        let expected = self.frames.len() as u32;
        if frame.index().0 != expected {
            return Err(CineloreError::extraction(format!(
                "out-of-order frame: got index {}, expected {expected}",
                frame.index().0
            )));
        }
        if let Some(first) = self.frames.first()
            && first.size() != frame.size()
        {
            return Err(CineloreError::extraction(
                "frame dimensions changed mid-extraction",
            ));
        }

        self.frames.push(frame);
        if self.frames.len() == self.capacity as usize {
            self.sealed = true;
        }
        Ok(())
    }

    /// Frame at `index`, if it has been captured.
    pub fn get(&self, index: FrameIndex) -> Option<&VideoFrame> {
        self.frames.get(index.as_usize())
    }

    /// Captured frames in index order.
    pub fn frames(&self) -> &[VideoFrame] {
        &self.frames
    }

    /// Fresh, empty store with the same capacity.
    pub(crate) fn emptied(&self) -> Self {
        Self {
            capacity: self.capacity,
            frames: Vec::with_capacity(self.capacity as usize),
            sealed: false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/store.rs"]
mod tests;
