use std::time::Duration;

use crate::foundation::core::{FrameIndex, PixelSize};
use crate::foundation::error::{CineloreError, CineloreResult};
use crate::frames::store::VideoFrame;

/// Metadata known once the video source has loaded its header.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VideoMetadata {
    /// Duration in seconds.
    pub duration_sec: f64,
    /// Natural width; `0` when unknown.
    pub width: u32,
    /// Natural height; `0` when unknown.
    pub height: u32,
}

impl VideoMetadata {
    /// Natural dimensions, or `fallback` when either axis is unknown.
    pub fn natural_size_or(&self, fallback: PixelSize) -> PixelSize {
        PixelSize::new(self.width, self.height).unwrap_or(fallback)
    }

    /// `true` when the duration can drive a seek schedule.
    pub fn has_usable_duration(&self) -> bool {
        self.duration_sec.is_finite() && self.duration_sec > 0.0
    }
}

/// Outcome of a single seek request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekStatus {
    /// The source signalled seek completion; the decoded frame at the new position is current.
    Completed,
    /// No completion signal arrived within the allowed wait.
    TimedOut,
}

/// Seekable, single-decode-position video source (the hidden `<video>` of a browser host).
///
/// A source exposes exactly one decode position at a time, so callers must not issue a new seek
/// before the previous frame was drawn.
pub trait VideoSource {
    /// Metadata, or `None` while it is still loading.
    fn metadata(&self) -> Option<VideoMetadata>;

    /// Mute or unmute audio output.
    fn set_muted(&mut self, muted: bool);

    /// Move the playback position to `time_sec` and wait up to `timeout` for completion.
    fn seek(&mut self, time_sec: f64, timeout: Duration) -> CineloreResult<SeekStatus>;

    /// Draw the frame at the current position, scaled to fill `surface`.
    fn draw_current(&mut self, surface: &mut CaptureSurface) -> CineloreResult<()>;
}

/// Offscreen RGBA8 surface the extractor draws decoded frames into.
#[derive(Clone, Debug)]
pub struct CaptureSurface {
    size: PixelSize,
    rgba8: Vec<u8>,
}

impl CaptureSurface {
    /// Allocate a transparent surface.
    pub fn new(size: PixelSize) -> Self {
        Self {
            size,
            rgba8: vec![0; size.rgba8_len()],
        }
    }

    /// Surface dimensions.
    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Mutable pixel bytes for sources to draw into.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.rgba8
    }

    /// Replace the surface contents with `rgba8` of `src` dimensions, scaling when needed.
    pub fn draw_rgba8(&mut self, src: PixelSize, rgba8: Vec<u8>) -> CineloreResult<()> {
        if src == self.size {
            if rgba8.len() != self.rgba8.len() {
                return Err(CineloreError::media(format!(
                    "decoded frame has {} bytes, expected {}",
                    rgba8.len(),
                    self.rgba8.len()
                )));
            }
            self.rgba8 = rgba8;
            return Ok(());
        }

        let img = image::RgbaImage::from_raw(src.width, src.height, rgba8)
            .ok_or_else(|| CineloreError::media("decoded frame buffer does not match its size"))?;
        let scaled = image::imageops::resize(
            &img,
            self.size.width,
            self.size.height,
            image::imageops::FilterType::Triangle,
        );
        self.rgba8 = scaled.into_raw();
        Ok(())
    }

    /// Copy the current contents out as an immutable frame.
    pub fn snapshot(&self, index: FrameIndex) -> CineloreResult<VideoFrame> {
        VideoFrame::new(index, self.size, self.rgba8.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/source.rs"]
mod tests;
