use crate::foundation::error::{CineloreError, CineloreResult};

pub use kurbo::{Affine, BezPath, Point, Size, Vec2};

/// 0-based ordinal of an extracted video frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u32);

impl FrameIndex {
    /// Index as `usize`, for slice access.
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Pixel dimensions of a raster buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelSize {
    /// Create a validated, non-empty pixel size.
    pub fn new(width: u32, height: u32) -> CineloreResult<Self> {
        if width == 0 || height == 0 {
            return Err(CineloreError::validation(
                "pixel width/height must be non-zero",
            ));
        }
        Ok(Self { width, height })
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Visible area of a host container, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport. Degenerate sizes are allowed; consumers guard against them.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Viewport as a `kurbo::Size`.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Center point in viewport coordinates.
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
