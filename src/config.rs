//! Experience configuration loaded from JSON.
//!
//! Every field has a default, so `{}` is a valid configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::camera::CameraConfig;
use crate::foundation::core::PixelSize;
use crate::foundation::error::{CineloreError, CineloreResult};
use crate::frames::extractor::ExtractorOpts;
use crate::playback::controller::ScrubOpts;
use crate::scroll::ScrollMapper;

/// Frame extraction and smoothing settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrubConfig {
    /// Frames captured per video.
    pub total_frames: u32,
    /// Render loop smoothing factor, in `(0, 1)`.
    pub lerp_factor: f64,
    /// Capture width when the video reports none.
    pub fallback_width: u32,
    /// Capture height when the video reports none.
    pub fallback_height: u32,
    /// Longest wait for one seek before extraction stalls.
    pub seek_timeout_ms: u64,
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            total_frames: 120,
            lerp_factor: 0.15,
            fallback_width: 1920,
            fallback_height: 1080,
            seek_timeout_ms: 5000,
        }
    }
}

impl ScrubConfig {
    /// Extractor options for this configuration.
    pub fn extractor_opts(&self) -> CineloreResult<ExtractorOpts> {
        Ok(ExtractorOpts {
            total_frames: self.total_frames,
            fallback_size: PixelSize::new(self.fallback_width, self.fallback_height)?,
            seek_timeout: Duration::from_millis(self.seek_timeout_ms),
        })
    }

    /// Controller options for this configuration.
    pub fn scrub_opts(&self) -> CineloreResult<ScrubOpts> {
        Ok(ScrubOpts {
            extractor: self.extractor_opts()?,
            lerp_factor: self.lerp_factor,
        })
    }
}

/// Scroll region, in multiples of the viewport height.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Offset where scrubbing begins.
    pub start_viewports: f64,
    /// Span over which progress runs from 0 to 1.
    pub range_viewports: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            start_viewports: 1.0,
            range_viewports: 2.0,
        }
    }
}

impl ScrollConfig {
    /// Resolve against a viewport height into a mapper for `total_frames`.
    pub fn mapper(&self, viewport_height: f64, total_frames: u32) -> CineloreResult<ScrollMapper> {
        ScrollMapper::new(
            self.start_viewports * viewport_height,
            self.range_viewports * viewport_height,
            total_frames,
        )
    }
}

/// Root configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExperienceConfig {
    /// Extraction and smoothing.
    pub scrub: ScrubConfig,
    /// Scroll region.
    pub scroll: ScrollConfig,
    /// Map camera.
    pub camera: CameraConfig,
}

impl ExperienceConfig {
    /// Parse from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CineloreResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CineloreError::serde(format!("parse experience config JSON: {e}")))
    }

    /// Parse from a JSON file and validate.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> CineloreResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CineloreError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        let cfg = Self::from_reader(BufReader::new(f))?;
        cfg.validate()?;
        tracing::debug!(total_frames = cfg.scrub.total_frames, "config loaded");
        Ok(cfg)
    }

    /// Check every section.
    pub fn validate(&self) -> CineloreResult<()> {
        let s = &self.scrub;
        if s.total_frames == 0 {
            return Err(CineloreError::validation("scrub.total_frames must be > 0"));
        }
        if !(s.lerp_factor > 0.0 && s.lerp_factor < 1.0) {
            return Err(CineloreError::validation(
                "scrub.lerp_factor must be within (0, 1)",
            ));
        }
        if s.fallback_width == 0 || s.fallback_height == 0 {
            return Err(CineloreError::validation(
                "scrub.fallback_width/height must be non-zero",
            ));
        }
        if s.seek_timeout_ms == 0 {
            return Err(CineloreError::validation("scrub.seek_timeout_ms must be > 0"));
        }

        let sc = &self.scroll;
        if !sc.start_viewports.is_finite() {
            return Err(CineloreError::validation(
                "scroll.start_viewports must be finite",
            ));
        }
        if !(sc.range_viewports.is_finite() && sc.range_viewports > 0.0) {
            return Err(CineloreError::validation(
                "scroll.range_viewports must be finite and > 0",
            ));
        }

        self.camera.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
