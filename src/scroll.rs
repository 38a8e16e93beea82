use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{CineloreError, CineloreResult};

/// Snapshot of the host container's scroll position.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollSignal {
    /// `scrollTop` of the container, in CSS pixels.
    pub container_scroll_offset: f64,
}

impl ScrollSignal {
    /// Signal at `scroll_top`.
    pub fn at(scroll_top: f64) -> Self {
        Self {
            container_scroll_offset: scroll_top,
        }
    }
}

/// Output of [`ScrollMapper::map`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollSample {
    /// Normalized position inside the mapped region, `[0, 1]`.
    pub progress: f64,
    /// `true` once the container scrolled past `scroll_start`.
    pub visible: bool,
    /// `progress * (total_frames - 1)`, in `[0, total_frames - 1]`.
    pub target_frame_index: f64,
}

/// Pure mapping from container scroll offset to scrub progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMapper {
    scroll_start: f64,
    scroll_range: f64,
    total_frames: u32,
}

impl ScrollMapper {
    /// Build a mapper. `scroll_range` must be finite and positive.
    pub fn new(scroll_start: f64, scroll_range: f64, total_frames: u32) -> CineloreResult<Self> {
        if !scroll_start.is_finite() {
            return Err(CineloreError::validation("scroll_start must be finite"));
        }
        if !scroll_range.is_finite() || scroll_range <= 0.0 {
            return Err(CineloreError::validation(
                "scroll_range must be finite and > 0",
            ));
        }
        if total_frames == 0 {
            return Err(CineloreError::validation("total_frames must be > 0"));
        }
        Ok(Self {
            scroll_start,
            scroll_range,
            total_frames,
        })
    }

    /// Offset where the mapped region begins.
    pub fn scroll_start(&self) -> f64 {
        self.scroll_start
    }

    /// Span over which progress goes from 0 to 1.
    pub fn scroll_range(&self) -> f64 {
        self.scroll_range
    }

    /// Frame count the target index is scaled to.
    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    /// Map one scroll signal.
    pub fn map(&self, signal: ScrollSignal) -> ScrollSample {
        // Infinite offsets saturate at either end; NaN counts as unscrolled.
        let raw = signal.container_scroll_offset - self.scroll_start;
        let raw = if raw.is_nan() { 0.0 } else { raw };
        let progress = (raw / self.scroll_range).clamp(0.0, 1.0);
        ScrollSample {
            progress,
            visible: raw > 0.0,
            target_frame_index: progress * f64::from(self.total_frames - 1),
        }
    }
}

/// Scroll position reached at a display refresh.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollKeyframe {
    /// Refresh number, from 0.
    pub tick: u64,
    /// Container `scrollTop` delivered before that refresh.
    pub scroll_top: f64,
}

/// Recorded or synthesized scroll input for headless replays.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ScrollScript {
    keyframes: Vec<ScrollKeyframe>,
}

impl ScrollScript {
    /// Sort keyframes by tick; for duplicate ticks the last listed wins.
    pub fn new(mut keyframes: Vec<ScrollKeyframe>) -> Self {
        keyframes.reverse();
        keyframes.sort_by_key(|k| k.tick);
        keyframes.dedup_by_key(|k| k.tick);
        Self { keyframes }
    }

    /// One keyframe per tick, moving linearly from `from` to `to` over `ticks` refreshes.
    pub fn sweep(from: f64, to: f64, ticks: u64) -> Self {
        let last = ticks.saturating_sub(1).max(1) as f64;
        Self {
            keyframes: (0..ticks)
                .map(|tick| ScrollKeyframe {
                    tick,
                    scroll_top: from + (to - from) * tick as f64 / last,
                })
                .collect(),
        }
    }

    /// Parse a JSON array of `{tick, scroll_top}` objects.
    pub fn from_reader<R: std::io::Read>(r: R) -> CineloreResult<Self> {
        let keyframes: Vec<ScrollKeyframe> = serde_json::from_reader(r)
            .map_err(|e| CineloreError::serde(format!("parse scroll script JSON: {e}")))?;
        if let Some(k) = keyframes.iter().find(|k| !k.scroll_top.is_finite()) {
            return Err(CineloreError::validation(format!(
                "scroll script tick {} has a non-finite offset",
                k.tick
            )));
        }
        Ok(Self::new(keyframes))
    }

    /// Parse a JSON file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> CineloreResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CineloreError::validation(format!("open scroll script '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Keyframes in tick order.
    pub fn keyframes(&self) -> &[ScrollKeyframe] {
        &self.keyframes
    }

    /// Refreshes needed to play every keyframe.
    pub fn duration_ticks(&self) -> u64 {
        self.keyframes.last().map_or(0, |k| k.tick + 1)
    }

    /// Offset delivered before refresh `tick`, if any.
    pub fn offset_at(&self, tick: u64) -> Option<f64> {
        self.keyframes
            .binary_search_by_key(&tick, |k| k.tick)
            .ok()
            .map(|i| self.keyframes[i].scroll_top)
    }
}

#[cfg(test)]
#[path = "../tests/unit/scroll.rs"]
mod tests;
