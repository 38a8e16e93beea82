use std::sync::Arc;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{CineloreError, CineloreResult};
use crate::frames::store::{FrameStore, VideoFrame};
use crate::playback::scheduler::{FrameScheduler, RequestId};

/// Default exponential smoothing factor.
pub const DEFAULT_LERP_FACTOR: f64 = 0.15;

/// Visible surface the render loop paints into (the on-screen canvas of a browser host).
pub trait PaintSurface {
    /// Replace the surface contents with `frame`.
    fn paint(&mut self, frame: &VideoFrame);
}

/// In-memory [`PaintSurface`] keeping the last painted frame.
#[derive(Debug, Default)]
pub struct CanvasSurface {
    current: Option<VideoFrame>,
    paints: u64,
}

impl CanvasSurface {
    /// Blank canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last painted frame.
    pub fn current(&self) -> Option<&VideoFrame> {
        self.current.as_ref()
    }

    /// Total paint calls.
    pub fn paints(&self) -> u64 {
        self.paints
    }
}

impl PaintSurface for CanvasSurface {
    fn paint(&mut self, frame: &VideoFrame) {
        self.current = Some(frame.clone());
        self.paints += 1;
    }
}

/// Fractional playback position.
///
/// `target_frame_index` is always inside `[0, total_frames - 1]`. `current_frame_index` is the
/// smoothed value; it is only clamped when a frame is picked for painting.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct PlaybackCursor {
    /// Smoothed index.
    pub current_frame_index: f64,
    /// Index requested by the latest scroll sample.
    pub target_frame_index: f64,
}

impl PlaybackCursor {
    /// Ease `current` toward `target` by `lerp_factor` of the remaining gap.
    pub fn advance(&mut self, lerp_factor: f64) {
        self.current_frame_index +=
            (self.target_frame_index - self.current_frame_index) * lerp_factor;
    }

    /// Nearest frame to `current`, clamped to `[0, max_index]`.
    pub fn paint_index(&self, max_index: u32) -> FrameIndex {
        let idx = self
            .current_frame_index
            .round()
            .clamp(0.0, f64::from(max_index));
        FrameIndex(idx as u32)
    }

    /// `true` once the smoothed index is within half a frame of the target.
    pub fn is_settled(&self) -> bool {
        (self.target_frame_index - self.current_frame_index).abs() < 0.5
    }
}

/// What a refresh callback did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Painted this frame and rescheduled.
    Painted(FrameIndex),
    /// The chosen frame was missing; nothing painted, still rescheduled.
    Skipped(FrameIndex),
    /// The id was not the loop's pending request (stopped or stale); nothing happened.
    Ignored,
}

/// Display-refresh loop easing the shown frame toward the scroll target.
///
/// At most one scheduler request is outstanding at any time. [`RenderLoop::stop`] cancels it
/// synchronously and drops the loop's reference to the frame store.
pub struct RenderLoop<Sch: FrameScheduler> {
    scheduler: Sch,
    lerp_factor: f64,
    cursor: PlaybackCursor,
    store: Option<Arc<FrameStore>>,
    pending: Option<RequestId>,
}

impl<Sch: FrameScheduler> RenderLoop<Sch> {
    /// Create a stopped loop. `lerp_factor` must lie in `(0, 1)`.
    pub fn new(scheduler: Sch, lerp_factor: f64) -> CineloreResult<Self> {
        if !(lerp_factor > 0.0 && lerp_factor < 1.0) {
            return Err(CineloreError::validation(
                "lerp_factor must be within (0, 1)",
            ));
        }
        Ok(Self {
            scheduler,
            lerp_factor,
            cursor: PlaybackCursor::default(),
            store: None,
            pending: None,
        })
    }

    /// Borrow the scheduler.
    pub fn scheduler(&self) -> &Sch {
        &self.scheduler
    }

    /// Mutably borrow the scheduler (hosts fire refreshes through it).
    pub fn scheduler_mut(&mut self) -> &mut Sch {
        &mut self.scheduler
    }

    /// Current cursor.
    pub fn cursor(&self) -> PlaybackCursor {
        self.cursor
    }

    /// `true` between [`RenderLoop::start`] and [`RenderLoop::stop`].
    pub fn is_running(&self) -> bool {
        self.store.is_some()
    }

    /// Pending refresh request, if any.
    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending
    }

    /// Start painting from a sealed store.
    ///
    /// Frame 0 is painted immediately, before any scroll sample. Starting a running loop is a
    /// no-op.
    pub fn start(
        &mut self,
        store: Arc<FrameStore>,
        surface: &mut dyn PaintSurface,
    ) -> CineloreResult<()> {
        if self.is_running() {
            return Ok(());
        }
        if !store.is_ready() {
            return Err(CineloreError::validation(
                "render loop requires a sealed frame store",
            ));
        }

        self.cursor = PlaybackCursor::default();
        if let Some(first) = store.get(FrameIndex(0)) {
            surface.paint(first);
        }
        self.store = Some(store);
        self.pending = Some(self.scheduler.request());
        tracing::debug!(lerp_factor = self.lerp_factor, "render loop started");
        Ok(())
    }

    /// Replace the target index; only the latest value before a tick matters.
    pub fn set_target(&mut self, target_frame_index: f64) {
        let max = self.max_index().map(f64::from).unwrap_or(0.0);
        let target = if target_frame_index.is_finite() {
            target_frame_index
        } else {
            0.0
        };
        self.cursor.target_frame_index = target.clamp(0.0, max);
    }

    /// Handle a fired refresh callback.
    pub fn tick(&mut self, id: RequestId, surface: &mut dyn PaintSurface) -> TickOutcome {
        if self.pending != Some(id) {
            return TickOutcome::Ignored;
        }
        self.pending = None;
        let Some(store) = self.store.as_ref() else {
            return TickOutcome::Ignored;
        };

        self.cursor.advance(self.lerp_factor);
        let max_index = store.capacity().saturating_sub(1);
        let index = self.cursor.paint_index(max_index);
        let outcome = match store.get(index) {
            Some(frame) => {
                surface.paint(frame);
                TickOutcome::Painted(index)
            }
            None => {
                tracing::warn!(frame = index.0, "decoded frame missing; paint skipped");
                TickOutcome::Skipped(index)
            }
        };

        self.pending = Some(self.scheduler.request());
        outcome
    }

    /// Cancel the pending refresh and release the frame store.
    pub fn stop(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
        if self.store.take().is_some() {
            tracing::debug!("render loop stopped");
        }
    }

    fn max_index(&self) -> Option<u32> {
        self.store
            .as_ref()
            .map(|s| s.capacity().saturating_sub(1))
    }
}

impl<Sch: FrameScheduler> Drop for RenderLoop<Sch> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/render_loop.rs"]
mod tests;
