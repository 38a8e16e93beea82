use std::sync::Arc;
use std::time::Duration;

use crate::foundation::core::{FrameIndex, PixelSize};
use crate::foundation::error::{CineloreError, CineloreResult};
use crate::frames::source::{CaptureSurface, SeekStatus, VideoSource};
use crate::frames::store::FrameStore;

/// Lifecycle of one extraction run. Transitions only move forward until [`FrameExtractor::reset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionPhase {
    /// Waiting for metadata or for [`FrameExtractor::begin`].
    Idle,
    /// Seek/capture sequence in progress.
    Extracting,
    /// Every frame captured; the store is sealed.
    Ready,
    /// A seek never completed (or the source cannot be scheduled). Terminal until reset.
    Stalled,
}

/// Observable extraction state.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ExtractionState {
    /// Current phase.
    pub phase: ExtractionPhase,
    /// Index of the next frame to capture.
    pub current_index: u32,
    /// `captured / total * 100`, monotonically non-decreasing within a run.
    pub progress_percent: f64,
}

impl ExtractionState {
    fn idle() -> Self {
        Self {
            phase: ExtractionPhase::Idle,
            current_index: 0,
            progress_percent: 0.0,
        }
    }
}

/// Result of advancing the extractor by one logical step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExtractStep {
    /// Nothing to do: not started, or already terminal.
    Idle,
    /// One frame was captured and appended.
    Captured {
        /// Index of the captured frame.
        index: FrameIndex,
        /// Progress after this capture.
        progress_percent: f64,
    },
    /// The final frame was captured; the store is now sealed.
    Ready,
    /// The sequence stopped before completion.
    Stalled {
        /// Index of the frame that could not be captured.
        at: FrameIndex,
    },
}

/// Tunables for [`FrameExtractor`].
#[derive(Clone, Copy, Debug)]
pub struct ExtractorOpts {
    /// Number of evenly spaced frames to capture.
    pub total_frames: u32,
    /// Capture size used when the source reports no natural dimensions.
    pub fallback_size: PixelSize,
    /// Longest wait for a single seek to complete.
    pub seek_timeout: Duration,
}

impl Default for ExtractorOpts {
    fn default() -> Self {
        Self {
            total_frames: 120,
            fallback_size: PixelSize {
                width: 1920,
                height: 1080,
            },
            seek_timeout: Duration::from_millis(5000),
        }
    }
}

type ProgressFn = Box<dyn FnMut(f64)>;

/// Populates a [`FrameStore`] by seeking a [`VideoSource`] to `total_frames` evenly spaced
/// timestamps and capturing each decoded frame, strictly in order.
///
/// The extractor owns the source and the capture surface. Dropping it (or calling
/// [`FrameExtractor::reset`]) releases both; a new run always starts from frame 0.
pub struct FrameExtractor<S: VideoSource> {
    source: S,
    opts: ExtractorOpts,
    state: ExtractionState,
    store: Arc<FrameStore>,
    surface: Option<CaptureSurface>,
    duration_sec: f64,
    on_progress: Option<ProgressFn>,
}

impl<S: VideoSource> FrameExtractor<S> {
    /// Create an idle extractor bound to `source`.
    pub fn new(source: S, opts: ExtractorOpts) -> CineloreResult<Self> {
        if opts.total_frames == 0 {
            return Err(CineloreError::validation("total_frames must be > 0"));
        }
        Ok(Self {
            source,
            store: Arc::new(FrameStore::new(opts.total_frames)?),
            opts,
            state: ExtractionState::idle(),
            surface: None,
            duration_sec: 0.0,
            on_progress: None,
        })
    }

    /// Register a callback receiving progress after every capture.
    pub fn on_progress(&mut self, f: impl FnMut(f64) + 'static) {
        self.on_progress = Some(Box::new(f));
    }

    /// Current state.
    pub fn state(&self) -> ExtractionState {
        self.state
    }

    /// Configured frame count.
    pub fn total_frames(&self) -> u32 {
        self.opts.total_frames
    }

    /// Borrow the video source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Sealed store, available only once the phase is [`ExtractionPhase::Ready`].
    pub fn ready_store(&self) -> Option<Arc<FrameStore>> {
        (self.state.phase == ExtractionPhase::Ready).then(|| Arc::clone(&self.store))
    }

    /// Start a run if idle and the source metadata is available.
    ///
    /// Returns `true` when this call moved the extractor out of `Idle`. Calling it while a run
    /// is active or terminal is a no-op.
    pub fn begin(&mut self) -> bool {
        if self.state.phase != ExtractionPhase::Idle {
            return false;
        }
        let Some(meta) = self.source.metadata() else {
            tracing::debug!("video metadata not available yet; extraction deferred");
            return false;
        };

        let size = meta.natural_size_or(self.opts.fallback_size);
        self.surface = Some(CaptureSurface::new(size));
        self.duration_sec = meta.duration_sec;
        self.source.set_muted(true);

        if !meta.has_usable_duration() {
            tracing::warn!(
                duration_sec = meta.duration_sec,
                "video duration is not usable; extraction stalled"
            );
            self.state.phase = ExtractionPhase::Stalled;
            return true;
        }

        tracing::debug!(
            width = size.width,
            height = size.height,
            duration_sec = meta.duration_sec,
            total_frames = self.opts.total_frames,
            "frame extraction started"
        );
        self.state.phase = ExtractionPhase::Extracting;
        true
    }

    /// Advance by one seek/capture pair.
    pub fn step(&mut self) -> ExtractStep {
        if self.state.phase != ExtractionPhase::Extracting {
            return ExtractStep::Idle;
        }

        let index = FrameIndex(self.state.current_index);
        match self.capture(index) {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(frame = index.0, "seek did not complete; extraction stalled");
                self.state.phase = ExtractionPhase::Stalled;
                return ExtractStep::Stalled { at: index };
            }
            Err(err) => {
                tracing::warn!(frame = index.0, error = %err, "frame capture failed; extraction stalled");
                self.state.phase = ExtractionPhase::Stalled;
                return ExtractStep::Stalled { at: index };
            }
        }

        let total = self.opts.total_frames;
        self.state.current_index += 1;
        self.state.progress_percent = f64::from(self.state.current_index) / f64::from(total) * 100.0;
        if let Some(cb) = self.on_progress.as_mut() {
            cb(self.state.progress_percent);
        }

        if self.state.current_index == total {
            self.state.phase = ExtractionPhase::Ready;
            self.surface = None;
            tracing::debug!(frames = total, "frame extraction complete");
            return ExtractStep::Ready;
        }

        tracing::trace!(
            frame = index.0,
            progress = self.state.progress_percent,
            "frame captured"
        );
        ExtractStep::Captured {
            index,
            progress_percent: self.state.progress_percent,
        }
    }

    /// Drive the whole sequence until it is ready or stalls.
    ///
    /// Idempotent once terminal: the store is left untouched.
    #[tracing::instrument(skip(self), fields(total_frames = self.opts.total_frames))]
    pub fn run(&mut self) -> ExtractionState {
        self.begin();
        while let ExtractStep::Captured { .. } = self.step() {}
        self.state
    }

    /// Abandon any partial or finished run and return to `Idle` with an empty store.
    pub fn reset(&mut self) {
        if self.state.phase == ExtractionPhase::Extracting {
            tracing::debug!(
                captured = self.state.current_index,
                "extraction cancelled before completion"
            );
        }
        self.state = ExtractionState::idle();
        self.surface = None;
        self.duration_sec = 0.0;
        self.store = Arc::new(self.store.emptied());
    }

    /// Swap in a different source. Previous frames are discarded.
    pub fn replace_source(&mut self, source: S) -> S {
        self.reset();
        std::mem::replace(&mut self.source, source)
    }

    /// Tear down, handing back the source.
    pub fn into_source(self) -> S {
        self.source
    }

    fn capture(&mut self, index: FrameIndex) -> CineloreResult<bool> {
        let time_sec =
            f64::from(index.0) / f64::from(self.opts.total_frames) * self.duration_sec;

        if self.source.seek(time_sec, self.opts.seek_timeout)? == SeekStatus::TimedOut {
            return Ok(false);
        }

        let surface = self
            .surface
            .as_mut()
            .ok_or_else(|| CineloreError::extraction("capture surface missing"))?;
        self.source.draw_current(surface)?;
        let frame = surface.snapshot(index)?;

        let store = Arc::get_mut(&mut self.store)
            .ok_or_else(|| CineloreError::extraction("frame store is shared while extracting"))?;
        store.push(frame)?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/extractor.rs"]
mod tests;
