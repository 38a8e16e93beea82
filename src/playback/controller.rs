use crate::foundation::error::{CineloreError, CineloreResult};
use crate::frames::extractor::{
    ExtractStep, ExtractionPhase, ExtractionState, ExtractorOpts, FrameExtractor,
};
use crate::frames::source::VideoSource;
use crate::frames::store::VideoFrame;
use crate::playback::render_loop::{PaintSurface, PlaybackCursor, RenderLoop, TickOutcome};
use crate::playback::scheduler::{FrameScheduler, RequestId};
use crate::scroll::{ScrollMapper, ScrollSample, ScrollSignal};

type VisibilityFn = Box<dyn FnMut(bool)>;

/// Options for [`ScrubController`].
#[derive(Clone, Copy, Debug)]
pub struct ScrubOpts {
    /// Extraction tunables.
    pub extractor: ExtractorOpts,
    /// Render loop smoothing factor.
    pub lerp_factor: f64,
}

impl Default for ScrubOpts {
    fn default() -> Self {
        Self {
            extractor: ExtractorOpts::default(),
            lerp_factor: crate::playback::render_loop::DEFAULT_LERP_FACTOR,
        }
    }
}

/// One scroll-scrubbed video section: extraction, the ready gate, scroll mapping and the render
/// loop, bound to a single host container.
///
/// The extractor writes the frame store and the render loop reads it; the loop is only started
/// once extraction reports ready, so the two never overlap.
pub struct ScrubController<S: VideoSource, Sch: FrameScheduler> {
    extractor: FrameExtractor<S>,
    render: RenderLoop<Sch>,
    mapper: ScrollMapper,
    mounted: bool,
    last_sample: Option<ScrollSample>,
    visible: bool,
    on_visibility: Option<VisibilityFn>,
    poster: Option<VideoFrame>,
    poster_painted: bool,
}

impl<S: VideoSource, Sch: FrameScheduler> ScrubController<S, Sch> {
    /// Bind a source and a scheduler. The mapper's frame count must match the extractor's.
    pub fn new(
        source: S,
        scheduler: Sch,
        mapper: ScrollMapper,
        opts: ScrubOpts,
    ) -> CineloreResult<Self> {
        if mapper.total_frames() != opts.extractor.total_frames {
            return Err(CineloreError::validation(format!(
                "scroll mapper targets {} frames but extraction captures {}",
                mapper.total_frames(),
                opts.extractor.total_frames
            )));
        }
        Ok(Self {
            extractor: FrameExtractor::new(source, opts.extractor)?,
            render: RenderLoop::new(scheduler, opts.lerp_factor)?,
            mapper,
            mounted: false,
            last_sample: None,
            visible: false,
            on_visibility: None,
            poster: None,
            poster_painted: false,
        })
    }

    /// Static frame painted once if extraction stalls.
    pub fn with_poster(mut self, poster: VideoFrame) -> Self {
        self.poster = Some(poster);
        self
    }

    /// Register a callback fired whenever the section's visibility flag flips.
    pub fn on_visibility_change(&mut self, f: impl FnMut(bool) + 'static) {
        self.on_visibility = Some(Box::new(f));
    }

    /// Register an extraction progress callback.
    pub fn on_progress(&mut self, f: impl FnMut(f64) + 'static) {
        self.extractor.on_progress(f);
    }

    /// Extraction state.
    pub fn extraction(&self) -> ExtractionState {
        self.extractor.state()
    }

    /// Render cursor.
    pub fn cursor(&self) -> PlaybackCursor {
        self.render.cursor()
    }

    /// Latest scroll sample, if any scroll event was seen.
    pub fn last_sample(&self) -> Option<ScrollSample> {
        self.last_sample
    }

    /// Whether the scrub region has been scrolled into.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// `true` while mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// `true` while the render loop is painting.
    pub fn is_playing(&self) -> bool {
        self.render.is_running()
    }

    /// Borrow the video source.
    pub fn source(&self) -> &S {
        self.extractor.source()
    }

    /// Borrow the scheduler.
    pub fn scheduler(&self) -> &Sch {
        self.render.scheduler()
    }

    /// Mutably borrow the scheduler, e.g. to fire a manual refresh.
    pub fn scheduler_mut(&mut self) -> &mut Sch {
        self.render.scheduler_mut()
    }

    /// Attach to the host container and start extraction if metadata is available.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.extractor.begin();
        tracing::debug!(phase = ?self.extractor.state().phase, "scrub section mounted");
    }

    /// Advance extraction by one capture, starting playback when it completes.
    ///
    /// Hosts call this from the seek-completed notification; when metadata arrives late, the
    /// first call also begins the run.
    pub fn pump(&mut self, surface: &mut dyn PaintSurface) -> CineloreResult<ExtractStep> {
        if !self.mounted {
            return Ok(ExtractStep::Idle);
        }
        self.extractor.begin();
        let step = self.extractor.step();
        match step {
            ExtractStep::Ready => self.start_playback(surface)?,
            ExtractStep::Stalled { .. } => self.paint_poster(surface),
            ExtractStep::Idle => {
                if self.extractor.state().phase == ExtractionPhase::Stalled {
                    self.paint_poster(surface);
                }
            }
            ExtractStep::Captured { .. } => {}
        }
        Ok(step)
    }

    /// Pump extraction until it is ready or stalled.
    pub fn run_extraction(
        &mut self,
        surface: &mut dyn PaintSurface,
    ) -> CineloreResult<ExtractionState> {
        while let ExtractStep::Captured { .. } = self.pump(surface)? {}
        Ok(self.extractor.state())
    }

    /// Handle a scroll event of the host container.
    ///
    /// Only the most recent sample before a refresh affects the target.
    pub fn on_scroll(&mut self, signal: ScrollSignal) -> ScrollSample {
        let sample = self.mapper.map(signal);
        self.last_sample = Some(sample);
        if sample.visible != self.visible {
            self.visible = sample.visible;
            tracing::debug!(visible = sample.visible, "scrub visibility changed");
            if let Some(cb) = self.on_visibility.as_mut() {
                cb(sample.visible);
            }
        }
        if self.render.is_running() {
            self.render.set_target(sample.target_frame_index);
        }
        sample
    }

    /// Deliver a fired refresh callback to the render loop.
    pub fn tick(&mut self, id: RequestId, surface: &mut dyn PaintSurface) -> TickOutcome {
        self.render.tick(id, surface)
    }

    /// Detach from the host: cancel the pending refresh, abandon extraction, release frames.
    ///
    /// A later [`ScrubController::mount`] starts extraction from scratch.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.render.stop();
        self.extractor.reset();
        self.mounted = false;
        self.poster_painted = false;
        self.visible = false;
        self.last_sample = None;
        tracing::debug!("scrub section unmounted");
    }

    fn start_playback(&mut self, surface: &mut dyn PaintSurface) -> CineloreResult<()> {
        let Some(store) = self.extractor.ready_store() else {
            return Ok(());
        };
        self.render.start(store, surface)?;
        if let Some(sample) = self.last_sample {
            self.render.set_target(sample.target_frame_index);
        }
        Ok(())
    }

    fn paint_poster(&mut self, surface: &mut dyn PaintSurface) {
        if self.poster_painted {
            return;
        }
        if let Some(poster) = self.poster.as_ref() {
            surface.paint(poster);
            tracing::info!("extraction stalled; showing poster frame");
        }
        self.poster_painted = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/controller.rs"]
mod tests;
