//! Scroll-driven video scrubbing and a pannable map camera for cinematic lore viewers.
//!
//! The crate splits into two engines sharing a small foundation:
//!
//! - Scrubbing: [`frames`] extracts a fixed number of frames from a video source into an
//!   immutable [`frames::store::FrameStore`]; [`scroll`] maps a container scroll offset to a
//!   target frame; [`playback`] eases the painted frame toward that target on every display
//!   refresh.
//! - Camera: [`camera`] turns pointer, wheel, touch and button input into a clamped
//!   pan/zoom transform over a cover-fitted map described by [`map`].
//!
//! [`scene`] and [`animation`] describe the surrounding narrative sections and their tweens,
//! [`assets`] preloads their images, and [`encode`] renders offline previews through `ffmpeg`.
//!
//! Browser collaborators (video element, canvas, refresh callback) are traits with native
//! implementations, so the whole pipeline runs headless.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Scene tweens, easing and timelines.
pub mod animation;
/// Image and SVG preloading.
pub mod assets;
/// Map camera: pan/zoom state machine and transform math.
pub mod camera;
/// JSON-loadable experience configuration.
pub mod config;
/// Preview encoding.
pub mod encode;
/// Shared types, errors and math helpers.
pub mod foundation;
/// Frame extraction and storage.
pub mod frames;
/// Map zones and fixer markers.
pub mod map;
/// Scroll-driven playback.
pub mod playback;
/// Scene deck.
pub mod scene;
/// Scroll-to-progress mapping.
pub mod scroll;

pub use animation::ease::Ease;
pub use animation::plan::scene_tweens;
pub use animation::timeline::{RecordingTimeline, Timeline};
pub use animation::tween::{
    Edge, SampleCtx, ScrollTrigger, SectionBounds, TriggerPoint, TweenDrive, TweenProperty,
    TweenSpec,
};
pub use assets::preload::{AssetKind, PreloadReport, preload_assets};
pub use camera::{
    CameraConfig, CameraEngine, CameraInput, CameraPhase, CameraTransform, HitTarget,
    MapGeometry, PinchAnchor,
};
pub use config::{ExperienceConfig, ScrollConfig, ScrubConfig};
pub use encode::ffmpeg::{FfmpegEncoder, PreviewConfig};
pub use foundation::core::{Affine, FrameIndex, PixelSize, Point, Size, Vec2, Viewport};
pub use foundation::error::{CineloreError, CineloreResult};
pub use frames::extractor::{
    ExtractStep, ExtractionPhase, ExtractionState, ExtractorOpts, FrameExtractor,
};
pub use frames::ffmpeg::{FfmpegVideoSource, ffmpeg_tools_available};
pub use frames::source::{CaptureSurface, SeekStatus, VideoMetadata, VideoSource};
pub use frames::store::{FrameStore, VideoFrame};
pub use map::{Fixer, MapData, Zone};
pub use playback::controller::{ScrubController, ScrubOpts};
pub use playback::render_loop::{
    CanvasSurface, PaintSurface, PlaybackCursor, RenderLoop, TickOutcome,
};
pub use playback::scheduler::{FrameScheduler, ManualScheduler, RequestId};
pub use scene::{Scene, SceneDeck};
pub use scroll::{ScrollKeyframe, ScrollMapper, ScrollSample, ScrollScript, ScrollSignal};
