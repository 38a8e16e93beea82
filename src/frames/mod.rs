//! Decoded video frames: the store, the source seam, and the seek/capture extractor.

/// Sequential seek/capture extraction into a [`store::FrameStore`].
pub mod extractor;
/// `ffmpeg`-backed video source (requires the `media-ffmpeg` feature at runtime).
pub mod ffmpeg;
/// Video source trait and the offscreen capture surface.
pub mod source;
/// Immutable frames and the sealed frame store.
pub mod store;
