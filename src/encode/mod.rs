//! Offline encoding of painted scrub sessions.

/// MP4 encoding through the system `ffmpeg` binary.
pub mod ffmpeg;
