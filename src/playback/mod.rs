//! Scroll-scrubbed playback.
//!
//! The controller gates the render loop on extraction readiness and feeds it scroll targets;
//! the loop paints on display refreshes handed out by a [`scheduler::FrameScheduler`].

/// Scroll-section orchestration: extraction, ready gate, scroll input and the render loop.
pub mod controller;
/// Display-refresh loop easing the painted frame toward the scroll target.
pub mod render_loop;
/// Display-refresh scheduling capability and a manually driven implementation.
pub mod scheduler;
