//! Scene animation plans.
//!
//! Scenes describe their motion as [`tween::TweenSpec`] lists; a [`timeline::Timeline`] executes
//! them. Tweens run on the wall clock, toggle at a scroll position, or scrub with the scroll.

/// Easing curves.
pub mod ease;
/// Per-scene tween plans.
pub mod plan;
/// Timeline capability and an in-memory recorder.
pub mod timeline;
/// Tween specs, scroll triggers and sampling.
pub mod tween;
