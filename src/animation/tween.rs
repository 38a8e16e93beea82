use std::str::FromStr;

use crate::animation::ease::Ease;
use crate::foundation::error::CineloreError;
use crate::foundation::math::{finite_or, lerp, safe_div};

/// Animatable style property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TweenProperty {
    /// Opacity, `0..=1`.
    Opacity,
    /// Horizontal translation, px.
    X,
    /// Vertical translation, px.
    Y,
    /// Horizontal translation, percent of element width.
    XPercent,
    /// Vertical translation, percent of element height.
    YPercent,
    /// Uniform scale.
    Scale,
    /// Rotation around the X axis, degrees.
    RotateX,
    /// Letter spacing, em.
    LetterSpacing,
    /// Top inset of a rectangular clip, percent.
    ClipTop,
}

/// Which edge of the trigger element a [`TriggerPoint`] tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Edge {
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
}

/// "Element edge meets a line in the viewport", e.g. `top 60%`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerPoint {
    /// Element edge.
    pub edge: Edge,
    /// Viewport line as a fraction of its height from the top.
    pub viewport: f64,
}

impl TriggerPoint {
    /// Build from an edge and a viewport fraction.
    pub const fn new(edge: Edge, viewport: f64) -> Self {
        Self { edge, viewport }
    }

    /// Scroll offset at which the edge reaches the viewport line.
    pub fn resolve(&self, section: SectionBounds, viewport_height: f64) -> f64 {
        let edge = match self.edge {
            Edge::Top => section.top,
            Edge::Bottom => section.top + section.height,
        };
        edge - self.viewport * viewport_height
    }
}

impl FromStr for TriggerPoint {
    type Err = CineloreError;

    /// Parse `"<top|bottom> <top|center|bottom|N%>"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || CineloreError::validation(format!("invalid trigger point '{s}'"));
        let mut parts = s.split_whitespace();
        let edge = match parts.next() {
            Some("top") => Edge::Top,
            Some("bottom") => Edge::Bottom,
            _ => return Err(bad()),
        };
        let viewport = match parts.next() {
            Some("top") => 0.0,
            Some("center") => 0.5,
            Some("bottom") => 1.0,
            Some(p) => {
                let pct: f64 = p
                    .strip_suffix('%')
                    .and_then(|n| n.parse().ok())
                    .ok_or_else(bad)?;
                pct / 100.0
            }
            None => return Err(bad()),
        };
        if parts.next().is_some() {
            return Err(bad());
        }
        Ok(Self { edge, viewport })
    }
}

/// Document-space extent of a trigger element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionBounds {
    /// Top offset inside the scroll container.
    pub top: f64,
    /// Height.
    pub height: f64,
}

/// Resolved scroll window `[start, end]`, in container scroll offsets.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollTrigger {
    /// Offset where progress leaves 0.
    pub start: f64,
    /// Offset where progress reaches 1.
    pub end: f64,
}

impl ScrollTrigger {
    /// Progress of `scroll_top` through the window, in `[0, 1]`.
    ///
    /// An empty window behaves like a step at `start`.
    pub fn progress(&self, scroll_top: f64) -> f64 {
        if self.end <= self.start {
            return if scroll_top >= self.start { 1.0 } else { 0.0 };
        }
        finite_or(safe_div(scroll_top - self.start, self.end - self.start), 0.0).clamp(0.0, 1.0)
    }

    /// `true` once `scroll_top` passed `start`.
    pub fn is_active(&self, scroll_top: f64) -> bool {
        scroll_top >= self.start
    }
}

/// How a tween's progress is driven.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum TweenDrive {
    /// Plays once on load, on the wall clock.
    Clock,
    /// Plays forward when the scroll passes `start`; plays back when it returns above it if
    /// `reverse` is set.
    Toggle {
        /// Activation point.
        start: TriggerPoint,
        /// Reverse when scrolled back.
        reverse: bool,
    },
    /// Progress tracks the scroll position between `start` and `end`.
    Scrub {
        /// Window start.
        start: TriggerPoint,
        /// Window end.
        end: TriggerPoint,
    },
}

/// Inputs for sampling a tween.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleCtx {
    /// Seconds since the timeline started.
    pub elapsed_sec: f64,
    /// Container scroll offset.
    pub scroll_top: f64,
    /// Bounds of the tween's trigger element.
    pub section: SectionBounds,
    /// Viewport height.
    pub viewport_height: f64,
}

/// One property interpolation scheduled on a [`crate::animation::timeline::Timeline`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TweenSpec {
    /// Element name inside the scene.
    pub target: String,
    /// Animated property.
    pub property: TweenProperty,
    /// Value at progress 0.
    pub from: f64,
    /// Value at progress 1.
    pub to: f64,
    /// Ease applied to progress.
    pub ease: Ease,
    /// Seconds before the tween starts playing (clock and toggle drives).
    pub delay: f64,
    /// Play length in seconds (clock and toggle drives).
    pub duration: f64,
    /// Progress source.
    pub drive: TweenDrive,
}

impl TweenSpec {
    /// Value at normalized progress `t`.
    pub fn value_at(&self, t: f64) -> f64 {
        lerp(self.from, self.to, self.ease.apply(t))
    }

    /// Progress after `elapsed_sec` seconds of play.
    pub fn clock_progress(&self, elapsed_sec: f64) -> f64 {
        if self.duration <= 0.0 {
            return if elapsed_sec >= self.delay { 1.0 } else { 0.0 };
        }
        ((elapsed_sec - self.delay) / self.duration).clamp(0.0, 1.0)
    }

    /// Scroll window of a scroll-driven tween; toggles get an empty window at their start.
    pub fn scroll_trigger(
        &self,
        section: SectionBounds,
        viewport_height: f64,
    ) -> Option<ScrollTrigger> {
        match self.drive {
            TweenDrive::Scrub { start, end } => Some(ScrollTrigger {
                start: start.resolve(section, viewport_height),
                end: end.resolve(section, viewport_height),
            }),
            TweenDrive::Toggle { start, .. } => {
                let at = start.resolve(section, viewport_height);
                Some(ScrollTrigger { start: at, end: at })
            }
            TweenDrive::Clock => None,
        }
    }

    /// `true` once the tween has left its initial state: the clock passed its delay, the scroll
    /// entered its scrub window, or its toggle point was crossed.
    pub fn has_started(&self, ctx: SampleCtx) -> bool {
        match self.drive {
            TweenDrive::Clock => ctx.elapsed_sec >= self.delay,
            TweenDrive::Scrub { start, .. } => {
                ctx.scroll_top > start.resolve(ctx.section, ctx.viewport_height)
            }
            TweenDrive::Toggle { start, .. } => {
                ctx.scroll_top >= start.resolve(ctx.section, ctx.viewport_height)
            }
        }
    }

    /// Sample the property.
    ///
    /// Toggle tweens report the value they settle on for the current scroll offset.
    pub fn sample(&self, ctx: SampleCtx) -> f64 {
        let t = match self.drive {
            TweenDrive::Clock => self.clock_progress(ctx.elapsed_sec),
            TweenDrive::Scrub { .. } | TweenDrive::Toggle { .. } => self
                .scroll_trigger(ctx.section, ctx.viewport_height)
                .map(|st| st.progress(ctx.scroll_top))
                .unwrap_or(0.0),
        };
        self.value_at(t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
