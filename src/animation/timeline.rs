use crate::animation::tween::{SampleCtx, TweenProperty, TweenSpec};

/// Tweening capability consumed by scene setup (a declarative animation library on the web).
pub trait Timeline {
    /// Schedule one property interpolation.
    fn schedule(&mut self, tween: TweenSpec);

    /// Schedule several tweens in order.
    fn schedule_all(&mut self, tweens: impl IntoIterator<Item = TweenSpec>)
    where
        Self: Sized,
    {
        for t in tweens {
            self.schedule(t);
        }
    }
}

/// In-memory [`Timeline`] that keeps every scheduled tween and samples them on demand.
#[derive(Clone, Debug, Default)]
pub struct RecordingTimeline {
    tweens: Vec<TweenSpec>,
}

impl RecordingTimeline {
    /// Empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scheduled tweens in scheduling order.
    pub fn tweens(&self) -> &[TweenSpec] {
        &self.tweens
    }

    /// Tweens animating `target`.
    pub fn for_target<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a TweenSpec> + 'a {
        self.tweens.iter().filter(move |t| t.target == target)
    }

    /// Current value of `target.property`.
    ///
    /// When several tweens animate the same property, the last scheduled one that has started
    /// wins; before any has started, the first one's `from` applies.
    pub fn value(&self, target: &str, property: TweenProperty, ctx: SampleCtx) -> Option<f64> {
        let mut matching = self
            .for_target(target)
            .filter(|t| t.property == property)
            .peekable();
        let first = matching.peek().map(|t| t.value_at(0.0))?;
        let mut value = first;
        for tween in matching {
            if tween.has_started(ctx) {
                value = tween.sample(ctx);
            }
        }
        Some(value)
    }
}

impl Timeline for RecordingTimeline {
    fn schedule(&mut self, tween: TweenSpec) {
        tracing::trace!(target_el = %tween.target, property = ?tween.property, "tween scheduled");
        self.tweens.push(tween);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
