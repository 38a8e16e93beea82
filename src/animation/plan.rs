use crate::animation::ease::Ease;
use crate::animation::tween::{Edge, TriggerPoint, TweenDrive, TweenProperty, TweenSpec};
use crate::scene::{Scene, Side};

use TweenProperty::{ClipTop, LetterSpacing, Opacity, RotateX, Scale, X, XPercent, Y, YPercent};

/// Delay before load-time intros start.
pub const INTRO_DELAY_SEC: f64 = 0.3;

const TOP_TOP: TriggerPoint = TriggerPoint::new(Edge::Top, 0.0);
const TOP_BOTTOM: TriggerPoint = TriggerPoint::new(Edge::Top, 1.0);
const BOTTOM_TOP: TriggerPoint = TriggerPoint::new(Edge::Bottom, 0.0);

/// Tweens that bring a scene to life, in scheduling order.
///
/// Unknown scenes get none.
pub fn scene_tweens(scene: &Scene) -> Vec<TweenSpec> {
    match scene {
        Scene::Landing(_) => landing(),
        Scene::Hero(h) => hero(h.quote.is_some()),
        Scene::Parallax(_) => parallax(),
        Scene::Split(s) => split(s.side),
        Scene::FullscreenText(t) => fullscreen_text(t.words.len()),
        Scene::Finale(_) => finale(),
        Scene::Unknown => Vec::new(),
    }
}

/// Sequential intro builder: each step starts `overlap` seconds before the previous one ends.
struct Sequence {
    drive: TweenDrive,
    cursor: f64,
    base_delay: f64,
    out: Vec<TweenSpec>,
}

impl Sequence {
    fn new(drive: TweenDrive, base_delay: f64) -> Self {
        Self {
            drive,
            cursor: 0.0,
            base_delay,
            out: Vec::new(),
        }
    }

    fn step(
        mut self,
        target: &str,
        overlap: f64,
        duration: f64,
        ease: Ease,
        props: &[(TweenProperty, f64, f64)],
    ) -> Self {
        let at = (self.cursor - overlap).max(0.0);
        self.cursor = at + duration;
        let delay = self.base_delay + at;
        self.out
            .extend(tweens(target, self.drive, delay, duration, ease, props));
        self
    }

    fn finish(self) -> Vec<TweenSpec> {
        self.out
    }
}

fn tweens(
    target: &str,
    drive: TweenDrive,
    delay: f64,
    duration: f64,
    ease: Ease,
    props: &[(TweenProperty, f64, f64)],
) -> Vec<TweenSpec> {
    props
        .iter()
        .map(|&(property, from, to)| TweenSpec {
            target: target.to_owned(),
            property,
            from,
            to,
            ease,
            delay,
            duration,
            drive,
        })
        .collect()
}

fn scrub(start: TriggerPoint, end: TriggerPoint) -> TweenDrive {
    TweenDrive::Scrub { start, end }
}

fn toggle(viewport: f64, reverse: bool) -> TweenDrive {
    TweenDrive::Toggle {
        start: TriggerPoint::new(Edge::Top, viewport),
        reverse,
    }
}

fn landing() -> Vec<TweenSpec> {
    let mut out = Sequence::new(TweenDrive::Clock, INTRO_DELAY_SEC)
        .step(
            "landing-title",
            0.0,
            1.5,
            Ease::OutQuint,
            &[(Opacity, 0.0, 1.0), (Y, 80.0, 0.0), (ClipTop, 100.0, 0.0)],
        )
        .step(
            "landing-subtitle",
            0.8,
            1.0,
            Ease::OutQuart,
            &[(Opacity, 0.0, 1.0), (Y, 30.0, 0.0)],
        )
        .step(
            "landing-tagline",
            0.6,
            1.2,
            Ease::OutCubic,
            &[(Opacity, 0.0, 0.6), (LetterSpacing, 1.0, 0.5)],
        )
        .step(
            "landing-scroll-indicator",
            0.3,
            0.8,
            Ease::OutCubic,
            &[(Opacity, 0.0, 1.0), (Y, -20.0, 0.0)],
        )
        .finish();

    let exit = scrub(TOP_TOP, BOTTOM_TOP);
    for (target, props) in [
        ("landing-title", &[(Y, 0.0, -150.0), (Opacity, 1.0, 0.0)][..]),
        ("landing-subtitle", &[(Y, 0.0, -80.0), (Opacity, 1.0, 0.0)][..]),
        ("landing-tagline", &[(Y, 0.0, -50.0), (Opacity, 0.6, 0.0)][..]),
        ("landing-scroll-indicator", &[(Opacity, 1.0, 0.0)][..]),
        ("landing-bg-gradient", &[(Opacity, 1.0, 0.0)][..]),
    ] {
        out.extend(tweens(target, exit, 0.0, 0.0, Ease::InCubic, props));
    }
    out
}

fn hero(has_quote: bool) -> Vec<TweenSpec> {
    let mut seq = Sequence::new(TweenDrive::Clock, INTRO_DELAY_SEC).step(
        "hero-title",
        0.0,
        1.5,
        Ease::OutQuint,
        &[(Opacity, 0.0, 1.0), (Scale, 0.8, 1.0), (Y, 50.0, 0.0)],
    );
    if has_quote {
        seq = seq.step(
            "hero-quote",
            0.8,
            1.0,
            Ease::OutQuart,
            &[(Opacity, 0.0, 1.0), (Y, 30.0, 0.0)],
        );
    }
    let mut out = seq
        .step(
            "scroll-indicator",
            0.3,
            0.8,
            Ease::OutCubic,
            &[(Opacity, 0.0, 1.0), (Y, -20.0, 0.0)],
        )
        .finish();

    // Exit runs over the video scroll section, which the hero scene is part of.
    let exit = scrub(TOP_TOP, BOTTOM_TOP);
    out.extend(tweens(
        "hero-title",
        exit,
        0.0,
        0.0,
        Ease::InCubic,
        &[(Scale, 1.0, 0.7), (Opacity, 1.0, 0.0), (Y, 0.0, -100.0)],
    ));
    if has_quote {
        out.extend(tweens(
            "hero-quote",
            exit,
            0.0,
            0.0,
            Ease::InCubic,
            &[(Opacity, 1.0, 0.0), (Y, 0.0, -50.0)],
        ));
    }
    out.extend(tweens(
        "hero-video-overlay",
        exit,
        0.0,
        0.0,
        Ease::Linear,
        &[(Opacity, 0.3, 1.0)],
    ));
    out.extend(tweens(
        "scroll-indicator",
        exit,
        0.0,
        0.0,
        Ease::InCubic,
        &[(Opacity, 1.0, 0.0)],
    ));
    out
}

fn parallax() -> Vec<TweenSpec> {
    let mut out: Vec<TweenSpec> = tweens(
        "parallax-bg",
        scrub(TOP_BOTTOM, BOTTOM_TOP),
        0.0,
        0.0,
        Ease::Linear,
        &[(YPercent, -15.0, 15.0), (Scale, 1.15, 1.0)],
    );

    out.extend(
        Sequence::new(toggle(0.6, true), 0.0)
            .step(
                "scene-subtitle",
                0.0,
                0.8,
                Ease::OutQuart,
                &[(Opacity, 0.0, 1.0), (Y, 30.0, 0.0), (LetterSpacing, 0.5, 0.3)],
            )
            .step(
                "scene-title",
                0.4,
                1.0,
                Ease::OutQuint,
                &[(Opacity, 0.0, 1.0), (Y, 60.0, 0.0), (ClipTop, 100.0, 0.0)],
            )
            .step(
                "scene-text",
                0.6,
                0.8,
                Ease::OutQuart,
                &[(Opacity, 0.0, 0.8), (Y, 40.0, 0.0)],
            )
            .finish(),
    );
    out
}

fn split(side: Side) -> Vec<TweenSpec> {
    let (image_from, text_from) = match side {
        Side::Left => (-100.0, 60.0),
        Side::Right => (100.0, -60.0),
    };

    let mut out: Vec<TweenSpec> = tweens(
        "split-image-wrapper",
        toggle(0.7, true),
        0.0,
        1.2,
        Ease::OutQuart,
        &[(XPercent, image_from, 0.0), (Opacity, 0.0, 1.0)],
    );
    out.extend(tweens(
        "split-image",
        scrub(TOP_BOTTOM, BOTTOM_TOP),
        0.0,
        0.0,
        Ease::Linear,
        &[(Scale, 1.2, 1.0)],
    ));
    for (i, target) in ["scene-subtitle", "scene-title", "scene-text"].iter().enumerate() {
        out.extend(tweens(
            target,
            toggle(0.5, true),
            0.15 * i as f64,
            1.0,
            Ease::OutQuart,
            &[(X, text_from, 0.0), (Opacity, 0.0, 1.0)],
        ));
    }
    out
}

fn fullscreen_text(words: usize) -> Vec<TweenSpec> {
    (0..words)
        .flat_map(|i| {
            let line = (70.0 - 10.0 * i as f64) / 100.0;
            tweens(
                &format!("word-{i}"),
                toggle(line, true),
                0.0,
                1.2,
                Ease::OutQuint,
                &[
                    (Opacity, 0.0, 1.0),
                    (Y, 120.0, 0.0),
                    (RotateX, -90.0, 0.0),
                    (Scale, 0.8, 1.0),
                ],
            )
        })
        .collect()
}

fn finale() -> Vec<TweenSpec> {
    ["finale-title", "finale-subtitle", "finale-text"]
        .iter()
        .enumerate()
        .flat_map(|(i, target)| {
            tweens(
                target,
                toggle(0.6, false),
                0.2 * i as f64,
                1.2,
                Ease::OutQuart,
                &[(Y, 80.0, 0.0), (Opacity, 0.0, 1.0)],
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/plan.rs"]
mod tests;
