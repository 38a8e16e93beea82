use super::*;
use crate::animation::ease::Ease;
use crate::animation::tween::{Edge, SectionBounds, TriggerPoint, TweenDrive};

fn ctx(elapsed_sec: f64, scroll_top: f64) -> SampleCtx {
    SampleCtx {
        elapsed_sec,
        scroll_top,
        section: SectionBounds {
            top: 0.0,
            height: 1000.0,
        },
        viewport_height: 500.0,
    }
}

fn opacity(target: &str, from: f64, to: f64, drive: TweenDrive) -> TweenSpec {
    TweenSpec {
        target: target.to_owned(),
        property: TweenProperty::Opacity,
        from,
        to,
        ease: Ease::Linear,
        delay: 0.0,
        duration: 1.0,
        drive,
    }
}

fn exit_scrub() -> TweenDrive {
    TweenDrive::Scrub {
        start: TriggerPoint::new(Edge::Top, 0.0),
        end: TriggerPoint::new(Edge::Bottom, 0.0),
    }
}

#[test]
fn records_tweens_in_order() {
    let mut tl = RecordingTimeline::new();
    tl.schedule_all([
        opacity("a", 0.0, 1.0, TweenDrive::Clock),
        opacity("b", 0.0, 1.0, TweenDrive::Clock),
        opacity("a", 1.0, 0.0, exit_scrub()),
    ]);
    assert_eq!(tl.tweens().len(), 3);
    assert_eq!(tl.for_target("a").count(), 2);
    assert_eq!(tl.tweens()[1].target, "b");
}

#[test]
fn unknown_target_has_no_value() {
    let tl = RecordingTimeline::new();
    assert_eq!(tl.value("a", TweenProperty::Opacity, ctx(0.0, 0.0)), None);
}

#[test]
fn intro_then_scroll_exit_hand_over() {
    let mut tl = RecordingTimeline::new();
    let mut intro = opacity("a", 0.0, 1.0, TweenDrive::Clock);
    intro.delay = 0.3;
    tl.schedule(intro);
    tl.schedule(opacity("a", 1.0, 0.0, exit_scrub()));

    // Before the intro starts the initial state shows.
    assert_eq!(tl.value("a", TweenProperty::Opacity, ctx(0.0, 0.0)), Some(0.0));
    // Intro midway, still at the top of the page.
    assert_eq!(tl.value("a", TweenProperty::Opacity, ctx(0.8, 0.0)), Some(0.5));
    // Scrolling through the exit window overrides the intro.
    assert_eq!(tl.value("a", TweenProperty::Opacity, ctx(5.0, 500.0)), Some(0.5));
    assert_eq!(tl.value("a", TweenProperty::Opacity, ctx(5.0, 1000.0)), Some(0.0));
}

#[test]
fn properties_are_sampled_independently() {
    let mut tl = RecordingTimeline::new();
    let mut y = opacity("a", 80.0, 0.0, TweenDrive::Clock);
    y.property = TweenProperty::Y;
    tl.schedule(y);
    assert_eq!(tl.value("a", TweenProperty::Opacity, ctx(1.0, 0.0)), None);
    assert_eq!(tl.value("a", TweenProperty::Y, ctx(1.0, 0.0)), Some(0.0));
}
