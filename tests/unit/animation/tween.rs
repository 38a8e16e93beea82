use super::*;

const SECTION: SectionBounds = SectionBounds {
    top: 1000.0,
    height: 800.0,
};

fn ctx(elapsed_sec: f64, scroll_top: f64) -> SampleCtx {
    SampleCtx {
        elapsed_sec,
        scroll_top,
        section: SECTION,
        viewport_height: 500.0,
    }
}

fn spec(drive: TweenDrive) -> TweenSpec {
    TweenSpec {
        target: "title".to_owned(),
        property: TweenProperty::Opacity,
        from: 0.0,
        to: 1.0,
        ease: Ease::Linear,
        delay: 0.5,
        duration: 2.0,
        drive,
    }
}

#[test]
fn trigger_points_parse_edge_and_viewport_line() {
    let p: TriggerPoint = "top 60%".parse().unwrap();
    assert_eq!(p, TriggerPoint::new(Edge::Top, 0.6));
    let p: TriggerPoint = "bottom top".parse().unwrap();
    assert_eq!(p, TriggerPoint::new(Edge::Bottom, 0.0));
    let p: TriggerPoint = "top center".parse().unwrap();
    assert_eq!(p.viewport, 0.5);

    assert!("middle top".parse::<TriggerPoint>().is_err());
    assert!("top".parse::<TriggerPoint>().is_err());
    assert!("top 60".parse::<TriggerPoint>().is_err());
    assert!("top 60% extra".parse::<TriggerPoint>().is_err());
}

#[test]
fn trigger_points_resolve_against_section_and_viewport() {
    let top_60 = TriggerPoint::new(Edge::Top, 0.6);
    assert_eq!(top_60.resolve(SECTION, 500.0), 700.0);
    let bottom_top = TriggerPoint::new(Edge::Bottom, 0.0);
    assert_eq!(bottom_top.resolve(SECTION, 500.0), 1800.0);
}

#[test]
fn scroll_trigger_progress_is_clamped() {
    let st = ScrollTrigger {
        start: 100.0,
        end: 300.0,
    };
    assert_eq!(st.progress(0.0), 0.0);
    assert_eq!(st.progress(200.0), 0.5);
    assert_eq!(st.progress(900.0), 1.0);
    assert!(st.is_active(100.0));
    assert!(!st.is_active(99.0));
}

#[test]
fn empty_scroll_window_acts_as_a_step() {
    let st = ScrollTrigger {
        start: 100.0,
        end: 100.0,
    };
    assert_eq!(st.progress(99.9), 0.0);
    assert_eq!(st.progress(100.0), 1.0);
}

#[test]
fn clock_tweens_wait_for_their_delay() {
    let t = spec(TweenDrive::Clock);
    assert_eq!(t.sample(ctx(0.0, 0.0)), 0.0);
    assert!(!t.has_started(ctx(0.4, 0.0)));
    assert!(t.has_started(ctx(0.5, 0.0)));
    assert_eq!(t.sample(ctx(1.5, 0.0)), 0.5);
    assert_eq!(t.sample(ctx(10.0, 0.0)), 1.0);
}

#[test]
fn zero_duration_clock_tween_jumps_at_delay() {
    let mut t = spec(TweenDrive::Clock);
    t.duration = 0.0;
    assert_eq!(t.clock_progress(0.49), 0.0);
    assert_eq!(t.clock_progress(0.5), 1.0);
}

#[test]
fn scrub_tweens_follow_scroll_offset() {
    let t = spec(TweenDrive::Scrub {
        start: TriggerPoint::new(Edge::Top, 1.0),
        end: TriggerPoint::new(Edge::Bottom, 0.0),
    });
    // Window is [500, 1800].
    assert_eq!(t.sample(ctx(0.0, 500.0)), 0.0);
    assert!(!t.has_started(ctx(0.0, 500.0)));
    assert!(t.has_started(ctx(0.0, 501.0)));
    assert!((t.sample(ctx(0.0, 1150.0)) - 0.5).abs() < 1e-12);
    assert_eq!(t.sample(ctx(0.0, 5000.0)), 1.0);
}

#[test]
fn toggle_tweens_settle_on_either_side_of_start() {
    let t = spec(TweenDrive::Toggle {
        start: TriggerPoint::new(Edge::Top, 0.6),
        reverse: true,
    });
    assert_eq!(t.sample(ctx(0.0, 699.0)), 0.0);
    assert!(!t.has_started(ctx(0.0, 699.0)));
    assert_eq!(t.sample(ctx(0.0, 700.0)), 1.0);
    assert!(t.has_started(ctx(0.0, 700.0)));
}

#[test]
fn eased_values_interpolate_between_endpoints() {
    let mut t = spec(TweenDrive::Clock);
    t.from = 80.0;
    t.to = 0.0;
    t.ease = Ease::OutCubic;
    assert_eq!(t.value_at(0.0), 80.0);
    assert_eq!(t.value_at(1.0), 0.0);
    // 1 - 0.5^3 = 0.875
    assert!((t.value_at(0.5) - 10.0).abs() < 1e-12);
}

#[test]
fn clock_tweens_have_no_scroll_window() {
    assert!(spec(TweenDrive::Clock).scroll_trigger(SECTION, 500.0).is_none());
}
