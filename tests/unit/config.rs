use super::*;
use crate::camera::PinchAnchor;

#[test]
fn empty_object_yields_defaults() {
    let cfg = ExperienceConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, ExperienceConfig::default());
    cfg.validate().unwrap();
    assert_eq!(cfg.scrub.total_frames, 120);
    assert_eq!(cfg.scrub.lerp_factor, 0.15);
    assert_eq!(cfg.camera.max_scale, 8.0);
    assert_eq!(cfg.camera.pinch_anchor, PinchAnchor::ViewportCenter);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let json = r#"{
        "scrub": {"total_frames": 60},
        "camera": {"pinch_anchor": "midpoint", "max_scale": 4.0}
    }"#;
    let cfg = ExperienceConfig::from_reader(json.as_bytes()).unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.scrub.total_frames, 60);
    assert_eq!(cfg.scrub.seek_timeout_ms, 5000);
    assert_eq!(cfg.camera.pinch_anchor, PinchAnchor::Midpoint);
    assert_eq!(cfg.camera.min_scale, 1.0);
}

#[test]
fn scroll_region_resolves_against_viewport_height() {
    let cfg = ExperienceConfig::default();
    let m = cfg.scroll.mapper(800.0, cfg.scrub.total_frames).unwrap();
    assert_eq!(m.scroll_start(), 800.0);
    assert_eq!(m.scroll_range(), 1600.0);
    assert!(cfg.scroll.mapper(0.0, 120).is_err());
}

#[test]
fn scrub_opts_carry_timeout_and_fallback() {
    let opts = ScrubConfig::default().scrub_opts().unwrap();
    assert_eq!(opts.extractor.seek_timeout, Duration::from_millis(5000));
    assert_eq!(opts.extractor.fallback_size, PixelSize::new(1920, 1080).unwrap());
    assert_eq!(opts.lerp_factor, 0.15);
}

#[test]
fn invalid_values_are_rejected() {
    for json in [
        r#"{"scrub": {"total_frames": 0}}"#,
        r#"{"scrub": {"lerp_factor": 1.0}}"#,
        r#"{"scrub": {"seek_timeout_ms": 0}}"#,
        r#"{"scroll": {"range_viewports": 0.0}}"#,
        r#"{"camera": {"min_scale": 2.0, "max_scale": 1.0}}"#,
    ] {
        let cfg = ExperienceConfig::from_reader(json.as_bytes()).unwrap();
        assert!(cfg.validate().is_err(), "{json} should be rejected");
    }
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ExperienceConfig::from_reader("{".as_bytes()).unwrap_err();
    assert!(err.to_string().starts_with("serialization error:"));
}

#[test]
fn missing_file_is_reported() {
    let err = ExperienceConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("not/here.json"));
}
