use super::*;

#[test]
fn natural_size_falls_back_when_unknown() {
    let fallback = PixelSize::new(1920, 1080).unwrap();
    let unknown = VideoMetadata {
        duration_sec: 3.0,
        width: 0,
        height: 0,
    };
    assert_eq!(unknown.natural_size_or(fallback), fallback);

    let known = VideoMetadata {
        duration_sec: 3.0,
        width: 64,
        height: 32,
    };
    assert_eq!(
        known.natural_size_or(fallback),
        PixelSize::new(64, 32).unwrap()
    );
}

#[test]
fn zero_or_nan_duration_is_unusable() {
    let mut meta = VideoMetadata {
        duration_sec: 0.0,
        width: 1,
        height: 1,
    };
    assert!(!meta.has_usable_duration());
    meta.duration_sec = f64::NAN;
    assert!(!meta.has_usable_duration());
    meta.duration_sec = 1.5;
    assert!(meta.has_usable_duration());
}

#[test]
fn draw_same_size_replaces_pixels() {
    let size = PixelSize::new(2, 2).unwrap();
    let mut surface = CaptureSurface::new(size);
    surface.draw_rgba8(size, vec![9; 16]).unwrap();
    let frame = surface.snapshot(FrameIndex(0)).unwrap();
    assert!(frame.rgba8().iter().all(|&b| b == 9));
}

#[test]
fn draw_scales_to_surface() {
    let mut surface = CaptureSurface::new(PixelSize::new(4, 4).unwrap());
    surface
        .draw_rgba8(PixelSize::new(2, 2).unwrap(), vec![200; 16])
        .unwrap();
    let frame = surface.snapshot(FrameIndex(3)).unwrap();
    assert_eq!(frame.index(), FrameIndex(3));
    assert_eq!(frame.rgba8().len(), 64);
    assert!(frame.rgba8().iter().all(|&b| b == 200));
}

#[test]
fn draw_rejects_short_buffer() {
    let size = PixelSize::new(2, 2).unwrap();
    let mut surface = CaptureSurface::new(size);
    assert!(surface.draw_rgba8(size, vec![0; 4]).is_err());
}
