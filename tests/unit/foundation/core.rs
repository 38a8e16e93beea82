use super::*;

#[test]
fn pixel_size_rejects_zero_dimensions() {
    assert!(PixelSize::new(0, 10).is_err());
    assert!(PixelSize::new(10, 0).is_err());
    assert_eq!(PixelSize::new(4, 2).unwrap().rgba8_len(), 32);
}

#[test]
fn viewport_center_is_half_extent() {
    let vp = Viewport::new(1280.0, 720.0);
    assert_eq!(vp.center(), Point::new(640.0, 360.0));
    assert_eq!(vp.size(), Size::new(1280.0, 720.0));
}
