use super::*;

fn cfg(width: u32, height: u32, fps: u32) -> PreviewConfig {
    PreviewConfig {
        width,
        height,
        fps,
        out_path: PathBuf::from("target/preview.mp4"),
        overwrite: true,
    }
}

#[test]
fn config_validation_catches_bad_values() {
    assert!(cfg(0, 10, 30).validate().is_err());
    assert!(cfg(11, 10, 30).validate().is_err());
    assert!(cfg(10, 10, 0).validate().is_err());
    cfg(10, 10, 60).validate().unwrap();
}

#[test]
fn mp4_config_takes_frame_size() {
    let c = PreviewConfig::mp4("out/a.mp4", PixelSize::new(64, 36).unwrap(), 60);
    assert_eq!((c.width, c.height, c.fps), (64, 36, 60));
    assert!(c.overwrite);
    assert_eq!(c.frame_len(), 64 * 36 * 4);
}

#[test]
fn opaque_pixels_pass_through() {
    let src = [10u8, 20, 30, 255];
    let mut dst = [0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, [255, 255, 255]).unwrap();
    assert_eq!(dst, [10, 20, 30, 255]);
}

#[test]
fn translucent_pixels_blend_over_background() {
    // Straight red at ~50% over black.
    let src = [255u8, 0, 0, 128];
    let mut dst = [0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, [0, 0, 0]).unwrap();
    assert_eq!(dst, [128, 0, 0, 255]);

    // Fully transparent shows the background.
    let src = [255u8, 0, 0, 0];
    flatten_to_opaque_rgba8(&mut dst, &src, [1, 2, 3]).unwrap();
    assert_eq!(dst, [1, 2, 3, 255]);
}

#[test]
fn mismatched_buffer_lengths_are_rejected() {
    let mut dst = [0u8; 8];
    assert!(flatten_to_opaque_rgba8(&mut dst, &[0u8; 4], [0, 0, 0]).is_err());
}
