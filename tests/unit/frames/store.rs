use super::*;

fn frame(i: u32) -> VideoFrame {
    let size = PixelSize::new(2, 1).unwrap();
    VideoFrame::new(FrameIndex(i), size, vec![i as u8; size.rgba8_len()]).unwrap()
}

#[test]
fn frame_rejects_mismatched_buffer() {
    let size = PixelSize::new(2, 2).unwrap();
    assert!(VideoFrame::new(FrameIndex(0), size, vec![0; 3]).is_err());
}

#[test]
fn store_seals_at_capacity() {
    let mut store = FrameStore::new(3).unwrap();
    for i in 0..3 {
        assert!(!store.is_ready());
        store.push(frame(i)).unwrap();
    }
    assert!(store.is_ready());
    assert_eq!(store.len(), 3);

    assert!(store.push(frame(3)).is_err());
    assert_eq!(store.len(), 3);
}

#[test]
fn store_rejects_out_of_order_frames() {
    let mut store = FrameStore::new(4).unwrap();
    store.push(frame(0)).unwrap();
    assert!(store.push(frame(2)).is_err());
    assert_eq!(store.len(), 1);
}

#[test]
fn store_rejects_dimension_change() {
    let mut store = FrameStore::new(4).unwrap();
    store.push(frame(0)).unwrap();
    let other = PixelSize::new(1, 1).unwrap();
    let bad = VideoFrame::new(FrameIndex(1), other, vec![0; 4]).unwrap();
    assert!(store.push(bad).is_err());
}

#[test]
fn get_returns_only_captured_prefix() {
    let mut store = FrameStore::new(5).unwrap();
    store.push(frame(0)).unwrap();
    store.push(frame(1)).unwrap();
    assert_eq!(store.get(FrameIndex(1)).unwrap().rgba8()[0], 1);
    assert!(store.get(FrameIndex(2)).is_none());
}

#[test]
fn sealed_store_stays_read_only() {
    let mut store = FrameStore::new(2).unwrap();
    store.push(frame(0)).unwrap();
    store.push(frame(1)).unwrap();
    assert!(store.is_ready());

    assert!(store.push(frame(0)).is_err());
    assert!(store.push(frame(2)).is_err());
    assert!(store.is_ready());
    assert_eq!(store.len(), 2);

    let fresh = store.emptied();
    assert!(fresh.is_empty());
    assert!(!fresh.is_ready());
    assert_eq!(fresh.capacity(), 2);
    assert!(store.is_ready());
    assert_eq!(store.len(), 2);
}

#[test]
fn zero_capacity_is_invalid() {
    assert!(FrameStore::new(0).is_err());
}
