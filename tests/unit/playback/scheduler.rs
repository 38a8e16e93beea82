use super::*;

#[test]
fn fire_drains_in_request_order() {
    let mut s = ManualScheduler::new();
    let a = s.request();
    let b = s.request();
    assert_eq!(s.pending_len(), 2);
    assert_eq!(s.fire(), vec![a, b]);
    assert_eq!(s.pending_len(), 0);
    assert_eq!(s.refreshes(), 1);
}

#[test]
fn cancelled_requests_never_fire() {
    let mut s = ManualScheduler::new();
    let a = s.request();
    let b = s.request();
    s.cancel(a);
    assert_eq!(s.fire(), vec![b]);

    s.cancel(b);
    assert!(s.fire().is_empty());
}

#[test]
fn ids_are_never_reused() {
    let mut s = ManualScheduler::new();
    let a = s.request();
    s.fire();
    let b = s.request();
    assert_ne!(a, b);
}
