use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::frames::source::VideoMetadata;

#[derive(Clone, Debug, PartialEq)]
enum Event {
    Mute(bool),
    Seek(f64),
    Draw,
}

struct ScriptedSource {
    meta: Option<VideoMetadata>,
    log: Rc<RefCell<Vec<Event>>>,
    stall_at_seek: Option<usize>,
    seeks: usize,
    position: f64,
}

impl ScriptedSource {
    fn new(duration_sec: f64) -> (Self, Rc<RefCell<Vec<Event>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                meta: Some(VideoMetadata {
                    duration_sec,
                    width: 2,
                    height: 2,
                }),
                log: Rc::clone(&log),
                stall_at_seek: None,
                seeks: 0,
                position: 0.0,
            },
            log,
        )
    }
}

impl VideoSource for ScriptedSource {
    fn metadata(&self) -> Option<VideoMetadata> {
        self.meta
    }

    fn set_muted(&mut self, muted: bool) {
        self.log.borrow_mut().push(Event::Mute(muted));
    }

    fn seek(&mut self, time_sec: f64, _timeout: Duration) -> CineloreResult<SeekStatus> {
        self.log.borrow_mut().push(Event::Seek(time_sec));
        let n = self.seeks;
        self.seeks += 1;
        if self.stall_at_seek == Some(n) {
            return Ok(SeekStatus::TimedOut);
        }
        self.position = time_sec;
        Ok(SeekStatus::Completed)
    }

    fn draw_current(&mut self, surface: &mut CaptureSurface) -> CineloreResult<()> {
        self.log.borrow_mut().push(Event::Draw);
        let shade = self.position as u8;
        surface.pixels_mut().fill(shade);
        Ok(())
    }
}

fn opts(total_frames: u32) -> ExtractorOpts {
    ExtractorOpts {
        total_frames,
        ..Default::default()
    }
}

#[test]
fn seeks_are_evenly_spaced_and_strictly_alternate_with_captures() {
    let (source, log) = ScriptedSource::new(9.0);
    let mut ex = FrameExtractor::new(source, opts(3)).unwrap();

    let state = ex.run();
    assert_eq!(state.phase, ExtractionPhase::Ready);
    assert_eq!(state.progress_percent, 100.0);

    assert_eq!(
        *log.borrow(),
        vec![
            Event::Mute(true),
            Event::Seek(0.0),
            Event::Draw,
            Event::Seek(3.0),
            Event::Draw,
            Event::Seek(6.0),
            Event::Draw,
        ]
    );

    let store = ex.ready_store().unwrap();
    assert!(store.is_ready());
    let shades: Vec<u8> = store.frames().iter().map(|f| f.rgba8()[0]).collect();
    assert_eq!(shades, vec![0, 3, 6]);
}

#[test]
fn progress_is_reported_after_every_capture() {
    let (source, _log) = ScriptedSource::new(4.0);
    let mut ex = FrameExtractor::new(source, opts(4)).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    ex.on_progress(move |p| sink.borrow_mut().push(p));

    ex.run();
    assert_eq!(*seen.borrow(), vec![25.0, 50.0, 75.0, 100.0]);
}

#[test]
fn running_again_after_ready_is_a_no_op() {
    let (source, log) = ScriptedSource::new(2.0);
    let mut ex = FrameExtractor::new(source, opts(2)).unwrap();
    ex.run();
    let events_after_first = log.borrow().len();
    let first = ex.ready_store().unwrap();

    let state = ex.run();
    assert_eq!(state.phase, ExtractionPhase::Ready);
    assert_eq!(log.borrow().len(), events_after_first);

    let second = ex.ready_store().unwrap();
    assert_eq!(first.len(), second.len());
    assert!(Arc::ptr_eq(&first, &second));
    assert!(!ex.begin());
    assert_eq!(ex.step(), ExtractStep::Idle);
}

#[test]
fn store_is_hidden_until_ready() {
    let (source, _log) = ScriptedSource::new(3.0);
    let mut ex = FrameExtractor::new(source, opts(3)).unwrap();
    assert!(ex.begin());
    assert!(matches!(ex.step(), ExtractStep::Captured { .. }));
    assert!(ex.ready_store().is_none());
    assert!(matches!(ex.step(), ExtractStep::Captured { .. }));
    assert_eq!(ex.step(), ExtractStep::Ready);
    assert!(ex.ready_store().is_some());
}

#[test]
fn timed_out_seek_stalls_without_retry() {
    let (mut source, log) = ScriptedSource::new(10.0);
    source.stall_at_seek = Some(1);
    let mut ex = FrameExtractor::new(source, opts(5)).unwrap();

    let state = ex.run();
    assert_eq!(state.phase, ExtractionPhase::Stalled);
    assert_eq!(state.current_index, 1);
    assert_eq!(state.progress_percent, 20.0);
    assert!(ex.ready_store().is_none());

    let seeks = log
        .borrow()
        .iter()
        .filter(|e| matches!(e, Event::Seek(_)))
        .count();
    assert_eq!(seeks, 2);

    ex.run();
    assert_eq!(log.borrow().len(), 4);
}

#[test]
fn zero_duration_stalls_immediately() {
    let (source, log) = ScriptedSource::new(0.0);
    let mut ex = FrameExtractor::new(source, opts(3)).unwrap();
    let state = ex.run();
    assert_eq!(state.phase, ExtractionPhase::Stalled);
    assert_eq!(state.progress_percent, 0.0);
    assert!(!log.borrow().iter().any(|e| matches!(e, Event::Seek(_))));
}

#[test]
fn missing_metadata_defers_start() {
    let (mut source, _log) = ScriptedSource::new(3.0);
    source.meta = None;
    let mut ex = FrameExtractor::new(source, opts(3)).unwrap();
    assert!(!ex.begin());
    assert_eq!(ex.state().phase, ExtractionPhase::Idle);
    assert_eq!(ex.step(), ExtractStep::Idle);
}

#[test]
fn reset_mid_run_discards_partial_frames_and_restarts_from_zero() {
    let (source, log) = ScriptedSource::new(4.0);
    let mut ex = FrameExtractor::new(source, opts(4)).unwrap();
    ex.begin();
    ex.step();
    ex.step();
    ex.reset();

    assert_eq!(ex.state().phase, ExtractionPhase::Idle);
    assert_eq!(ex.step(), ExtractStep::Idle);
    let draws_before = log.borrow().iter().filter(|e| **e == Event::Draw).count();
    assert_eq!(draws_before, 2);

    log.borrow_mut().clear();
    ex.run();
    let first_seek = log
        .borrow()
        .iter()
        .find_map(|e| match e {
            Event::Seek(t) => Some(*t),
            _ => None,
        })
        .unwrap();
    assert_eq!(first_seek, 0.0);
    assert_eq!(ex.ready_store().unwrap().len(), 4);
}

#[test]
fn replacing_the_source_after_ready_starts_over_on_the_new_one() {
    let (old_source, old_log) = ScriptedSource::new(2.0);
    let mut ex = FrameExtractor::new(old_source, opts(2)).unwrap();
    ex.run();
    let old_store = ex.ready_store().unwrap();
    let old_events = old_log.borrow().len();

    let (new_source, new_log) = ScriptedSource::new(8.0);
    let previous = ex.replace_source(new_source);
    assert_eq!(previous.seeks, 2);

    let state = ex.state();
    assert_eq!(state.phase, ExtractionPhase::Idle);
    assert_eq!(state.current_index, 0);
    assert_eq!(state.progress_percent, 0.0);
    assert!(ex.ready_store().is_none());
    assert!(ex.store.is_empty());
    assert!(!ex.store.is_ready());

    let state = ex.run();
    assert_eq!(state.phase, ExtractionPhase::Ready);
    assert_eq!(
        *new_log.borrow(),
        vec![
            Event::Mute(true),
            Event::Seek(0.0),
            Event::Draw,
            Event::Seek(4.0),
            Event::Draw,
        ]
    );
    assert_eq!(old_log.borrow().len(), old_events);

    let shades: Vec<u8> = ex
        .ready_store()
        .unwrap()
        .frames()
        .iter()
        .map(|f| f.rgba8()[0])
        .collect();
    assert_eq!(shades, vec![0, 4]);
    assert_eq!(old_store.len(), 2);
    assert!(old_store.is_ready());
}

#[test]
fn zero_total_frames_is_rejected() {
    let (source, _log) = ScriptedSource::new(1.0);
    assert!(FrameExtractor::new(source, opts(0)).is_err());
}
