mod input;
mod navigation;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::{Address, Clock, Controller, Marker, SlideMetrics, Surface};
use crate::deck::Slide;

type Log = Rc<RefCell<Vec<String>>>;

/// Surface double that keeps the latest value of every region and an ordered
/// log of calls, optionally shared with event subscribers.
#[derive(Default)]
pub struct RecordingSurface {
    pub current: Option<usize>,
    pub index_text: String,
    pub notes: (String, String),
    pub timer_text: Option<String>,
    pub markers: HashSet<Marker>,
    pub metrics: HashMap<usize, SlideMetrics>,
    pub scales: HashMap<usize, f32>,
    pub log: Log,
}

impl RecordingSurface {
    fn record(&self, entry: String) {
        self.log.borrow_mut().push(entry);
    }
}

impl Surface for RecordingSurface {
    fn mark_current(&mut self, previous: usize, current: usize) {
        self.record(format!("mark {previous}->{current}"));
        self.current = Some(current);
    }

    fn write_index(&mut self, text: &str) {
        self.record(format!("index {text}"));
        self.index_text = text.to_string();
    }

    fn write_notes(&mut self, current: &str, next: &str) {
        self.record(format!("notes {current}|{next}"));
        self.notes = (current.to_string(), next.to_string());
    }

    fn write_timer(&mut self, text: &str) {
        self.record(format!("timer {text}"));
        self.timer_text = Some(text.to_string());
    }

    fn apply_marker(&mut self, marker: Marker) {
        self.record(format!("+{}", marker.class_name()));
        self.markers.insert(marker);
    }

    fn remove_marker(&mut self, marker: Marker) {
        self.record(format!("-{}", marker.class_name()));
        self.markers.remove(&marker);
    }

    fn slide_metrics(&self, index: usize) -> Option<SlideMetrics> {
        self.metrics.get(&index).copied()
    }

    fn apply_scale(&mut self, index: usize, scale: f32) {
        self.record(format!("scale {index}"));
        self.scales.insert(index, scale);
    }
}

/// Clock double: time only moves when a test says so.
pub struct ManualClock {
    pub now: Instant,
    pub wakes: Vec<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Instant::now(),
            wakes: Vec::new(),
        }
    }
}

impl ManualClock {
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now
    }

    fn wake_after(&mut self, delay: Duration) {
        self.wakes.push(delay);
    }
}

pub type TestController = Controller<RecordingSurface, ManualClock>;

/// `count` slides; even-numbered ones carry notes.
fn slides(count: usize) -> Rc<[Slide]> {
    (0..count)
        .map(|i| {
            let notes = format!("notes {i}");
            Slide::new(
                &format!("Slide {i}"),
                "body",
                (i % 2 == 0).then_some(notes.as_str()),
            )
        })
        .collect()
}

fn address(fragment: Option<&str>) -> Address {
    let base = Address::parse("file:///deck/talk.md").unwrap();
    match fragment {
        Some(f) => base.with_fragment(f),
        None => base,
    }
}

fn controller(count: usize) -> TestController {
    controller_at(count, None)
}

fn controller_at(count: usize, fragment: Option<&str>) -> TestController {
    Controller::new(
        slides(count),
        address(fragment),
        RecordingSurface::default(),
        ManualClock::default(),
    )
    .unwrap()
}

/// Record every event into the surface log so ordering against surface calls
/// can be asserted.
fn log_events(c: &mut TestController) -> Log {
    let log = Rc::clone(&c.surface().log);
    for kind in super::EventKind::ALL {
        let log = Rc::clone(&log);
        c.on(kind, move |event| {
            log.borrow_mut().push(format!("event {event:?}"));
            Ok(())
        });
    }
    log.borrow_mut().clear();
    log
}

fn events(log: &Log) -> Vec<String> {
    log.borrow()
        .iter()
        .filter(|e| e.starts_with("event "))
        .cloned()
        .collect()
}

#[test]
fn test_empty_deck_is_fatal() {
    let result = Controller::new(
        Rc::from(Vec::<Slide>::new()),
        address(None),
        RecordingSurface::default(),
        ManualClock::default(),
    );
    assert!(matches!(result, Err(crate::error::ControllerError::EmptyDeck)));
}

#[test]
fn test_initial_state() {
    let c = controller(3);
    assert_eq!(c.current_index(), 0);
    assert_eq!(c.display_mode(), super::DisplayMode::Show);
    assert!(!c.is_clone());
    assert_eq!(c.address().fragment(), Some("0"));
    assert_eq!(c.surface().current, Some(0));
    assert_eq!(c.surface().index_text, "1 / 3");
    assert_eq!(c.surface().timer_text.as_deref(), Some("00:00:00"));
    assert!(c.surface().markers.contains(&Marker::Mode(super::DisplayMode::Show)));
}
