use super::*;
use crate::controller::{Size, Target};

#[test]
fn test_next_walks_to_the_end_then_stops() {
    let mut c = controller(5);
    for expected in 1..5 {
        assert!(c.navigate(Target::Next));
        assert_eq!(c.current_index(), expected);
    }
    assert!(!c.navigate(Target::Next));
    assert_eq!(c.current_index(), 4);
}

#[test]
fn test_prev_at_first_slide_is_noop() {
    let mut c = controller(5);
    let log = log_events(&mut c);
    assert!(!c.navigate(Target::Prev));
    assert_eq!(c.current_index(), 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_out_of_range_index_has_no_effect() {
    let mut c = controller(5);
    c.navigate(Target::Index(2));
    let log = log_events(&mut c);

    assert!(!c.navigate(Target::Index(42)));
    assert!(!c.navigate(Target::Index(-1)));
    assert_eq!(c.current_index(), 2);
    assert_eq!(c.address().fragment(), Some("2"));
    assert!(log.borrow().is_empty(), "unexpected calls: {:?}", log.borrow());
}

#[test]
fn test_index_stays_in_bounds() {
    let mut c = controller(3);
    let targets = [
        Target::Last,
        Target::Next,
        Target::Next,
        Target::First,
        Target::Prev,
        Target::Index(7),
        Target::Index(1),
        Target::Last,
    ];
    for target in targets {
        c.navigate(target);
        assert!(c.current_index() < c.slide_count());
    }
    assert_eq!(c.current_index(), 2);
}

#[test]
fn test_side_effect_order() {
    let mut c = controller(3);
    c.surface_mut().metrics.insert(
        1,
        SlideMetrics {
            container: Size::new(960.0, 540.0),
            content: Size::new(1920.0, 1080.0),
        },
    );
    let log = log_events(&mut c);

    c.navigate(Target::Next);
    assert_eq!(
        *log.borrow(),
        vec![
            "event navigationStart(1)",
            "mark 0->1",
            "index 2 / 3",
            "notes |notes 2",
            "scale 1",
            "event navigationEnd(1)",
        ]
    );
    assert_eq!(c.surface().scales.get(&1), Some(&0.5));
}

#[test]
fn test_renavigating_current_slide_runs_full_sequence() {
    let mut c = controller(3);
    c.navigate(Target::Index(1));
    let log = log_events(&mut c);

    assert!(c.navigate(Target::Index(1)));
    assert_eq!(
        events(&log),
        vec!["event navigationStart(1)", "event navigationEnd(1)"]
    );
    assert!(log.borrow().contains(&"mark 1->1".to_string()));
}

#[test]
fn test_notes_follow_current_and_next() {
    let mut c = controller(3);
    assert_eq!(c.surface().notes, ("notes 0".to_string(), String::new()));

    c.navigate(Target::Next);
    assert_eq!(c.surface().notes, (String::new(), "notes 2".to_string()));

    c.navigate(Target::Last);
    assert_eq!(c.surface().notes, ("notes 2".to_string(), String::new()));
    assert_eq!(c.surface().index_text, "3 / 3");
}

#[test]
fn test_fragment_sets_start_slide() {
    let mut c = controller_at(3, Some("1"));
    assert_eq!(c.current_index(), 1);
    assert_eq!(c.surface().current, Some(1));
    assert!(!c.timer().is_started());

    c.navigate(Target::Last);
    assert_eq!(c.current_index(), 2);
    assert_eq!(c.address().fragment(), Some("2"));
}

#[test]
fn test_malformed_fragment_falls_back_to_first() {
    for fragment in ["intro", "9", "-1", "1.5"] {
        let c = controller_at(3, Some(fragment));
        assert_eq!(c.current_index(), 0, "fragment {fragment}");
        assert_eq!(c.surface().current, Some(0));
        assert_eq!(c.address().fragment(), Some("0"));
    }
}

#[test]
fn test_rescale_skips_unmeasured_slides() {
    let mut c = controller(3);
    c.surface_mut().metrics.insert(
        2,
        SlideMetrics {
            container: Size::new(800.0, 800.0),
            content: Size::new(1600.0, 900.0),
        },
    );
    c.rescale();
    assert_eq!(c.surface().scales.len(), 1);
    assert_eq!(c.surface().scales.get(&2), Some(&0.5));
}
