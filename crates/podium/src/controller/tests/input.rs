use super::*;
use crate::controller::{DisplayMode, Input, KeyCode, Modifiers};

fn press(c: &mut TestController, code: KeyCode) -> bool {
    c.handle_input(Input::Key {
        code,
        modifiers: Modifiers::default(),
    })
}

#[test]
fn test_keyboard_drives_navigation_and_modes() {
    let mut c = controller(5);
    press(&mut c, KeyCode::Space);
    press(&mut c, KeyCode::PageDown);
    assert_eq!(c.current_index(), 2);

    press(&mut c, KeyCode::End);
    assert_eq!(c.current_index(), 4);
    press(&mut c, KeyCode::Home);
    assert_eq!(c.current_index(), 0);

    press(&mut c, KeyCode::O);
    assert_eq!(c.display_mode(), DisplayMode::Overview);
    press(&mut c, KeyCode::Escape);
    assert_eq!(c.display_mode(), DisplayMode::Show);

    press(&mut c, KeyCode::B);
    assert!(c.black_screen());
}

#[test]
fn test_modified_keys_are_ignored() {
    let mut c = controller(3);
    let handled = c.handle_input(Input::Key {
        code: KeyCode::ArrowRight,
        modifiers: Modifiers {
            ctrl: true,
            ..Default::default()
        },
    });
    assert!(!handled);
    assert_eq!(c.current_index(), 0);
}

#[test]
fn test_wheel_steps_one_slide() {
    let mut c = controller(3);
    c.handle_input(Input::Wheel { delta_y: 120.0 });
    assert_eq!(c.current_index(), 1);
    c.handle_input(Input::Wheel { delta_y: -3.0 });
    assert_eq!(c.current_index(), 0);
}

#[test]
fn test_select_in_overview_returns_to_show() {
    let mut c = controller(4);
    c.toggle_mode(DisplayMode::Overview);
    assert!(c.handle_input(Input::Select { index: 3 }));
    assert_eq!(c.current_index(), 3);
    assert_eq!(c.display_mode(), DisplayMode::Show);
}

#[test]
fn test_select_in_presenter_stays_in_presenter() {
    let mut c = controller(4);
    c.toggle_mode(DisplayMode::Presenter);
    c.handle_input(Input::Select { index: 2 });
    assert_eq!(c.current_index(), 2);
    assert_eq!(c.display_mode(), DisplayMode::Presenter);
}

#[test]
fn test_select_ignored_in_show() {
    let mut c = controller(4);
    assert!(!c.handle_input(Input::Select { index: 2 }));
    assert_eq!(c.current_index(), 0);
}

#[test]
fn test_timer_reset_key() {
    let mut c = controller(3);
    c.toggle_mode(DisplayMode::Presenter);
    c.navigate(crate::controller::Target::Next);
    c.clock_mut().advance(Duration::from_secs(30));
    press(&mut c, KeyCode::T);
    assert_eq!(c.timer().started_at(), Some(c.clock().now));
}
