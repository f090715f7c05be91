use super::mode::DisplayMode;
use super::navigation::Target;

/// Keys the presenter reacts to. Everything else maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    ArrowRight,
    ArrowDown,
    ArrowLeft,
    ArrowUp,
    PageDown,
    PageUp,
    Space,
    Home,
    End,
    Escape,
    Enter,
    B,
    C,
    O,
    P,
    T,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.alt || self.ctrl || self.meta || self.shift
    }
}

/// Raw gestures a host forwards to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Key { code: KeyCode, modifiers: Modifiers },
    /// Vertical wheel delta; positive scrolls down.
    Wheel { delta_y: f32 },
    /// Direct selection of a slide, e.g. a click on its thumbnail.
    Select { index: usize },
}

/// Controller operation requested by a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Navigate(Target),
    ToggleMode(DisplayMode),
    ToggleBlackScreen,
    OpenClone,
    ResetTimer,
    /// Jump to a slide, then leave overview if that is where we are.
    Select(usize),
}

/// Translate a gesture into an action given the current display mode.
pub fn map_input(input: Input, mode: DisplayMode) -> Option<Action> {
    match input {
        Input::Key { modifiers, .. } if modifiers.any() => None,
        Input::Key { code, .. } => map_key(code, mode),
        Input::Wheel { delta_y } if delta_y > 0.0 => Some(Action::Navigate(Target::Next)),
        Input::Wheel { delta_y } if delta_y < 0.0 => Some(Action::Navigate(Target::Prev)),
        Input::Wheel { .. } => None,
        Input::Select { index } => match mode {
            DisplayMode::Overview | DisplayMode::Presenter => Some(Action::Select(index)),
            DisplayMode::Show => None,
        },
    }
}

fn map_key(code: KeyCode, mode: DisplayMode) -> Option<Action> {
    use KeyCode::*;

    let action = match code {
        ArrowRight | ArrowDown | PageDown | Space => Action::Navigate(Target::Next),
        ArrowLeft | ArrowUp | PageUp => Action::Navigate(Target::Prev),
        Home => Action::Navigate(Target::First),
        End => Action::Navigate(Target::Last),
        O => Action::ToggleMode(DisplayMode::Overview),
        P => Action::ToggleMode(DisplayMode::Presenter),
        Escape | Enter => Action::ToggleMode(DisplayMode::Show),
        B => Action::ToggleBlackScreen,
        C if mode == DisplayMode::Presenter => Action::OpenClone,
        T => Action::ResetTimer,
        C | Other => return None,
    };
    Some(action)
}
