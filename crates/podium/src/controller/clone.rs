use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::trace;

use super::Controller;
use super::address::Address;
use super::mode::DisplayMode;
use super::navigation::Target;
use super::surface::Surface;
use super::timer::Clock;

/// Handle to a secondary view driven by a primary controller.
///
/// Every method must tolerate the window having gone away: calls on a closed
/// handle do nothing.
pub trait CloneWindow {
    fn is_open(&self) -> bool;
    fn focus(&self);
    fn navigate(&self, index: usize);
    fn display_mode(&self) -> Option<DisplayMode>;
    fn toggle_mode(&self, mode: DisplayMode);
    fn toggle_black_screen(&self);
}

/// Creates secondary views on behalf of a primary controller.
pub trait WindowOpener {
    fn open(&mut self, address: &Address) -> anyhow::Result<Box<dyn CloneWindow>>;
}

/// The single clone a primary controller tracks. A closed handle stays here,
/// stale, until the next open replaces it.
#[derive(Default)]
pub struct CloneLink {
    handle: Option<Box<dyn CloneWindow>>,
}

impl CloneLink {
    pub fn is_tracked(&self) -> bool {
        self.handle.is_some()
    }

    /// The tracked handle, only if it is still open.
    pub fn live(&self) -> Option<&dyn CloneWindow> {
        match self.handle.as_deref() {
            Some(handle) if handle.is_open() => Some(handle),
            Some(_) => {
                trace!("clone window closed, skipping mirror");
                None
            }
            None => None,
        }
    }

    pub(crate) fn replace(&mut self, handle: Box<dyn CloneWindow>) -> &dyn CloneWindow {
        &**self.handle.insert(handle)
    }
}

/// A [`CloneWindow`] backed by another controller in the same process.
///
/// The host owns the clone controller and flips `closed` when the user closes
/// its window; dropping the controller has the same effect.
pub struct LinkedWindow<S, C> {
    controller: Weak<RefCell<Controller<S, C>>>,
    closed: Rc<Cell<bool>>,
    on_focus: Option<Box<dyn Fn()>>,
}

impl<S: Surface, C: Clock> LinkedWindow<S, C> {
    pub fn new(controller: &Rc<RefCell<Controller<S, C>>>, closed: Rc<Cell<bool>>) -> Self {
        Self {
            controller: Rc::downgrade(controller),
            closed,
            on_focus: None,
        }
    }

    pub fn on_focus(mut self, focus: impl Fn() + 'static) -> Self {
        self.on_focus = Some(Box::new(focus));
        self
    }

    /// Run `f` against the clone if it is open and not already busy.
    fn with<R>(&self, f: impl FnOnce(&mut Controller<S, C>) -> R) -> Option<R> {
        if self.closed.get() {
            return None;
        }
        let controller = self.controller.upgrade()?;
        let Ok(mut controller) = controller.try_borrow_mut() else {
            trace!("clone controller busy, skipping mirror");
            return None;
        };
        Some(f(&mut controller))
    }
}

impl<S: Surface, C: Clock> CloneWindow for LinkedWindow<S, C> {
    fn is_open(&self) -> bool {
        !self.closed.get() && self.controller.strong_count() > 0
    }

    fn focus(&self) {
        if let Some(focus) = self.on_focus.as_ref().filter(|_| self.is_open()) {
            focus();
        }
    }

    fn navigate(&self, index: usize) {
        self.with(|c| c.navigate(Target::from(index)));
    }

    fn display_mode(&self) -> Option<DisplayMode> {
        self.with(|c| c.display_mode())
    }

    fn toggle_mode(&self, mode: DisplayMode) {
        self.with(|c| c.toggle_mode(mode));
    }

    fn toggle_black_screen(&self) {
        self.with(|c| c.toggle_black_screen());
    }
}
