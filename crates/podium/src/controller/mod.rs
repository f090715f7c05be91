//! Presentation controller.
//!
//! Owns navigation, display mode, the presenter timer and the link to an
//! optional clone view, and publishes lifecycle events. Everything that touches
//! pixels, wall time or windows goes through the [`Surface`], [`Clock`] and
//! [`WindowOpener`] seams so the same controller runs under egui or in tests.
//!
//! A controller whose [`Address`] carries the `clone` marker is commanded: it
//! ignores [`Controller::handle_input`] and only changes state through calls
//! made by the primary controller's [`CloneWindow`] handle.

pub mod address;
pub mod clone;
pub mod events;
pub mod input;
pub mod mode;
pub mod navigation;
pub mod surface;
pub mod timer;

use std::rc::Rc;

use tracing::{debug, info, warn};

pub use address::Address;
pub use clone::{CloneLink, CloneWindow, LinkedWindow, WindowOpener};
pub use events::{Event, EventBus, EventKind};
pub use input::{Action, Input, KeyCode, Modifiers};
pub use mode::{DisplayMode, ModeState};
pub use navigation::{Navigation, Target};
pub use surface::{Marker, Size, SlideMetrics, Surface};
pub use timer::{Clock, SystemClock, Timer};

use crate::deck::Slide;
use crate::error::ControllerError;

pub struct Controller<S, C> {
    slides: Rc<[Slide]>,
    address: Address,
    clone_mode: bool,
    nav: Navigation,
    mode: ModeState,
    timer: Timer,
    clone: CloneLink,
    opener: Option<Box<dyn WindowOpener>>,
    bus: EventBus,
    surface: S,
    clock: C,
}

impl<S: Surface, C: Clock> Controller<S, C> {
    /// Build a controller and bring the surface to its initial state: the slide
    /// named by the address fragment (or the first one) in `Show` mode.
    pub fn new(
        slides: Rc<[Slide]>,
        address: Address,
        surface: S,
        clock: C,
    ) -> Result<Self, ControllerError> {
        let nav = Navigation::new(slides.len())?;
        let mut controller = Self {
            slides,
            clone_mode: address.is_clone(),
            address,
            nav,
            mode: ModeState::default(),
            timer: Timer::default(),
            clone: CloneLink::default(),
            opener: None,
            bus: EventBus::default(),
            surface,
            clock,
        };

        let initial = controller.address.initial_target();
        let landed = initial.is_some_and(|target| controller.go(target, false));
        // An unusable fragment still lands on the first slide and rewrites the
        // fragment to `0`, so exactly one slide is marked current. A browser
        // host would leave the unusable hash in place instead.
        if !landed {
            debug!(fragment = ?controller.address.fragment(), "ignoring unusable start fragment");
            controller.go(Target::First, false);
        }
        controller.toggle_mode(DisplayMode::Show);
        Ok(controller)
    }

    /// Attach the opener used by [`Controller::open_clone`].
    pub fn with_opener(mut self, opener: impl WindowOpener + 'static) -> Self {
        self.opener = Some(Box::new(opener));
        self
    }

    pub fn current_index(&self) -> usize {
        self.nav.current()
    }

    pub fn slide_count(&self) -> usize {
        self.nav.count()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.mode.display()
    }

    pub fn black_screen(&self) -> bool {
        self.mode.black_screen()
    }

    #[cfg(test)]
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    #[cfg(test)]
    pub fn is_clone(&self) -> bool {
        self.clone_mode
    }

    pub fn clone_link(&self) -> &CloneLink {
        &self.clone
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[cfg(test)]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Subscribe to an event kind. Callbacks run in registration order.
    pub fn on(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&Event<'_>) -> anyhow::Result<()> + 'static,
    ) -> &mut Self {
        self.bus.subscribe(kind, Box::new(callback));
        debug!(event = %kind, listeners = self.bus.listener_count(kind), "subscribed");
        self
    }

    /// Make the target slide current. Returns `false`, with no side effects at
    /// all, when the target falls outside the deck.
    ///
    /// Navigating to the slide that is already current still runs the full
    /// sequence so a clone can catch up.
    pub fn navigate(&mut self, target: Target) -> bool {
        self.go(target, true)
    }

    fn go(&mut self, target: Target, may_start_timer: bool) -> bool {
        let Some(index) = self.nav.resolve(target) else {
            return false;
        };
        debug!(%target, index, "navigate");

        self.bus.raise(&Event::NavigationStart {
            index,
            slide: &self.slides[index],
        });

        let previous = self.nav.move_to(index);
        self.surface.mark_current(previous, index);
        self.address.set_slide(index);

        if may_start_timer && index > 0 && !self.timer.is_started() {
            debug!("starting presentation timer");
            self.timer.start(self.clock.now());
            self.update_timer(false);
        }

        let total = self.nav.count();
        self.surface
            .write_index(&format!("{} / {}", index + 1, total));
        let next_notes = self.slides.get(index + 1).map_or("", Slide::notes_text);
        self.surface
            .write_notes(self.slides[index].notes_text(), next_notes);

        if let Some(clone) = self.clone.live() {
            clone.navigate(index);
        }

        self.rescale();
        self.bus.raise(&Event::NavigationEnd {
            index,
            slide: &self.slides[index],
        });
        true
    }

    /// Switch to `requested`, or back to `Show` if it is already active.
    pub fn toggle_mode(&mut self, requested: DisplayMode) {
        let mode = self.mode.resolve_toggle(requested);
        let previous = self.mode.set_display(mode);
        debug!(from = %previous, to = %mode, "toggle mode");

        self.surface.remove_marker(Marker::Mode(previous));
        self.surface.apply_marker(Marker::Mode(mode));
        self.update_timer(false);
        self.rescale();
        self.bus.raise(&Event::ModeToggle { mode });

        self.mirror_mode(mode);
    }

    /// The clone follows `Show` and `Overview`; presenter-only content never
    /// reaches it, so it shows the slide while the primary is in `Presenter`.
    fn mirror_mode(&self, mode: DisplayMode) {
        let Some(clone) = self.clone.live() else {
            return;
        };
        let audience_mode = match mode {
            DisplayMode::Presenter => DisplayMode::Show,
            other => other,
        };
        if clone.display_mode().is_some_and(|m| m != audience_mode) {
            clone.toggle_mode(audience_mode);
        }
    }

    /// Flip the black screen on the open clone if there is one, otherwise on
    /// this view when it is in `Show` mode.
    pub fn toggle_black_screen(&mut self) {
        if let Some(clone) = self.clone.live() {
            clone.toggle_black_screen();
            return;
        }
        match self.mode.toggle_black_screen() {
            Some(true) => self.surface.apply_marker(Marker::BlackScreen),
            Some(false) => self.surface.remove_marker(Marker::BlackScreen),
            None => {}
        }
    }

    /// Refresh the timer display.
    ///
    /// `reset` restarts the count from now. The display only changes in
    /// `Presenter` mode, and only then is the next tick scheduled, so leaving
    /// presenter mode lets the tick chain die out.
    pub fn update_timer(&mut self, reset: bool) {
        let now = self.clock.now();
        if reset {
            debug!("resetting presentation timer");
            self.timer.start(now);
        }
        let Some(reading) = self.timer.reading(now) else {
            self.surface.write_timer(timer::ZERO_DISPLAY);
            return;
        };
        if self.mode.display() != DisplayMode::Presenter {
            return;
        }
        self.surface.write_timer(&reading.text);
        self.clock.wake_after(reading.next_tick);
    }

    /// Entry point for a scheduled timer wake-up.
    pub fn tick(&mut self) {
        self.update_timer(false);
    }

    /// Open the clone view, or bring the existing one to the front.
    pub fn open_clone(&mut self) {
        if let Some(clone) = self.clone.live() {
            info!("focusing existing clone view");
            clone.focus();
            return;
        }
        if self.clone.is_tracked() {
            debug!("previous clone view was closed, opening a new one");
        }
        let Some(opener) = self.opener.as_mut() else {
            warn!("no window opener available, cannot open clone view");
            return;
        };
        let address = self.address.clone_address();
        match opener.open(&address) {
            Ok(window) => {
                info!(%address, "opened clone view");
                let handle = self.clone.replace(window);
                self.bus.raise(&Event::CloneOpen { handle });
            }
            Err(e) => warn!("failed to open clone view: {e:#}"),
        }
    }

    /// Fit every slide's content into its container.
    pub fn rescale(&mut self) {
        for index in 0..self.nav.count() {
            let scale = self
                .surface
                .slide_metrics(index)
                .and_then(|m| m.fit_scale());
            if let Some(scale) = scale {
                self.surface.apply_scale(index, scale);
            }
        }
    }

    /// Route a raw gesture. Clone views are commanded only and ignore input.
    pub fn handle_input(&mut self, input: Input) -> bool {
        if self.clone_mode {
            return false;
        }
        let Some(action) = input::map_input(input, self.mode.display()) else {
            return false;
        };
        self.apply(action);
        true
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Navigate(target) => {
                self.navigate(target);
            }
            Action::ToggleMode(mode) => self.toggle_mode(mode),
            Action::ToggleBlackScreen => self.toggle_black_screen(),
            Action::OpenClone => self.open_clone(),
            Action::ResetTimer => self.update_timer(true),
            Action::Select(index) => {
                self.navigate(Target::from(index));
                if self.mode.display() == DisplayMode::Overview {
                    self.toggle_mode(DisplayMode::Show);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
