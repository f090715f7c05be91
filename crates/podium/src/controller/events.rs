use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;

use tracing::warn;

use super::clone::CloneWindow;
use super::mode::DisplayMode;
use crate::deck::Slide;

/// Lifecycle notifications published by a controller.
pub enum Event<'a> {
    NavigationStart { index: usize, slide: &'a Slide },
    NavigationEnd { index: usize, slide: &'a Slide },
    ModeToggle { mode: DisplayMode },
    CloneOpen { handle: &'a dyn CloneWindow },
}

impl Event<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::NavigationStart { .. } => EventKind::NavigationStart,
            Self::NavigationEnd { .. } => EventKind::NavigationEnd,
            Self::ModeToggle { .. } => EventKind::ModeToggle,
            Self::CloneOpen { .. } => EventKind::CloneOpen,
        }
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NavigationStart { index, .. } | Self::NavigationEnd { index, .. } => {
                write!(f, "{}({index})", self.kind())
            }
            Self::ModeToggle { mode } => write!(f, "{}({mode})", self.kind()),
            Self::CloneOpen { handle } => {
                write!(f, "{}(open: {})", self.kind(), handle.is_open())
            }
        }
    }
}

/// Subscription key: one per [`Event`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    NavigationStart,
    NavigationEnd,
    ModeToggle,
    CloneOpen,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        Self::NavigationStart,
        Self::NavigationEnd,
        Self::ModeToggle,
        Self::CloneOpen,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::NavigationStart => "navigationStart",
            Self::NavigationEnd => "navigationEnd",
            Self::ModeToggle => "modeToggle",
            Self::CloneOpen => "cloneOpen",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| format!("Unknown event: {s}"))
    }
}

pub type Callback = Box<dyn FnMut(&Event<'_>) -> anyhow::Result<()>>;

/// Ordered subscriber lists keyed by event kind.
///
/// Registering the same closure logic twice means it runs twice; nothing is
/// de-duplicated.
#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<EventKind, Vec<Callback>>,
}

impl EventBus {
    pub fn subscribe(&mut self, kind: EventKind, callback: Callback) {
        self.listeners.entry(kind).or_default().push(callback);
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Call every subscriber of the event's kind in registration order.
    ///
    /// A subscriber returning an error or panicking is logged and skipped; the
    /// rest still run.
    pub fn raise(&mut self, event: &Event<'_>) {
        let kind = event.kind();
        let Some(callbacks) = self.listeners.get_mut(&kind) else {
            return;
        };
        for (position, callback) in callbacks.iter_mut().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| callback(event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(event = %kind, position, "subscriber failed: {e:#}"),
                Err(_) => warn!(event = %kind, position, "subscriber panicked"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recorder(log: &Rc<RefCell<Vec<String>>>, name: &'static str) -> Callback {
        let log = Rc::clone(log);
        Box::new(move |event| {
            log.borrow_mut().push(format!("{name}:{event:?}"));
            Ok(())
        })
    }

    #[test]
    fn test_callbacks_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::default();
        bus.subscribe(EventKind::ModeToggle, recorder(&log, "A"));
        bus.subscribe(EventKind::ModeToggle, recorder(&log, "B"));

        for _ in 0..2 {
            bus.raise(&Event::ModeToggle {
                mode: DisplayMode::Overview,
            });
        }
        assert_eq!(
            *log.borrow(),
            vec![
                "A:modeToggle(overview)",
                "B:modeToggle(overview)",
                "A:modeToggle(overview)",
                "B:modeToggle(overview)",
            ]
        );
    }

    #[test]
    fn test_only_matching_kind_is_called() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::default();
        bus.subscribe(EventKind::NavigationEnd, recorder(&log, "end"));

        let slide = Slide::default();
        bus.raise(&Event::NavigationStart {
            index: 0,
            slide: &slide,
        });
        assert!(log.borrow().is_empty());

        bus.raise(&Event::NavigationEnd {
            index: 0,
            slide: &slide,
        });
        assert_eq!(*log.borrow(), vec!["end:navigationEnd(0)"]);
    }

    #[test]
    fn test_duplicate_registration_runs_twice() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::default();
        for _ in 0..2 {
            let count = Rc::clone(&count);
            bus.subscribe(
                EventKind::ModeToggle,
                Box::new(move |_| {
                    *count.borrow_mut() += 1;
                    Ok(())
                }),
            );
        }
        bus.raise(&Event::ModeToggle {
            mode: DisplayMode::Show,
        });
        assert_eq!(*count.borrow(), 2);
        assert_eq!(bus.listener_count(EventKind::ModeToggle), 2);
        assert_eq!(bus.listener_count(EventKind::CloneOpen), 0);
    }

    #[test]
    fn test_failing_subscriber_does_not_stop_dispatch() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::default();
        bus.subscribe(
            EventKind::ModeToggle,
            Box::new(|_| anyhow::bail!("subscriber error")),
        );
        bus.subscribe(EventKind::ModeToggle, Box::new(|_| panic!("subscriber panic")));
        bus.subscribe(EventKind::ModeToggle, recorder(&log, "last"));

        bus.raise(&Event::ModeToggle {
            mode: DisplayMode::Presenter,
        });
        assert_eq!(*log.borrow(), vec!["last:modeToggle(presenter)"]);
    }

    #[test]
    fn test_event_kind_names() {
        assert_eq!("navigationStart".parse::<EventKind>(), Ok(EventKind::NavigationStart));
        assert_eq!("cloneOpen".parse::<EventKind>(), Ok(EventKind::CloneOpen));
        assert!("resize".parse::<EventKind>().is_err());
    }
}
