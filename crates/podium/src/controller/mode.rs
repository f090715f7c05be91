use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Overall interaction context. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    #[default]
    Show,
    Overview,
    Presenter,
}

impl DisplayMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Overview => "overview",
            Self::Presenter => "presenter",
        }
    }

    pub fn all() -> &'static [DisplayMode] {
        &[Self::Show, Self::Overview, Self::Presenter]
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| format!("Invalid mode: {s}. Must be 'show', 'overview', or 'presenter'."))
    }
}

/// Display mode plus the black-screen overlay, which is orthogonal to the mode
/// and can only flip while in [`DisplayMode::Show`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeState {
    display: DisplayMode,
    black_screen: bool,
}

impl ModeState {
    pub fn display(&self) -> DisplayMode {
        self.display
    }

    pub fn black_screen(&self) -> bool {
        self.black_screen
    }

    /// Requesting the active mode again falls back to `Show`.
    pub fn resolve_toggle(&self, requested: DisplayMode) -> DisplayMode {
        if requested == self.display {
            DisplayMode::Show
        } else {
            requested
        }
    }

    /// Switch display mode, returning the mode that was active before.
    pub(crate) fn set_display(&mut self, mode: DisplayMode) -> DisplayMode {
        std::mem::replace(&mut self.display, mode)
    }

    /// Flip the overlay. Returns the new flag, or `None` outside `Show`.
    pub(crate) fn toggle_black_screen(&mut self) -> Option<bool> {
        if self.display != DisplayMode::Show {
            return None;
        }
        self.black_screen = !self.black_screen;
        Some(self.black_screen)
    }
}
