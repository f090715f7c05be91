use std::fmt;
use std::str::FromStr;

use crate::error::ControllerError;

/// Where a navigation request wants to go.
///
/// Symbolic targets resolve against the current index before any bounds check,
/// so `Prev` on the first slide resolves to `-1` and is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Index(i64),
    Prev,
    Next,
    First,
    Last,
}

impl From<usize> for Target {
    fn from(index: usize) -> Self {
        Self::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prev" => Ok(Self::Prev),
            "next" => Ok(Self::Next),
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            _ => s
                .parse::<i64>()
                .map(Self::Index)
                .map_err(|_| format!("Invalid navigation target: {s}")),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Prev => f.write_str("prev"),
            Self::Next => f.write_str("next"),
            Self::First => f.write_str("first"),
            Self::Last => f.write_str("last"),
        }
    }
}

/// Current position in a deck of `count >= 1` slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    current: usize,
    count: usize,
}

impl Navigation {
    pub fn new(count: usize) -> Result<Self, ControllerError> {
        if count == 0 {
            return Err(ControllerError::EmptyDeck);
        }
        Ok(Self { current: 0, count })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Resolve `target` to a valid index, or `None` when it falls outside the deck.
    pub fn resolve(&self, target: Target) -> Option<usize> {
        let current = self.current as i64;
        let resolved = match target {
            Target::Index(i) => i,
            Target::Prev => current - 1,
            Target::Next => current + 1,
            Target::First => 0,
            Target::Last => self.count as i64 - 1,
        };
        usize::try_from(resolved).ok().filter(|&i| i < self.count)
    }

    /// Move to an already-resolved index, returning the previous one.
    pub(crate) fn move_to(&mut self, index: usize) -> usize {
        debug_assert!(index < self.count);
        std::mem::replace(&mut self.current, index)
    }
}
