//! Difficulty levels and the search depth they map to.

use std::fmt;

/// A difficulty level in `1..=5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: Difficulty = Difficulty(1);
    pub const MAX: Difficulty = Difficulty(5);
    pub const DEFAULT: Difficulty = Difficulty(3);

    const LABELS: [&'static str; 5] = ["Easy", "Medium", "Hard", "Expert", "Master"];

    /// Clamps `level` into range.
    pub fn new(level: u8) -> Self {
        Difficulty(level.clamp(Self::MIN.0, Self::MAX.0))
    }

    pub fn level(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        Self::LABELS[usize::from(self.0 - 1)]
    }

    /// Engine search depth: one more than the level, capped at `max_depth`.
    pub fn search_depth(self, max_depth: i32) -> i32 {
        (i32::from(self.0) + 1).min(max_depth)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (level {})", self.label(), self.0)
    }
}
