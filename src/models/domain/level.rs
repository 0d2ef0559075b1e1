use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::quiz_rules::LEVEL_COUNT;
use crate::errors::{AppError, AppResult};

/// One of the ordered difficulty tiers, numbered from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const FIRST: Level = Level(1);
    pub const LAST: Level = Level(LEVEL_COUNT as u8);

    pub fn new(number: u8) -> AppResult<Self> {
        if (Self::FIRST.0..=Self::LAST.0).contains(&number) {
            Ok(Level(number))
        } else {
            Err(AppError::ValidationError(format!(
                "level must be between {} and {}, got {}",
                Self::FIRST.0,
                Self::LAST.0,
                number
            )))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Zero-based position, for indexing per-level storage.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    pub fn next(self) -> Option<Level> {
        if self == Self::LAST {
            None
        } else {
            Some(Level(self.0 + 1))
        }
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// Levels cleared by an attempt that ends while this level is in play.
    pub fn cleared_before(self) -> u8 {
        self.0 - 1
    }

    pub fn all() -> impl Iterator<Item = Level> {
        (Self::FIRST.0..=Self::LAST.0).map(Level)
    }
}

impl TryFrom<u8> for Level {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Level::new(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
