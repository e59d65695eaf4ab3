use crate::logic::board::{Board, Color};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod agent;
pub mod clock;
pub mod config;
pub mod eval;
pub mod move_list;
pub mod ordering;
pub mod search;

/// A cell to place a disc on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Move {
    pub row: u8,
    pub col: u8,
}

impl Move {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn from_coord(row: usize, col: usize) -> Option<Self> {
        Some(Self {
            row: u8::try_from(row).ok()?,
            col: u8::try_from(col).ok()?,
        })
    }

    pub const fn coord(self) -> (usize, usize) {
        (self.row as usize, self.col as usize)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Adaptive search depth carried from one turn to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub max_depth: u8,
}

impl SearchConfig {
    pub fn new(max_depth: u8) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }

    /// One ply shallower, never below 1.
    #[must_use]
    pub fn reduced(self) -> Self {
        Self::new(self.max_depth.saturating_sub(1))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u32,
    pub time_ms: u64,
}

/// Scores `board` from `side`'s point of view; higher is better for `side`.
pub trait Evaluator {
    fn evaluate(&self, board: &Board, side: Color, opponent: Color) -> i32;
}
