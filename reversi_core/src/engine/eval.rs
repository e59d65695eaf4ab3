use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Board, Color};
use crate::logic::rules::Rules;
use std::sync::Arc;

/// Stage of the game, judged by how much of the board is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Early,
    Mid,
    Late,
}

impl GamePhase {
    /// Early below 25% occupancy, mid below 75%, late from there on.
    pub const fn classify(pieces: usize, capacity: usize) -> Self {
        if pieces * 4 < capacity {
            Self::Early
        } else if pieces * 4 < capacity * 3 {
            Self::Mid
        } else {
            Self::Late
        }
    }

    pub fn of(board: &Board) -> Self {
        Self::classify(board.total_pieces(), board.capacity())
    }
}

/// Unweighted heuristic terms, each signed in favour of the evaluated side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalBreakdown {
    pub phase: GamePhase,
    pub mobility: i32,
    pub stability: i32,
    pub pieces: i32,
    pub position: i32,
}

pub struct PhaseEvaluator<R> {
    config: Arc<EngineConfig>,
    rules: R,
}

impl<R: Rules> PhaseEvaluator<R> {
    pub const fn new(config: Arc<EngineConfig>, rules: R) -> Self {
        Self { config, rules }
    }

    pub fn breakdown(&self, board: &Board, side: Color, opponent: Color) -> EvalBreakdown {
        EvalBreakdown {
            phase: GamePhase::of(board),
            mobility: self.mobility(board, side, opponent),
            stability: self.stability(board, side, opponent),
            pieces: to_score(board.count(side)) - to_score(board.count(opponent)),
            position: self.position(board, side, opponent),
        }
    }

    fn mobility(&self, board: &Board, side: Color, opponent: Color) -> i32 {
        let ours = self.rules.legal_moves(board, side).len();
        let theirs = self.rules.legal_moves(board, opponent).len();
        to_score(ours) - to_score(theirs)
    }

    // Top and bottom rows only. This is a cheap stand-in for real disc
    // stability and is weighted as such.
    fn stability(&self, board: &Board, side: Color, opponent: Color) -> i32 {
        let last = board.size() - 1;
        let value = self.config.val_stability;
        [0, last]
            .iter()
            .flat_map(|&row| (0..board.size()).map(move |col| (row, col)))
            .map(|(row, col)| ownership(board.get(row, col), side, opponent, value))
            .fold(0, i32::saturating_add)
    }

    fn position(&self, board: &Board, side: Color, opponent: Color) -> i32 {
        let config = &self.config;
        let mut value = 0i32;

        for (r, c) in board.corners() {
            value = value.saturating_add(ownership(board.get(r, c), side, opponent, config.val_corner));
        }

        // Cells around a corner are assets once `side` holds the corner and
        // liabilities otherwise. An opponent-held corner counts as not held.
        for (cr, cc) in board.corners() {
            let corner_owned = board.get(cr, cc) == Some(side);
            let adjacent = if corner_owned {
                config.val_corner_adjacent
            } else {
                config.val_corner_adjacent.saturating_neg()
            };
            for (r, c) in board.neighbours(cr, cc) {
                match board.get(r, c) {
                    Some(owner) if owner == side => value = value.saturating_add(adjacent),
                    Some(owner) if owner == opponent => value = value.saturating_sub(adjacent),
                    _ => {}
                }
            }
        }

        for (r, c) in board.cells() {
            if board.is_edge(r, c) && !board.is_corner(r, c) {
                value = value.saturating_add(ownership(board.get(r, c), side, opponent, config.val_edge));
            }
        }

        value
    }
}

impl<R: Rules> Evaluator for PhaseEvaluator<R> {
    /// Saturates instead of overflowing, so extreme config values pin the
    /// score to the ends of the `i32` range.
    fn evaluate(&self, board: &Board, side: Color, opponent: Color) -> i32 {
        let terms = self.breakdown(board, side, opponent);
        let weights = self.config.weights(terms.phase);

        [
            weights.mobility.saturating_mul(terms.mobility),
            weights.stability.saturating_mul(terms.stability),
            weights.pieces.saturating_mul(terms.pieces),
            weights.position.saturating_mul(terms.position),
        ]
        .into_iter()
        .fold(0, i32::saturating_add)
    }
}

fn ownership(cell: Option<Color>, side: Color, opponent: Color, value: i32) -> i32 {
    match cell {
        Some(owner) if owner == side => value,
        Some(owner) if owner == opponent => value.saturating_neg(),
        _ => 0,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn to_score(count: usize) -> i32 {
    count as i32
}
