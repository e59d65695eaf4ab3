use crate::engine::config::EngineConfig;
use crate::engine::move_list::MoveList;
use crate::engine::Move;
use crate::logic::board::{Board, Color};
use crate::logic::rules::Rules;
use std::sync::Arc;

/// Ranks candidate moves so that likely-good ones are searched first.
pub struct MoveOrderer {
    config: Arc<EngineConfig>,
}

impl MoveOrderer {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    pub fn score_move<R: Rules>(&self, rules: &R, board: &Board, mv: Move, side: Color) -> i32 {
        let (row, col) = mv.coord();
        let placement = if board.is_corner(row, col) {
            self.config.score_corner
        } else if board.is_corner_adjacent(row, col) {
            self.config.score_corner_adjacent
        } else if board.is_edge(row, col) {
            self.config.score_edge
        } else {
            0
        };

        let captures = i32::try_from(rules.capture_count(board, mv, side)).unwrap_or(i32::MAX);
        placement.saturating_add(captures.saturating_mul(self.config.score_per_capture))
    }

    /// Returns `moves` sorted by descending score. Equal scores keep their
    /// input order.
    pub fn order<R: Rules>(&self, rules: &R, board: &Board, moves: &MoveList, side: Color) -> MoveList {
        let mut scored: Vec<(Move, i32)> = moves
            .iter()
            .map(|&mv| (mv, self.score_move(rules, board, mv, side)))
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(mv, _)| mv).collect()
    }
}
