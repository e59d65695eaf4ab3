use crate::engine::Move;
use crate::logic::board::{Board, Color};
use crate::logic::rules::{Rules, RulesError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Finished {
        winner: Option<Color>, // None on a draw
        black: usize,
        white: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub color: Color,
    pub mv: Option<Move>, // None for a pass
    pub flipped: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Color,
    pub status: GameStatus,
    pub history: Vec<MoveRecord>,
}

impl GameState {
    /// Standard start, Black to move.
    pub fn new(size: usize) -> Result<Self, RulesError> {
        Ok(Self::from_board(Board::new(size)?, Color::Black))
    }

    /// Resumes from an arbitrary position. Call `update_status` once rules
    /// are at hand to detect a position that is already finished.
    pub const fn from_board(board: Board, turn: Color) -> Self {
        Self {
            board,
            turn,
            status: GameStatus::Playing,
            history: Vec::new(),
        }
    }

    pub const fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    pub fn make_move<R: Rules>(&mut self, rules: &R, mv: Move) -> Result<(), RulesError> {
        if self.is_over() {
            return Err(RulesError::GameOver);
        }

        let flipped = rules.capture_count(&self.board, mv, self.turn);
        rules.apply_move(&mut self.board, mv, self.turn)?;
        self.history.push(MoveRecord {
            color: self.turn,
            mv: Some(mv),
            flipped,
        });

        self.turn = self.turn.opposite();
        self.update_status(rules);
        Ok(())
    }

    /// Hands the turn over. Only allowed when the side to move has nothing
    /// to play.
    pub fn pass<R: Rules>(&mut self, rules: &R) -> Result<(), RulesError> {
        if self.is_over() {
            return Err(RulesError::GameOver);
        }
        if !rules.legal_moves(&self.board, self.turn).is_empty() {
            return Err(RulesError::IllegalPass(self.turn));
        }

        self.history.push(MoveRecord {
            color: self.turn,
            mv: None,
            flipped: 0,
        });
        self.turn = self.turn.opposite();
        self.update_status(rules);
        Ok(())
    }

    pub fn update_status<R: Rules>(&mut self, rules: &R) {
        let endgame = rules.check_endgame(&self.board, Color::Black, Color::White);
        if !endgame.is_over {
            return;
        }

        let (black, white) = (endgame.side_score, endgame.opponent_score);
        let winner = match black.cmp(&white) {
            Ordering::Greater => Some(Color::Black),
            Ordering::Less => Some(Color::White),
            Ordering::Equal => None,
        };
        self.status = GameStatus::Finished {
            winner,
            black,
            white,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::OthelloRules;

    #[test]
    fn test_make_move_alternates_turns() {
        let mut game = GameState::new(8).unwrap();
        game.make_move(&OthelloRules, Move::new(2, 3)).unwrap();
        assert_eq!(game.turn, Color::White);
        assert_eq!(game.board.count(Color::Black), 4);
        assert_eq!(
            game.history,
            vec![MoveRecord {
                color: Color::Black,
                mv: Some(Move::new(2, 3)),
                flipped: 1,
            }]
        );
    }

    #[test]
    fn test_illegal_move_keeps_state() {
        let mut game = GameState::new(6).unwrap();
        let result = game.make_move(&OthelloRules, Move::new(0, 0));
        assert!(matches!(result, Err(RulesError::NoCapture { .. })));
        assert_eq!(game.turn, Color::Black);
        assert!(game.history.is_empty());
    }

    #[test]
    fn test_pass_only_without_moves() {
        let mut game = GameState::new(6).unwrap();
        assert_eq!(
            game.pass(&OthelloRules),
            Err(RulesError::IllegalPass(Color::Black))
        );

        // White cannot reach the cornered Black disc.
        let board: Board = "
            B . . .
            . W . .
            . . . .
            . . . .
        "
        .parse()
        .unwrap();
        let mut game = GameState::from_board(board, Color::White);
        game.pass(&OthelloRules).unwrap();
        assert_eq!(game.turn, Color::Black);
        assert_eq!(game.history.last().map(|r| r.mv), Some(None));
        assert!(!game.is_over());
    }

    #[test]
    fn test_game_finishes_when_nobody_can_move() {
        let board: Board = "
            B W . .
            . . . .
            . . . .
            . . . .
        "
        .parse()
        .unwrap();
        let mut game = GameState::from_board(board, Color::Black);
        game.update_status(&OthelloRules);
        // Black still captures with (0, 2).
        assert!(!game.is_over());

        let board: Board = "
            B B B .
            . . . .
            . . . .
            . . . .
        "
        .parse()
        .unwrap();
        let mut game = GameState::from_board(board, Color::White);
        game.update_status(&OthelloRules);
        assert_eq!(
            game.status,
            GameStatus::Finished {
                winner: Some(Color::Black),
                black: 3,
                white: 0
            }
        );
        assert_eq!(game.make_move(&OthelloRules, Move::new(3, 3)), Err(RulesError::GameOver));
    }
}
