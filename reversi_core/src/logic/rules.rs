use crate::engine::move_list::MoveList;
use crate::engine::Move;
use crate::logic::board::{Board, Color};
use rand::seq::SliceRandom;

const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("unsupported board size {0}: must be even and between 4 and 12")]
    UnsupportedSize(usize),
    #[error("move {0} is off the board")]
    OutOfBounds(Move),
    #[error("cell {0} is already occupied")]
    Occupied(Move),
    #[error("move {mv} captures nothing for {side}")]
    NoCapture { mv: Move, side: Color },
    #[error("{0} passed while legal moves were available")]
    IllegalPass(Color),
    #[error("the game is already over")]
    GameOver,
    #[error("invalid board diagram: {0}")]
    InvalidDiagram(String),
}

/// Outcome of a termination check, scores are piece counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endgame {
    pub is_over: bool,
    pub side_score: usize,
    pub opponent_score: usize,
}

/// Game rules consumed by the engine. The engine never inspects capture
/// geometry itself; everything it knows about legality comes through here.
pub trait Rules {
    fn legal_moves(&self, board: &Board, side: Color) -> MoveList;

    /// Places a disc for `side` and flips every captured run in place.
    fn apply_move(&self, board: &mut Board, mv: Move, side: Color) -> Result<(), RulesError>;

    /// Number of opposing discs `mv` would flip. Does not mutate the board.
    fn capture_count(&self, board: &Board, mv: Move, side: Color) -> usize;

    fn check_endgame(&self, board: &Board, side: Color, opponent: Color) -> Endgame;

    /// Uniformly random legal move, `None` when `side` has to pass.
    fn random_move(&self, board: &Board, side: Color) -> Option<Move>;
}

/// Standard Othello capture rules on any supported square board.
#[derive(Debug, Clone, Copy, Default)]
pub struct OthelloRules;

impl OthelloRules {
    /// Length of the opposing run starting next to `(row, col)` in direction
    /// `(dr, dc)` that is closed by a disc of `side`; 0 if the run is open.
    fn run_length(board: &Board, row: usize, col: usize, (dr, dc): (isize, isize), side: Color) -> usize {
        let opponent = side.opposite();
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        let mut run = 0;

        while board.contains(r, c) {
            match board.get(r as usize, c as usize) {
                Some(color) if color == opponent => run += 1,
                Some(_) => return run,
                None => return 0,
            }
            r += dr;
            c += dc;
        }
        0
    }
}

impl Rules for OthelloRules {
    fn legal_moves(&self, board: &Board, side: Color) -> MoveList {
        board
            .cells()
            .filter_map(|(r, c)| Move::from_coord(r, c))
            .filter(|&mv| self.capture_count(board, mv, side) > 0)
            .collect()
    }

    fn apply_move(&self, board: &mut Board, mv: Move, side: Color) -> Result<(), RulesError> {
        let (row, col) = mv.coord();
        if row >= board.size() || col >= board.size() {
            return Err(RulesError::OutOfBounds(mv));
        }
        if board.get(row, col).is_some() {
            return Err(RulesError::Occupied(mv));
        }

        let runs: Vec<((isize, isize), usize)> = DIRECTIONS
            .iter()
            .map(|&dir| (dir, Self::run_length(board, row, col, dir, side)))
            .filter(|&(_, run)| run > 0)
            .collect();
        if runs.is_empty() {
            return Err(RulesError::NoCapture { mv, side });
        }

        board.set(row, col, Some(side));
        for ((dr, dc), run) in runs {
            let mut r = row as isize;
            let mut c = col as isize;
            for _ in 0..run {
                r += dr;
                c += dc;
                board.set(r as usize, c as usize, Some(side));
            }
        }
        Ok(())
    }

    fn capture_count(&self, board: &Board, mv: Move, side: Color) -> usize {
        let (row, col) = mv.coord();
        if row >= board.size() || col >= board.size() || board.get(row, col).is_some() {
            return 0;
        }
        DIRECTIONS
            .iter()
            .map(|&dir| Self::run_length(board, row, col, dir, side))
            .sum()
    }

    fn check_endgame(&self, board: &Board, side: Color, opponent: Color) -> Endgame {
        let is_over = board.is_full()
            || (self.legal_moves(board, side).is_empty()
                && self.legal_moves(board, opponent).is_empty());
        Endgame {
            is_over,
            side_score: board.count(side),
            opponent_score: board.count(opponent),
        }
    }

    fn random_move(&self, board: &Board, side: Color) -> Option<Move> {
        let moves = self.legal_moves(board, side);
        moves.as_slice().choose(&mut rand::thread_rng()).copied()
    }
}
