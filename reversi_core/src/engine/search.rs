use crate::engine::clock::{Clock, Deadline, SystemClock};
use crate::engine::config::EngineConfig;
use crate::engine::eval::PhaseEvaluator;
use crate::engine::ordering::MoveOrderer;
use crate::engine::{Evaluator, Move, SearchConfig, SearchStats};
use crate::logic::board::{Board, Color};
use crate::logic::rules::{Rules, RulesError};
use log::{debug, info, warn};
use std::sync::Arc;

/// Window bounds. They span the whole `i32` range so no evaluation can fall
/// outside the initial window.
pub const SCORE_MIN: i32 = i32::MIN;
pub const SCORE_MAX: i32 = i32::MAX;

/// Returned by every node reached after the deadline has passed.
pub const NEUTRAL_SCORE: i32 = 0;

/// Depth-limited minimax with alpha-beta pruning. The perspective sides
/// stay fixed for the whole tree; only the side to move alternates.
pub struct AlphaBetaSearcher<'a, R, E, C: ?Sized> {
    rules: &'a R,
    evaluator: &'a E,
    orderer: &'a MoveOrderer,
    clock: &'a C,
    nodes: u32,
}

impl<'a, R: Rules, E: Evaluator, C: Clock + ?Sized> AlphaBetaSearcher<'a, R, E, C> {
    pub const fn new(rules: &'a R, evaluator: &'a E, orderer: &'a MoveOrderer, clock: &'a C) -> Self {
        Self {
            rules,
            evaluator,
            orderer,
            clock,
            nodes: 0,
        }
    }

    pub const fn nodes(&self) -> u32 {
        self.nodes
    }

    /// Scores `board` for `side_to_max`. `board` is left exactly as it was
    /// passed in, on success and on error.
    #[allow(clippy::too_many_arguments)]
    pub fn search(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        side_to_max: Color,
        side_to_min: Color,
        deadline: &Deadline,
    ) -> Result<i32, RulesError> {
        self.nodes = self.nodes.saturating_add(1);

        if deadline.expired(self.clock) {
            return Ok(NEUTRAL_SCORE);
        }

        if depth == 0
            || self
                .rules
                .check_endgame(board, side_to_max, side_to_min)
                .is_over
        {
            return Ok(self.evaluator.evaluate(board, side_to_max, side_to_min));
        }

        let to_move = if maximizing { side_to_max } else { side_to_min };
        let moves = self.rules.legal_moves(board, to_move);
        // No pass here: a side without moves ends the line.
        if moves.is_empty() {
            return Ok(self.evaluator.evaluate(board, side_to_max, side_to_min));
        }

        let ordered = self.orderer.order(self.rules, board, &moves, to_move);
        let snapshot = board.clone();
        let mut best = if maximizing { SCORE_MIN } else { SCORE_MAX };

        for mv in ordered {
            let result = self.rules.apply_move(board, mv, to_move).and_then(|()| {
                self.search(
                    board,
                    depth - 1,
                    alpha,
                    beta,
                    !maximizing,
                    side_to_max,
                    side_to_min,
                    deadline,
                )
            });
            board.restore(&snapshot);
            let score = result?;

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }

        Ok(best)
    }
}

/// Result of one root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// `None` only when the side to move has no legal move at all.
    pub best_move: Option<Move>,
    /// Score of `best_move`; `None` when the move came from the fallback.
    pub score: Option<i32>,
    /// Config to use on the next turn.
    pub next: SearchConfig,
    pub timed_out: bool,
    pub stats: SearchStats,
}

pub struct SearchEngine<R, E, C = SystemClock> {
    rules: R,
    evaluator: E,
    orderer: MoveOrderer,
    clock: C,
    config: Arc<EngineConfig>,
}

impl<R: Rules + Clone> SearchEngine<R, PhaseEvaluator<R>, SystemClock> {
    pub fn new(rules: R, config: Arc<EngineConfig>) -> Self {
        Self::with_clock(rules, config, SystemClock)
    }
}

impl<R: Rules + Clone, C: Clock> SearchEngine<R, PhaseEvaluator<R>, C> {
    pub fn with_clock(rules: R, config: Arc<EngineConfig>, clock: C) -> Self {
        let evaluator = PhaseEvaluator::new(config.clone(), rules.clone());
        Self::with_parts(rules, evaluator, clock, config)
    }
}

impl<R: Rules, E: Evaluator, C: Clock> SearchEngine<R, E, C> {
    pub fn with_parts(rules: R, evaluator: E, clock: C, config: Arc<EngineConfig>) -> Self {
        Self {
            rules,
            evaluator,
            orderer: MoveOrderer::new(config.clone()),
            clock,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Picks a move for `side`. Each root move is searched to
    /// `search.max_depth` plies in total. When the time budget runs out the
    /// remaining root moves are skipped and the returned config is one ply
    /// shallower.
    pub fn choose_move(
        &self,
        board: &Board,
        side: Color,
        opponent: Color,
        search: SearchConfig,
    ) -> Result<SearchOutcome, RulesError> {
        let deadline = Deadline::after(&self.clock, self.config.time_budget_ms);
        let mut board = board.clone();

        let moves = self.rules.legal_moves(&board, side);
        if moves.is_empty() {
            debug!("{side} has no legal move, deferring to fallback");
            return Ok(SearchOutcome {
                best_move: self.rules.random_move(&board, side),
                score: None,
                next: search,
                timed_out: false,
                stats: SearchStats::default(),
            });
        }

        let ordered = self.orderer.order(&self.rules, &board, &moves, side);
        let mut searcher =
            AlphaBetaSearcher::new(&self.rules, &self.evaluator, &self.orderer, &self.clock);
        let snapshot = board.clone();
        let child_depth = search.max_depth.saturating_sub(1);

        let mut best: Option<(Move, i32)> = None;
        let mut next = search;
        let mut timed_out = false;

        for mv in ordered {
            let result = self.rules.apply_move(&mut board, mv, side).and_then(|()| {
                searcher.search(
                    &mut board,
                    child_depth,
                    SCORE_MIN,
                    SCORE_MAX,
                    false,
                    side,
                    opponent,
                    &deadline,
                )
            });
            board.restore(&snapshot);
            let score = result?;
            debug!("root move {mv} scored {score}");

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }

            if deadline.expired(&self.clock) {
                next = search.reduced();
                timed_out = true;
                warn!(
                    "search budget of {} ms exceeded at depth {}, next search uses depth {}",
                    self.config.time_budget_ms, search.max_depth, next.max_depth
                );
                break;
            }
        }

        let elapsed = deadline.elapsed_ms(&self.clock);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let stats = SearchStats {
            depth: search.max_depth,
            nodes: searcher.nodes(),
            time_ms: elapsed.max(0.0) as u64,
        };

        let outcome = match best {
            Some((mv, score)) => SearchOutcome {
                best_move: Some(mv),
                score: Some(score),
                next,
                timed_out,
                stats,
            },
            None => SearchOutcome {
                best_move: self.rules.random_move(&board, side),
                score: None,
                next,
                timed_out,
                stats,
            },
        };
        info!(
            "{side} plays {:?} (score {:?}, depth {}, {} nodes, {} ms)",
            outcome.best_move, outcome.score, stats.depth, stats.nodes, stats.time_ms
        );
        Ok(outcome)
    }
}
