use crate::engine::clock::{Clock, SystemClock};
use crate::engine::config::EngineConfig;
use crate::engine::eval::PhaseEvaluator;
use crate::engine::search::{SearchEngine, SearchOutcome};
use crate::engine::{Evaluator, Move, SearchConfig};
use crate::logic::board::{Board, Color};
use crate::logic::game::GameState;
use crate::logic::rules::{OthelloRules, Rules, RulesError};
use log::{debug, info};
use std::sync::Arc;

/// A player that is asked for one move per turn.
pub trait Agent {
    fn name(&self) -> &str;

    /// `None` means the agent passes.
    fn step(&mut self, board: &Board, side: Color, opponent: Color) -> Result<Option<Move>, RulesError>;
}

/// Wraps a `SearchEngine` and carries its adaptive depth across turns.
pub struct AlphaBetaAgent<R, E, C = SystemClock> {
    engine: SearchEngine<R, E, C>,
    search: SearchConfig,
    last: Option<SearchOutcome>,
}

impl AlphaBetaAgent<OthelloRules, PhaseEvaluator<OthelloRules>, SystemClock> {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self::with_engine(SearchEngine::new(OthelloRules, config))
    }
}

impl<R: Rules, E: Evaluator, C: Clock> AlphaBetaAgent<R, E, C> {
    pub fn with_engine(engine: SearchEngine<R, E, C>) -> Self {
        let search = engine.config().search_config();
        Self {
            engine,
            search,
            last: None,
        }
    }

    /// Depth the next turn will search to.
    pub const fn search_config(&self) -> SearchConfig {
        self.search
    }

    pub const fn last_outcome(&self) -> Option<&SearchOutcome> {
        self.last.as_ref()
    }
}

impl<R: Rules, E: Evaluator, C: Clock> Agent for AlphaBetaAgent<R, E, C> {
    fn name(&self) -> &str {
        "alpha-beta"
    }

    fn step(&mut self, board: &Board, side: Color, opponent: Color) -> Result<Option<Move>, RulesError> {
        let outcome = self.engine.choose_move(board, side, opponent, self.search)?;
        info!(
            "{} turn took {:.4} seconds",
            self.name(),
            outcome.stats.time_ms as f64 / 1000.0
        );
        self.search = outcome.next;
        self.last = Some(outcome);
        Ok(outcome.best_move)
    }
}

/// Plays a uniformly random legal move.
#[derive(Debug, Clone, Default)]
pub struct RandomAgent<R = OthelloRules> {
    rules: R,
}

impl<R: Rules> RandomAgent<R> {
    pub const fn new(rules: R) -> Self {
        Self { rules }
    }
}

impl<R: Rules> Agent for RandomAgent<R> {
    fn name(&self) -> &str {
        "random"
    }

    fn step(&mut self, board: &Board, side: Color, _opponent: Color) -> Result<Option<Move>, RulesError> {
        Ok(self.rules.random_move(board, side))
    }
}

/// Plays a game to completion. A side without legal moves passes without
/// being asked; an agent that passes while it has moves is an error.
pub fn play_game<R: Rules>(
    rules: &R,
    mut game: GameState,
    black: &mut dyn Agent,
    white: &mut dyn Agent,
) -> Result<GameState, RulesError> {
    game.update_status(rules);

    while !game.is_over() {
        let side = game.turn;
        if rules.legal_moves(&game.board, side).is_empty() {
            debug!("{side} has no legal move and passes");
            game.pass(rules)?;
            continue;
        }

        let choice = match side {
            Color::Black => black.step(&game.board, side, side.opposite())?,
            Color::White => white.step(&game.board, side, side.opposite())?,
        };
        match choice {
            Some(mv) => game.make_move(rules, mv)?,
            None => return Err(RulesError::IllegalPass(side)),
        }
    }

    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::ManualClock;
    use crate::logic::game::GameStatus;

    fn fast_config() -> Arc<EngineConfig> {
        Arc::new(EngineConfig {
            initial_depth: 2,
            ..EngineConfig::default()
        })
    }

    #[test]
    fn test_agent_starts_at_configured_depth() {
        let agent = AlphaBetaAgent::new(fast_config());
        assert_eq!(agent.search_config(), SearchConfig::new(2));
        assert!(agent.last_outcome().is_none());
    }

    #[test]
    fn test_agent_depth_shrinks_across_turns() {
        let engine = SearchEngine::with_clock(OthelloRules, fast_config(), ManualClock::with_step(5000.0));
        let mut agent = AlphaBetaAgent::with_engine(engine);
        let board = Board::new(6).unwrap();

        let first = agent.step(&board, Color::Black, Color::White).unwrap();
        assert!(first.is_some());
        assert_eq!(agent.search_config().max_depth, 1);
        assert!(agent.last_outcome().is_some_and(|o| o.timed_out));

        agent.step(&board, Color::Black, Color::White).unwrap();
        assert_eq!(agent.search_config().max_depth, 1);
    }

    #[test]
    fn test_play_game_runs_to_completion() {
        let engine = SearchEngine::with_clock(OthelloRules, fast_config(), ManualClock::new());
        let mut black = AlphaBetaAgent::with_engine(engine);
        let mut white = RandomAgent::new(OthelloRules);

        let game = play_game(
            &OthelloRules,
            GameState::new(6).unwrap(),
            &mut black,
            &mut white,
        )
        .unwrap();

        match game.status {
            GameStatus::Finished { black, white, .. } => {
                assert_eq!(black + white, game.board.total_pieces());
            }
            GameStatus::Playing => panic!("game loop returned an unfinished game"),
        }
        assert!(game.history.iter().filter(|r| r.mv.is_some()).count() >= 2);
    }

    #[test]
    fn test_play_game_with_boxed_agents() {
        let engine = SearchEngine::with_clock(OthelloRules, fast_config(), ManualClock::new());
        let mut black: Box<dyn Agent> = Box::new(RandomAgent::new(OthelloRules));
        let mut white: Box<dyn Agent> = Box::new(AlphaBetaAgent::with_engine(engine));

        let game = play_game(&OthelloRules, GameState::new(4).unwrap(), &mut *black, &mut *white).unwrap();
        assert!(game.is_over());
        assert!(game.history.iter().any(|r| r.color == Color::White && r.mv.is_some()));
    }

    struct Passer;

    impl Agent for Passer {
        fn name(&self) -> &str {
            "passer"
        }

        fn step(&mut self, _board: &Board, _side: Color, _opponent: Color) -> Result<Option<Move>, RulesError> {
            Ok(None)
        }
    }

    #[test]
    fn test_pass_with_moves_is_rejected() {
        let mut black = Passer;
        let mut white = RandomAgent::new(OthelloRules);
        let result = play_game(
            &OthelloRules,
            GameState::new(4).unwrap(),
            &mut black,
            &mut white,
        );
        assert!(matches!(result, Err(RulesError::IllegalPass(Color::Black))));
    }
}
