use crate::engine::eval::GamePhase;
use crate::engine::SearchConfig;
use serde::{Deserialize, Serialize};

/// Term weights applied by the evaluator within one game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseWeights {
    pub mobility: i32,
    pub stability: i32,
    pub pieces: i32,
    pub position: i32,
}

impl PhaseWeights {
    pub const EARLY: Self = Self {
        mobility: 5,
        stability: 3,
        pieces: 1,
        position: 8,
    };
    pub const MID: Self = Self {
        mobility: 3,
        stability: 5,
        pieces: 3,
        position: 5,
    };
    pub const LATE: Self = Self {
        mobility: 1,
        stability: 5,
        pieces: 10,
        position: 2,
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub early_weights: PhaseWeights,
    pub mid_weights: PhaseWeights,
    pub late_weights: PhaseWeights,
    pub val_corner: i32,
    pub val_corner_adjacent: i32,
    pub val_edge: i32,
    pub val_stability: i32,

    // Move Ordering Parameters
    pub score_corner: i32,
    pub score_corner_adjacent: i32,
    pub score_edge: i32,
    pub score_per_capture: i32,

    // Search Parameters
    pub time_budget_ms: u64, // Soft budget, the hard limit is 2000 ms
    pub initial_depth: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            early_weights: PhaseWeights::EARLY,
            mid_weights: PhaseWeights::MID,
            late_weights: PhaseWeights::LATE,
            val_corner: 25,
            val_corner_adjacent: 10,
            val_edge: 5,
            val_stability: 5,

            score_corner: 1000,
            score_corner_adjacent: -500,
            score_edge: 100,
            score_per_capture: 10,

            time_budget_ms: 1900,
            initial_depth: 5,
        }
    }
}

#[derive(Deserialize)]
struct EngineConfigJson {
    early_weights: Option<PhaseWeights>,
    mid_weights: Option<PhaseWeights>,
    late_weights: Option<PhaseWeights>,
    val_corner: Option<f32>,
    val_corner_adjacent: Option<f32>,
    val_edge: Option<f32>,
    val_stability: Option<f32>,

    score_corner: Option<f32>,
    score_corner_adjacent: Option<f32>,
    score_edge: Option<f32>,
    score_per_capture: Option<f32>,

    time_budget_ms: Option<u64>,
    initial_depth: Option<u8>,
}

impl EngineConfig {
    /// Reads a config where heuristic values are scale factors applied to
    /// the defaults. Weights, budget and depth are taken as absolute values.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        Ok(Self {
            early_weights: json_config.early_weights.unwrap_or(default.early_weights),
            mid_weights: json_config.mid_weights.unwrap_or(default.mid_weights),
            late_weights: json_config.late_weights.unwrap_or(default.late_weights),
            val_corner: apply_scale(default.val_corner, json_config.val_corner),
            val_corner_adjacent: apply_scale(
                default.val_corner_adjacent,
                json_config.val_corner_adjacent,
            ),
            val_edge: apply_scale(default.val_edge, json_config.val_edge),
            val_stability: apply_scale(default.val_stability, json_config.val_stability),

            score_corner: apply_scale(default.score_corner, json_config.score_corner),
            score_corner_adjacent: apply_scale(
                default.score_corner_adjacent,
                json_config.score_corner_adjacent,
            ),
            score_edge: apply_scale(default.score_edge, json_config.score_edge),
            score_per_capture: apply_scale(
                default.score_per_capture,
                json_config.score_per_capture,
            ),

            time_budget_ms: json_config.time_budget_ms.unwrap_or(default.time_budget_ms),
            initial_depth: json_config.initial_depth.unwrap_or(default.initial_depth),
        })
    }

    pub const fn weights(&self, phase: GamePhase) -> PhaseWeights {
        match phase {
            GamePhase::Early => self.early_weights,
            GamePhase::Mid => self.mid_weights,
            GamePhase::Late => self.late_weights,
        }
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig::new(self.initial_depth)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn apply_scale(default_val: i32, scale: Option<f32>) -> i32 {
    scale.map_or(default_val, |s| (default_val as f32 * s) as i32)
}
