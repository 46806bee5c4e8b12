//! Simulation state and core types
//!
//! Everything the engine mutates between ministeps lives in these plain
//! structs so a host can inspect (or serialize) it without reaching into
//! the engine.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::object::Rect;
use crate::consts::*;

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a start/replay command
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Goal reached; waiting for replay
    Won,
    /// Player died; waiting for restart
    Lost,
}

/// Vertical motion sub-state (exactly one at a time)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Motion {
    #[default]
    Idle,
    /// Rising; `ministeps` already taken this jump
    Jumping { ministeps: u32 },
    /// Falling until a top contact is found
    Falling,
}

/// How the last level ended, for menu text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won { level: u32, score: i64 },
    Lost { level: u32, score: i64 },
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Won { level, .. } => write!(f, "You beat Level {level}"),
            Outcome::Lost { level, .. } => write!(f, "You lost on Level {level}"),
        }
    }
}

/// Things that happened during a ministep, for sound/effects layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Feet settled on an object
    Landed { object_id: u32 },
    /// One-time landing award
    Scored { object_id: u32, points: i64 },
    PowerUp { object_id: u32, jump_size: u32 },
    EnemyStomped { object_id: u32, touches: u32 },
    EnemyDestroyed { object_id: u32 },
    Died { level: u32 },
    LevelComplete { level: u32 },
}

/// The player marker. Its center only moves horizontally; vertical motion
/// is simulated by translating the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub pos: IVec2,
    pub half_size: i32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: IVec2::new(WORLD_WIDTH / 2, WORLD_HEIGHT - 100 - PLAYER_HALF_SIZE),
            half_size: PLAYER_HALF_SIZE,
        }
    }
}

impl Player {
    /// Bounding box `[x - h, y - h, x + h, y + h]`
    pub fn bbox(&self) -> Rect {
        Rect::centered(self.pos, self.half_size)
    }

    /// Side-step by one half-size, clamped to the world edges
    pub fn step_side(&mut self, dir: i32) {
        let lo = self.half_size;
        let hi = WORLD_WIDTH - self.half_size;
        self.pos.x = (self.pos.x + dir * self.half_size).clamp(lo, hi);
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Scores, level and phase for the current process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// Current level (1-based)
    pub level: u32,
    /// Running score (tracks altitude plus awards)
    pub score: i64,
    /// Best score seen since the level started
    pub max_score_this_run: i64,
    /// Best score seen since the process started
    pub top_score_ever: i64,
    /// Ministeps per jump (grows with power-ups)
    pub jump_size: u32,
    pub phase: GamePhase,
    pub motion: Motion,
    /// Whether the last player action was a jump (gates enemy stomps)
    pub last_action_was_jump: bool,
    /// How the previous level ended
    pub outcome: Option<Outcome>,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            level: 1,
            score: 0,
            max_score_this_run: 0,
            top_score_ever: 0,
            jump_size: DEFAULT_JUMP_SIZE,
            phase: GamePhase::Menu,
            motion: Motion::Idle,
            last_action_was_jump: false,
            outcome: None,
        }
    }
}

impl SimulationState {
    #[inline]
    pub fn is_jumping(&self) -> bool {
        matches!(self.motion, Motion::Jumping { .. })
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        self.motion == Motion::Falling
    }

    #[inline]
    pub fn in_motion(&self) -> bool {
        self.motion != Motion::Idle
    }

    /// Fold the running score into the run and process bests
    pub fn record_score(&mut self) {
        self.max_score_this_run = self.max_score_this_run.max(self.score);
        self.top_score_ever = self.top_score_ever.max(self.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_default_stands_on_floor() {
        let player = Player::default();
        assert_eq!(player.bbox(), Rect::new(190, 680, 210, 700));
        assert_eq!(player.bbox().y2, WORLD_HEIGHT - 100);
    }

    #[test]
    fn test_step_side_clamps() {
        let mut player = Player::default();
        for _ in 0..100 {
            player.step_side(-1);
        }
        assert_eq!(player.pos.x, PLAYER_HALF_SIZE);
        for _ in 0..100 {
            player.step_side(1);
        }
        assert_eq!(player.pos.x, WORLD_WIDTH - PLAYER_HALF_SIZE);
    }

    #[test]
    fn test_record_score_monotonic() {
        let mut state = SimulationState::default();
        state.score = 120;
        state.record_score();
        state.score = 40;
        state.record_score();
        assert_eq!(state.max_score_this_run, 120);
        assert_eq!(state.top_score_ever, 120);
    }

    #[test]
    fn test_outcome_text() {
        let won = Outcome::Won { level: 3, score: 900 };
        assert_eq!(won.to_string(), "You beat Level 3");
        let lost = Outcome::Lost { level: 1, score: 10 };
        assert_eq!(lost.to_string(), "You lost on Level 1");
    }

    #[test]
    fn test_state_roundtrips_through_json() {
        let mut state = SimulationState::default();
        state.motion = Motion::Jumping { ministeps: 4 };
        state.outcome = Some(Outcome::Won { level: 2, score: 300 });
        let json = serde_json::to_string(&state).unwrap();
        let back: SimulationState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.motion, state.motion);
        assert_eq!(back.outcome, state.outcome);
    }
}
