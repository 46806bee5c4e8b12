//! Retro Climb - a vertical-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ministep physics, collisions, level layout)
//! - `host`: Input events and the per-ministep frame sink
//! - `settings`: Tick intervals and seed configuration
//! - `highscores`: In-process leaderboard of finished runs

pub mod highscores;
pub mod host;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use host::{FrameSink, FrameView, Host, InputEvent};
pub use settings::Settings;
pub use sim::Engine;

/// Game configuration constants
pub mod consts {
    /// World dimensions (world units)
    pub const WORLD_WIDTH: i32 = 400;
    pub const WORLD_HEIGHT: i32 = 800;

    /// Player hitbox half-extent; also the side-step distance
    pub const PLAYER_HALF_SIZE: i32 = 10;
    /// Distance the world moves per ministep
    pub const JUMP_HEIGHT: i32 = PLAYER_HALF_SIZE;

    /// Ministeps per jump at the start of every level
    pub const DEFAULT_JUMP_SIZE: u32 = 20;
    /// Extra ministeps per jump granted by each power-up
    pub const POWERUP_JUMP_BONUS: u32 = 5;

    /// Base awards (before level scaling)
    pub const PLATFORM_POINTS: i64 = 50;
    pub const ENEMY_STOMP_POINTS: i64 = 100;
    pub const ENEMY_DESTROY_POINTS: i64 = 150;
    pub const POWERUP_POINTS: i64 = 200;

    /// Enemy touch count at which it is destroyed
    pub const ENEMY_DESTROY_TOUCHES: u32 = 2;

    /// Generated object sizes (width, height)
    pub const PLATFORM_SIZE: (i32, i32) = (50, 10);
    pub const POWERUP_SIZE: (i32, i32) = (20, 20);
    pub const ENEMY_SIZE: (i32, i32) = (50, 50);
    pub const GOAL_SIZE: (i32, i32) = (50, 50);
    /// Left edge of the goal block
    pub const GOAL_X: i32 = 150;
}

/// Level score multiplier expressed in tenths: `1 + 0.2 * (level - 1)` => `10 + 2 * (level - 1)`
#[inline]
pub fn level_scale_tenths(level: u32) -> i64 {
    10 + 2 * (level.max(1) as i64 - 1)
}

/// Level score multiplier `1 + 0.2 * (level - 1)`
#[inline]
pub fn level_scale(level: u32) -> f64 {
    level_scale_tenths(level) as f64 / 10.0
}

/// Scale a base award by the level multiplier.
///
/// Exact for bases that are multiples of 5, which every award is.
#[inline]
pub fn scaled_points(base: i64, level: u32) -> i64 {
    base * level_scale_tenths(level) / 10
}
