//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete ministeps only (no wall-clock time)
//! - Seeded RNG only
//! - Stable iteration order (creation order of world objects)
//! - No rendering or platform dependencies

pub mod collision;
pub mod engine;
pub mod level;
pub mod object;
pub mod state;

pub use collision::{
    Contact, bottom_touch, classify_contact, left_touch, right_touch, top_touch,
};
pub use engine::{Direction, Engine, Ministep};
pub use level::{build_level, generate_x_pool, generate_y_pool};
pub use object::{ObjectKind, Rect, WorldObject};
pub use state::{GameEvent, GamePhase, Motion, Outcome, Player, RngState, SimulationState};
