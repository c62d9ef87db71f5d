//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (live-set order)
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod level;
pub mod score;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallColor, BallState};
pub use collision::{RESTITUTION, elastic_collision, overlaps};
pub use level::LevelEndCondition;
pub use score::chain_score;
pub use state::{GameEvent, GamePhase, GameState, Level};
pub use tick::{TickInput, TickOutcome, tick};
