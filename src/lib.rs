//! Chain Reaction - a single-screen chain-explosion arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, collisions, level progression)
//! - `game`: Controller gluing clicks and frame cadence to the simulation
//! - `renderer`: Draw-list generation for an external 2D surface
//! - `settings`: Difficulty presets and level configuration

pub mod error;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, GameError};
pub use game::{FrameResult, Game, SessionSnapshot};
pub use settings::{Difficulty, LevelConfig, Settings};

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 600.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Radius of a moving (not yet exploding) ball
    pub const BALL_RADIUS: f32 = 10.0;
    /// Radius growth per step while exploding
    pub const BALL_RADIUS_INCREMENT: f32 = 1.0;
    /// Speed components are drawn from [-MAX_SPEED, MAX_SPEED), never zero
    pub const MAX_SPEED: i32 = 6;

    /// Max radius per difficulty (easy, medium, hard)
    pub const BALL_MAX_RADII: [f32; 3] = [50.0, 40.0, 30.0];
    /// Steps an exploding ball survives at max radius (easy, medium, hard)
    pub const BALL_MAX_LIFETIMES: [u32; 3] = [60, 50, 40];

    /// Default frame cadence in milliseconds
    pub const TICK_INTERVAL_MS: u32 = 15;

    /// Mass used for every ball in ball-ball bounces
    pub const BALL_MASS: f32 = 1.0;

    /// Default seed when settings don't provide one
    pub const DEFAULT_SEED: u64 = 0x00C0_FFEE;
}

/// Random integer in `[low, low + |high - low|)`.
///
/// `low >= high` is a caller bug; it is reported through `log::error!` and a
/// value is still produced so the frame can finish.
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, low: i32, high: i32) -> i32 {
    if low >= high {
        log::error!("random_between: low ({low}) is not below high ({high})");
    }
    let span = (high - low).abs();
    if span == 0 {
        return low;
    }
    low + rng.random_range(0..span)
}

/// Euclidean distance between two centers
#[inline]
pub fn distance(a: glam::Vec2, b: glam::Vec2) -> f32 {
    (a - b).length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_between_stays_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let v = random_between(&mut rng, -6, 6);
            assert!((-6..6).contains(&v));
        }
    }

    #[test]
    fn test_random_between_empty_span_returns_low() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(random_between(&mut rng, 4, 4), 4);
    }

    #[test]
    fn test_random_between_reversed_bounds_uses_span() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let v = random_between(&mut rng, 5, 2);
            assert!((5..8).contains(&v));
        }
    }
}
