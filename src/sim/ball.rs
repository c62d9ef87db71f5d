//! Ball entity: kinematics plus the Moving -> Exploding lifecycle
//!
//! A ball only ever moves forward through its lifecycle. Removal from the
//! live set happens when [`Ball::step`] returns `false`.

use std::fmt;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::score::chain_score;
use crate::consts::*;
use crate::random_between;
use crate::settings::Difficulty;

/// Fixed ball palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallColor {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
    Cyan,
    Magenta,
    White,
    Gray,
}

impl BallColor {
    pub const ALL: [BallColor; 10] = [
        BallColor::Red,
        BallColor::Green,
        BallColor::Blue,
        BallColor::Yellow,
        BallColor::Purple,
        BallColor::Orange,
        BallColor::Cyan,
        BallColor::Magenta,
        BallColor::White,
        BallColor::Gray,
    ];

    pub fn css_name(&self) -> &'static str {
        match self {
            BallColor::Red => "red",
            BallColor::Green => "green",
            BallColor::Blue => "blue",
            BallColor::Yellow => "yellow",
            BallColor::Purple => "purple",
            BallColor::Orange => "orange",
            BallColor::Cyan => "cyan",
            BallColor::Magenta => "magenta",
            BallColor::White => "white",
            BallColor::Gray => "gray",
        }
    }

    /// Linear RGBA matching the CSS named color
    pub fn rgba(&self) -> [f32; 4] {
        match self {
            BallColor::Red => [1.0, 0.0, 0.0, 1.0],
            BallColor::Green => [0.0, 0.502, 0.0, 1.0],
            BallColor::Blue => [0.0, 0.0, 1.0, 1.0],
            BallColor::Yellow => [1.0, 1.0, 0.0, 1.0],
            BallColor::Purple => [0.502, 0.0, 0.502, 1.0],
            BallColor::Orange => [1.0, 0.647, 0.0, 1.0],
            BallColor::Cyan => [0.0, 1.0, 1.0, 1.0],
            BallColor::Magenta => [1.0, 0.0, 1.0, 1.0],
            BallColor::White => [1.0, 1.0, 1.0, 1.0],
            BallColor::Gray => [0.502, 0.502, 0.502, 1.0],
        }
    }
}

impl fmt::Display for BallColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// Lifecycle state of a ball still in the live set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Travelling and bouncing
    Moving,
    /// Detonated: growing to max radius, then counting down its lifetime
    Exploding,
}

/// A ball entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    /// Displacement per step
    pub vel: Vec2,
    pub radius: f32,
    pub color: BallColor,
    pub state: BallState,
    pub life_timer_started: bool,
    /// Steps spent at max radius (after the first)
    pub life_timer: u32,
    /// Detonation hops from the player's click (0 = the click itself)
    pub chain: u32,
    pub score: u64,
    pub max_radius: f32,
    pub max_lifetime: u32,
}

impl Ball {
    pub fn new(
        id: u32,
        pos: Vec2,
        vel: Vec2,
        radius: f32,
        color: BallColor,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            color,
            state: BallState::Moving,
            life_timer_started: false,
            life_timer: 0,
            chain: 0,
            score: 0,
            max_radius: difficulty.max_radius(),
            max_lifetime: difficulty.max_lifetime(),
        }
    }

    /// Random position, direction and color; never purely horizontal or vertical
    pub fn random<R: Rng + ?Sized>(id: u32, rng: &mut R, difficulty: Difficulty) -> Self {
        let dx = nonzero_speed(rng);
        let dy = nonzero_speed(rng);
        let radius = BALL_RADIUS as i32;
        let x = random_between(rng, radius, CANVAS_WIDTH as i32 - radius);
        let y = random_between(rng, radius, CANVAS_HEIGHT as i32 - radius);
        // Upper bound is exclusive, so every palette entry (gray included) can come up
        let color = BallColor::ALL[random_between(rng, 0, BallColor::ALL.len() as i32) as usize];
        Self::new(
            id,
            Vec2::new(x as f32, y as f32),
            Vec2::new(dx as f32, dy as f32),
            BALL_RADIUS,
            color,
            difficulty,
        )
    }

    /// Re-apply a difficulty preset (1..=3, clamped)
    pub fn set_difficulty(&mut self, level: i32) {
        let difficulty = Difficulty::from_level(level);
        self.max_radius = difficulty.max_radius();
        self.max_lifetime = difficulty.max_lifetime();
    }

    #[inline]
    pub fn is_exploding(&self) -> bool {
        self.state == BallState::Exploding
    }

    /// Switch to exploding.
    ///
    /// `trigger` is the exploding ball that touched this one, or `None` for the
    /// player's click. Returns `false` (and changes nothing) if the ball was
    /// already exploding.
    pub fn detonate(&mut self, trigger: Option<&Ball>) -> bool {
        if self.is_exploding() {
            log::warn!("ball {} detonated twice; ignoring", self.id);
            return false;
        }
        self.vel = Vec2::ZERO;
        self.state = BallState::Exploding;
        match trigger {
            Some(other) => {
                self.chain = other.chain + 1;
                self.score = chain_score(self.chain);
            }
            None => {
                self.chain = 0;
                self.score = 0;
            }
        }
        true
    }

    /// Advance one step. Returns whether the ball is still alive.
    pub fn step(&mut self) -> bool {
        match self.state {
            BallState::Moving => {
                self.pos += self.vel;

                // Re-applying the full velocity after a bounce keeps balls from
                // sticking to the wall
                if self.pos.x < self.radius || self.pos.x > CANVAS_WIDTH - self.radius {
                    self.vel.x = -self.vel.x;
                    self.pos += self.vel;
                }
                if self.pos.y < self.radius || self.pos.y > CANVAS_HEIGHT - self.radius {
                    self.vel.y = -self.vel.y;
                    self.pos += self.vel;
                }
                true
            }
            BallState::Exploding => {
                if self.radius < self.max_radius {
                    self.radius += BALL_RADIUS_INCREMENT;
                    return true;
                }
                if self.life_timer_started {
                    self.life_timer += 1;
                } else {
                    self.life_timer_started = true;
                    self.life_timer = 0;
                }
                self.life_timer < self.max_lifetime
            }
        }
    }
}

fn nonzero_speed<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    loop {
        let v = random_between(rng, -MAX_SPEED, MAX_SPEED);
        if v != 0 {
            return v;
        }
    }
}
