//! Drawable primitives derived from simulation state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Ball, BallColor};

/// Inner stop radius of an exploding ball's gradient
pub const GRADIENT_INNER_RADIUS: f32 = 5.0;

/// Colors for non-ball elements
pub mod colors {
    /// #888888
    pub const BACKGROUND: [f32; 4] = [0.533, 0.533, 0.533, 1.0];
    /// #CCCCCC, once the level's target is reached
    pub const BACKGROUND_GOAL_MET: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
    pub const HUD_TEXT: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const FAIL_TEXT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const SUCCESS_TEXT: [f32; 4] = [0.0, 0.502, 0.0, 1.0];
    pub const GRADIENT_OUTER: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

/// How a circle is filled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Fill {
    Flat([f32; 4]),
    /// Two-stop radial gradient centered on the circle
    RadialGradient {
        inner: [f32; 4],
        inner_radius: f32,
        outer: [f32; 4],
    },
}

/// One ball as it should appear this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Renderable {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: BallColor,
    pub is_exploding: bool,
}

impl Renderable {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Flat for moving balls, color-to-white gradient for explosions
    pub fn fill(&self) -> Fill {
        if self.is_exploding {
            Fill::RadialGradient {
                inner: self.color.rgba(),
                inner_radius: GRADIENT_INNER_RADIUS,
                outer: colors::GRADIENT_OUTER,
            }
        } else {
            Fill::Flat(self.color.rgba())
        }
    }
}

impl From<&Ball> for Renderable {
    fn from(ball: &Ball) -> Self {
        Self {
            id: ball.id,
            x: ball.pos.x,
            y: ball.pos.y,
            radius: ball.radius,
            color: ball.color,
            is_exploding: ball.is_exploding(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;

    #[test]
    fn test_moving_ball_is_flat() {
        let ball = Ball::new(
            4,
            Vec2::new(12.0, 34.0),
            Vec2::ONE,
            10.0,
            BallColor::Cyan,
            Difficulty::Easy,
        );
        let r = Renderable::from(&ball);
        assert_eq!((r.id, r.x, r.y, r.radius), (4, 12.0, 34.0, 10.0));
        assert!(!r.is_exploding);
        assert_eq!(r.fill(), Fill::Flat(BallColor::Cyan.rgba()));
    }

    #[test]
    fn test_exploding_ball_is_gradient() {
        let mut ball = Ball::new(
            4,
            Vec2::new(12.0, 34.0),
            Vec2::ONE,
            10.0,
            BallColor::Orange,
            Difficulty::Easy,
        );
        ball.detonate(None);
        let r = Renderable::from(&ball);
        assert!(r.is_exploding);
        assert_eq!(
            r.fill(),
            Fill::RadialGradient {
                inner: BallColor::Orange.rgba(),
                inner_radius: 5.0,
                outer: [1.0, 1.0, 1.0, 1.0],
            }
        );
    }
}
