//! Ball-ball collision detection and response
//!
//! Overlap is a plain circle test. The bounce response treats both balls as
//! bodies on linear trajectories and only reacts when their relative motion
//! says they are approaching, so two overlapping balls that are already
//! separating are left alone.

use std::f32::consts::TAU;

use glam::Vec2;

use super::ball::Ball;
use crate::distance;

/// Restitution coefficient (1.0 = no kinetic energy lost)
pub const RESTITUTION: f32 = 1.0;

/// Kinematic view of a ball for the collision solver
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
}

impl Body {
    pub fn of(ball: &Ball, mass: f32) -> Self {
        Self {
            pos: ball.pos,
            vel: ball.vel,
            radius: ball.radius,
            mass,
        }
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.length_squared()
    }

    pub fn momentum(&self) -> Vec2 {
        self.vel * self.mass
    }
}

/// True when the two circles touch or overlap
#[inline]
pub fn overlaps(a: &Ball, b: &Ball) -> bool {
    distance(a.pos, b.pos) <= a.radius + b.radius
}

/// Post-collision velocities for two bodies, or `None` when they don't
/// collide (identical velocities, moving apart, or a near miss).
pub fn collision_velocities(b1: Body, b2: Body) -> Option<(Vec2, Vec2)> {
    let r12 = b1.radius + b2.radius;
    let m21 = b2.mass / b1.mass;
    let d21 = b2.pos - b1.pos;
    let v21 = b2.vel - b1.vel;

    let v_cm = (b1.vel * b1.mass + b2.vel * b2.mass) / (b1.mass + b2.mass);

    if v21 == Vec2::ZERO {
        return None;
    }

    // Heading of the relative velocity and of the relative position
    let gamma_v = (-v21.y).atan2(-v21.x);
    let d = d21.length();
    let gamma_xy = d21.y.atan2(d21.x);

    let mut d_gamma = gamma_xy - gamma_v;
    if d_gamma > TAU {
        d_gamma -= TAU;
    } else if d_gamma < -TAU {
        d_gamma += TAU;
    }

    // Normalized impact parameter
    let dr = d * d_gamma.sin() / r12;

    let separating = d_gamma.abs() > TAU / 4.0 && d_gamma.abs() < 0.75 * TAU;
    if separating || dr.abs() > 1.0 {
        return None;
    }

    let alpha = dr.asin();
    let a = (gamma_v + alpha).tan();

    let dvx2 = -2.0 * (v21.x + a * v21.y) / ((1.0 + a * a) * (1.0 + m21));

    let v2 = Vec2::new(b2.vel.x + dvx2, b2.vel.y + a * dvx2);
    let v1 = Vec2::new(b1.vel.x - m21 * dvx2, b1.vel.y - a * m21 * dvx2);

    // Inelastic correction toward the center-of-mass velocity
    let v1 = (v1 - v_cm) * RESTITUTION + v_cm;
    let v2 = (v2 - v_cm) * RESTITUTION + v_cm;

    Some((v1, v2))
}

/// Bounce two moving balls off each other. Only velocities change.
pub fn elastic_collision(a: &mut Ball, mass_a: f32, b: &mut Ball, mass_b: f32) {
    if let Some((va, vb)) = collision_velocities(Body::of(a, mass_a), Body::of(b, mass_b)) {
        a.vel = va;
        b.vel = vb;
    }
}

/// Two distinct mutable elements of a slice
pub fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}
