//! Fixed-cadence simulation tick
//!
//! One tick = pause toggle, lazy level init, pending click, one simulation
//! step, then the end-of-level check. Order inside the step matters:
//! 1. every ball steps
//! 2. the frame's draw list is captured (dying balls are drawn one last time)
//! 3. dead balls are culled
//! 4. every ordered pair is checked for chain detonation or a bounce

use glam::Vec2;

use super::ball::Ball;
use super::collision::{elastic_collision, overlaps, pair_mut};
use super::level::{self, LevelEndCondition};
use super::score::record_detonation;
use super::state::{GamePhase, GameState};
use crate::consts::BALL_MASS;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Canvas-local click position, if the player clicked since the last tick
    pub click: Option<Vec2>,
    /// Pause toggle (also continues after a finished level)
    pub pause: bool,
}

/// What one tick produced
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub end_condition: LevelEndCondition,
    /// Balls as they should be drawn this frame
    pub drawn: Vec<Ball>,
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                log::debug!("paused at tick {}", state.time_ticks);
                state.phase = GamePhase::Paused;
            }
            GamePhase::Paused => {
                log::debug!("resumed at tick {}", state.time_ticks);
                state.phase = GamePhase::Playing;
            }
            GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::GameOver => {
            return TickOutcome {
                end_condition: LevelEndCondition::GameOver,
                drawn: Vec::new(),
            };
        }
        // Frozen: the field is reported as-is and nothing advances
        GamePhase::Paused => {
            return TickOutcome {
                end_condition: LevelEndCondition::Continues,
                drawn: state.balls.clone(),
            };
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    level::ensure_initialized(state);

    if let Some(pos) = input.click {
        level::apply_click(state, pos);
    }

    let drawn = simulate_step(state);

    let verdict = level::evaluate_end(state);
    let end_condition = level::apply_end_condition(state, verdict);

    TickOutcome {
        end_condition,
        drawn,
    }
}

/// Step, cull and resolve interactions for every live ball.
///
/// Returns the post-step, pre-cull snapshot used for drawing.
pub fn simulate_step(state: &mut GameState) -> Vec<Ball> {
    let mut dead: Vec<u32> = Vec::new();
    for ball in &mut state.balls {
        if !ball.step() {
            dead.push(ball.id);
        }
    }

    let drawn = state.balls.clone();

    if !dead.is_empty() {
        state.balls.retain(|b| !dead.contains(&b.id));
    }

    resolve_interactions(state);

    drawn
}

/// Chain detonations and ball-ball bounces.
///
/// Pairs are visited in live-set order. A ball detonated here can trigger
/// balls visited after it in the same pass, but never detonates twice.
pub fn resolve_interactions(state: &mut GameState) {
    let n = state.balls.len();
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            if state.balls[i].is_exploding() {
                break;
            }

            let other = state.balls[j];
            if !overlaps(&state.balls[i], &other) {
                continue;
            }

            if other.is_exploding() {
                if state.balls[i].detonate(Some(&other)) {
                    let detonated = state.balls[i];
                    record_detonation(state, &detonated);
                }
            } else {
                let (ball, other) = pair_mut(&mut state.balls, i, j);
                elastic_collision(ball, BALL_MASS, other, BALL_MASS);
            }
        }
    }
}
