//! Score accounting
//!
//! A detonation scores `chain³ × 100`. The player's own click is chain 0 and
//! scores nothing. Level scores only reach the total when the level is passed.

use super::ball::Ball;
use super::state::{GameEvent, GameState};

/// Score for a ball detonated at the given chain depth
#[inline]
pub fn chain_score(chain: u32) -> u64 {
    u64::from(chain).pow(3) * 100
}

/// Count a chain detonation against the current level
pub fn record_detonation(state: &mut GameState, ball: &Ball) {
    state.killed_this_level += 1;
    state.level_score += ball.score;
    log::debug!(
        "{} ball {} detonated (chain {}, +{}), level score {}",
        ball.color,
        ball.id,
        ball.chain,
        ball.score,
        state.level_score
    );
    state.events.push(GameEvent::BallDetonated {
        id: ball.id,
        chain: ball.chain,
        score: ball.score,
    });
}

/// Fold the level score into the running total (successful levels only)
pub fn bank_level_score(state: &mut GameState) {
    state.total_score += state.level_score;
}

/// Balls still needed to pass, never negative
pub fn balls_left_to_kill(target: u32, killed: u32) -> u32 {
    target.saturating_sub(killed)
}
