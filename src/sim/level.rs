//! Level progression
//!
//! Levels start lazily on the first frame they are visited. Once the player
//! has clicked, a level ends when no ball is exploding any more: it passes if
//! enough balls were chain-detonated, otherwise it is retried from scratch.
//! Either way the session pauses until the player continues.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::score::bank_level_score;
use super::state::{GameEvent, GamePhase, GameState};

/// Per-frame verdict on the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelEndCondition {
    /// Still playing
    Continues,
    /// Target reached, explosions still running
    GoalMet,
    /// Level passed
    OverSuccessfully,
    /// Explosions died out short of the target
    OverUnsuccessfully,
    /// Last level passed
    GameOver,
}

/// Populate the live set for level `n` and reset per-level counters
pub fn init_for_level(state: &mut GameState, n: usize) {
    let Some(level) = state.levels.get(n).copied() else {
        log::error!("init_for_level: no level {n}");
        return;
    };

    state.balls.clear();
    state.killed_this_level = 0;
    state.level_score = 0;
    state.user_clicked = false;
    for _ in 0..level.initial_balls {
        state.spawn_random_ball();
    }
    state.levels[n].initialized = true;

    log::info!(
        "Level {}: {} balls, target {}",
        n + 1,
        level.initial_balls,
        level.target
    );
    state.events.push(GameEvent::LevelStarted { level: n });
}

/// Initialize the current level if this is its first frame
pub fn ensure_initialized(state: &mut GameState) {
    let idx = state.level_index;
    if state.levels.get(idx).is_some_and(|l| !l.initialized) {
        init_for_level(state, idx);
    }
}

/// Spend the level's single click. Returns `false` if it was already used.
pub fn apply_click(state: &mut GameState, pos: Vec2) -> bool {
    if state.user_clicked {
        return false;
    }
    let id = state.spawn_click_detonation(pos);
    state.user_clicked = true;
    log::debug!("click at ({}, {}) detonated ball {}", pos.x, pos.y, id);
    state.events.push(GameEvent::ClickDetonated { id, pos });
    true
}

/// Decide whether the current level is over
pub fn evaluate_end(state: &GameState) -> LevelEndCondition {
    if !state.user_clicked {
        return LevelEndCondition::Continues;
    }

    if !state.any_exploding() {
        return if state.goal_met() {
            LevelEndCondition::OverSuccessfully
        } else {
            LevelEndCondition::OverUnsuccessfully
        };
    }

    // Only checked while something is exploding; an emptied set is
    // classified by the branch above instead.
    if state.balls.is_empty() {
        return LevelEndCondition::OverSuccessfully;
    }

    if state.goal_met() {
        LevelEndCondition::GoalMet
    } else {
        LevelEndCondition::Continues
    }
}

/// Act on a level verdict: retry, advance, or finish the game.
///
/// Returns the condition to report for this frame.
pub fn apply_end_condition(state: &mut GameState, cond: LevelEndCondition) -> LevelEndCondition {
    let level = state.level_index;
    match cond {
        LevelEndCondition::OverUnsuccessfully => {
            let balls_needed = state.balls_left_to_kill();
            log::info!("Level {} failed: need {} more", level + 1, balls_needed);
            state.balls_missed = Some(balls_needed);
            state.events.push(GameEvent::LevelFailed {
                level,
                balls_needed,
            });
            // Retry discards this attempt's level score
            init_for_level(state, level);
            state.phase = GamePhase::Paused;
            cond
        }
        LevelEndCondition::OverSuccessfully => {
            bank_level_score(state);
            state.balls_missed = None;
            log::info!(
                "Level {} completed. Score: {}",
                level + 1,
                state.total_score
            );
            state.events.push(GameEvent::LevelCompleted {
                level,
                level_score: state.level_score,
                total_score: state.total_score,
            });

            state.level_index += 1;
            if state.level_index >= state.levels.len() {
                end_game(state);
                LevelEndCondition::GameOver
            } else {
                state.phase = GamePhase::Paused;
                cond
            }
        }
        _ => cond,
    }
}

/// Enter GameOver: back to the first level, every level uninitialized
fn end_game(state: &mut GameState) {
    log::info!("Game over. Final score: {}", state.total_score);
    state.events.push(GameEvent::GameOver {
        total_score: state.total_score,
    });
    state.phase = GamePhase::GameOver;
    state.level_score = 0;
    state.level_index = 0;
    for level in &mut state.levels {
        level.initialized = false;
    }
}

/// Start a fresh game from the first level
pub fn restart_game(state: &mut GameState) {
    state.phase = GamePhase::Playing;
    state.level_index = 0;
    state.total_score = 0;
    state.level_score = 0;
    state.killed_this_level = 0;
    state.user_clicked = false;
    state.balls_missed = None;
    state.balls.clear();
    for level in &mut state.levels {
        level.initialized = false;
    }
}

/// Jump straight to level `n`, initializing it now
pub fn start_level(state: &mut GameState, n: usize) {
    state.phase = GamePhase::Playing;
    state.level_index = n;
    state.balls_missed = None;
    init_for_level(state, n);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{DEFAULT_LEVELS, Difficulty, LevelConfig};

    fn state_with(levels: &[LevelConfig]) -> GameState {
        GameState::new(2024, Difficulty::Easy, levels)
    }

    #[test]
    fn test_init_for_level_populates_and_resets() {
        let mut state = state_with(&DEFAULT_LEVELS);
        state.killed_this_level = 3;
        state.level_score = 500;
        state.user_clicked = true;

        init_for_level(&mut state, 2);

        assert_eq!(state.balls.len(), 15);
        assert!(state.balls.iter().all(|b| !b.is_exploding()));
        assert_eq!(state.killed_this_level, 0);
        assert_eq!(state.level_score, 0);
        assert!(!state.user_clicked);
        assert!(state.levels[2].initialized);
        assert_eq!(state.events, vec![GameEvent::LevelStarted { level: 2 }]);
    }

    #[test]
    fn test_ensure_initialized_only_once() {
        let mut state = state_with(&DEFAULT_LEVELS);
        ensure_initialized(&mut state);
        let first = state.balls.clone();
        ensure_initialized(&mut state);
        assert_eq!(state.balls, first);
    }

    #[test]
    fn test_continues_before_click() {
        let mut state = state_with(&DEFAULT_LEVELS);
        init_for_level(&mut state, 0);
        assert_eq!(evaluate_end(&state), LevelEndCondition::Continues);
        // Even an empty field keeps going until the click
        state.balls.clear();
        assert_eq!(evaluate_end(&state), LevelEndCondition::Continues);
    }

    #[test]
    fn test_second_click_ignored() {
        let mut state = state_with(&DEFAULT_LEVELS);
        init_for_level(&mut state, 0);
        assert!(apply_click(&mut state, Vec2::new(300.0, 300.0)));
        assert!(!apply_click(&mut state, Vec2::new(100.0, 100.0)));
        assert_eq!(state.exploding_count(), 1);
        assert_eq!(state.balls.len(), 6);
    }

    #[test]
    fn test_exploding_with_goal_met_reports_goal_met() {
        let mut state = state_with(&DEFAULT_LEVELS);
        init_for_level(&mut state, 0);
        apply_click(&mut state, Vec2::new(300.0, 300.0));
        assert_eq!(evaluate_end(&state), LevelEndCondition::Continues);
        state.killed_this_level = 1;
        assert_eq!(evaluate_end(&state), LevelEndCondition::GoalMet);
    }

    #[test]
    fn test_no_exploding_after_click_ends_level() {
        let mut state = state_with(&DEFAULT_LEVELS);
        init_for_level(&mut state, 0);
        state.user_clicked = true;
        assert_eq!(evaluate_end(&state), LevelEndCondition::OverUnsuccessfully);
        state.killed_this_level = 1;
        assert_eq!(evaluate_end(&state), LevelEndCondition::OverSuccessfully);
        state.balls.clear();
        assert_eq!(evaluate_end(&state), LevelEndCondition::OverSuccessfully);
    }

    #[test]
    fn test_failure_retries_and_discards_score() {
        let mut state = state_with(&DEFAULT_LEVELS);
        state.level_index = 1;
        init_for_level(&mut state, 1);
        state.user_clicked = true;
        state.killed_this_level = 1;
        state.level_score = 100;
        state.total_score = 50;

        let cond = apply_end_condition(&mut state, LevelEndCondition::OverUnsuccessfully);

        assert_eq!(cond, LevelEndCondition::OverUnsuccessfully);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.balls_missed, Some(1));
        assert_eq!(state.level_score, 0);
        assert_eq!(state.total_score, 50);
        assert_eq!(state.balls.len(), 10);
        assert!(!state.user_clicked);
        assert!(state.events.contains(&GameEvent::LevelFailed {
            level: 1,
            balls_needed: 1
        }));
    }

    #[test]
    fn test_success_banks_and_advances_lazily() {
        let mut state = state_with(&DEFAULT_LEVELS);
        init_for_level(&mut state, 0);
        state.level_score = 900;

        let cond = apply_end_condition(&mut state, LevelEndCondition::OverSuccessfully);

        assert_eq!(cond, LevelEndCondition::OverSuccessfully);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.total_score, 900);
        assert_eq!(state.level_index, 1);
        assert!(!state.levels[1].initialized);

        ensure_initialized(&mut state);
        assert!(state.levels[1].initialized);
        assert_eq!(state.balls.len(), 10);
        assert_eq!(state.level_score, 0);
    }

    #[test]
    fn test_last_level_success_is_game_over() {
        let mut state = state_with(&[LevelConfig::new(3, 1)]);
        init_for_level(&mut state, 0);
        state.level_score = 100;

        let cond = apply_end_condition(&mut state, LevelEndCondition::OverSuccessfully);

        assert_eq!(cond, LevelEndCondition::GameOver);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.total_score, 100);
        assert_eq!(state.level_score, 0);
        assert_eq!(state.level_index, 0);
        assert!(!state.levels[0].initialized);
    }

    #[test]
    fn test_restart_game_resets_session() {
        let mut state = state_with(&DEFAULT_LEVELS);
        init_for_level(&mut state, 0);
        state.total_score = 12_000;
        state.level_index = 3;
        state.phase = GamePhase::GameOver;

        restart_game(&mut state);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.total_score, 0);
        assert!(state.balls.is_empty());
        assert!(state.levels.iter().all(|l| !l.initialized));
    }
}
