//! Game controller
//!
//! Owns the session state and the one-shot input for the next tick. The host
//! calls [`Game::step_frame`] every [`Game::tick_interval`] and forwards
//! canvas-local clicks to [`Game::submit_click`]. After every finished level
//! the game sits paused until [`Game::resume`].

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SEED;
use crate::error::{ConfigError, GameError};
use crate::renderer::Renderable;
use crate::settings::{Difficulty, Settings};
use crate::sim::{GameEvent, GamePhase, GameState, LevelEndCondition, TickInput, level, tick};

/// Everything one frame produced
#[derive(Debug, Clone)]
pub struct FrameResult {
    pub end_condition: LevelEndCondition,
    pub renderables: Vec<Renderable>,
    pub events: Vec<GameEvent>,
}

/// Read-only view of the session for HUDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current level, 1-based
    pub level: usize,
    pub level_score: u64,
    pub total_score: u64,
    /// Balls still needed this level (never negative)
    pub balls_left: u32,
    /// Target reached; the background lightens
    pub goal_met: bool,
    pub game_over: bool,
    /// Waiting for the player to continue
    pub paused: bool,
    /// Balls short on the last failed attempt
    pub balls_missed_last_attempt: Option<u32>,
}

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    input: TickInput,
    tick_interval: Duration,
}

impl Game {
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or(DEFAULT_SEED);
        log::info!(
            "New game: {} levels, difficulty {}, seed {}",
            settings.levels.len(),
            settings.difficulty.as_str(),
            seed
        );
        Ok(Self {
            state: GameState::new(seed, settings.difficulty, &settings.levels),
            input: TickInput::default(),
            tick_interval: Duration::from_millis(u64::from(settings.tick_interval_ms)),
        })
    }

    /// Run one simulation frame
    pub fn step_frame(&mut self) -> FrameResult {
        let input = std::mem::take(&mut self.input);
        let outcome = tick(&mut self.state, &input);
        FrameResult {
            end_condition: outcome.end_condition,
            renderables: outcome.drawn.iter().map(Renderable::from).collect(),
            events: self.state.drain_events(),
        }
    }

    /// Queue the player's detonation at a canvas-local point.
    ///
    /// Returns `false` if the level's click is already pending or spent, or
    /// the game isn't running.
    pub fn submit_click(&mut self, x: f32, y: f32) -> bool {
        if self.state.phase != GamePhase::Playing
            || self.state.user_clicked
            || self.input.click.is_some()
        {
            log::debug!("click at ({x}, {y}) ignored");
            return false;
        }
        self.input.click = Some(Vec2::new(x, y));
        true
    }

    /// Pause a running game or continue a paused one on the next frame
    pub fn toggle_pause(&mut self) {
        self.input.pause = !self.input.pause;
    }

    /// Continue after a finished level (or a player pause).
    ///
    /// Returns `false` if the game isn't paused.
    pub fn resume(&mut self) -> bool {
        if !self.is_paused() {
            return false;
        }
        self.input.pause = true;
        true
    }

    pub fn is_paused(&self) -> bool {
        self.state.phase == GamePhase::Paused
    }

    /// Change the explosion preset, including for balls already on the field
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        log::info!("Difficulty set to {}", difficulty.as_str());
        self.state.set_difficulty(difficulty);
    }

    /// Jump to a 0-based level and populate it immediately
    pub fn start_level(&mut self, index: usize) -> Result<(), GameError> {
        let count = self.state.levels.len();
        if index >= count {
            return Err(GameError::LevelOutOfRange { index, count });
        }
        self.input = TickInput::default();
        level::start_level(&mut self.state, index);
        Ok(())
    }

    /// Fresh game from the first level; total score back to zero
    pub fn restart_game(&mut self) {
        log::info!("Restarting game");
        self.input = TickInput::default();
        level::restart_game(&mut self.state);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            level: self.state.level_index + 1,
            level_score: self.state.level_score,
            total_score: self.state.total_score,
            balls_left: self.state.balls_left_to_kill(),
            goal_met: self.state.goal_met(),
            game_over: self.state.phase == GamePhase::GameOver,
            paused: self.is_paused(),
            balls_missed_last_attempt: self.state.balls_missed,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
