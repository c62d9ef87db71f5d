//! Session state and core simulation types
//!
//! Everything that changes between frames lives in [`GameState`]. Balls never
//! hold references to each other; the live set owns them all.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::score::balls_left_to_kill;
use crate::settings::{Difficulty, LevelConfig};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// A level is in progress (or about to be lazily initialized)
    Playing,
    /// Between levels, or paused by the player; nothing moves until resumed
    Paused,
    /// Last level passed; waiting for a restart
    GameOver,
}

/// Notifications raised during a frame, drained by the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A level's ball population was (re)created
    LevelStarted { level: usize },
    /// The player's click spawned the first explosion
    ClickDetonated { id: u32, pos: Vec2 },
    /// A ball entered the exploding state through a chain
    BallDetonated { id: u32, chain: u32, score: u64 },
    /// Level passed; its score was banked
    LevelCompleted {
        level: usize,
        level_score: u64,
        total_score: u64,
    },
    /// Explosions died out short of the target; the level restarts
    LevelFailed { level: usize, balls_needed: u32 },
    /// Every level passed
    GameOver { total_score: u64 },
}

/// A level in the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub initial_balls: u32,
    pub target: u32,
    /// Set once the ball population has been created
    pub initialized: bool,
}

impl From<&LevelConfig> for Level {
    fn from(cfg: &LevelConfig) -> Self {
        Self {
            initial_balls: cfg.initial_balls,
            target: cfg.target,
            initialized: false,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Explosion preset applied to every new ball
    pub difficulty: Difficulty,
    /// Level sequence
    pub levels: Vec<Level>,
    /// Current level (0-based)
    pub level_index: usize,
    /// Live balls
    pub balls: Vec<Ball>,
    pub killed_this_level: u32,
    pub level_score: u64,
    pub total_score: u64,
    /// Whether the player's one detonation was used this level
    pub user_clicked: bool,
    /// Balls short of the target on the last failed attempt
    pub balls_missed: Option<u32>,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, difficulty: Difficulty, levels: &[LevelConfig]) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            difficulty,
            levels: levels.iter().map(Level::from).collect(),
            level_index: 0,
            balls: Vec::new(),
            killed_this_level: 0,
            level_score: 0,
            total_score: 0,
            user_clicked: false,
            balls_missed: None,
            phase: GamePhase::Playing,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a random moving ball to the live set
    pub fn spawn_random_ball(&mut self) -> u32 {
        let id = self.next_entity_id();
        let ball = Ball::random(id, &mut self.rng, self.difficulty);
        self.balls.push(ball);
        id
    }

    /// Add a random ball at `pos` and detonate it as the player's click
    pub fn spawn_click_detonation(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let mut ball = Ball::random(id, &mut self.rng, self.difficulty);
        ball.pos = pos;
        ball.detonate(None);
        self.balls.push(ball);
        id
    }

    /// Switch preset; live balls take the new explosion size and lifetime too
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        for ball in &mut self.balls {
            ball.set_difficulty(difficulty.level());
        }
    }

    pub fn current_level(&self) -> Option<&Level> {
        self.levels.get(self.level_index)
    }

    /// Kill target of the current level (0 past the end)
    pub fn current_target(&self) -> u32 {
        self.current_level().map(|l| l.target).unwrap_or(0)
    }

    pub fn exploding_count(&self) -> usize {
        self.balls.iter().filter(|b| b.is_exploding()).count()
    }

    pub fn any_exploding(&self) -> bool {
        self.balls.iter().any(Ball::is_exploding)
    }

    pub fn balls_left_to_kill(&self) -> u32 {
        balls_left_to_kill(self.current_target(), self.killed_this_level)
    }

    /// Enough balls detonated to pass once the explosions settle
    pub fn goal_met(&self) -> bool {
        self.killed_this_level >= self.current_target()
    }

    pub fn find_ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
