//! Rendering contract
//!
//! The game never touches pixels. [`draw_frame`] turns a frame into calls on a
//! [`Surface`] (background, balls, HUD text, end-of-level banners); the host
//! maps those onto a canvas or GPU. [`DrawList`] records the calls instead.

pub mod shapes;

pub use shapes::{Fill, GRADIENT_INNER_RADIUS, Renderable, colors};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::game::{FrameResult, SessionSnapshot};
use crate::sim::{GameEvent, LevelEndCondition};

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Bold text at a pixel size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size: f32,
    pub color: [f32; 4],
    pub align: TextAlign,
}

impl TextStyle {
    const fn new(size: f32, color: [f32; 4], align: TextAlign) -> Self {
        Self { size, color, align }
    }
}

const HUD_SIZE: f32 = 15.0;
const BANNER_SIZE: f32 = 50.0;
const WIN_SIZE: f32 = 70.0;
const FINAL_SCORE_SIZE: f32 = 40.0;
const HUD_MARGIN: f32 = 10.0;
const HUD_TOP: f32 = 20.0;

/// A 2D surface able to fill circles and print text
pub trait Surface {
    fn clear(&mut self, color: [f32; 4]);
    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Fill);
    fn fill_text(&mut self, text: &str, pos: Vec2, style: TextStyle);
}

/// A recorded surface call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear([f32; 4]),
    Circle { center: Vec2, radius: f32, fill: Fill },
    Text { text: String, pos: Vec2, style: TextStyle },
}

/// Surface that records calls in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }
}

impl Surface for DrawList {
    fn clear(&mut self, color: [f32; 4]) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Fill) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            fill,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            style,
        });
    }
}

/// Background for the current state of the level
pub fn background(snapshot: &SessionSnapshot) -> [f32; 4] {
    if snapshot.goal_met && !snapshot.game_over {
        colors::BACKGROUND_GOAL_MET
    } else {
        colors::BACKGROUND
    }
}

/// Draw one full frame
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, frame: &FrameResult, snapshot: &SessionSnapshot) {
    surface.clear(background(snapshot));

    if frame.end_condition == LevelEndCondition::GameOver {
        draw_game_over(surface, snapshot);
        draw_hud(surface, snapshot);
        return;
    }

    for r in &frame.renderables {
        surface.fill_circle(r.center(), r.radius, r.fill());
    }
    draw_hud(surface, snapshot);
    draw_banner(surface, frame);
}

/// Level, level score and balls left (hidden on game over), game score always
pub fn draw_hud<S: Surface + ?Sized>(surface: &mut S, snapshot: &SessionSnapshot) {
    let left = TextStyle::new(HUD_SIZE, colors::HUD_TEXT, TextAlign::Left);
    let right = TextStyle::new(HUD_SIZE, colors::HUD_TEXT, TextAlign::Right);

    if !snapshot.game_over {
        surface.fill_text(
            &format!("Level {}", snapshot.level),
            Vec2::new(HUD_MARGIN, CANVAS_HEIGHT - HUD_MARGIN),
            left,
        );
        surface.fill_text(
            &format!("Level Score {}", snapshot.level_score),
            Vec2::new(HUD_MARGIN, HUD_TOP),
            left,
        );
        surface.fill_text(
            &format!("Balls Left {}", snapshot.balls_left),
            Vec2::new(CANVAS_WIDTH - HUD_MARGIN, CANVAS_HEIGHT - HUD_MARGIN),
            right,
        );
    }

    surface.fill_text(
        &format!("Game Score {}", snapshot.total_score),
        Vec2::new(CANVAS_WIDTH - HUD_MARGIN, HUD_TOP),
        right,
    );
}

fn draw_banner<S: Surface + ?Sized>(surface: &mut S, frame: &FrameResult) {
    let center = Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
    for event in &frame.events {
        match event {
            GameEvent::LevelFailed { balls_needed, .. } => {
                let style = TextStyle::new(BANNER_SIZE, colors::FAIL_TEXT, TextAlign::Center);
                surface.fill_text("Try Again!", center, style);
                surface.fill_text(
                    &format!("Need to get {balls_needed} more"),
                    center + Vec2::new(0.0, 50.0),
                    style,
                );
            }
            GameEvent::LevelCompleted { level, .. } => {
                let style = TextStyle::new(BANNER_SIZE, colors::SUCCESS_TEXT, TextAlign::Center);
                surface.fill_text(&format!("Level {} Completed!", level + 1), center, style);
            }
            _ => {}
        }
    }
}

fn draw_game_over<S: Surface + ?Sized>(surface: &mut S, snapshot: &SessionSnapshot) {
    let center = Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
    surface.fill_text(
        "You Win!",
        center,
        TextStyle::new(WIN_SIZE, colors::FAIL_TEXT, TextAlign::Center),
    );
    surface.fill_text(
        &format!("Final Score: {}", snapshot.total_score),
        center + Vec2::new(0.0, 70.0),
        TextStyle::new(FINAL_SCORE_SIZE, colors::FAIL_TEXT, TextAlign::Center),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BallColor;

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            level: 2,
            level_score: 900,
            total_score: 100,
            balls_left: 1,
            goal_met: false,
            game_over: false,
            paused: false,
            balls_missed_last_attempt: None,
        }
    }

    fn renderable(id: u32, is_exploding: bool) -> Renderable {
        Renderable {
            id,
            x: 50.0,
            y: 60.0,
            radius: 10.0,
            color: BallColor::Red,
            is_exploding,
        }
    }

    fn frame(end_condition: LevelEndCondition, events: Vec<GameEvent>) -> FrameResult {
        FrameResult {
            end_condition,
            renderables: vec![renderable(1, false), renderable(2, true)],
            events,
        }
    }

    #[test]
    fn test_frame_draws_balls_and_hud() {
        let mut list = DrawList::new();
        draw_frame(&mut list, &frame(LevelEndCondition::Continues, vec![]), &snapshot());

        assert_eq!(list.commands[0], DrawCommand::Clear(colors::BACKGROUND));
        assert_eq!(list.circle_count(), 2);
        let texts: Vec<&str> = list.texts().collect();
        assert_eq!(
            texts,
            vec!["Level 2", "Level Score 900", "Balls Left 1", "Game Score 100"]
        );
    }

    #[test]
    fn test_goal_met_lightens_background() {
        let mut snap = snapshot();
        snap.goal_met = true;
        assert_eq!(background(&snap), colors::BACKGROUND_GOAL_MET);
    }

    #[test]
    fn test_failure_banner() {
        let mut list = DrawList::new();
        let events = vec![GameEvent::LevelFailed {
            level: 1,
            balls_needed: 3,
        }];
        draw_frame(
            &mut list,
            &frame(LevelEndCondition::OverUnsuccessfully, events),
            &snapshot(),
        );
        let texts: Vec<&str> = list.texts().collect();
        assert!(texts.contains(&"Try Again!"));
        assert!(texts.contains(&"Need to get 3 more"));
    }

    #[test]
    fn test_success_banner_names_finished_level() {
        let mut list = DrawList::new();
        let events = vec![GameEvent::LevelCompleted {
            level: 0,
            level_score: 100,
            total_score: 100,
        }];
        draw_frame(
            &mut list,
            &frame(LevelEndCondition::OverSuccessfully, events),
            &snapshot(),
        );
        assert!(list.texts().any(|t| t == "Level 1 Completed!"));
    }

    #[test]
    fn test_game_over_screen() {
        let mut list = DrawList::new();
        let mut snap = snapshot();
        snap.game_over = true;
        snap.total_score = 4200;
        draw_frame(&mut list, &frame(LevelEndCondition::GameOver, vec![]), &snap);

        assert_eq!(list.circle_count(), 0);
        let texts: Vec<&str> = list.texts().collect();
        assert_eq!(texts, vec!["You Win!", "Final Score: 4200", "Game Score 4200"]);
    }
}
