//! Chain Reaction entry point
//!
//! Native builds have no window; this runs a headless autoplay session that
//! clicks on a live ball each level, continues past every level break and
//! logs what happens.
//!
//! Usage: `chain-reaction [--difficulty easy|medium|hard] [--seed N] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use chain_reaction::renderer::{DrawList, draw_frame};
#[cfg(not(target_arch = "wasm32"))]
use chain_reaction::sim::LevelEndCondition;
#[cfg(not(target_arch = "wasm32"))]
use chain_reaction::{Difficulty, Game, Settings};
#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

/// Safety cap so a pathological configuration can't spin forever
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u64 = 200_000;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(author, version, about = "Headless Chain Reaction autoplay", long_about = None)]
struct Args {
    /// Settings JSON (defaults when omitted)
    settings: Option<PathBuf>,
    /// Explosion preset: easy, medium, hard (or 1-3)
    #[arg(long, short, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,
    /// RNG seed, overrides the settings file
    #[arg(long)]
    seed: Option<u64>,
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty '{s}'"))
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("Chain Reaction (headless) starting...");

    let mut settings = match &args.settings {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    let mut game = match Game::new(&settings) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    if let Some(difficulty) = args.difficulty {
        game.set_difficulty(difficulty);
    }

    let mut surface = DrawList::new();
    let mut frames: u64 = 0;

    while frames < MAX_FRAMES {
        frames += 1;

        if game.is_paused() {
            log::info!("frame {frames}: continuing to level {}", game.snapshot().level);
            game.resume();
        } else if !game.state().user_clicked {
            // Aim at whatever ball is first in the live set
            if let Some(ball) = game.state().balls.first() {
                let (x, y) = (ball.pos.x, ball.pos.y);
                game.submit_click(x, y);
            }
        }

        let frame = game.step_frame();
        let snapshot = game.snapshot();

        surface.clear_commands();
        draw_frame(&mut surface, &frame, &snapshot);

        match frame.end_condition {
            LevelEndCondition::OverSuccessfully => {
                log::info!(
                    "frame {frames}: level passed, total {} ({} draw commands)",
                    snapshot.total_score,
                    surface.commands.len()
                );
            }
            LevelEndCondition::OverUnsuccessfully => {
                log::info!(
                    "frame {frames}: level failed, missed {}",
                    snapshot.balls_missed_last_attempt.unwrap_or(0)
                );
            }
            LevelEndCondition::GameOver => {
                for line in surface.texts() {
                    log::info!("{line}");
                }
                println!("Final score: {} after {frames} frames", snapshot.total_score);
                return;
            }
            LevelEndCondition::Continues | LevelEndCondition::GoalMet => {}
        }
    }

    log::warn!("Stopped after {MAX_FRAMES} frames without finishing");
    println!("Score so far: {}", game.snapshot().total_score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `Game` directly through the library
}
