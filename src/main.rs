//! Reef Sim headless runner
//!
//! Drives a scene frame by frame with an autopilot standing in for player
//! input, then reports how far it got.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;

use reef_sim::sim::{FrameGate, GameScene, TickInput};
use reef_sim::{CueCounter, GameSettings};

#[derive(Parser, Debug)]
#[command(name = "reef-sim", about = "Run the aquarium simulation headless")]
struct Args {
    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Frames to simulate (60 per second of game time)
    #[arg(long, default_value_t = 60 * 60 * 5)]
    frames: u64,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Runner holding the scene and its collaborators
struct Runner {
    scene: GameScene,
    gate: FrameGate,
    audio: CueCounter,
    input: TickInput,
}

impl Runner {
    fn new(settings: &GameSettings) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            scene: GameScene::new(settings)?,
            gate: FrameGate::new(settings.gate_every_frames),
            audio: CueCounter::default(),
            input: TickInput::default(),
        })
    }

    /// Chase the nearest edible fish, flee the nearest dangerous one if it
    /// is closer.
    fn steer(&mut self) {
        let player = &self.scene.player;
        let here = player.body.pos;

        let mut prey: Option<(f32, Vec2)> = None;
        let mut threat: Option<(f32, Vec2)> = None;
        for c in self.scene.aquarium.creatures() {
            let d = here.distance_squared(c.pos);
            let slot = if player.can_eat(c) { &mut prey } else { &mut threat };
            if slot.is_none_or(|(best, _)| d < best) {
                *slot = Some((d, c.pos));
            }
        }

        let heading = match (prey, threat) {
            (_, Some((td, tpos))) if prey.is_none_or(|(pd, _)| td < pd) => here - tpos,
            (Some((_, ppos)), _) => ppos - here,
            _ => Vec2::ZERO,
        };
        // Power-ups take priority when the water is calm
        let heading = match self.scene.power_up.pickup {
            Some(p) if threat.is_none_or(|(td, _)| td > 150.0 * 150.0) => p - here,
            _ => heading,
        };
        self.input.direction = Some(heading);
    }

    fn run(&mut self, frames: u64) {
        for _ in 0..frames {
            self.steer();
            if let Some(event) = self.scene.update(&self.input, &mut self.gate, &mut self.audio) {
                if event.is_game_over() {
                    break;
                }
            }
            if self.scene.frame() % 600 == 0 {
                let s = self.scene.summary();
                log::info!(
                    "frame {}: level {} ({}/{}), score {}, power {}, lives {}",
                    s.frame,
                    s.level_index,
                    s.level_score,
                    s.target_score,
                    s.score,
                    s.power,
                    s.lives
                );
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
    log::info!("Reef Sim (headless) starting...");

    let mut settings = match &args.config {
        Some(path) => GameSettings::load(path)?,
        None => GameSettings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    let mut runner = Runner::new(&settings)?;
    runner.run(args.frames);

    let summary = runner.scene.summary();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{:?} after {} frames: score {}, power {}, lives {}, levels cleared {}, eaten {}, hurt {}",
            summary.phase,
            summary.frame,
            summary.score,
            summary.power,
            summary.lives,
            summary.levels_completed,
            runner.audio.eat,
            runner.audio.hurt
        );
    }
    Ok(())
}
