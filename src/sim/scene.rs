//! Per-frame scene loop
//!
//! Order of operations for one frame:
//! 1. Player update (debounce cooldown, movement) - every frame
//! 2. Gated: collision scan, event resolution, aquarium update/repopulation
//! 3. Power-up lifecycle - every frame

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aquarium::Aquarium;
use super::collision::{GameEvent, detect_collision};
use super::creature::CreatureId;
use super::gate::TickGate;
use super::player::Player;
use crate::audio::{AudioSink, SoundCue};
use crate::settings::{GameSettings, PowerUpSettings};
use crate::{ConfigError, distance_squared};

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenePhase {
    Playing,
    /// Session ended; updates are no-ops
    GameOver,
}

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New player heading (renormalized); `None` keeps the current one
    pub direction: Option<Vec2>,
}

/// Power-up lifecycle state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerUpState {
    /// Uncollected power-up position, if one is waiting
    pub pickup: Option<Vec2>,
    /// Frames left on the active boost
    pub ticks_left: u32,
    /// Player speed to restore when the boost ends
    base_speed: u32,
}

/// Snapshot for logging and the headless runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSummary {
    pub frame: u64,
    pub phase: ScenePhase,
    pub level_index: usize,
    pub levels_completed: u64,
    pub level_score: u32,
    pub target_score: u32,
    pub score: u32,
    pub power: u32,
    pub lives: u32,
    pub powered: bool,
    pub creatures: usize,
}

/// Player, aquarium and the shared RNG, stepped one frame at a time
#[derive(Debug, Clone)]
pub struct GameScene {
    pub player: Player,
    pub aquarium: Aquarium,
    pub phase: ScenePhase,
    pub power_up: PowerUpState,
    power_up_settings: PowerUpSettings,
    damage_debounce_ticks: u32,
    rng: Pcg32,
    frame: u64,
    last_event: Option<GameEvent>,
}

impl GameScene {
    /// Build a scene from settings, seeding from `settings.seed` or a fresh
    /// random seed.
    pub fn new(settings: &GameSettings) -> Result<Self, ConfigError> {
        let seed = settings.seed.unwrap_or_else(rand::random);
        Self::with_seed(settings, seed)
    }

    pub fn with_seed(settings: &GameSettings, seed: u64) -> Result<Self, ConfigError> {
        let aquarium = Aquarium::new(settings.width, settings.height, settings.build_levels())?;
        Self::with_parts(settings, aquarium, Pcg32::seed_from_u64(seed))
    }

    /// Assemble from a prepared aquarium and RNG (deterministic tests)
    pub fn with_parts(
        settings: &GameSettings,
        aquarium: Aquarium,
        mut rng: Pcg32,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        let center = Vec2::new(aquarium.width() as f32, aquarium.height() as f32) * 0.5;
        let mut player = Player::new(
            center,
            settings.player.speed,
            settings.player.lives,
            settings.player.power,
            &mut rng,
        );
        let bounds = aquarium.creature_bounds();
        player.body.set_bounds(bounds.x, bounds.y);
        log::info!(
            "Scene ready: {}x{}, {} levels, player lives {}",
            aquarium.width(),
            aquarium.height(),
            aquarium.levels().len(),
            player.lives
        );

        Ok(Self {
            player,
            aquarium,
            phase: ScenePhase::Playing,
            power_up: PowerUpState::default(),
            power_up_settings: settings.power_up.clone(),
            damage_debounce_ticks: settings.damage_debounce_ticks,
            rng,
            frame: 0,
            last_event: None,
        })
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn last_event(&self) -> Option<GameEvent> {
        self.last_event
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == ScenePhase::GameOver
    }

    /// Advance one frame.
    ///
    /// Returns the collision or game-over event resolved this frame, if any.
    pub fn update<G, A>(&mut self, input: &TickInput, gate: &mut G, audio: &mut A) -> Option<GameEvent>
    where
        G: TickGate + ?Sized,
        A: AudioSink + ?Sized,
    {
        if self.phase == ScenePhase::GameOver {
            return None;
        }
        self.frame += 1;

        if let Some(dir) = input.direction {
            self.player.set_direction(dir);
        }
        self.player.update(&mut self.rng);

        let mut event = None;
        if gate.tick() {
            if let Some(collision) = detect_collision(&mut self.aquarium, &mut self.player) {
                if let Some(over) = self.resolve_collision(collision, audio) {
                    self.phase = ScenePhase::GameOver;
                    self.last_event = Some(over);
                    return Some(over);
                }
                event = Some(collision);
            }
            self.aquarium.update(&mut self.rng);
        }

        self.update_power_up();

        if event.is_some() {
            self.last_event = event;
        }
        event
    }

    /// Eat or get hurt. Returns a game-over event when the last life goes.
    fn resolve_collision<A: AudioSink + ?Sized>(
        &mut self,
        event: GameEvent,
        audio: &mut A,
    ) -> Option<GameEvent> {
        let Some(npc_id) = event.creature_b else {
            log::error!("Collision event without a second creature: {:?}", event);
            return None;
        };
        let Some(npc) = self.aquarium.creature(npc_id) else {
            log::error!("Collision with {:?}, which is no longer alive", npc_id);
            return None;
        };
        let (kind, value) = (npc.kind, npc.value);

        if self.player.power < value {
            log::debug!(
                "Player (power {}) too weak to eat {} (value {})",
                self.player.power,
                kind,
                value
            );
            audio.play(SoundCue::Hurt);
            self.player.lose_life(self.damage_debounce_ticks);
            if self.player.lives == 0 {
                log::info!(
                    "Game over at frame {} with score {}",
                    self.frame,
                    self.player.score
                );
                return Some(GameEvent::game_over(CreatureId::PLAYER));
            }
        } else {
            self.aquarium.remove_creature(npc_id);
            let gained = self.player.add_score(value);
            audio.play(SoundCue::Eat);
            log::debug!("Ate {} for {}, score {}", kind, value, self.player.score);
            if gained > 0 {
                log::info!("Player power increased to {}!", self.player.power);
            }
        }
        None
    }

    /// Spawn, collect and expire the power-up. Runs every frame.
    fn update_power_up(&mut self) {
        let tuning = &self.power_up_settings;

        if self.power_up.pickup.is_none() && self.rng.random_bool(tuning.spawn_chance) {
            let margin = tuning.edge_margin;
            let x = random_between(&mut self.rng, margin, self.aquarium.width() as f32 - margin);
            let y = random_between(&mut self.rng, margin, self.aquarium.height() as f32 - margin);
            self.power_up.pickup = Some(Vec2::new(x, y));
            log::debug!("Power-up appeared at ({:.0}, {:.0})", x, y);
        }

        if let Some(pos) = self.power_up.pickup {
            let reach = tuning.radius + self.player.body.radius + tuning.pickup_buffer;
            if distance_squared(pos, self.player.body.pos) <= reach * reach {
                self.power_up.pickup = None;
                // A second pickup while boosted only refreshes the timer
                if !self.player.powered {
                    self.power_up.base_speed = self.player.body.speed;
                    self.player
                        .change_speed(self.power_up.base_speed * tuning.speed_multiplier);
                    self.player.powered = true;
                }
                self.power_up.ticks_left = tuning.duration_ticks;
                log::info!("Power-up collected, speed {}", self.player.body.speed);
            }
        }

        if self.player.powered {
            self.power_up.ticks_left = self.power_up.ticks_left.saturating_sub(1);
            if self.power_up.ticks_left == 0 {
                self.player.powered = false;
                self.player.change_speed(self.power_up.base_speed);
                log::info!("Power-up expired, speed back to {}", self.power_up.base_speed);
            }
        }
    }

    pub fn summary(&self) -> SceneSummary {
        let level = self.aquarium.active_level();
        SceneSummary {
            frame: self.frame,
            phase: self.phase,
            level_index: self.aquarium.level_index(),
            levels_completed: self.aquarium.levels_completed(),
            level_score: level.level_score,
            target_score: level.target_score,
            score: self.player.score,
            power: self.player.power,
            lives: self.player.lives,
            powered: self.player.powered,
            creatures: self.aquarium.creature_count(),
        }
    }
}

fn random_between<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { (lo + hi) * 0.5 }
}
