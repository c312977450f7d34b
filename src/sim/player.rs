//! The player-controlled creature

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::creature::{Creature, CreatureId, CreatureKind};
use crate::consts::SCORE_PER_POWER;

/// Player creature with lives, damage cooldown, score and power
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Creature,
    pub lives: u32,
    /// Ticks remaining before damage can land again
    pub damage_debounce: u32,
    /// Power-up active (drives visual effects)
    pub powered: bool,
    pub score: u32,
    /// Highest creature value the player can eat
    pub power: u32,
}

impl Player {
    pub fn new<R: Rng + ?Sized>(pos: Vec2, speed: u32, lives: u32, power: u32, rng: &mut R) -> Self {
        let mut body = Creature::new(CreatureKind::Player, pos, speed, rng);
        body.id = CreatureId::PLAYER;
        Self {
            body,
            lives,
            damage_debounce: 0,
            powered: false,
            score: 0,
            power,
        }
    }

    /// Input hook: new heading, renormalized
    pub fn set_direction(&mut self, dir: Vec2) {
        self.body.set_direction(dir);
    }

    /// Per-frame update: cool down, then move
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.damage_debounce = self.damage_debounce.saturating_sub(1);
        self.body.step(rng);
    }

    pub fn change_speed(&mut self, speed: u32) {
        self.body.speed = speed;
    }

    /// Take a hit unless still cooling down from the last one.
    ///
    /// Returns true if a life was actually deducted.
    pub fn lose_life(&mut self, debounce: u32) -> bool {
        if self.damage_debounce > 0 {
            log::trace!("Damage ignored, {} debounce ticks left", self.damage_debounce);
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.damage_debounce = debounce;
        log::info!("Player lost a life! Lives remaining: {}", self.lives);
        true
    }

    /// Add to score, granting one power per `SCORE_PER_POWER` threshold crossed.
    ///
    /// Returns the amount of power gained.
    pub fn add_score(&mut self, value: u32) -> u32 {
        let before = self.score / SCORE_PER_POWER;
        self.score += value;
        let gained = self.score / SCORE_PER_POWER - before;
        self.power += gained;
        gained
    }

    /// Player is flashing from recent damage
    pub fn is_hurt(&self) -> bool {
        self.damage_debounce > 0
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn can_eat(&self, prey: &Creature) -> bool {
        self.power >= prey.value
    }
}
