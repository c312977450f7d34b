//! The aquarium: live creature set, spawning and level progression

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::creature::{Creature, CreatureId, CreatureKind};
use super::level::AquariumLevel;
use crate::ConfigError;
use crate::consts::*;

/// Owns every live NPC and the ordered level list
#[derive(Debug, Clone)]
pub struct Aquarium {
    width: u32,
    height: u32,
    /// Live creatures in insertion order
    creatures: Vec<Creature>,
    levels: Vec<AquariumLevel>,
    /// Levels completed so far; the active level is this modulo the level count
    current_level: u64,
    /// Next creature handle (0 is the player)
    next_id: u32,
}

impl Aquarium {
    /// Create an aquarium; at least one level is required.
    pub fn new(width: u32, height: u32, levels: Vec<AquariumLevel>) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidBounds { width, height });
        }
        if levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        Ok(Self {
            width,
            height,
            creatures: Vec::new(),
            levels,
            current_level: 0,
            next_id: 1,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Swim area handed to every creature (aquarium minus the glass margin)
    pub fn creature_bounds(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 - BOUNDS_MARGIN,
            self.height as f32 - BOUNDS_MARGIN,
        )
    }

    pub fn add_level(&mut self, level: AquariumLevel) {
        self.levels.push(level);
    }

    pub fn levels(&self) -> &[AquariumLevel] {
        &self.levels
    }

    /// Index of the active level in the (wrapping) level list
    pub fn level_index(&self) -> usize {
        (self.current_level % self.levels.len() as u64) as usize
    }

    /// Total level transitions so far
    pub fn levels_completed(&self) -> u64 {
        self.current_level
    }

    pub fn active_level(&self) -> &AquariumLevel {
        &self.levels[self.level_index()]
    }

    pub fn active_level_mut(&mut self) -> &mut AquariumLevel {
        let index = self.level_index();
        &mut self.levels[index]
    }

    /// Bind bounds, assign a fresh handle and append to the live set
    pub fn add_creature(&mut self, mut creature: Creature) -> CreatureId {
        let bounds = self.creature_bounds();
        creature.set_bounds(bounds.x, bounds.y);
        creature.id = CreatureId(self.next_id);
        self.next_id += 1;
        let id = creature.id;
        self.creatures.push(creature);
        id
    }

    /// Remove a creature by handle, crediting its kind and value to the
    /// active level. Unknown handles are ignored.
    pub fn remove_creature(&mut self, id: CreatureId) -> Option<Creature> {
        let index = self.creatures.iter().position(|c| c.id == id)?;
        let creature = self.creatures.remove(index);
        log::debug!("Removing {} {:?}", creature.kind, creature.id);
        self.active_level_mut()
            .consume_population(creature.kind, creature.value);
        Some(creature)
    }

    pub fn clear_creatures(&mut self) {
        self.creatures.clear();
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub(crate) fn creatures_mut(&mut self) -> &mut [Creature] {
        &mut self.creatures
    }

    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    pub fn creature_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|c| c.id == id)
    }

    /// Positional access, `None` when out of range
    pub fn creature_at(&self, index: usize) -> Option<&Creature> {
        self.creatures.get(index)
    }

    /// Spawn a creature of `kind` at a random spot fully inside the glass,
    /// with a random speed.
    ///
    /// Kinds the aquarium cannot spawn are logged and dropped.
    pub fn spawn_creature<R: Rng + ?Sized>(
        &mut self,
        kind: CreatureKind,
        rng: &mut R,
    ) -> Option<CreatureId> {
        if !kind.is_spawnable() {
            log::error!("Unknown creature type to spawn: {}", kind);
            return None;
        }

        let radius = kind.radius();
        let bounds = self.creature_bounds();
        let x = rng.random_range(0..self.width) as f32;
        let y = rng.random_range(0..self.height) as f32;
        let pos = Vec2::new(
            x.clamp(radius, (bounds.x - radius).max(radius)),
            y.clamp(radius, (bounds.y - radius).max(radius)),
        );
        let speed = rng.random_range(SPAWN_SPEED_MIN..=SPAWN_SPEED_MAX);

        let id = self.add_creature(Creature::new(kind, pos, speed, rng));
        log::trace!("Spawned {} {:?} at ({:.0}, {:.0}) speed {}", kind, id, pos.x, pos.y, speed);
        Some(id)
    }

    /// Move every creature, then top up the population
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for creature in &mut self.creatures {
            creature.step(rng);
        }
        self.repopulate(rng);
    }

    /// Advance past a completed level: reset it, bump the level counter and
    /// empty the tank. Returns whether a transition happened.
    pub fn advance_if_completed(&mut self) -> bool {
        if !self.active_level().is_completed() {
            return false;
        }
        self.active_level_mut().level_reset();
        self.current_level += 1;
        self.clear_creatures();
        log::info!(
            "New level reached: {} (transition #{})",
            self.level_index(),
            self.current_level
        );
        true
    }

    /// Level transition check, then one spawn per creature the active level
    /// is owed.
    pub fn repopulate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.advance_if_completed();

        let to_spawn = self.active_level_mut().repopulate();
        if to_spawn.is_empty() {
            return;
        }
        log::debug!("Repopulating {} creatures", to_spawn.len());
        for kind in to_spawn {
            self.spawn_creature(kind, rng);
        }
    }

    /// Overlap test between two (possibly missing) creatures
    pub fn check_collision(&self, a: Option<&Creature>, b: Option<&Creature>) -> bool {
        collision::check_collision(a, b)
    }
}
