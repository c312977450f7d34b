//! Game settings and level definitions
//!
//! Loaded from JSON; every field falls back to the built-in balance when
//! omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DAMAGE_DEBOUNCE_TICKS;
use crate::sim::{AquariumLevel, CreatureKind, PopulationNode};

/// Errors raised while building or loading a game configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("at least one level must be registered")]
    NoLevels,
    #[error("level {index} has no population nodes")]
    EmptyLevel { index: usize },
    #[error("level {index} has a target score of 0 and would complete immediately")]
    ZeroTargetScore { index: usize },
    #[error("level {index} lists {kind}, which cannot be spawned")]
    UnspawnableKind { index: usize, kind: CreatureKind },
    #[error("aquarium bounds must be non-zero, got {width}x{height}")]
    InvalidBounds { width: u32, height: u32 },
    #[error("power-up spawn chance {0} must be between 0.0 and 1.0")]
    InvalidSpawnChance(f64),
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Target count for one creature kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationConfig {
    pub kind: CreatureKind,
    pub population: u32,
}

/// One level definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Eaten value needed to advance
    pub target_score: u32,
    pub population: Vec<PopulationConfig>,
}

impl LevelConfig {
    pub fn new(target_score: u32, population: &[(CreatureKind, u32)]) -> Self {
        Self {
            target_score,
            population: population
                .iter()
                .map(|&(kind, population)| PopulationConfig { kind, population })
                .collect(),
        }
    }

    pub fn build(&self) -> AquariumLevel {
        let nodes = self
            .population
            .iter()
            .map(|p| PopulationNode::new(p.kind, p.population))
            .collect();
        AquariumLevel::new(self.target_score, nodes)
    }
}

/// Player starting stats
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub lives: u32,
    pub speed: u32,
    pub power: u32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            lives: 3,
            speed: 5,
            power: 1,
        }
    }
}

/// Power-up spawn and effect tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpSettings {
    /// Chance per tick that a power-up appears when none is active
    pub spawn_chance: f64,
    pub radius: f32,
    /// Extra pickup slack on top of both radii
    pub pickup_buffer: f32,
    /// Keep spawns this far from the glass
    pub edge_margin: f32,
    pub duration_ticks: u32,
    pub speed_multiplier: u32,
}

impl Default for PowerUpSettings {
    fn default() -> Self {
        Self {
            spawn_chance: 0.002,
            radius: 15.0,
            pickup_buffer: 25.0,
            edge_margin: 50.0,
            // 5 seconds at 60 fps
            duration_ticks: 5 * 60,
            speed_multiplier: 2,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub width: u32,
    pub height: u32,
    /// RNG seed; random per session when absent
    pub seed: Option<u64>,
    pub player: PlayerSettings,
    pub damage_debounce_ticks: u32,
    /// Collision and repopulation run once every this many frames
    pub gate_every_frames: u32,
    pub power_up: PowerUpSettings,
    pub levels: Vec<LevelConfig>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            seed: None,
            player: PlayerSettings::default(),
            damage_debounce_ticks: DAMAGE_DEBOUNCE_TICKS,
            gate_every_frames: 2,
            power_up: PowerUpSettings::default(),
            levels: default_levels(),
        }
    }
}

/// Five-level ladder: plain fish, then each new species in turn, then a mix
pub fn default_levels() -> Vec<LevelConfig> {
    use CreatureKind::*;
    vec![
        LevelConfig::new(10, &[(Npc, 10)]),
        LevelConfig::new(15, &[(Npc, 8), (BiggerFish, 2)]),
        LevelConfig::new(20, &[(Npc, 6), (SwordFish, 3)]),
        LevelConfig::new(25, &[(Npc, 5), (Eel, 4)]),
        LevelConfig::new(35, &[(Npc, 4), (BiggerFish, 2), (SwordFish, 2), (Eel, 2)]),
    ]
}

impl GameSettings {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidBounds {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=1.0).contains(&self.power_up.spawn_chance) {
            return Err(ConfigError::InvalidSpawnChance(self.power_up.spawn_chance));
        }
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        for (index, level) in self.levels.iter().enumerate() {
            if level.population.is_empty() {
                return Err(ConfigError::EmptyLevel { index });
            }
            if level.target_score == 0 {
                return Err(ConfigError::ZeroTargetScore { index });
            }
            if let Some(p) = level.population.iter().find(|p| !p.kind.is_spawnable()) {
                return Err(ConfigError::UnspawnableKind {
                    index,
                    kind: p.kind,
                });
            }
        }
        Ok(())
    }

    /// Ordered level list for the aquarium
    pub fn build_levels(&self) -> Vec<AquariumLevel> {
        self.levels.iter().map(LevelConfig::build).collect()
    }
}
