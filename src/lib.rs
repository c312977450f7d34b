//! Reef Sim - a frame-stepped aquarium ecosystem
//!
//! Core modules:
//! - `sim`: Deterministic simulation (creatures, collisions, levels, scene loop)
//! - `audio`: Sound cue contract consumed by the scene loop
//! - `settings`: Data-driven game balance and level definitions

pub mod audio;
pub mod settings;
pub mod sim;

pub use audio::{AudioSink, CueCounter, SilentAudio, SoundCue};
pub use settings::{ConfigError, GameSettings, LevelConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Glass margin subtracted from the aquarium size when binding creature bounds
    pub const BOUNDS_MARGIN: f32 = 20.0;

    /// Spawn speed range (inclusive)
    pub const SPAWN_SPEED_MIN: u32 = 1;
    pub const SPAWN_SPEED_MAX: u32 = 25;

    /// Base fish defaults
    pub const NPC_RADIUS: f32 = 30.0;
    pub const NPC_VALUE: u32 = 1;

    /// Bigger fish: large, slow, valuable
    pub const BIGGER_FISH_RADIUS: f32 = 60.0;
    pub const BIGGER_FISH_VALUE: u32 = 5;
    pub const BIGGER_FISH_SPEED_SCALE: f32 = 0.5;

    /// Swordfish: idle drift then erratic dash
    pub const SWORDFISH_RADIUS: f32 = 25.0;
    pub const SWORDFISH_VALUE: u32 = 4;
    pub const SWORDFISH_IDLE_TICKS: u32 = 14;
    pub const SWORDFISH_DASH_TICKS: u32 = 28;
    pub const SWORDFISH_HEADING_INTERVAL: u32 = 8;
    pub const SWORDFISH_IDLE_SPEED_SCALE: f32 = 0.5;
    pub const SWORDFISH_DASH_SPEED_SCALE: f32 = 1.5;
    /// Vertical component of a dash heading before normalization
    pub const SWORDFISH_DASH_PITCH: f32 = 0.4;

    /// Eel: sinusoidal swimmer
    pub const EEL_RADIUS: f32 = 26.0;
    pub const EEL_VALUE: u32 = 3;
    pub const EEL_PHASE_STEP: f32 = 0.04;
    pub const EEL_WAVE_AMPLITUDE: f32 = 0.9;
    pub const EEL_SPEED_SCALE: f32 = 1.1;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 10.0;
    pub const PLAYER_VALUE: u32 = 1;

    /// Damage cooldown (3 seconds at 60 fps)
    pub const DAMAGE_DEBOUNCE_TICKS: u32 = 3 * 60;

    /// Score needed per point of power
    pub const SCORE_PER_POWER: u32 = 25;
}

/// Scale a direction to unit length, or collapse it to zero.
///
/// Zero-length and non-finite input (NaN/inf components) both yield `Vec2::ZERO`,
/// so a creature with a malformed heading simply stops instead of poisoning
/// its position.
#[inline]
pub fn normalize_direction(dir: Vec2) -> Vec2 {
    dir.normalize_or_zero()
}

/// Squared distance between two points
#[inline]
pub fn distance_squared(a: Vec2, b: Vec2) -> f32 {
    (a - b).length_squared()
}
