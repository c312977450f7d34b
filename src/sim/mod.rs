//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped only
//! - Single seeded RNG, passed in explicitly
//! - Stable iteration order (live-set insertion order)
//! - No rendering or platform dependencies

pub mod aquarium;
pub mod collision;
pub mod creature;
pub mod gate;
pub mod level;
pub mod player;
pub mod scene;

pub use aquarium::Aquarium;
pub use collision::{
    GameEvent, GameEventKind, check_collision, creatures_overlap, detect_collision,
    handle_collision,
};
pub use creature::{Creature, CreatureId, CreatureKind};
pub use gate::{AlwaysOpen, FrameGate, TickGate};
pub use level::{AquariumLevel, PopulationNode};
pub use player::Player;
pub use scene::{GameScene, PowerUpState, SceneSummary, ScenePhase, TickInput};
