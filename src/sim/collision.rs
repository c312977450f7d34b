//! Circle overlap tests and the player-vs-tank collision scan

use serde::{Deserialize, Serialize};

use super::aquarium::Aquarium;
use super::creature::{Creature, CreatureId};
use super::player::Player;
use crate::distance_squared;

/// Kind of event the scan or the scene loop produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventKind {
    Collision,
    GameOver,
}

/// A single-tick event. Handles observe creatures, they never own them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: GameEventKind,
    pub creature_a: Option<CreatureId>,
    pub creature_b: Option<CreatureId>,
}

impl GameEvent {
    pub fn collision(a: CreatureId, b: CreatureId) -> Self {
        Self {
            kind: GameEventKind::Collision,
            creature_a: Some(a),
            creature_b: Some(b),
        }
    }

    pub fn game_over(player: CreatureId) -> Self {
        Self {
            kind: GameEventKind::GameOver,
            creature_a: Some(player),
            creature_b: None,
        }
    }

    pub fn is_collision(&self) -> bool {
        self.kind == GameEventKind::Collision
    }

    pub fn is_game_over(&self) -> bool {
        self.kind == GameEventKind::GameOver
    }
}

/// Circles touch or overlap
#[inline]
pub fn creatures_overlap(a: &Creature, b: &Creature) -> bool {
    let r = a.radius + b.radius;
    distance_squared(a.pos, b.pos) <= r * r
}

/// Overlap test that treats a missing creature as no collision
pub fn check_collision(a: Option<&Creature>, b: Option<&Creature>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => creatures_overlap(a, b),
        _ => false,
    }
}

/// Generic response: push both creatures back inside their bounds
pub fn handle_collision(a: &mut Creature, b: &mut Creature) {
    a.bounce();
    b.bounce();
}

/// Find the first live creature touching the player.
///
/// Scan order is live-set order; at most one collision is reported per call.
pub fn detect_collision(aquarium: &mut Aquarium, player: &mut Player) -> Option<GameEvent> {
    let npc = aquarium
        .creatures_mut()
        .iter_mut()
        .filter(|c| c.id != player.body.id)
        .find(|c| creatures_overlap(&player.body, c))?;

    handle_collision(&mut player.body, npc);
    log::debug!("Collision: player vs {} {:?}", npc.kind, npc.id);
    Some(GameEvent::collision(player.body.id, npc.id))
}
