//! Creatures and their per-tick movement state machines
//!
//! Every creature shares the same body (position, heading, speed, collision
//! radius, value). Behavior differs only in how `step` mutates the heading
//! before translating, so variants are a tagged `Motion` rather than a type
//! hierarchy.

use std::fmt;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::normalize_direction;

/// Stable handle to a creature.
///
/// Handles are never reused within a session, so a handle to a removed
/// creature simply resolves to "not found".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CreatureId(pub u32);

impl CreatureId {
    /// Reserved handle for the player creature
    pub const PLAYER: CreatureId = CreatureId(0);
}

/// Creature type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureKind {
    /// Player-controlled fish (never spawned by the aquarium)
    Player,
    /// Plain fish drifting on a fixed heading
    #[serde(alias = "BaseFish")]
    Npc,
    BiggerFish,
    SwordFish,
    Eel,
}

impl CreatureKind {
    /// Kinds the aquarium knows how to spawn
    pub const SPAWNABLE: [CreatureKind; 4] = [
        CreatureKind::Npc,
        CreatureKind::BiggerFish,
        CreatureKind::SwordFish,
        CreatureKind::Eel,
    ];

    /// Collision radius for this kind
    pub fn radius(&self) -> f32 {
        match self {
            CreatureKind::Player => PLAYER_RADIUS,
            CreatureKind::Npc => NPC_RADIUS,
            CreatureKind::BiggerFish => BIGGER_FISH_RADIUS,
            CreatureKind::SwordFish => SWORDFISH_RADIUS,
            CreatureKind::Eel => EEL_RADIUS,
        }
    }

    /// Score awarded when eaten
    pub fn value(&self) -> u32 {
        match self {
            CreatureKind::Player => PLAYER_VALUE,
            CreatureKind::Npc => NPC_VALUE,
            CreatureKind::BiggerFish => BIGGER_FISH_VALUE,
            CreatureKind::SwordFish => SWORDFISH_VALUE,
            CreatureKind::Eel => EEL_VALUE,
        }
    }

    pub fn is_spawnable(&self) -> bool {
        *self != CreatureKind::Player
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CreatureKind::Player => "Player",
            CreatureKind::Npc => "BaseFish",
            CreatureKind::BiggerFish => "BiggerFish",
            CreatureKind::SwordFish => "SwordFish",
            CreatureKind::Eel => "Eel",
        }
    }
}

impl fmt::Display for CreatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Private movement state per variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum Motion {
    /// Heading set externally (player input)
    Steered,
    /// Fixed heading at `speed * scale`
    Cruise { scale: f32 },
    /// Alternating idle drift and dash
    Dash { timer: u32, dashing: bool },
    /// Sinusoidal vertical wave
    Wave { phase: f32 },
}

/// A creature body plus its movement state machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub kind: CreatureKind,
    pub pos: Vec2,
    /// Heading, always zero or unit length
    pub dir: Vec2,
    pub speed: u32,
    pub radius: f32,
    pub value: u32,
    /// Upper corner of the swim area; the lower corner is the origin
    bounds: Vec2,
    /// Sprite should face left
    flipped: bool,
    motion: Motion,
}

impl Creature {
    /// Build a creature of the given kind.
    ///
    /// Plain and bigger fish pick a random heading from the 8 compass
    /// directions (or stand still); swordfish start facing right mid-dash;
    /// eels start swimming right.
    pub fn new<R: Rng + ?Sized>(kind: CreatureKind, pos: Vec2, speed: u32, rng: &mut R) -> Self {
        let (dir, motion) = match kind {
            CreatureKind::Player => (Vec2::ZERO, Motion::Steered),
            CreatureKind::Npc => (random_compass_heading(rng), Motion::Cruise { scale: 1.0 }),
            CreatureKind::BiggerFish => (
                random_compass_heading(rng),
                Motion::Cruise {
                    scale: BIGGER_FISH_SPEED_SCALE,
                },
            ),
            CreatureKind::SwordFish => (
                Vec2::X,
                Motion::Dash {
                    timer: 0,
                    dashing: true,
                },
            ),
            CreatureKind::Eel => (Vec2::new(0.8, 0.0), Motion::Wave { phase: 0.0 }),
        };

        let mut creature = Self {
            id: CreatureId::PLAYER,
            kind,
            pos,
            dir,
            speed,
            radius: kind.radius(),
            value: kind.value(),
            bounds: Vec2::new(f32::INFINITY, f32::INFINITY),
            flipped: false,
            motion,
        };
        creature.normalize();
        creature
    }

    /// Bind the swim area (upper corner)
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width, height);
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// Renderers draw the sprite mirrored when this is set
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Set heading (player input); renormalized
    pub fn set_direction(&mut self, dir: Vec2) {
        self.dir = dir;
        self.normalize();
    }

    pub fn normalize(&mut self) {
        self.dir = normalize_direction(self.dir);
    }

    /// Clamp into `[radius, bound - radius]` on each axis, reflecting the
    /// heading on any axis that clamped.
    ///
    /// A no-op for creatures already inside their bounds.
    pub fn bounce(&mut self) {
        let (x, dx) = reflect_axis(self.pos.x, self.dir.x, self.radius, self.bounds.x);
        let (y, dy) = reflect_axis(self.pos.y, self.dir.y, self.radius, self.bounds.y);
        self.pos = Vec2::new(x, y);
        self.dir = Vec2::new(dx, dy);
    }

    /// Advance one simulation tick
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let speed = self.speed as f32;
        match &mut self.motion {
            Motion::Steered => {
                self.pos += self.dir * speed;
            }
            Motion::Cruise { scale } => {
                self.pos += self.dir * speed * *scale;
                self.flipped = self.dir.x < 0.0;
            }
            Motion::Dash { timer, dashing } => {
                if *dashing {
                    if *timer % SWORDFISH_HEADING_INTERVAL == 0 {
                        let dx = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                        let dy = rng.random_range(-1i32..=1) as f32 * SWORDFISH_DASH_PITCH;
                        self.dir = normalize_direction(Vec2::new(dx, dy));
                    }
                    self.pos += self.dir * speed * SWORDFISH_DASH_SPEED_SCALE;
                    *timer += 1;
                    if *timer >= SWORDFISH_DASH_TICKS {
                        *timer = 0;
                        *dashing = false;
                    }
                } else {
                    if *timer == 0 {
                        self.dir = Vec2::X;
                    }
                    self.pos += self.dir * speed * SWORDFISH_IDLE_SPEED_SCALE;
                    *timer += 1;
                    if *timer >= SWORDFISH_IDLE_TICKS {
                        *timer = 0;
                        *dashing = true;
                    }
                }
                self.flipped = self.dir.x < 0.0;
            }
            Motion::Wave { phase } => {
                *phase += EEL_PHASE_STEP;
                let heading = if self.dir.x >= 0.0 { 1.0 } else { -1.0 };
                self.dir = normalize_direction(Vec2::new(heading, phase.sin() * EEL_WAVE_AMPLITUDE));
                self.pos += self.dir * speed * EEL_SPEED_SCALE;
                self.flipped = self.dir.x < 0.0;
            }
        }
        self.bounce();
    }

    /// Swordfish phase timer and dash flag (`None` for other kinds)
    #[cfg(test)]
    pub(crate) fn dash_phase(&self) -> Option<(u32, bool)> {
        match self.motion {
            Motion::Dash { timer, dashing } => Some((timer, dashing)),
            _ => None,
        }
    }
}

fn random_compass_heading<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let dx = rng.random_range(-1i32..=1) as f32;
    let dy = rng.random_range(-1i32..=1) as f32;
    Vec2::new(dx, dy)
}

/// Clamp one axis and point its heading back inside
fn reflect_axis(pos: f32, dir: f32, radius: f32, bound: f32) -> (f32, f32) {
    let lo = radius;
    // Bounds narrower than the creature pin it to the low edge
    let hi = (bound - radius).max(lo);
    if pos < lo {
        (lo, dir.abs())
    } else if pos > hi {
        (hi, -dir.abs())
    } else {
        (pos, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    fn bounded(kind: CreatureKind, pos: Vec2, speed: u32) -> Creature {
        let mut c = Creature::new(kind, pos, speed, &mut rng());
        c.set_bounds(800.0, 600.0);
        c
    }

    #[test]
    fn test_kind_stats() {
        assert_eq!(CreatureKind::BiggerFish.radius(), 60.0);
        assert_eq!(CreatureKind::BiggerFish.value(), 5);
        assert_eq!(CreatureKind::SwordFish.radius(), 25.0);
        assert_eq!(CreatureKind::SwordFish.value(), 4);
        assert_eq!(CreatureKind::Eel.radius(), 26.0);
        assert_eq!(CreatureKind::Eel.value(), 3);
        assert_eq!(CreatureKind::Npc.to_string(), "BaseFish");
    }

    #[test]
    fn test_bounce_clamps_and_reflects() {
        let mut c = bounded(CreatureKind::Player, Vec2::new(-5.0, 700.0), 1);
        c.dir = Vec2::new(-0.6, 0.8);
        c.bounce();
        assert_eq!(c.pos, Vec2::new(10.0, 590.0));
        assert!(c.dir.x > 0.0);
        assert!(c.dir.y < 0.0);
    }

    #[test]
    fn test_bounce_in_bounds_is_noop() {
        let mut c = bounded(CreatureKind::Player, Vec2::new(100.0, 100.0), 1);
        c.dir = Vec2::new(0.6, 0.8);
        c.bounce();
        c.bounce();
        assert_eq!(c.pos, Vec2::new(100.0, 100.0));
        assert_eq!(c.dir, Vec2::new(0.6, 0.8));
    }

    #[test]
    fn test_player_moves_along_direction() {
        let mut c = bounded(CreatureKind::Player, Vec2::new(100.0, 100.0), 5);
        c.set_direction(Vec2::new(2.0, 0.0));
        c.step(&mut rng());
        assert_eq!(c.pos, Vec2::new(105.0, 100.0));
    }

    #[test]
    fn test_npc_flips_when_heading_left() {
        let mut c = bounded(CreatureKind::Npc, Vec2::new(400.0, 300.0), 4);
        c.dir = Vec2::new(-1.0, 0.0);
        c.step(&mut rng());
        assert!(c.is_flipped());
        assert_eq!(c.pos, Vec2::new(396.0, 300.0));
    }

    #[test]
    fn test_bigger_fish_half_speed() {
        let mut c = bounded(CreatureKind::BiggerFish, Vec2::new(400.0, 300.0), 10);
        c.dir = Vec2::X;
        c.step(&mut rng());
        assert_eq!(c.pos, Vec2::new(405.0, 300.0));
        assert!(!c.is_flipped());
    }

    #[test]
    fn test_swordfish_cycle() {
        let mut r = rng();
        let mut c = bounded(CreatureKind::SwordFish, Vec2::new(400.0, 300.0), 2);
        assert_eq!(c.dash_phase(), Some((0, true)));

        let mut dash_ticks = 0;
        let mut idle_ticks = 0;
        let mut seen_idle = false;
        for _ in 0..42 {
            let (_, dashing) = c.dash_phase().unwrap();
            if dashing {
                assert!(!seen_idle, "dash resumed before cycle ended");
                dash_ticks += 1;
            } else {
                seen_idle = true;
                idle_ticks += 1;
            }
            c.step(&mut r);
        }
        assert_eq!(dash_ticks, SWORDFISH_DASH_TICKS);
        assert_eq!(idle_ticks, SWORDFISH_IDLE_TICKS);
        // Back at the start of a dash
        assert_eq!(c.dash_phase(), Some((0, true)));
    }

    #[test]
    fn test_swordfish_idle_drifts_right() {
        let mut r = rng();
        let mut c = bounded(CreatureKind::SwordFish, Vec2::new(400.0, 300.0), 4);
        for _ in 0..SWORDFISH_DASH_TICKS {
            c.step(&mut r);
        }
        c.pos = Vec2::new(400.0, 300.0);
        c.step(&mut r);
        assert_eq!(c.dir, Vec2::X);
        assert_eq!(c.pos, Vec2::new(402.0, 300.0));
    }

    #[test]
    fn test_eel_waves() {
        let mut r = rng();
        let mut c = bounded(CreatureKind::Eel, Vec2::new(400.0, 300.0), 10);
        assert_eq!(c.dir, Vec2::X);
        for _ in 0..10 {
            c.step(&mut r);
            assert!((c.dir.length() - 1.0).abs() < 1e-5);
            assert!(c.dir.x > 0.0);
        }
        // sin(0.4) > 0, so the eel is climbing
        assert!(c.dir.y > 0.0);
        assert!(c.pos.y > 300.0);
    }
}
