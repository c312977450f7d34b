//! End-to-end scene scenarios: eating, damage, game over, level progression

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use reef_sim::consts::DAMAGE_DEBOUNCE_TICKS;
use reef_sim::sim::{
    AlwaysOpen, Aquarium, AquariumLevel, Creature, CreatureId, CreatureKind, GameScene,
    ScenePhase, TickInput,
};
use reef_sim::{GameSettings, SoundCue};

fn quiet_settings() -> GameSettings {
    let mut settings = GameSettings::default();
    settings.power_up.spawn_chance = 0.0;
    settings
}

fn scene(levels: Vec<AquariumLevel>) -> GameScene {
    let aquarium = Aquarium::new(800, 600, levels).unwrap();
    GameScene::with_parts(&quiet_settings(), aquarium, Pcg32::seed_from_u64(77)).unwrap()
}

/// Drop a motionless creature right on top of the player
fn place_on_player(scene: &mut GameScene, kind: CreatureKind) -> CreatureId {
    let mut rng = Pcg32::seed_from_u64(5);
    let mut fish = Creature::new(kind, scene.player.body.pos, 1, &mut rng);
    fish.dir = Vec2::ZERO;
    scene.aquarium.add_creature(fish)
}

#[test]
fn test_weak_player_takes_damage() {
    let mut scene = scene(vec![AquariumLevel::with_population(
        100,
        &[(CreatureKind::BiggerFish, 1)],
    )]);
    scene.player.power = 2;
    let lives = scene.player.lives;
    let fish = place_on_player(&mut scene, CreatureKind::BiggerFish);

    let mut audio = Vec::new();
    let event = scene
        .update(&TickInput::default(), &mut AlwaysOpen, &mut audio)
        .unwrap();

    assert!(event.is_collision());
    assert_eq!(event.creature_b, Some(fish));
    assert_eq!(scene.player.lives, lives - 1);
    assert_eq!(scene.player.damage_debounce, DAMAGE_DEBOUNCE_TICKS);
    assert!(scene.aquarium.creature(fish).is_some());
    assert_eq!(scene.player.score, 0);
    assert_eq!(audio, vec![SoundCue::Hurt]);
}

#[test]
fn test_damage_is_debounced() {
    let mut scene = scene(vec![AquariumLevel::with_population(
        100,
        &[(CreatureKind::BiggerFish, 1)],
    )]);
    let lives = scene.player.lives;
    let fish = place_on_player(&mut scene, CreatureKind::BiggerFish);

    scene.update(&TickInput::default(), &mut AlwaysOpen, &mut Vec::new());
    assert_eq!(scene.player.lives, lives - 1);

    // Keep the big fish parked on the player for a few more frames
    for _ in 0..5 {
        let pos = scene.player.body.pos;
        if let Some(f) = scene.aquarium.creature_mut(fish) {
            f.pos = pos;
        }
        scene.update(&TickInput::default(), &mut AlwaysOpen, &mut Vec::new());
    }
    assert_eq!(scene.player.lives, lives - 1);
    assert!(scene.player.is_hurt());
}

#[test]
fn test_strong_player_eats() {
    let mut scene = scene(vec![AquariumLevel::with_population(
        100,
        &[(CreatureKind::Eel, 1)],
    )]);
    scene.player.power = 5;

    // Fill the tank, then park the eel on the player
    let mut rng = Pcg32::seed_from_u64(8);
    scene.aquarium.repopulate(&mut rng);
    let eel = scene.aquarium.creatures()[0].id;
    let pos = scene.player.body.pos;
    scene.aquarium.creature_mut(eel).unwrap().pos = pos;
    assert_eq!(scene.aquarium.active_level().node(CreatureKind::Eel).unwrap().current_population, 1);

    let mut audio = Vec::new();
    let event = scene
        .update(&TickInput::default(), &mut AlwaysOpen, &mut audio)
        .unwrap();

    assert_eq!(event.creature_b, Some(eel));
    assert!(scene.aquarium.creature(eel).is_none());
    assert_eq!(scene.player.score, 3);
    assert_eq!(scene.aquarium.active_level().level_score, 3);
    assert_eq!(audio, vec![SoundCue::Eat]);

    // The same gated frame already replaced the eaten eel
    assert_eq!(scene.aquarium.creature_count(), 1);
    assert_ne!(scene.aquarium.creatures()[0].id, eel);
    assert_eq!(scene.aquarium.active_level().node(CreatureKind::Eel).unwrap().current_population, 1);
}

#[test]
fn test_last_life_ends_game() {
    let mut scene = scene(vec![AquariumLevel::with_population(
        100,
        &[(CreatureKind::Npc, 5)],
    )]);
    scene.player.lives = 1;
    scene.player.power = 0;
    place_on_player(&mut scene, CreatureKind::Npc);

    let event = scene
        .update(&TickInput::default(), &mut AlwaysOpen, &mut Vec::new())
        .unwrap();
    assert!(event.is_game_over());
    assert_eq!(event.creature_a, Some(CreatureId::PLAYER));
    assert_eq!(scene.phase, ScenePhase::GameOver);
    assert_eq!(scene.last_event(), Some(event));

    // No aquarium update ran on the game-over frame
    assert_eq!(scene.aquarium.creature_count(), 1);

    assert!(scene
        .update(&TickInput::default(), &mut AlwaysOpen, &mut Vec::new())
        .is_none());
    assert_eq!(scene.aquarium.creature_count(), 1);
}

#[test]
fn test_eating_completes_level() {
    let mut scene = scene(vec![
        AquariumLevel::with_population(1, &[(CreatureKind::Npc, 1)]),
        AquariumLevel::with_population(10, &[(CreatureKind::SwordFish, 2)]),
    ]);
    let mut rng = Pcg32::seed_from_u64(8);
    scene.aquarium.repopulate(&mut rng);
    let fish = scene.aquarium.creatures()[0].id;
    let pos = scene.player.body.pos;
    scene.aquarium.creature_mut(fish).unwrap().pos = pos;

    scene.update(&TickInput::default(), &mut AlwaysOpen, &mut Vec::new());

    assert_eq!(scene.aquarium.level_index(), 1);
    assert_eq!(scene.aquarium.levels()[0].level_score, 0);
    assert_eq!(scene.aquarium.levels()[0].nodes[0].current_population, 0);
    assert_eq!(scene.aquarium.creature_count(), 2);
    assert!(scene
        .aquarium
        .creatures()
        .iter()
        .all(|c| c.kind == CreatureKind::SwordFish));
}

#[test]
fn test_power_grows_with_score() {
    let mut scene = scene(vec![AquariumLevel::with_population(
        1000,
        &[(CreatureKind::BiggerFish, 1)],
    )]);
    scene.player.power = 5;
    scene.player.score = 23;
    let mut rng = Pcg32::seed_from_u64(8);
    scene.aquarium.repopulate(&mut rng);
    let fish = scene.aquarium.creatures()[0].id;
    let pos = scene.player.body.pos;
    scene.aquarium.creature_mut(fish).unwrap().pos = pos;

    scene.update(&TickInput::default(), &mut AlwaysOpen, &mut Vec::new());
    assert_eq!(scene.player.score, 28);
    assert_eq!(scene.player.power, 6);
}

#[test]
fn test_seeded_scenes_match() {
    let mut settings = quiet_settings();
    settings.power_up.spawn_chance = 0.01;
    let mut a = GameScene::with_seed(&settings, 1234).unwrap();
    let mut b = GameScene::with_seed(&settings, 1234).unwrap();
    let input = TickInput {
        direction: Some(Vec2::new(1.0, 0.5)),
    };
    for _ in 0..600 {
        let ea = a.update(&input, &mut AlwaysOpen, &mut Vec::new());
        let eb = b.update(&input, &mut AlwaysOpen, &mut Vec::new());
        assert_eq!(ea, eb);
    }
    assert_eq!(a.player.body.pos, b.player.body.pos);
    assert_eq!(a.aquarium.creature_count(), b.aquarium.creature_count());
    assert_eq!(a.player.score, b.player.score);
}
