use invaders::compute::init_state;
use invaders::config::GameConfig;
use invaders::entities::*;
use invaders::geometry::Rect;
use invaders::registry::EntityRegistry;

#[test]
fn entity_enums_compare() {
    assert_eq!(GameStatus::Active, GameStatus::Active);
    assert_ne!(GameStatus::Active, GameStatus::Over);
    assert_eq!(LaserOwner::Player, LaserOwner::Player);
    assert_ne!(LaserOwner::Player, LaserOwner::Alien);
    assert_ne!(SpriteId::Alien1, SpriteId::Alien3);
}

#[test]
fn laser_tracks_sub_pixel_position() {
    let mut laser = Laser::new(Rect::new(10, 100, 4, 16), LaserOwner::Player);
    assert_eq!(laser.y, 100.0);
    laser.set_y(93.4);
    assert_eq!(laser.bounds.y, 93);
    assert_eq!(laser.bounds.height, 16);
}

#[test]
fn structure_destroyed_on_last_life() {
    let mut structure = Structure {
        bounds: Rect::new(120, 424, 56, 33),
        sprite: SpriteId::Structure,
        lives: 2,
        destroyed: false,
    };
    assert!(!structure.absorb_hit());
    assert!(structure.absorb_hit());
    assert!(structure.destroyed);
    assert_eq!(structure.lives, 0);
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(&GameConfig::default());
    let mut cloned = original.clone();

    cloned.registry.player.set_x(99.0);
    cloned.registry.player.score = 999;
    cloned.registry.aliens.clear();

    assert_eq!(original.registry.player.x, 480.0);
    assert_eq!(original.score(), 0);
    assert_eq!(original.registry.aliens.len(), 55);
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[test]
fn compact_keeps_survivor_order() {
    let mut registry = EntityRegistry::new(&GameConfig::default());
    registry.aliens[1].destroyed = true;
    registry.aliens[3].destroyed = true;
    registry.structures[2].destroyed = true;
    let survivors: Vec<i32> = registry
        .aliens
        .iter()
        .filter(|a| !a.destroyed)
        .map(|a| a.bounds.x)
        .collect();

    let removed = registry.compact();

    assert_eq!(removed, 3);
    let after: Vec<i32> = registry.aliens.iter().map(|a| a.bounds.x).collect();
    assert_eq!(after, survivors);
    let xs: Vec<i32> = registry.structures.iter().map(|s| s.bounds.x).collect();
    assert_eq!(xs, vec![120, 350, 800]);
}

#[test]
fn compact_keeps_the_destroyed_mystery_ship_slot() {
    let mut registry = EntityRegistry::new(&GameConfig::default());
    registry.mystery_ship.destroyed = true;
    assert_eq!(registry.compact(), 0);
    assert!(registry.mystery_ship.destroyed);
}

#[test]
fn spawn_alien_laser_below_the_shooter() {
    let mut registry = EntityRegistry::new(&GameConfig::default());
    assert!(registry.spawn_alien_laser(0));
    assert_eq!(registry.alien_lasers[0].bounds, Rect::new(170, 84, 4, 16));
    assert_eq!(registry.alien_lasers[0].owner, LaserOwner::Alien);
}

#[test]
fn spawn_alien_laser_refuses_dead_or_missing_aliens() {
    let mut registry = EntityRegistry::new(&GameConfig::default());
    registry.aliens[0].destroyed = true;
    assert!(!registry.spawn_alien_laser(0));
    assert!(!registry.spawn_alien_laser(1000));
    assert!(registry.alien_lasers.is_empty());
}

#[test]
fn live_alien_indices_skip_destroyed() {
    let mut registry = EntityRegistry::new(&GameConfig::default());
    registry.aliens[0].destroyed = true;
    let live = registry.live_alien_indices();
    assert_eq!(live.len(), 54);
    assert_eq!(live[0], 1);
    assert_eq!(registry.live_aliens().count(), 54);
}
