//! Timed events: fire cooldowns and the mystery ship's spawn window.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::entities::MysteryShip;
use crate::registry::EntityRegistry;

/// Accumulated seconds since each timed event last happened.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FireTimers {
    pub player_fire: f32,
    pub alien_fire: f32,
    pub mystery_spawn: f32,
}

/// Fire a player laser once the fire key has been held for `interval`
/// seconds in total.  The accumulator keeps its value while the key is up.
pub fn player_fire(
    registry: &mut EntityRegistry,
    timers: &mut FireTimers,
    fire_held: bool,
    dt: f32,
    interval: f32,
) -> bool {
    if !fire_held {
        return false;
    }

    timers.player_fire += dt;
    if timers.player_fire < interval {
        return false;
    }

    registry.spawn_player_laser();
    timers.player_fire = 0.0;
    debug!(in_flight = registry.player_lasers.len(), "player fired");
    true
}

/// Every `interval` seconds a uniformly chosen live alien fires.  With an
/// empty formation the timer keeps running and nothing spawns.
pub fn alien_fire(
    registry: &mut EntityRegistry,
    timers: &mut FireTimers,
    dt: f32,
    interval: f32,
    rng: &mut impl Rng,
) -> bool {
    timers.alien_fire += dt;
    if timers.alien_fire < interval {
        return false;
    }

    let candidates = registry.live_alien_indices();
    let Some(&shooter) = candidates.choose(rng) else {
        return false;
    };

    if !registry.spawn_alien_laser(shooter) {
        return false;
    }
    timers.alien_fire = 0.0;
    debug!(shooter, "alien fired");
    true
}

/// Open and close the mystery ship's flight window.
///
/// While idle, the spawn timer accumulates until `interval`, then the ship
/// starts moving.  A moving ship past either exit line turns around and goes
/// idle again.  Returns `true` on the tick the ship launches.
pub fn update_mystery_window(
    ship: &mut MysteryShip,
    timers: &mut FireTimers,
    dt: f32,
    interval: f32,
    screen_width: f32,
    left_exit: f32,
) -> bool {
    if ship.destroyed {
        return false;
    }

    let mut launched = false;
    if !ship.should_move {
        timers.mystery_spawn += dt;
        if timers.mystery_spawn >= interval {
            timers.mystery_spawn = 0.0;
            ship.should_move = true;
            launched = true;
        }
    }

    if ship.should_move {
        let right_exit = screen_width + ship.bounds.width as f32;
        if ship.x > right_exit || ship.x < left_exit {
            ship.velocity = -ship.velocity;
            ship.should_move = false;
            debug!(x = ship.x, "mystery ship left the screen");
        }
    }

    launched
}
