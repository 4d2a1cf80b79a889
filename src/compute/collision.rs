//! Laser collision resolution.
//!
//! Works on the pre-compaction registry.  Hits only set `destroyed` flags,
//! and a laser that is already flagged is skipped by every later check, so
//! each laser damages at most one target per tick.  Targets are scanned in
//! registry order and the first overlap wins.

use tracing::info;

use crate::entities::{Alien, Laser, MysteryShip, Player, Structure};
use crate::events::{FrameEvent, FrameEvents};
use crate::registry::EntityRegistry;

/// Resolve every laser against its possible targets, appending side effects
/// to `events` in the order they happen.
pub fn resolve(registry: &mut EntityRegistry, events: &mut FrameEvents) {
    let EntityRegistry {
        aliens,
        player_lasers,
        alien_lasers,
        structures,
        player,
        mystery_ship,
    } = registry;

    for laser in player_lasers.iter_mut().filter(|l| !l.destroyed) {
        resolve_player_laser(laser, mystery_ship, aliens, player, events);
        if !laser.destroyed {
            hit_structure(laser, structures, events);
        }
    }

    for laser in alien_lasers.iter_mut().filter(|l| !l.destroyed) {
        resolve_alien_laser(laser, player, events);
        if !laser.destroyed {
            hit_structure(laser, structures, events);
        }
    }
}

/// Mystery ship first, then the first live alien the laser overlaps.
fn resolve_player_laser(
    laser: &mut Laser,
    ship: &mut MysteryShip,
    aliens: &mut [Alien],
    player: &mut Player,
    events: &mut FrameEvents,
) {
    if !ship.destroyed && ship.bounds.intersects(&laser.bounds) {
        laser.destroyed = true;
        ship.destroyed = true;
        award(player, ship.points, events);
        info!(points = ship.points, score = player.score, "mystery ship destroyed");
        return;
    }

    let target = aliens
        .iter_mut()
        .find(|a| !a.destroyed && a.bounds.intersects(&laser.bounds));

    if let Some(alien) = target {
        laser.destroyed = true;
        alien.destroyed = true;
        award(player, alien.points, events);
        info!(points = alien.points, score = player.score, "alien destroyed");
    }
}

fn resolve_alien_laser(laser: &mut Laser, player: &mut Player, events: &mut FrameEvents) {
    if player.lives == 0 || !player.bounds.intersects(&laser.bounds) {
        return;
    }

    laser.destroyed = true;
    player.lives -= 1;
    events.push(FrameEvent::LivesChanged(player.lives));
    events.push(FrameEvent::ExplosionOccurred);
    info!(lives = player.lives, "player hit");
}

/// The first live structure overlapping the laser absorbs it.
fn hit_structure(laser: &mut Laser, structures: &mut [Structure], events: &mut FrameEvents) {
    let Some(structure) = structures
        .iter_mut()
        .find(|s| !s.destroyed && s.bounds.intersects(&laser.bounds))
    else {
        return;
    };

    laser.destroyed = true;
    if structure.absorb_hit() {
        info!(x = structure.bounds.x, "structure destroyed");
    }
    events.push(FrameEvent::ExplosionOccurred);
}

fn award(player: &mut Player, points: u32, events: &mut FrameEvents) {
    player.score += points;
    events.push(FrameEvent::ScoreChanged(player.score));
    events.push(FrameEvent::ExplosionOccurred);
}
