//! The entity registry: sole owner of every live collection.
//!
//! Collections are plain `Vec`s kept in insertion order.  Aliens are pushed
//! row-major and structures left to right, which is the order collision
//! resolution scans them in.  Nothing is removed mid-tick; entities are
//! flagged `destroyed` and dropped in one pass by [`EntityRegistry::compact`].

use tracing::trace;

use crate::config::GameConfig;
use crate::constants::*;
use crate::entities::{Alien, Laser, LaserOwner, MysteryShip, Player, SpriteId, Structure};
use crate::geometry::{to_pixel, Rect};

#[derive(Clone, Debug)]
pub struct EntityRegistry {
    pub aliens: Vec<Alien>,
    pub player_lasers: Vec<Laser>,
    pub alien_lasers: Vec<Laser>,
    pub structures: Vec<Structure>,
    pub player: Player,
    pub mystery_ship: MysteryShip,
}

// ── Construction ──────────────────────────────────────────────────────────────

fn sprite_for_row(row: u32) -> SpriteId {
    match row {
        0 => SpriteId::Alien3,
        1 | 2 => SpriteId::Alien2,
        _ => SpriteId::Alien1,
    }
}

/// Build the formation row-major, top row first.  The top row is worth the
/// most; each row below is worth one point less.
pub fn create_aliens(config: &GameConfig) -> Vec<Alien> {
    let mut aliens = Vec::with_capacity((config.alien_rows * config.alien_columns) as usize);
    let mut y = ALIEN_ORIGIN_Y;

    for row in 0..config.alien_rows {
        let points = ALIEN_TOP_ROW_POINTS.saturating_sub(row);
        let sprite = sprite_for_row(row);

        for column in 0..config.alien_columns {
            let x = ALIEN_ORIGIN_X + column as f32 * ALIEN_COLUMN_PITCH;
            aliens.push(Alien {
                x,
                bounds: Rect::new(to_pixel(x), y, ALIEN_WIDTH, ALIEN_HEIGHT),
                points,
                velocity: config.alien_speed,
                sprite,
                destroyed: false,
            });
        }

        y += ALIEN_ROW_PITCH;
    }

    aliens
}

pub fn create_player(config: &GameConfig) -> Player {
    let x = config.screen_width / 2.0;
    let y = to_pixel(config.screen_height) - PLAYER_BOTTOM_OFFSET;
    Player {
        x,
        bounds: Rect::new(to_pixel(x), y, PLAYER_WIDTH, PLAYER_HEIGHT),
        sprite: SpriteId::Player,
        lives: config.player_lives,
        speed: config.player_speed,
        score: 0,
    }
}

/// The ship waits just past the right edge until its first spawn window.
pub fn create_mystery_ship(config: &GameConfig) -> MysteryShip {
    let x = config.screen_width;
    MysteryShip {
        x,
        bounds: Rect::new(to_pixel(x), MYSTERY_Y, MYSTERY_WIDTH, MYSTERY_HEIGHT),
        sprite: SpriteId::Mystery,
        points: MYSTERY_POINTS,
        velocity: MYSTERY_VELOCITY,
        should_move: false,
        destroyed: false,
    }
}

pub fn create_structures(config: &GameConfig) -> Vec<Structure> {
    let y = to_pixel(config.screen_height) - STRUCTURE_BOTTOM_OFFSET;
    STRUCTURE_X_OFFSETS
        .iter()
        .map(|&x| Structure {
            bounds: Rect::new(x, y, STRUCTURE_WIDTH, STRUCTURE_HEIGHT),
            sprite: SpriteId::Structure,
            lives: config.structure_lives,
            destroyed: false,
        })
        .collect()
}

impl EntityRegistry {
    /// Starting layout: full formation, player, idle mystery ship, four structures.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            aliens: create_aliens(config),
            player_lasers: Vec::new(),
            alien_lasers: Vec::new(),
            structures: create_structures(config),
            player: create_player(config),
            mystery_ship: create_mystery_ship(config),
        }
    }

    // ── Spawning ─────────────────────────────────────────────────────────────

    /// Push a laser just above the player's muzzle.
    pub fn spawn_player_laser(&mut self) {
        let p = &self.player.bounds;
        let bounds = Rect::new(
            p.x + LASER_MUZZLE_OFFSET,
            p.y - p.height,
            LASER_WIDTH,
            LASER_HEIGHT,
        );
        self.player_lasers.push(Laser::new(bounds, LaserOwner::Player));
    }

    /// Push a laser just below the alien at `index`.  Returns `false` if there
    /// is no live alien there.
    pub fn spawn_alien_laser(&mut self, index: usize) -> bool {
        let Some(alien) = self.aliens.get(index).filter(|a| !a.destroyed) else {
            return false;
        };
        let a = &alien.bounds;
        let bounds = Rect::new(
            a.x.saturating_add(LASER_MUZZLE_OFFSET),
            a.bottom(),
            LASER_WIDTH,
            LASER_HEIGHT,
        );
        self.alien_lasers.push(Laser::new(bounds, LaserOwner::Alien));
        true
    }

    // ── Iteration ────────────────────────────────────────────────────────────

    pub fn live_aliens(&self) -> impl Iterator<Item = &Alien> {
        self.aliens.iter().filter(|a| !a.destroyed)
    }

    /// Registry indices of every live alien, in formation order.
    pub fn live_alien_indices(&self) -> Vec<usize> {
        self.aliens
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.destroyed)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn live_structures(&self) -> impl Iterator<Item = &Structure> {
        self.structures.iter().filter(|s| !s.destroyed)
    }

    /// Every bounding box currently held, destroyed or not.
    pub fn all_bounds(&self) -> impl Iterator<Item = &Rect> {
        self.aliens
            .iter()
            .map(|a| &a.bounds)
            .chain(self.player_lasers.iter().map(|l| &l.bounds))
            .chain(self.alien_lasers.iter().map(|l| &l.bounds))
            .chain(self.structures.iter().map(|s| &s.bounds))
            .chain(std::iter::once(&self.player.bounds))
            .chain(std::iter::once(&self.mystery_ship.bounds))
    }

    // ── Compaction ───────────────────────────────────────────────────────────

    /// Drop everything flagged destroyed, keeping survivors in order.  The
    /// mystery ship is a single slot and keeps its flag instead.
    ///
    /// Returns how many entities were removed.
    pub fn compact(&mut self) -> usize {
        let before = self.aliens.len()
            + self.player_lasers.len()
            + self.alien_lasers.len()
            + self.structures.len();

        self.aliens.retain(|a| !a.destroyed);
        self.player_lasers.retain(|l| !l.destroyed);
        self.alien_lasers.retain(|l| !l.destroyed);
        self.structures.retain(|s| !s.destroyed);

        let after = self.aliens.len()
            + self.player_lasers.len()
            + self.alien_lasers.len()
            + self.structures.len();

        let removed = before - after;
        if removed > 0 {
            trace!(removed, "compacted registry");
        }
        removed
    }
}
