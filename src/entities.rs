//! All game entity types: pure data, no logic beyond position bookkeeping.

use crate::geometry::{to_pixel, Rect};

/// Handle into the renderer's asset table.  The core never touches textures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Alien1,
    Alien2,
    Alien3,
    Mystery,
    Player,
    Structure,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Paused,
    /// Terminal: the player ran out of lives.
    Over,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaserOwner {
    Player,
    Alien,
}

/// A laser bolt.  Only ever moves vertically, so `y` carries the sub-pixel position.
#[derive(Clone, Debug)]
pub struct Laser {
    pub y: f32,
    pub bounds: Rect,
    pub owner: LaserOwner,
    pub destroyed: bool,
}

impl Laser {
    pub fn new(bounds: Rect, owner: LaserOwner) -> Self {
        Self {
            y: bounds.y as f32,
            bounds,
            owner,
            destroyed: false,
        }
    }

    pub fn set_y(&mut self, y: f32) {
        self.y = y;
        self.bounds.y = to_pixel(y);
    }
}

// ── Formation ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Alien {
    pub x: f32,
    pub bounds: Rect,
    pub points: u32,
    /// Signed horizontal speed; every alien in the formation shares its magnitude.
    pub velocity: f32,
    pub sprite: SpriteId,
    pub destroyed: bool,
}

impl Alien {
    pub fn set_x(&mut self, x: f32) {
        self.x = x;
        self.bounds.x = to_pixel(x);
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub bounds: Rect,
    pub sprite: SpriteId,
    pub lives: u32,
    pub speed: f32,
    pub score: u32,
}

impl Player {
    pub fn set_x(&mut self, x: f32) {
        self.x = x;
        self.bounds.x = to_pixel(x);
    }

    pub fn is_defeated(&self) -> bool {
        self.lives == 0
    }
}

// ── Mystery ship ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct MysteryShip {
    pub x: f32,
    pub bounds: Rect,
    pub sprite: SpriteId,
    pub points: u32,
    pub velocity: f32,
    /// Set once the spawn timer elapses; cleared again when the ship leaves the screen.
    pub should_move: bool,
    /// Permanent once hit.
    pub destroyed: bool,
}

impl MysteryShip {
    pub fn set_x(&mut self, x: f32) {
        self.x = x;
        self.bounds.x = to_pixel(x);
    }
}

// ── Cover ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Structure {
    pub bounds: Rect,
    pub sprite: SpriteId,
    pub lives: u32,
    pub destroyed: bool,
}

impl Structure {
    /// Absorb one laser hit.  Returns `true` if this hit destroyed the structure.
    pub fn absorb_hit(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.destroyed = true;
        }
        self.destroyed
    }
}
