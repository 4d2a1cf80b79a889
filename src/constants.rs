//! Default geometry and timing for the playfield.
//!
//! These are the compile-time defaults behind [`crate::config::GameConfig`].
//! All distances are screen pixels, all speeds pixels per second and all
//! intervals seconds.

// ── Screen ────────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 544.0;

// ── Alien formation ───────────────────────────────────────────────────────────

pub const ALIEN_ROWS: u32 = 5;
pub const ALIEN_COLUMNS: u32 = 11;
/// Allowed column counts for a formation.
pub const ALIEN_COLUMNS_RANGE: std::ops::RangeInclusive<u32> = 11..=13;

pub const ALIEN_WIDTH: i32 = 38;
pub const ALIEN_HEIGHT: i32 = 34;
pub const ALIEN_ORIGIN_X: f32 = 150.0;
pub const ALIEN_ORIGIN_Y: i32 = 50;
pub const ALIEN_COLUMN_PITCH: f32 = 60.0;
pub const ALIEN_ROW_PITCH: i32 = 50;

/// Points for the top row; each row below is worth one less.
pub const ALIEN_TOP_ROW_POINTS: u32 = 8;

pub const ALIEN_SPEED: f32 = 100.0;
/// Vertical step taken by the whole formation when it reverses at an edge.
pub const FORMATION_DROP: i32 = 10;

// ── Mystery ship ──────────────────────────────────────────────────────────────

pub const MYSTERY_WIDTH: i32 = 58;
pub const MYSTERY_HEIGHT: i32 = 25;
pub const MYSTERY_Y: i32 = 40;
pub const MYSTERY_POINTS: u32 = 50;
/// Starts off the right edge, heading left.
pub const MYSTERY_VELOCITY: f32 = -150.0;
pub const MYSTERY_SPAWN_INTERVAL: f32 = 10.0;
/// Left exit line; the right exit is one ship width past the screen edge.
pub const MYSTERY_LEFT_EXIT: f32 = -80.0;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: i32 = 38;
pub const PLAYER_HEIGHT: i32 = 34;
/// Distance from the bottom of the screen to the player's top edge.
pub const PLAYER_BOTTOM_OFFSET: i32 = 40;
pub const PLAYER_LIVES: u32 = 2;
pub const PLAYER_SPEED: f32 = 600.0;

// ── Lasers ────────────────────────────────────────────────────────────────────

pub const LASER_WIDTH: i32 = 4;
pub const LASER_HEIGHT: i32 = 16;
pub const LASER_SPEED: f32 = 400.0;
/// Horizontal offset from a shooter's left edge to its muzzle.
pub const LASER_MUZZLE_OFFSET: i32 = 20;

pub const PLAYER_FIRE_INTERVAL: f32 = 0.35;
pub const ALIEN_FIRE_INTERVAL: f32 = 0.6;

// ── Structures ────────────────────────────────────────────────────────────────

pub const STRUCTURE_WIDTH: i32 = 56;
pub const STRUCTURE_HEIGHT: i32 = 33;
pub const STRUCTURE_LIVES: u32 = 5;
pub const STRUCTURE_X_OFFSETS: [i32; 4] = [120, 350, 600, 800];
/// Distance from the bottom of the screen to each structure's top edge.
pub const STRUCTURE_BOTTOM_OFFSET: i32 = 120;
