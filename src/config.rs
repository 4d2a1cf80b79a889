//! Runtime configuration loaded from a TOML file.
//!
//! [`GameConfig`] mirrors the values in [`crate::constants`].  Missing keys fall
//! back to those defaults, so a file only needs the values it changes:
//!
//! ```toml
//! alien_columns = 13
//! bell = false
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::constants::*;
use crate::error::{ConfigError, ConfigResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Screen ───────────────────────────────────────────────────────────────
    pub screen_width: f32,
    pub screen_height: f32,

    // ── Formation ────────────────────────────────────────────────────────────
    pub alien_rows: u32,
    pub alien_columns: u32,
    pub alien_speed: f32,
    pub formation_drop: i32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_speed: f32,
    pub player_lives: u32,

    // ── Weapons & timers ─────────────────────────────────────────────────────
    pub laser_speed: f32,
    pub player_fire_interval: f32,
    pub alien_fire_interval: f32,
    pub mystery_spawn_interval: f32,

    // ── Cover ────────────────────────────────────────────────────────────────
    pub structure_lives: u32,

    // ── Front end ────────────────────────────────────────────────────────────
    /// Ring the terminal bell for laser and explosion cues.
    pub bell: bool,
    pub log_file: String,
    pub frame_millis: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            alien_rows: ALIEN_ROWS,
            alien_columns: ALIEN_COLUMNS,
            alien_speed: ALIEN_SPEED,
            formation_drop: FORMATION_DROP,
            player_speed: PLAYER_SPEED,
            player_lives: PLAYER_LIVES,
            laser_speed: LASER_SPEED,
            player_fire_interval: PLAYER_FIRE_INTERVAL,
            alien_fire_interval: ALIEN_FIRE_INTERVAL,
            mystery_spawn_interval: MYSTERY_SPAWN_INTERVAL,
            structure_lives: STRUCTURE_LIVES,
            bell: true,
            log_file: "invaders.log".to_string(),
            frame_millis: 16,
        }
    }
}

fn positive(field: &'static str, value: f32) -> ConfigResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {}", value),
        })
    }
}

fn nonzero(field: &'static str, value: u32) -> ConfigResult<()> {
    if value == 0 {
        Err(ConfigError::Invalid {
            field,
            reason: "must be at least 1".to_string(),
        })
    } else {
        Ok(())
    }
}

impl GameConfig {
    /// Reject values that would produce an unplayable or degenerate field.
    pub fn validate(&self) -> ConfigResult<()> {
        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        positive("alien_speed", self.alien_speed)?;
        positive("player_speed", self.player_speed)?;
        positive("laser_speed", self.laser_speed)?;
        positive("player_fire_interval", self.player_fire_interval)?;
        positive("alien_fire_interval", self.alien_fire_interval)?;
        positive("mystery_spawn_interval", self.mystery_spawn_interval)?;
        nonzero("player_lives", self.player_lives)?;
        nonzero("structure_lives", self.structure_lives)?;

        if self.alien_rows == 0 || self.alien_rows > ALIEN_TOP_ROW_POINTS {
            return Err(ConfigError::Invalid {
                field: "alien_rows",
                reason: format!(
                    "must be between 1 and {}, got {}",
                    ALIEN_TOP_ROW_POINTS, self.alien_rows
                ),
            });
        }
        if !ALIEN_COLUMNS_RANGE.contains(&self.alien_columns) {
            return Err(ConfigError::Invalid {
                field: "alien_columns",
                reason: format!(
                    "must be between {} and {}, got {}",
                    ALIEN_COLUMNS_RANGE.start(),
                    ALIEN_COLUMNS_RANGE.end(),
                    self.alien_columns
                ),
            });
        }
        if self.formation_drop < 0 {
            return Err(ConfigError::Invalid {
                field: "formation_drop",
                reason: format!("must not be negative, got {}", self.formation_drop),
            });
        }
        if self.frame_millis == 0 {
            return Err(ConfigError::Invalid {
                field: "frame_millis",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Parse and validate a config from TOML text.
pub fn parse_config(contents: &str, path: &Path) -> ConfigResult<GameConfig> {
    let config: GameConfig = toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Load the config at `path`.  A missing file is not an error: defaults apply.
pub fn load_config(path: &Path) -> ConfigResult<GameConfig> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let config = parse_config(&contents, path)?;
            info!(path = %path.display(), "loaded game config");
            Ok(config)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no config file found; using defaults");
            Ok(GameConfig::default())
        }
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
