//! Session configuration
//!
//! Immutable once a session is constructed. Loaded from a JSON file when a
//! path is given, otherwise compiled defaults from [`crate::consts`].
//! Malformed values are a fatal precondition violation: construction refuses
//! them rather than producing undefined geometry.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts;

/// Reasons a configuration is unusable
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("bullet_limit must be at least 1")]
    ZeroBulletLimit,
    #[error("starting_lives must be at least 1")]
    ZeroLives,
    #[error("fleet_speed_scale must be at least 1.0 (got {0})")]
    ShrinkingScale(f32),
    #[error("screen_w {screen_w} leaves no room for a fleet row of invader_w {invader_w}")]
    NoRoomForFleet { screen_w: f32, invader_w: f32 },
    #[error("fleet_spawn_y {spawn_y} puts the row outside the playfield (height {screen_h})")]
    SpawnOutOfField { spawn_y: f32, screen_h: f32 },
}

/// Tunable session values
///
/// Every field has a compiled default, so a partial JSON file only needs the
/// values it wants to override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Playfield width in pixels
    pub screen_w: f32,
    /// Playfield height in pixels
    pub screen_h: f32,

    pub ship_w: f32,
    pub ship_h: f32,
    /// Ship horizontal speed, pixels per second
    pub ship_speed: f32,

    pub bullet_w: f32,
    pub bullet_h: f32,
    /// Bullet upward speed, pixels per second
    pub bullet_speed: f32,
    /// Maximum bullets in flight at once
    pub bullet_limit: usize,

    pub invader_w: f32,
    pub invader_h: f32,

    /// Base fleet step speed, pixels per second
    pub fleet_speed: f32,
    /// Multiplier applied to the fleet speed once per cleared level
    pub fleet_speed_scale: f32,
    /// Vertical drop applied to the whole fleet on each direction flip
    pub fleet_drop: f32,
    /// Vertical offset of a freshly spawned row
    pub fleet_spawn_y: f32,

    /// Score awarded per destroyed invader
    pub points_per_invader: u64,
    pub starting_lives: u32,
    /// Post-life-loss stall duration, seconds
    pub respawn_pause: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_w: consts::SCREEN_W,
            screen_h: consts::SCREEN_H,
            ship_w: consts::SHIP_W,
            ship_h: consts::SHIP_H,
            ship_speed: consts::SHIP_SPEED,
            bullet_w: consts::BULLET_W,
            bullet_h: consts::BULLET_H,
            bullet_speed: consts::BULLET_SPEED,
            bullet_limit: consts::BULLET_LIMIT,
            invader_w: consts::INVADER_W,
            invader_h: consts::INVADER_H,
            fleet_speed: consts::FLEET_SPEED,
            fleet_speed_scale: consts::FLEET_SPEED_SCALE,
            fleet_drop: consts::FLEET_DROP,
            fleet_spawn_y: consts::FLEET_SPAWN_Y,
            points_per_invader: consts::POINTS_PER_INVADER,
            starting_lives: consts::STARTING_LIVES,
            respawn_pause: consts::RESPAWN_PAUSE,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

impl Config {
    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Check every precondition the simulation geometry relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("screen_w", self.screen_w)?;
        positive("screen_h", self.screen_h)?;
        positive("ship_w", self.ship_w)?;
        positive("ship_h", self.ship_h)?;
        positive("ship_speed", self.ship_speed)?;
        positive("bullet_w", self.bullet_w)?;
        positive("bullet_h", self.bullet_h)?;
        positive("bullet_speed", self.bullet_speed)?;
        positive("invader_w", self.invader_w)?;
        positive("invader_h", self.invader_h)?;
        positive("fleet_speed", self.fleet_speed)?;
        positive("fleet_drop", self.fleet_drop)?;
        positive("respawn_pause", self.respawn_pause)?;

        if self.bullet_limit == 0 {
            return Err(ConfigError::ZeroBulletLimit);
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::ZeroLives);
        }
        if self.fleet_speed_scale < 1.0 {
            return Err(ConfigError::ShrinkingScale(self.fleet_speed_scale));
        }
        // Row geometry must admit at least one invader.
        if self.screen_w <= 4.0 * self.invader_w {
            return Err(ConfigError::NoRoomForFleet {
                screen_w: self.screen_w,
                invader_w: self.invader_w,
            });
        }
        // A fresh row must spawn inside the field, above the breach line.
        if self.fleet_spawn_y < 0.0 || self.fleet_spawn_y + self.invader_h >= self.screen_h {
            return Err(ConfigError::SpawnOutOfField {
                spawn_y: self.fleet_spawn_y,
                screen_h: self.screen_h,
            });
        }
        Ok(())
    }
}
