//! Entities and session state
//!
//! All state that a tick mutates lives here: the ship, the entity sets (via
//! their owning components), and the session counters.

use glam::Vec2;

use super::fleet::Fleet;
use super::pool::BulletPool;
use super::rect::Rect;
use crate::config::{Config, ConfigError};

/// Current phase of the simulation loop's own state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Normal gameplay
    Running,
    /// Post-life-loss stall: gameplay and input are frozen until the
    /// countdown ends
    Respawn { ticks_left: u32 },
    /// Lives exhausted; the final frame stays frozen until a reset
    GameOver,
}

/// A player bullet
#[derive(Debug, Clone, Copy)]
pub struct Bullet {
    pub pos: Vec2,
    /// Fixed upward velocity, set at spawn
    pub vel: Vec2,
    pub size: Vec2,
}

impl Bullet {
    /// Spawn with the top-center anchored at `origin`, flying upward.
    pub fn new(origin: Vec2, config: &Config) -> Self {
        let size = Vec2::new(config.bullet_w, config.bullet_h);
        Self {
            pos: Vec2::new(origin.x - size.x / 2.0, origin.y),
            vel: Vec2::new(0.0, -config.bullet_speed),
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A fleet invader
#[derive(Debug, Clone, Copy)]
pub struct Invader {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Invader {
    pub fn new(pos: Vec2, config: &Config) -> Self {
        Self {
            pos,
            size: Vec2::new(config.invader_w, config.invader_h),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// The player ship
///
/// Bounded to the horizontal axis; owns the bullet pool it fires from.
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    pub size: Vec2,
    pub moving_left: bool,
    pub moving_right: bool,
    pub bullets: BulletPool,
}

impl Ship {
    pub fn new(config: &Config) -> Self {
        let mut ship = Self {
            pos: Vec2::ZERO,
            size: Vec2::new(config.ship_w, config.ship_h),
            moving_left: false,
            moving_right: false,
            bullets: BulletPool::new(config),
        };
        ship.center(config);
        ship
    }

    /// Record held directional intent. Both-true is valid and resolves to
    /// no motion.
    pub fn set_intent(&mut self, moving_left: bool, moving_right: bool) {
        self.moving_left = moving_left;
        self.moving_right = moving_right;
    }

    /// Apply held intent, then clamp the box into `[0, screen_w]`.
    pub fn advance(&mut self, dt: f32, config: &Config) {
        if self.moving_left && !self.moving_right {
            self.pos.x -= config.ship_speed * dt;
        } else if self.moving_right && !self.moving_left {
            self.pos.x += config.ship_speed * dt;
        }
        self.pos.x = self.pos.x.clamp(0.0, config.screen_w - self.size.x);
    }

    /// Fire from the ship's top-center. Returns whether a bullet actually
    /// left (the pool refuses past its cap).
    pub fn fire(&mut self, config: &Config) -> bool {
        let origin = self.rect().top_center();
        self.bullets.fire(origin, config)
    }

    /// Canonical start position: bottom edge, horizontally centered.
    pub fn center(&mut self, config: &Config) {
        self.pos = Vec2::new(
            (config.screen_w - self.size.x) / 2.0,
            config.screen_h - self.size.y,
        );
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: Config,
    pub ship: Ship,
    pub fleet: Fleet,
    pub lives: u32,
    pub score: u64,
    /// 1-based, never decreases within a session
    pub level: u32,
    pub phase: GamePhase,
    /// Tick counter, diagnostics only
    pub time_ticks: u64,
}

impl GameState {
    /// Build a session from a configuration, refusing malformed values.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let ship = Ship::new(&config);
        let mut fleet = Fleet::new(&config);
        fleet.spawn_row(&config);
        Ok(Self {
            ship,
            fleet,
            lives: config.starting_lives,
            score: 0,
            level: 1,
            phase: GamePhase::Running,
            time_ticks: 0,
            config,
        })
    }

    /// Whether gameplay-advancing operations still do anything.
    pub fn is_active(&self) -> bool {
        self.phase != GamePhase::GameOver
    }

    /// Start a new game: base counters, fresh fleet at base motion,
    /// recentered ship.
    pub fn reset(&mut self) {
        self.lives = self.config.starting_lives;
        self.score = 0;
        self.level = 1;
        self.phase = GamePhase::Running;
        self.time_ticks = 0;
        self.ship.bullets.clear();
        self.ship.set_intent(false, false);
        self.ship.center(&self.config);
        self.fleet.clear();
        self.fleet.reset_motion(&self.config);
        self.fleet.spawn_row(&self.config);
        log::info!("new game: {} lives, level 1", self.lives);
    }
}
