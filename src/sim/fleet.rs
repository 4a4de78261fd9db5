//! Invader formation
//!
//! The fleet marches as a single unit: horizontal steps in the shared
//! direction, a drop plus direction flip on boundary contact, and speed
//! escalation as levels are cleared. Iteration order is spawn order — the
//! collision predicates rely on that as their tie-break contract.

use glam::Vec2;

use super::rect::Rect;
use super::state::Invader;
use crate::config::Config;

/// Runtime motion state. Base values live in [`Config`]; this struct is the
/// per-session scaled copy, reset only at new game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FleetMotion {
    /// Horizontal step speed, pixels per second. Scaled up once per level.
    pub speed: f32,
    /// Direction of travel. Always exactly +1.0 or -1.0.
    pub direction: f32,
}

impl FleetMotion {
    fn base(config: &Config) -> Self {
        Self {
            speed: config.fleet_speed,
            direction: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Fleet {
    invaders: Vec<Invader>,
    pub motion: FleetMotion,
}

impl Fleet {
    /// An empty fleet at base motion. Call [`Fleet::spawn_row`] to populate.
    pub fn new(config: &Config) -> Self {
        Self {
            invaders: Vec::new(),
            motion: FleetMotion::base(config),
        }
    }

    /// How many invaders fit in one row: one unit of margin at each side,
    /// one unit of spacing between neighbors.
    pub fn row_capacity(config: &Config) -> usize {
        ((config.screen_w - 2.0 * config.invader_w) / (2.0 * config.invader_w)).floor() as usize
    }

    /// Place one full row at the configured spawn height, spaced two unit
    /// widths apart starting one unit width from the left edge. Does not
    /// clear an existing set — callers clear first when replacing.
    pub fn spawn_row(&mut self, config: &Config) {
        let count = Self::row_capacity(config);
        for i in 0..count {
            let x = config.invader_w + 2.0 * config.invader_w * i as f32;
            self.invaders
                .push(Invader::new(Vec2::new(x, config.fleet_spawn_y), config));
        }
        log::debug!("spawned fleet row of {count}");
    }

    /// Boundary contact test in the current direction of travel; performs
    /// the flip when contact is found. At most one flip per call, no matter
    /// how many invaders are at the edge. Returns whether a flip happened.
    pub fn check_edges(&mut self, config: &Config) -> bool {
        let at_edge = if self.motion.direction > 0.0 {
            self.invaders
                .iter()
                .any(|inv| inv.rect().right() >= config.screen_w)
        } else {
            self.invaders.iter().any(|inv| inv.rect().left() <= 0.0)
        };
        if at_edge {
            self.flip(config);
        }
        at_edge
    }

    /// Drop the whole formation one step and reverse its travel.
    fn flip(&mut self, config: &Config) {
        for invader in &mut self.invaders {
            invader.pos.y += config.fleet_drop;
        }
        self.motion.direction = -self.motion.direction;
        log::debug!("fleet drop, direction now {:+.0}", self.motion.direction);
    }

    /// Horizontal march at the current speed and direction.
    pub fn advance(&mut self, dt: f32) {
        let step = self.motion.speed * self.motion.direction * dt;
        for invader in &mut self.invaders {
            invader.pos.x += step;
        }
    }

    /// First invader overlapping the ship, or none.
    pub fn first_ship_contact(&self, ship_rect: &Rect) -> Option<usize> {
        self.invaders
            .iter()
            .position(|inv| inv.rect().intersects(ship_rect))
    }

    /// First invader whose box has reached the bottom playfield edge, or
    /// none. A breach is as fatal as direct ship contact.
    pub fn first_breach(&self, config: &Config) -> Option<usize> {
        self.invaders
            .iter()
            .position(|inv| inv.rect().bottom() >= config.screen_h)
    }

    pub fn is_empty(&self) -> bool {
        self.invaders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.invaders.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Invader> {
        self.invaders.iter()
    }

    pub fn clear(&mut self) {
        self.invaders.clear();
    }

    /// One level-up worth of speed escalation. Survives respawns; only
    /// [`Fleet::reset_motion`] undoes it.
    pub fn escalate(&mut self, config: &Config) {
        self.motion.speed *= config.fleet_speed_scale;
    }

    /// Back to base speed and rightward travel (new game only).
    pub fn reset_motion(&mut self, config: &Config) {
        self.motion = FleetMotion::base(config);
    }

    /// Remove the invaders flagged by the collision pass. `struck` is
    /// indexed in iteration order.
    pub(crate) fn remove_struck(&mut self, struck: &[bool]) {
        debug_assert_eq!(struck.len(), self.invaders.len());
        let mut idx = 0;
        self.invaders.retain(|_| {
            let keep = !struck[idx];
            idx += 1;
            keep
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet_with_row(config: &Config) -> Fleet {
        let mut fleet = Fleet::new(config);
        fleet.spawn_row(config);
        fleet
    }

    #[test]
    fn row_geometry_matches_capacity_formula() {
        // floor((800 - 100) / 100) = 7
        let config = Config {
            screen_w: 800.0,
            invader_w: 50.0,
            ..Config::default()
        };
        let fleet = fleet_with_row(&config);
        assert_eq!(fleet.len(), 7);

        for (i, invader) in fleet.iter().enumerate() {
            assert_eq!(invader.pos.x, 50.0 + 100.0 * i as f32);
            assert_eq!(invader.pos.y, config.fleet_spawn_y);
        }
    }

    #[test]
    fn spawn_does_not_clear_existing_invaders() {
        let config = Config::default();
        let mut fleet = fleet_with_row(&config);
        let first = fleet.len();
        fleet.spawn_row(&config);
        assert_eq!(fleet.len(), 2 * first);
    }

    #[test]
    fn edge_contact_drops_and_reverses_once() {
        let config = Config::default();
        let mut fleet = fleet_with_row(&config);

        // March right until the rightmost invader touches the boundary.
        let dt = 1.0 / 60.0;
        let mut flipped = false;
        for _ in 0..100_000 {
            if fleet.check_edges(&config) {
                flipped = true;
                break;
            }
            fleet.advance(dt);
        }
        assert!(flipped);
        assert_eq!(fleet.motion.direction, -1.0);
        // Every invader dropped by exactly one step.
        for invader in fleet.iter() {
            assert_eq!(invader.pos.y, config.fleet_spawn_y + config.fleet_drop);
        }

        // The very next check must not flip again: the fleet now travels
        // left, away from the right edge.
        assert!(!fleet.check_edges(&config));
        assert_eq!(fleet.motion.direction, -1.0);
    }

    #[test]
    fn direction_magnitude_is_always_one() {
        let config = Config::default();
        let mut fleet = fleet_with_row(&config);
        let dt = 1.0 / 60.0;
        for _ in 0..10_000 {
            fleet.check_edges(&config);
            fleet.advance(dt);
            assert_eq!(fleet.motion.direction.abs(), 1.0);
        }
    }

    #[test]
    fn escalate_applies_scale_once() {
        let config = Config {
            fleet_speed: 60.0,
            fleet_speed_scale: 1.1,
            ..Config::default()
        };
        let mut fleet = Fleet::new(&config);
        fleet.escalate(&config);
        assert!((fleet.motion.speed - 66.0).abs() < 1e-3);

        fleet.reset_motion(&config);
        assert_eq!(fleet.motion.speed, 60.0);
        assert_eq!(fleet.motion.direction, 1.0);
    }

    #[test]
    fn breach_detected_at_bottom_edge() {
        let config = Config::default();
        let mut fleet = fleet_with_row(&config);
        assert!(fleet.first_breach(&config).is_none());

        // Push the row down to the breach line.
        let drops = ((config.screen_h - config.fleet_spawn_y - config.invader_h)
            / config.fleet_drop)
            .ceil() as usize;
        for _ in 0..drops {
            fleet.flip(&config);
        }
        assert_eq!(fleet.first_breach(&config), Some(0));
    }

    #[test]
    fn ship_contact_returns_first_overlap_in_spawn_order() {
        let config = Config::default();
        let fleet = fleet_with_row(&config);

        // A rect covering the whole spawn row overlaps everything; the
        // predicate must still report the first-spawned invader.
        let everything = Rect::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(config.screen_w, config.screen_h),
        );
        assert_eq!(fleet.first_ship_contact(&everything), Some(0));

        // A rect far from the row overlaps nothing.
        let nowhere = Rect::new(Vec2::new(0.0, 500.0), Vec2::new(10.0, 10.0));
        assert_eq!(fleet.first_ship_contact(&nowhere), None);
    }
}
