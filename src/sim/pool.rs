//! Bounded projectile pool
//!
//! The pool owns every live bullet. Capacity is fixed per session; a full
//! pool refusing to fire is a normal outcome, not an error.

use glam::Vec2;

use super::state::Bullet;
use crate::config::Config;

#[derive(Debug, Clone, Default)]
pub struct BulletPool {
    bullets: Vec<Bullet>,
}

impl BulletPool {
    pub fn new(config: &Config) -> Self {
        Self {
            bullets: Vec::with_capacity(config.bullet_limit),
        }
    }

    /// Spawn a bullet anchored at `origin` (top-center) if below the cap.
    /// Returns whether a bullet was created; the pool is untouched on refusal.
    pub fn fire(&mut self, origin: Vec2, config: &Config) -> bool {
        if self.bullets.len() >= config.bullet_limit {
            return false;
        }
        self.bullets.push(Bullet::new(origin, config));
        true
    }

    /// Move every bullet by its velocity, dropping the ones whose box has
    /// fully left through the top edge.
    pub fn advance(&mut self, dt: f32) {
        for bullet in &mut self.bullets {
            bullet.pos += bullet.vel * dt;
        }
        self.bullets.retain(|b| b.rect().bottom() > 0.0);
    }

    /// Drop every bullet at once (life loss, fleet exhaustion, new game).
    pub fn clear(&mut self) {
        self.bullets.clear();
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter()
    }

    /// Remove the bullets flagged by the collision pass. `spent` is indexed
    /// in iteration order.
    pub(crate) fn remove_spent(&mut self, spent: &[bool]) {
        debug_assert_eq!(spent.len(), self.bullets.len());
        let mut idx = 0;
        self.bullets.retain(|_| {
            let keep = !spent[idx];
            idx += 1;
            keep
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Vec2 {
        Vec2::new(400.0, 552.0)
    }

    #[test]
    fn fire_up_to_cap_then_refuse() {
        let config = Config {
            bullet_limit: 3,
            ..Config::default()
        };
        let mut pool = BulletPool::new(&config);

        assert!(pool.fire(origin(), &config));
        assert!(pool.fire(origin(), &config));
        assert!(pool.fire(origin(), &config));
        assert_eq!(pool.len(), 3);

        // Fourth shot with nothing removed: refused, count unchanged.
        assert!(!pool.fire(origin(), &config));
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn refusal_frees_up_after_prune() {
        let config = Config {
            bullet_limit: 1,
            ..Config::default()
        };
        let mut pool = BulletPool::new(&config);
        assert!(pool.fire(origin(), &config));
        assert!(!pool.fire(origin(), &config));

        // Run the bullet off the top; the slot opens again.
        for _ in 0..600 {
            pool.advance(1.0 / 60.0);
        }
        assert!(pool.is_empty());
        assert!(pool.fire(origin(), &config));
    }

    #[test]
    fn advance_moves_bullets_upward() {
        let config = Config::default();
        let mut pool = BulletPool::new(&config);
        pool.fire(origin(), &config);

        let before = pool.iter().next().unwrap().pos.y;
        pool.advance(1.0 / 60.0);
        let after = pool.iter().next().unwrap().pos.y;
        assert!(after < before);
    }

    #[test]
    fn bullet_pruned_only_when_fully_off_top() {
        let config = Config::default();
        let mut pool = BulletPool::new(&config);
        // Straddling the top edge: bottom still inside, must survive.
        pool.fire(Vec2::new(400.0, -config.bullet_h / 2.0), &config);
        pool.advance(0.0);
        assert_eq!(pool.len(), 1);

        let mut pool = BulletPool::new(&config);
        // Fully above the edge: pruned on the next advance.
        pool.fire(Vec2::new(400.0, -2.0 * config.bullet_h), &config);
        pool.advance(0.0);
        assert!(pool.is_empty());
    }

    #[test]
    fn clear_empties_the_pool() {
        let config = Config::default();
        let mut pool = BulletPool::new(&config);
        pool.fire(origin(), &config);
        pool.fire(origin(), &config);
        pool.clear();
        assert!(pool.is_empty());
    }
}
