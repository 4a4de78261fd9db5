//! Read-only render boundary
//!
//! The render collaborator never touches `GameState`; it gets a `Snapshot`
//! captured after each tick. Serializable so an out-of-process renderer can
//! consume it too.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::GameState;

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub ship: Rect,
    pub invaders: Vec<Rect>,
    pub bullets: Vec<Rect>,
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    /// False once lives are exhausted; the frame then shows the frozen
    /// final state.
    pub active: bool,
}

impl Snapshot {
    /// Capture the post-tick state.
    pub fn capture(state: &GameState) -> Self {
        Self {
            ship: state.ship.rect(),
            invaders: state.fleet.iter().map(|inv| inv.rect()).collect(),
            bullets: state.ship.bullets.iter().map(|b| b.rect()).collect(),
            score: state.score,
            level: state.level,
            lives: state.lives,
            active: state.is_active(),
        }
    }
}
