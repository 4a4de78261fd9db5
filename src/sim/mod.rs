//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Fixed timestep only; the driving loop owns the clock
//! - Stable iteration order (spawn order) for every entity set
//! - No rendering, audio, or platform dependencies

pub mod fleet;
pub mod pool;
pub mod rect;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use fleet::{Fleet, FleetMotion};
pub use pool::BulletPool;
pub use rect::Rect;
pub use snapshot::Snapshot;
pub use state::{Bullet, GamePhase, GameState, Invader, Ship};
pub use tick::{TickEvents, TickInput, tick};
