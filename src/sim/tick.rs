//! Fixed timestep simulation tick
//!
//! One tick per rendered frame, paced by the driving loop — the core owns
//! no clock. Within a tick, mutation is strictly sequential: player, then
//! projectiles, then the fleet machine, then event resolution in a fixed
//! order (bullet hits, fleet exhaustion, ship hit).

use super::state::{GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Left-move key currently held
    pub left: bool,
    /// Right-move key currently held
    pub right: bool,
    /// Fire requested this tick (one-shot; the driver clears it after the
    /// tick, so one key press is one request)
    pub fire: bool,
}

/// What happened during one tick, for the audio and display collaborators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// A bullet actually left the ship (the audio cue)
    pub fired: bool,
    /// Invaders destroyed by bullets this tick
    pub invaders_destroyed: u32,
    /// The fleet was exhausted and a new level began
    pub fleet_cleared: bool,
    /// The ship was struck or the fleet breached the bottom edge
    pub ship_hit: bool,
    /// This tick ended the session
    pub game_over: bool,
}

/// Advance the simulation by one fixed timestep.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickEvents {
    let mut events = TickEvents::default();

    match state.phase {
        // Terminal: the final frame stays frozen until a reset.
        GamePhase::GameOver => return events,
        // The post-life-loss stall freezes gameplay and input alike.
        GamePhase::Respawn { ticks_left } => {
            state.phase = if ticks_left <= 1 {
                GamePhase::Running
            } else {
                GamePhase::Respawn {
                    ticks_left: ticks_left - 1,
                }
            };
            return events;
        }
        GamePhase::Running => {}
    }

    state.time_ticks += 1;

    // Player
    state.ship.set_intent(input.left, input.right);
    state.ship.advance(dt, &state.config);
    if input.fire && state.ship.fire(&state.config) {
        events.fired = true;
        log::debug!("bullet away ({} in flight)", state.ship.bullets.len());
    }

    // Projectiles
    state.ship.bullets.advance(dt);

    // Fleet machine: edge flip first, then the march, then the contact
    // predicates. A direct hit short-circuits the breach check.
    state.fleet.check_edges(&state.config);
    state.fleet.advance(dt);
    let ship_rect = state.ship.rect();
    let ship_hit = state.fleet.first_ship_contact(&ship_rect).is_some()
        || state.fleet.first_breach(&state.config).is_some();

    // Resolution, fixed order.
    let destroyed = resolve_bullet_hits(state);
    if destroyed > 0 {
        events.invaders_destroyed = destroyed;
        state.score += state.config.points_per_invader * u64::from(destroyed);
        log::debug!("{destroyed} invaders down, score {}", state.score);
    }

    if state.fleet.is_empty() {
        state.ship.bullets.clear();
        state.fleet.spawn_row(&state.config);
        state.fleet.escalate(&state.config);
        state.level += 1;
        events.fleet_cleared = true;
        log::info!(
            "fleet cleared: level {} at speed {:.1}",
            state.level,
            state.fleet.motion.speed
        );
    }

    if ship_hit {
        events.ship_hit = true;
        resolve_ship_hit(state, dt, &mut events);
    }

    events
}

/// Collect the explicit (bullet, invader) collision pairs — first match per
/// bullet in spawn order, each invader struck at most once — then remove
/// both members of every pair. Returns the pair count.
fn resolve_bullet_hits(state: &mut GameState) -> u32 {
    let GameState { ship, fleet, .. } = state;
    if ship.bullets.is_empty() || fleet.is_empty() {
        return 0;
    }

    let mut spent = vec![false; ship.bullets.len()];
    let mut struck = vec![false; fleet.len()];
    let mut pairs = 0u32;

    for (bi, bullet) in ship.bullets.iter().enumerate() {
        let rect = bullet.rect();
        let target = fleet
            .iter()
            .enumerate()
            .find(|(ii, invader)| !struck[*ii] && rect.intersects(&invader.rect()));
        if let Some((ii, _)) = target {
            spent[bi] = true;
            struck[ii] = true;
            pairs += 1;
        }
    }

    if pairs > 0 {
        ship.bullets.remove_spent(&spent);
        fleet.remove_struck(&struck);
    }
    pairs
}

/// A ship hit spends a life. With lives left, the field is rebuilt and the
/// whole loop stalls briefly; at zero the session ends in place.
fn resolve_ship_hit(state: &mut GameState, dt: f32, events: &mut TickEvents) {
    state.lives = state.lives.saturating_sub(1);
    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        events.game_over = true;
        log::info!(
            "game over: score {} at level {}",
            state.score,
            state.level
        );
        return;
    }

    state.ship.bullets.clear();
    state.fleet.clear();
    state.fleet.spawn_row(&state.config);
    state.ship.center(&state.config);
    state.ship.set_intent(false, false);
    let ticks_left = (state.config.respawn_pause / dt).ceil().max(1.0) as u32;
    state.phase = GamePhase::Respawn { ticks_left };
    log::info!("ship down, {} lives left", state.lives);
}
