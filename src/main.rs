//! Nova Assault demo driver
//!
//! Headless stand-in for a real front end: a fixed-rate frame clock, a
//! scripted input source, and log output where the render and audio
//! collaborators would plug in. The core never paces or sleeps on its own.

use std::env;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use nova_assault::Config;
use nova_assault::consts::SIM_DT;
use nova_assault::sim::{GameState, Snapshot, TickInput, tick};

/// Tick budget for the demo run (two minutes at 60 Hz).
const MAX_TICKS: u64 = 2 * 60 * 60;

fn main() -> ExitCode {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => match Config::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("unusable config: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let mut state = match GameState::new(config) {
        Ok(state) => state,
        Err(err) => {
            log::error!("unusable config: {err}");
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "Nova Assault demo: {} invaders, {} lives, {}x{} field",
        state.fleet.len(),
        state.lives,
        state.config.screen_w,
        state.config.screen_h
    );

    let frame = Duration::from_secs_f32(SIM_DT);
    let mut ticks = 0u64;

    // The quit signal is a tick budget here; a real input collaborator would
    // raise it from a key event. Either way it lands between ticks.
    while state.is_active() && ticks < MAX_TICKS {
        let frame_start = Instant::now();

        // Scripted input collaborator: sweep the field, squeeze the trigger
        // every 12 frames (a fire request is one key press).
        let input = TickInput {
            left: (ticks / 90) % 2 == 1,
            right: (ticks / 90) % 2 == 0,
            fire: ticks % 12 == 0,
        };

        let events = tick(&mut state, &input, SIM_DT);

        // Audio collaborator seam: the only sound the core ever asks for.
        if events.fired {
            log::debug!("sfx: laser");
        }
        if events.fleet_cleared {
            log::info!("fleet cleared, level {} begins", state.level);
        }
        if events.ship_hit && !events.game_over {
            log::info!("ship lost, {} lives remain", state.lives);
        }

        // Render collaborator seam: one HUD line per second.
        if ticks % 60 == 0 {
            let snap = Snapshot::capture(&state);
            log::info!(
                "t={:>5} score={:<6} lives={} level={} invaders={:>2} bullets={}",
                ticks,
                snap.score,
                snap.lives,
                snap.level,
                snap.invaders.len(),
                snap.bullets.len()
            );
        }

        ticks += 1;

        // External frame clock.
        if let Some(rest) = frame.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    let snap = Snapshot::capture(&state);
    if snap.active {
        log::info!("demo budget reached after {ticks} ticks");
    } else {
        log::info!("game over after {ticks} ticks");
    }
    log::info!("final: score {} at level {}", snap.score, snap.level);
    ExitCode::SUCCESS
}
