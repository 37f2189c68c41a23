//! Reality Shift headless runner
//!
//! Plays one full session with the autopilot against a simulated clock and
//! prints the final HUD snapshot as JSON.
//!
//! Environment:
//! - `REALITY_SHIFT_TUNING`: path to a JSON tuning file
//! - `REALITY_SHIFT_SEED`: gameplay RNG seed (random if unset)
//! - `RUST_LOG`: log filter (default `info`)

use std::process::ExitCode;

use reality_shift::consts::DEFAULT_FRAME_MS;
use reality_shift::platform::ManualClock;
use reality_shift::sim::Autopilot;
use reality_shift::{Session, Tuning};

/// Upper bound on simulated frames (about ten minutes at 60 fps)
const MAX_FRAMES: u32 = 36_000;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Reality Shift (headless) starting...");

    let tuning = match std::env::var("REALITY_SHIFT_TUNING") {
        Ok(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Bad tuning file: {e}");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => Tuning::default(),
    };

    let seed = match std::env::var("REALITY_SHIFT_SEED") {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(seed) => seed,
            Err(e) => {
                log::error!("REALITY_SHIFT_SEED must be an unsigned integer: {e}");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => rand::random(),
    };

    let clock = ManualClock::new(0);
    let mut session = match Session::with_clock(clock.clone(), seed, tuning) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Bad tuning: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut pilot = Autopilot::new();
    let mut timestamp = 0.0;

    for _ in 0..MAX_FRAMES {
        pilot.drive(session.state_mut());
        clock.advance(DEFAULT_FRAME_MS as u64);
        timestamp += f64::from(DEFAULT_FRAME_MS);
        session.frame(timestamp);
        if session.state().show_results() {
            break;
        }
    }

    let hud = session.hud();
    if !hud.show_results {
        log::warn!("Gave up after {MAX_FRAMES} frames on level {}", hud.level);
    }
    match serde_json::to_string_pretty(&hud) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Could not encode the report: {e}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
