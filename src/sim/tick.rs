//! Frame-stepped simulation tick
//!
//! Order per tick: counters, panic, fade, effect expiry, crash sequence,
//! deferred timers, movement, level rules, clamp/wrap.

use glam::Vec2;

use super::effects::{FadeDirection, FadeStep};
use super::input::{detect_panic, jump_held, read_intent};
use super::layout::{self, CHEAT_TOLERANCE};
use super::levels::{self, CHEATER};
use super::physics::{step_platformer, step_top_down};
use super::state::{GameState, Level, Stage};
use crate::consts::*;
use crate::Millis;

/// Advance the session by one frame
///
/// `now` is the wall-clock time of this tick, `dt` the host's elapsed
/// milliseconds since the previous one.
pub fn tick(state: &mut GameState, now: Millis, dt: f32) {
    if state.paused || state.show_results() {
        return;
    }

    state.level_time += dt;
    state.time_played = now.saturating_sub(state.session_started) / 1000;

    // Panic (no player on the crash screen)
    state.panic_active =
        state.current_level() != Level::Crash && detect_panic(&state.input.keys);
    if state.panic_active {
        state.panic_angle += state.tuning.panic_spin;
    }

    // Fading out freezes gameplay; reaching black runs the pending action
    match state.effects.fade.step(state.tuning.fade_step) {
        FadeStep::Hold => return,
        FadeStep::Completed(action) => {
            if let Some(action) = action {
                state.apply(action, now);
            }
            return;
        }
        FadeStep::Continue => {}
    }

    state.effects.expire(now);

    if let Stage::Crash(crash) = &mut state.stage {
        if now.saturating_sub(crash.started) > state.tuning.crash_duration_ms {
            crash.show_results = true;
            log::info!(
                "Results: {}s played, {} deaths, choice {:?}",
                state.time_played,
                state.death_count,
                state.player_choice
            );
        }
        return;
    }

    run_deferred(state, now);
    move_player(state);
    levels::update_level(state, now);
    clamp_or_wrap(state, now);
}

/// Start the fade for a due timer once the level is waiting on one
fn run_deferred(state: &mut GameState, now: Millis) {
    if !state.transitioning || !state.effects.fade.is_idle() {
        return;
    }
    if let Some(timer) = state.effects.timers.pop_due(now) {
        log::debug!("Deferred {:?} fired", timer.purpose);
        state
            .effects
            .start_fade(FadeDirection::Out, Some(timer.action));
    }
}

fn move_player(state: &mut GameState) {
    let keys = &state.input.keys;
    let mut intent = read_intent(keys);
    if let Stage::Maze(maze) = &state.stage
        && maze.controls_inverted
    {
        intent = -intent;
    }
    if state.panic_active {
        return;
    }

    let jump = jump_held(keys);
    let tuning = state.tuning;
    match &mut state.stage {
        Stage::Doors(platformer) => step_platformer(
            &mut state.player,
            &mut platformer.on_ground,
            intent.x,
            jump,
            &layout::PLATFORMS,
            &tuning,
        ),
        Stage::Crash(_) => {}
        _ => step_top_down(&mut state.player, intent, tuning.player_speed),
    }
}

/// Keep the player inside the representable field
///
/// Level 1 wraps the left edge and treats a right-edge overshoot as cheating;
/// the platformer clamps sides only; other top-down levels clamp all edges.
fn clamp_or_wrap(state: &mut GameState, now: Millis) {
    let max_x = FIELD_W - PLAYER_SIZE;
    let max_y = FIELD_H - PLAYER_SIZE;
    let pos = &mut state.player.pos;

    match state.stage.level() {
        Level::Wall => {
            if pos.x < -PLAYER_SIZE {
                pos.x = FIELD_W;
            }
            pos.y = pos.y.clamp(0.0, max_y);
            if pos.x > FIELD_W + CHEAT_TOLERANCE {
                *pos = Vec2::new(FIELD_W / 2.0, FIELD_H / 2.0);
                log::info!("Anti-cheat: player overshot the right edge");
                state.effects.play(&CHEATER, now);
            }
        }
        Level::Doors => pos.x = pos.x.clamp(0.0, max_x),
        Level::Crash => {}
        Level::Coin | Level::Maze => {
            pos.x = pos.x.clamp(0.0, max_x);
            pos.y = pos.y.clamp(0.0, max_y);
        }
    }
}
