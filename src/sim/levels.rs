//! Per-level rules
//!
//! Each level checks its own win condition once per tick. A win sets
//! `transitioning`, which keeps the trigger from firing again until the next
//! `init_level`.

use glam::Vec2;
use rand::Rng;

use super::collision::{push_out_horizontal, push_out_min_axis};
use super::effects::{Cue, PendingAction, TimerPurpose};
use super::layout;
use super::state::{CoinChase, Door, GameState, Level, Maze, Stage};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{Millis, palette};

// Banner and glitch timings for every level event

pub const WALL_WIN: Cue = Cue {
    text: "Thinking outside the box... literally.",
    color: palette::GOAL,
    banner_ms: 2_000,
    glitch_ms: Some(600),
};
/// Level 1 right-edge overshoot
pub const CHEATER: Cue = Cue {
    text: "Nice try, cheater.",
    color: palette::ALERT,
    banner_ms: 1_500,
    glitch_ms: None,
};
pub const COIN_WIN: Cue = Cue {
    text: "ACHIEVEMENT: Sunk Cost Fallacy. We'll let you pass.",
    color: palette::ALERT,
    banner_ms: 3_000,
    glitch_ms: Some(800),
};
pub const DOOR_WIN: Cue = Cue {
    text: "Choice recorded.",
    color: palette::ALERT,
    banner_ms: 2_000,
    glitch_ms: Some(1_200),
};
/// First control inversion in the maze
pub const INVERSION: Cue = Cue {
    text: "\u{26A0} SYSTEM OPTIMIZATION \u{26A0}",
    color: palette::ALERT,
    banner_ms: 2_000,
    glitch_ms: Some(500),
};
pub const MAZE_WIN: Cue = Cue {
    text: "Maze complete... but at what cost?",
    color: palette::GOAL,
    banner_ms: 2_500,
    glitch_ms: Some(1_000),
};

/// Run the active level's rules (levels 1-4; the crash screen is handled by the tick)
pub(crate) fn update_level(state: &mut GameState, now: Millis) {
    match state.current_level() {
        Level::Wall => update_wall(state, now),
        Level::Coin => update_coin(state, now),
        Level::Doors => update_doors(state, now),
        Level::Maze => update_maze(state, now),
        Level::Crash => {}
    }
}

/// Level 1: the divider blocks the direct route; the goal is reached by
/// wrapping round the left edge.
fn update_wall(state: &mut GameState, now: Millis) {
    state.player.pos = push_out_horizontal(state.player.pos, PLAYER_SIZE, &layout::DIVIDER);

    if state.transitioning || !state.player.rect().intersects(&layout::WALL_GOAL) {
        return;
    }

    state.transitioning = true;
    state.effects.play(&WALL_WIN, now);
    state.fade_to(Level::Coin);
}

/// Level 2: the coin flees and cannot be cornered; the level ends on a timer.
fn update_coin(state: &mut GameState, now: Millis) {
    let GameState {
        stage,
        player,
        effects,
        tuning,
        transitioning,
        ..
    } = state;
    let Stage::Coin(chase) = stage else {
        return;
    };
    if chase.complete {
        return;
    }

    flee(chase, player.pos, tuning.coin_flee_radius, tuning.coin_speed());

    let elapsed = now.saturating_sub(chase.chase_started);
    if elapsed >= tuning.coin_chase_ms && !*transitioning {
        chase.complete = true;
        *transitioning = true;
        log::info!("Coin chase timed out after {elapsed}ms");
        effects.play(&COIN_WIN, now);
        effects.timers.arm(
            TimerPurpose::CoinChaseExit,
            now + tuning.coin_exit_delay_ms,
            PendingAction::EnterLevel(Level::Doors),
        );
    }
}

/// Move the coin directly away from the player when it is too close
///
/// Leaving the trigger box teleports it to the point reflected through the
/// field center, clamped back into the respawn box.
pub fn flee(chase: &mut CoinChase, player: Vec2, radius: f32, speed: f32) {
    let away = chase.coin - player;
    if away.length() >= radius {
        return;
    }
    let angle = away.y.atan2(away.x);
    chase.coin += Vec2::new(angle.cos(), angle.sin()) * speed;

    let trigger = layout::COIN_TRIGGER;
    let c = chase.coin;
    if c.x < trigger.x || c.x > trigger.right() || c.y < trigger.y || c.y > trigger.bottom() {
        let respawn = layout::COIN_RESPAWN;
        let reflected = Vec2::new(FIELD_W - c.x, FIELD_H - c.y);
        chase.coin = Vec2::new(
            reflected.x.clamp(respawn.x, respawn.right()),
            reflected.y.clamp(respawn.y, respawn.bottom()),
        );
    }
}

/// Level 3: either door leads to level 4; the choice is remembered.
fn update_doors(state: &mut GameState, now: Millis) {
    if state.transitioning {
        return;
    }
    let player = state.player.rect();
    let Some(door) = [Door::Red, Door::Blue]
        .into_iter()
        .find(|d| player.intersects(&d.rect()))
    else {
        return;
    };

    if state.player_choice.is_none() {
        state.player_choice = Some(door);
        log::info!("Player chose the {door:?} door");
    }
    state.transitioning = true;
    state.effects.play(&DOOR_WIN, now);
    state.fade_to(Level::Maze);
}

/// Level 4: walls push out on the shallowest axis; controls flip on a timer.
fn update_maze(state: &mut GameState, now: Millis) {
    let GameState {
        stage,
        player,
        effects,
        tuning,
        transitioning,
        level_time,
        rng,
        ..
    } = state;
    let Stage::Maze(maze) = stage else {
        return;
    };

    if !maze.complete && roll_inversion(maze, *level_time, now, tuning, rng) {
        effects.play(&INVERSION, now);
    }

    for wall in &layout::MAZE_WALLS {
        player.pos = push_out_min_axis(player.pos, PLAYER_SIZE, wall);
    }

    if maze.complete || *transitioning || !player.rect().intersects(&layout::MAZE_GOAL) {
        return;
    }

    maze.complete = true;
    *transitioning = true;
    effects.play(&MAZE_WIN, now);
    effects.timers.arm(
        TimerPurpose::MazeExit,
        now + tuning.maze_exit_delay_ms,
        PendingAction::EnterLevel(Level::Crash),
    );
}

/// Flip controls at the start time, then re-roll them every interval
///
/// Returns true on the first (announced) inversion.
fn roll_inversion(
    maze: &mut Maze,
    level_time: f32,
    now: Millis,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> bool {
    if !maze.alert_shown {
        if level_time >= tuning.inversion_start_ms as f32 {
            maze.alert_shown = true;
            maze.controls_inverted = true;
            maze.last_swap = now;
            log::info!("Controls inverted");
            return true;
        }
        return false;
    }

    if now.saturating_sub(maze.last_swap) > tuning.inversion_interval_ms {
        maze.controls_inverted = rng.random_bool(0.5);
        maze.last_swap = now;
        log::debug!("Controls re-rolled: inverted={}", maze.controls_inverted);
    }
    false
}
