//! Scene builders: state snapshot to draw commands
//!
//! Reading only. The one source of randomness is the caller's cosmetic RNG,
//! used for glitch shake, glitch bars and the panic flicker.

use glam::Vec2;
use rand::Rng;

use super::commands::{Frame, TextAlign, TextStyle};
use crate::consts::*;
use crate::sim::collision::Rect;
use crate::sim::layout;
use crate::sim::state::{CoinChase, CrashSequence, Door, GameState, Stage};
use crate::{Color, Millis, palette};

/// Glitch shake amplitude (each axis, pixels)
const SHAKE: f32 = 4.0;
const GLITCH_BARS: usize = 5;

/// Build the frame for `state` as seen at `now`
pub fn draw(state: &GameState, now: Millis, rng: &mut impl Rng) -> Frame {
    let mut frame = Frame::new();
    let glitching = state.effects.glitch_active();
    if glitching {
        frame.offset = Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0 * SHAKE,
            (rng.random::<f32>() - 0.5) * 2.0 * SHAKE,
        );
    }

    frame.fill(Rect::new(0.0, 0.0, FIELD_W, FIELD_H), palette::BACKGROUND);

    match &state.stage {
        Stage::Crash(crash) => {
            if crash.show_results {
                draw_results(&mut frame, state);
            } else {
                draw_crash(&mut frame, state, crash, now);
            }
        }
        stage => {
            match stage {
                Stage::Wall => draw_wall(&mut frame),
                Stage::Coin(chase) => draw_coin(&mut frame, chase, now),
                Stage::Doors(_) => draw_doors(&mut frame),
                Stage::Maze(maze) => draw_maze(&mut frame, maze.controls_inverted),
                Stage::Crash(_) => {}
            }
            draw_player(&mut frame, state, rng);
            draw_banner(&mut frame, state);
            if state.panic_active {
                frame.text(
                    "\u{26A0} PANIC DETECTED \u{26A0}",
                    Vec2::new(FIELD_W / 2.0, 50.0),
                    TextStyle::new(28.0, palette::TRAP).bold(),
                );
            }
        }
    }

    let alpha = state.effects.fade.alpha;
    if alpha > 0.0 {
        let [r, g, b, _] = palette::BLACK;
        frame.fill(Rect::new(0.0, 0.0, FIELD_W, FIELD_H), [r, g, b, alpha]);
    }

    if glitching {
        for _ in 0..GLITCH_BARS {
            let y = rng.random::<f32>() * FIELD_H;
            let h = rng.random::<f32>() * 6.0 + 2.0;
            let color = if rng.random_bool(0.5) {
                palette::GLITCH_CYAN
            } else {
                palette::GLITCH_RED
            };
            frame.fill(Rect::new(0.0, y, FIELD_W, h), color);
        }
    }

    frame
}

/// Whether a click at `(x, y)` lands on the "play again" control
///
/// Only live on the results screen.
pub fn hit_test_replay_control(state: &GameState, x: f32, y: f32) -> bool {
    state.show_results() && layout::REPLAY_BUTTON.contains_point(x, y)
}

fn caption(frame: &mut Frame, text: &str, y: f32, color: Color) {
    frame.text(text, Vec2::new(FIELD_W / 2.0, y), TextStyle::new(16.0, color));
}

fn draw_wall(frame: &mut Frame) {
    frame.fill(layout::DIVIDER, palette::WALL);
    frame.glow_fill(layout::WALL_GOAL, palette::GOAL, 20.0);
    caption(
        frame,
        "Use Arrow Keys / WASD. Reach the green zone.",
        30.0,
        palette::TEXT,
    );
}

fn draw_coin(frame: &mut Frame, chase: &CoinChase, now: Millis) {
    caption(frame, "Collect the coin to proceed.", 30.0, palette::TEXT);
    if chase.complete {
        return;
    }

    let center = chase.coin + Vec2::splat(COIN_SIZE / 2.0);
    frame.circle(center, 12.0, palette::COIN, 15.0);

    let elapsed = (now.saturating_sub(chase.chase_started) as f32 / 1000.0).min(15.0);
    frame.text(
        format!("{elapsed:.1}s"),
        Vec2::new(FIELD_W - 20.0, 30.0),
        TextStyle::new(14.0, palette::ALERT).align(TextAlign::Right),
    );
}

fn draw_doors(frame: &mut Frame) {
    for platform in &layout::PLATFORMS {
        frame.fill(*platform, palette::WALL);
    }
    for (door, color, label) in [
        (Door::Red, palette::DOOR_RED, "DANGER"),
        (Door::Blue, palette::DOOR_BLUE, "SAFE"),
    ] {
        let rect = door.rect();
        frame.glow_fill(rect, color, 15.0);
        frame.text(
            label,
            rect.center() + Vec2::new(0.0, 5.0),
            TextStyle::new(14.0, palette::TEXT).bold(),
        );
    }
    caption(
        frame,
        "Your choices matter. Choose wisely.",
        30.0,
        palette::ALERT,
    );
}

fn draw_maze(frame: &mut Frame, inverted: bool) {
    for wall in &layout::MAZE_WALLS {
        frame.fill(*wall, palette::WALL);
    }
    frame.glow_fill(layout::MAZE_GOAL, palette::GOAL, 20.0);
    frame.text(
        "Navigate the maze.",
        Vec2::new(30.0, FIELD_H - 35.0),
        TextStyle::new(14.0, palette::TEXT).align(TextAlign::Left),
    );
    if inverted {
        frame.text(
            "[CONTROLS: ???]",
            Vec2::new(FIELD_W - 30.0, FIELD_H - 35.0),
            TextStyle::new(12.0, palette::TRAP).align(TextAlign::Right),
        );
    }
}

fn draw_player(frame: &mut Frame, state: &GameState, rng: &mut impl Rng) {
    let rect = state.player.rect();
    if state.panic_active {
        let color = if rng.random_bool(0.5) {
            palette::PLAYER
        } else {
            palette::TRAP
        };
        frame.rotated(rect, state.panic_angle, color, 15.0);
    } else {
        frame.glow_fill(rect, palette::PLAYER, 15.0);
    }
}

fn draw_banner(frame: &mut Frame, state: &GameState) {
    let Some(overlay) = &state.effects.overlay else {
        return;
    };
    frame.fill(
        Rect::new(0.0, FIELD_H / 2.0 - 40.0, FIELD_W, 80.0),
        palette::BANNER_STRIP,
    );
    frame.text(
        overlay.text.clone(),
        Vec2::new(FIELD_W / 2.0, FIELD_H / 2.0),
        TextStyle::new(20.0, overlay.color),
    );
}

fn draw_crash(frame: &mut Frame, state: &GameState, crash: &CrashSequence, now: Millis) {
    frame.fill(Rect::new(0.0, 0.0, FIELD_W, FIELD_H), palette::BLACK);

    frame.text(
        "Aw, Snap!",
        Vec2::new(FIELD_W / 2.0, 160.0),
        TextStyle::new(22.0, palette::TEXT).bold(),
    );
    let muted = TextStyle::new(14.0, palette::MUTED);
    for (line, y) in [
        ("Something went wrong while displaying this game.", 210.0),
        ("Error code: STATUS_MEMORY_OVERFLOW", 240.0),
        ("ERR_REALITY_SHIFT_0x4E6F7065", 270.0),
    ] {
        frame.text(line, Vec2::new(FIELD_W / 2.0, y), muted);
    }

    frame.text(
        "Are you mad?",
        state.input.mouse + Vec2::new(15.0, 5.0),
        TextStyle::new(13.0, palette::ALERT).align(TextAlign::Left),
    );

    let elapsed = now.saturating_sub(crash.started) as f32 / 1000.0;
    let remaining = (state.tuning.crash_duration_ms as f32 / 1000.0 - elapsed).max(0.0);
    if remaining < 5.0 {
        frame.text(
            format!("...{remaining:.1}s"),
            Vec2::new(FIELD_W / 2.0, FIELD_H - 20.0),
            TextStyle::new(11.0, palette::WALL),
        );
    }
}

fn draw_results(frame: &mut Frame, state: &GameState) {
    frame.fill(Rect::new(0.0, 0.0, FIELD_W, FIELD_H), palette::BLACK);
    let cx = FIELD_W / 2.0;
    let at = |y: f32| Vec2::new(cx, y);

    frame.text(
        "REALITY SHIFT",
        at(80.0),
        TextStyle::new(28.0, palette::PLAYER).bold(),
    );
    frame.text(
        "\u{2014} FINAL REPORT \u{2014}",
        at(100.0),
        TextStyle::new(14.0, palette::ALERT),
    );

    let body = TextStyle::new(16.0, palette::TEXT);
    frame.text(
        format!("You played for {} seconds.", state.time_played),
        at(150.0),
        body,
    );
    frame.text(
        format!("Deaths/failures: {}", state.death_count),
        at(185.0),
        body,
    );

    let verdict = TextStyle::new(14.0, palette::ALERT);
    let lines: &[&str] = match state.player_choice {
        Some(Door::Red) => &[
            "You chose the Red Door to be rebellious.",
            "It led to the exact same code as the Blue Door.",
        ],
        Some(Door::Blue) => &[
            "You chose the Blue Door to be safe.",
            "It led to the exact same code as the Red Door.",
        ],
        None => &["You somehow avoided both doors. Impressive."],
    };
    for (i, line) in lines.iter().enumerate() {
        frame.text(*line, at(235.0 + 24.0 * i as f32), verdict);
    }

    let closing = TextStyle::new(18.0, palette::GOAL);
    frame.text("Agency is an illusion.", at(314.0), closing);
    frame.text("Thanks for playing!", at(344.0), closing);

    let button = layout::REPLAY_BUTTON;
    frame.stroke(button, palette::PLAYER, 2.0);
    frame.text(
        "[ PLAY AGAIN ]",
        at(button.y + button.h / 2.0 + 6.0),
        TextStyle::new(16.0, palette::PLAYER).bold(),
    );
}
