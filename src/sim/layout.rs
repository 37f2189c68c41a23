//! Fixed level geometry

use glam::Vec2;

use super::collision::Rect;
use super::state::Level;
use crate::consts::{COIN_SIZE, FIELD_H, FIELD_W, PLAYER_SIZE};

// --- Level 1 ---

/// Vertical wall splitting the field
pub const DIVIDER: Rect = Rect::new(FIELD_W / 2.0 - 15.0, 0.0, 30.0, FIELD_H);
pub const WALL_GOAL: Rect = Rect::new(FIELD_W - 70.0, FIELD_H / 2.0 - 20.0, 40.0, 40.0);
/// How far past the right edge the player may drift before anti-cheat trips
pub const CHEAT_TOLERANCE: f32 = PLAYER_SIZE;

// --- Level 2 ---

pub const COIN_SPAWN: Vec2 = Vec2::new(
    FIELD_W / 2.0 - COIN_SIZE / 2.0,
    FIELD_H / 2.0 - COIN_SIZE / 2.0,
);
/// Coin leaving this box is reflected through the field center
pub const COIN_TRIGGER: Rect = Rect::new(20.0, 20.0, FIELD_W - 60.0, FIELD_H - 60.0);
/// Box the reflected coin is clamped into
pub const COIN_RESPAWN: Rect = Rect::new(40.0, 40.0, FIELD_W - 100.0, FIELD_H - 100.0);

// --- Level 3 ---

const FLOOR_H: f32 = 30.0;

pub const PLATFORMS: [Rect; 3] = [
    Rect::new(0.0, FIELD_H - FLOOR_H, FIELD_W, FLOOR_H),
    Rect::new(200.0, 430.0, 120.0, 20.0),
    Rect::new(400.0, 350.0, 120.0, 20.0),
];
pub const DOOR_RED: Rect = Rect::new(200.0, FIELD_H - FLOOR_H - 100.0, 80.0, 100.0);
pub const DOOR_BLUE: Rect = Rect::new(FIELD_W - 280.0, FIELD_H - FLOOR_H - 100.0, 80.0, 100.0);

// --- Level 4 ---

const T: f32 = 20.0;

pub const MAZE_WALLS: [Rect; 16] = [
    // Outer walls
    Rect::new(0.0, 0.0, FIELD_W, T),
    Rect::new(0.0, FIELD_H - T, FIELD_W, T),
    Rect::new(0.0, 0.0, T, FIELD_H),
    Rect::new(FIELD_W - T, 0.0, T, FIELD_H),
    // Inner walls
    Rect::new(120.0, T, T, 200.0),
    Rect::new(120.0, 280.0, T, 200.0),
    Rect::new(240.0, 100.0, T, 300.0),
    Rect::new(240.0, 480.0, 200.0, T),
    Rect::new(360.0, T, T, 180.0),
    Rect::new(360.0, 280.0, T, 150.0),
    Rect::new(360.0, 280.0, 150.0, T),
    Rect::new(480.0, 150.0, T, 250.0),
    Rect::new(480.0, 480.0, T, 120.0),
    Rect::new(560.0, T, T, 350.0),
    Rect::new(560.0, 440.0, 160.0, T),
    Rect::new(660.0, 200.0, T, 240.0),
];
pub const MAZE_GOAL: Rect = Rect::new(FIELD_W - 70.0, FIELD_H / 2.0 - 20.0, 40.0, 40.0);

// --- Results ---

/// "Play again" control on the results screen
pub const REPLAY_BUTTON: Rect = Rect::new(FIELD_W / 2.0 - 100.0, 399.0, 200.0, 44.0);

/// Where the player appears when a level starts (`None`: keep position)
pub fn spawn_point(level: Level) -> Option<Vec2> {
    match level {
        Level::Wall => Some(Vec2::new(60.0, FIELD_H / 2.0 - PLAYER_SIZE / 2.0)),
        Level::Coin => Some(Vec2::new(60.0, 60.0)),
        Level::Doors => Some(Vec2::new(60.0, FIELD_H - FLOOR_H - PLAYER_SIZE)),
        Level::Maze => Some(Vec2::new(40.0, FIELD_H / 2.0)),
        Level::Crash => None,
    }
}
