//! Input snapshot and intent/panic classification
//!
//! The host owns key capture; the simulation only reads which key
//! identifiers are currently held.

use std::collections::HashMap;

use glam::Vec2;

/// Logical movement direction, each reachable through two keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Key identifiers that map to this direction
    pub fn aliases(self) -> [&'static str; 2] {
        match self {
            Direction::Up => ["ArrowUp", "w"],
            Direction::Down => ["ArrowDown", "s"],
            Direction::Left => ["ArrowLeft", "a"],
            Direction::Right => ["ArrowRight", "d"],
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Extra jump key for the platformer (up aliases also jump)
pub const JUMP_KEY: &str = " ";

/// Key identifier -> pressed state
#[derive(Debug, Clone, Default)]
pub struct Keys {
    pressed: HashMap<String, bool>,
}

impl Keys {
    pub fn set(&mut self, key: &str, down: bool) {
        self.pressed.insert(key.to_string(), down);
    }

    pub fn press(&mut self, key: &str) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: &str) {
        self.set(key, false);
    }

    pub fn release_all(&mut self) {
        self.pressed.clear();
    }

    /// Unknown identifiers are never held
    pub fn is_down(&self, key: &str) -> bool {
        self.pressed.get(key).copied().unwrap_or(false)
    }

    pub fn held(&self, dir: Direction) -> bool {
        dir.aliases().iter().any(|k| self.is_down(k))
    }

    /// Press or release the primary key of a direction
    pub fn set_direction(&mut self, dir: Direction, down: bool) {
        self.set(dir.aliases()[0], down);
    }
}

/// Everything the host writes into the state between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keys: Keys,
    /// Mouse position in playfield coordinates (0..800 x 0..600)
    pub mouse: Vec2,
}

/// Movement intent in {-1, 0, 1} per axis
pub fn read_intent(keys: &Keys) -> Vec2 {
    let mut intent = Vec2::ZERO;
    if keys.held(Direction::Left) {
        intent.x -= 1.0;
    }
    if keys.held(Direction::Right) {
        intent.x += 1.0;
    }
    if keys.held(Direction::Up) {
        intent.y -= 1.0;
    }
    if keys.held(Direction::Down) {
        intent.y += 1.0;
    }
    intent
}

/// Panic: all four directions held at once
pub fn detect_panic(keys: &Keys) -> bool {
    Direction::ALL.iter().all(|&d| keys.held(d))
}

pub fn jump_held(keys: &Keys) -> bool {
    keys.held(Direction::Up) || keys.is_down(JUMP_KEY)
}
