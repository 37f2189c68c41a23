//! Session state and core simulation types
//!
//! One `GameState` represents one playthrough. Level-specific fields live in
//! the `Stage` variant of the level that owns them, so maze data cannot exist
//! while the coin chase runs.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;
use thiserror::Error;

use super::collision::Rect;
use super::effects::{Effects, FadeDirection, PendingAction};
use super::input::InputState;
use super::layout;
use crate::Millis;
use crate::consts::*;
use crate::tuning::{Tuning, TuningError};

/// The five levels, in play order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Divided field, goal behind the wall
    Wall = 1,
    /// Coin that runs away
    Coin = 2,
    /// Platformer with two doors
    Doors = 3,
    /// Maze with unreliable controls
    Maze = 4,
    /// Fake crash, then results
    Crash = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level {0} does not exist (expected 1..=5)")]
    OutOfRange(u8),
}

impl Level {
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Following level; the crash screen has none
    pub fn next(self) -> Option<Level> {
        match self {
            Level::Wall => Some(Level::Coin),
            Level::Coin => Some(Level::Doors),
            Level::Doors => Some(Level::Maze),
            Level::Maze => Some(Level::Crash),
            Level::Crash => None,
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = LevelError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Level::Wall),
            2 => Ok(Level::Coin),
            3 => Ok(Level::Doors),
            4 => Ok(Level::Maze),
            5 => Ok(Level::Crash),
            _ => Err(LevelError::OutOfRange(n)),
        }
    }
}

/// Door picked in level 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Door {
    Red,
    Blue,
}

impl Door {
    pub fn rect(self) -> Rect {
        match self {
            Door::Red => layout::DOOR_RED,
            Door::Blue => layout::DOOR_BLUE,
        }
    }
}

/// The player square
#[derive(Debug, Clone, Copy, Default)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, PLAYER_SIZE)
    }
}

/// Level 2 sub-state
#[derive(Debug, Clone)]
pub struct CoinChase {
    /// Top-left corner of the coin
    pub coin: Vec2,
    pub chase_started: Millis,
    pub complete: bool,
}

/// Level 3 sub-state
#[derive(Debug, Clone)]
pub struct Platformer {
    pub on_ground: bool,
}

/// Level 4 sub-state
#[derive(Debug, Clone)]
pub struct Maze {
    pub controls_inverted: bool,
    pub last_swap: Millis,
    /// First inversion (and its banner) has happened
    pub alert_shown: bool,
    pub complete: bool,
}

/// Level 5 sub-state
#[derive(Debug, Clone)]
pub struct CrashSequence {
    pub started: Millis,
    pub show_results: bool,
}

/// Active level and the fields only that level uses
#[derive(Debug, Clone)]
pub enum Stage {
    Wall,
    Coin(CoinChase),
    Doors(Platformer),
    Maze(Maze),
    Crash(CrashSequence),
}

impl Stage {
    pub fn level(&self) -> Level {
        match self {
            Stage::Wall => Level::Wall,
            Stage::Coin(_) => Level::Coin,
            Stage::Doors(_) => Level::Doors,
            Stage::Maze(_) => Level::Maze,
            Stage::Crash(_) => Level::Crash,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub stage: Stage,
    pub player: Player,
    /// Host-written input snapshot (read-only to the simulation)
    pub input: InputState,
    /// Set once in level 3, kept until a new session
    pub player_choice: Option<Door>,
    /// Never incremented: no level can be lost
    pub death_count: u32,
    /// Whole seconds since the session started
    pub time_played: u64,
    /// Sum of tick dt since the level started (ms)
    pub level_time: f32,
    pub session_started: Millis,
    /// Set when a level's win fires; cleared by `init_level`
    pub transitioning: bool,
    pub paused: bool,
    pub effects: Effects,
    pub panic_active: bool,
    pub panic_angle: f32,
    /// Gameplay RNG (control inversion re-rolls)
    pub rng: Pcg32,
}

impl GameState {
    /// Create a fresh session at level 1
    pub fn new(now: Millis, seed: u64) -> Self {
        Self::build(now, seed, Tuning::default())
    }

    /// Create a session with custom balance; the tuning must pass `validate`
    pub fn with_tuning(now: Millis, seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(now, seed, tuning))
    }

    fn build(now: Millis, seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            tuning,
            stage: Stage::Wall,
            player: Player::default(),
            input: InputState::default(),
            player_choice: None,
            death_count: 0,
            time_played: 0,
            level_time: 0.0,
            session_started: now,
            transitioning: false,
            paused: false,
            effects: Effects::default(),
            panic_active: false,
            panic_angle: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.init_level(Level::Wall, now);
        state
    }

    pub fn current_level(&self) -> Level {
        self.stage.level()
    }

    /// Results screen reached (terminal)
    pub fn show_results(&self) -> bool {
        matches!(&self.stage, Stage::Crash(c) if c.show_results)
    }

    /// (Re)initialize a level: spawn point, sub-state, guards
    pub fn init_level(&mut self, level: Level, now: Millis) {
        log::info!("Entering level {}: {:?}", level.number(), level);

        self.level_time = 0.0;
        self.panic_active = false;
        self.transitioning = false;
        self.player.vel = Vec2::ZERO;
        if let Some(spawn) = layout::spawn_point(level) {
            self.player.pos = spawn;
        }

        self.stage = match level {
            Level::Wall => Stage::Wall,
            Level::Coin => Stage::Coin(CoinChase {
                coin: layout::COIN_SPAWN,
                chase_started: now,
                complete: false,
            }),
            Level::Doors => Stage::Doors(Platformer { on_ground: true }),
            Level::Maze => Stage::Maze(Maze {
                controls_inverted: false,
                last_swap: now,
                alert_shown: false,
                complete: false,
            }),
            Level::Crash => Stage::Crash(CrashSequence {
                started: now,
                show_results: false,
            }),
        };
    }

    /// Run an action handed back by a fade or a timer
    pub fn apply(&mut self, action: PendingAction, now: Millis) {
        match action {
            PendingAction::EnterLevel(level) => self.init_level(level, now),
        }
    }

    /// Glitch for the tuned default length
    pub fn glitch(&mut self, now: Millis) {
        self.effects
            .trigger_glitch(self.tuning.glitch_default_ms, now);
    }

    /// Fade to black, then enter `level`
    pub fn fade_to(&mut self, level: Level) {
        self.effects
            .start_fade(FadeDirection::Out, Some(PendingAction::EnterLevel(level)));
    }
}

/// Build the initial state for a new session
pub fn create_state(now: Millis, seed: u64) -> GameState {
    GameState::new(now, seed)
}
