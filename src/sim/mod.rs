//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic for a
//! given seed and clock sequence:
//! - Time comes in as an argument, never read from the system
//! - Seeded RNG only (control re-rolls draw from `GameState::rng`)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod input;
pub mod layout;
pub mod levels;
pub mod physics;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{Rect, intersects};
pub use effects::{Effects, FadeDirection, PendingAction, TimerPurpose};
pub use input::{Direction, InputState, Keys};
pub use state::{Door, GameState, Level, Stage, create_state};
pub use tick::tick;
