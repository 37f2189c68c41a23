//! Read-only snapshot for the shell UI around the playfield

use serde::Serialize;

use crate::sim::state::{Door, GameState};

/// What the HUD and the results chrome are allowed to see
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HudSnapshot {
    pub level: u8,
    pub time_played: u64,
    pub death_count: u32,
    pub player_choice: Option<Door>,
    pub show_results: bool,
    /// 0..=100, drains with progress and time
    pub sanity: u8,
}

impl HudSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let level = state.current_level().number();
        Self {
            level,
            time_played: state.time_played,
            death_count: state.death_count,
            player_choice: state.player_choice,
            show_results: state.show_results(),
            sanity: sanity(level, state.time_played),
        }
    }
}

/// Sanity meter: 18 points per level cleared and 1 per 8 seconds played
pub fn sanity(level: u8, time_played: u64) -> u8 {
    let drain = u64::from(level.saturating_sub(1)) * 18 + time_played / 8;
    100u64.saturating_sub(drain) as u8
}
