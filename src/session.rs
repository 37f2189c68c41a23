//! Frame driver
//!
//! Binds a clock, the gameplay state and the cosmetic RNG. Hosts call
//! `frame` (or `update` + `draw`) once per display frame and forward input
//! into `input_mut` between frames.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::DEFAULT_FRAME_MS;
use crate::hud::HudSnapshot;
use crate::platform::{Clock, SystemClock};
use crate::renderer::{self, Frame};
use crate::sim::input::InputState;
use crate::sim::{GameState, tick};
use crate::tuning::{Tuning, TuningError};

/// One playthrough plus the bits needed to drive it
pub struct Session<C: Clock = SystemClock> {
    clock: C,
    state: GameState,
    /// Glitch shake and panic flicker; never feeds back into `state`
    fx_rng: Pcg32,
    /// Host timestamp of the previous `frame` call
    last_frame: Option<f64>,
}

impl Session<SystemClock> {
    /// Real-time session with a random seed
    pub fn new() -> Self {
        let clock = SystemClock;
        let state = GameState::new(clock.now_ms(), rand::random());
        Self::build(clock, state)
    }
}

impl Default for Session<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Session<C> {
    /// Session on `clock`; fails if `tuning` does not validate
    pub fn with_clock(clock: C, seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        let state = GameState::with_tuning(clock.now_ms(), seed, tuning)?;
        log::info!("New session (seed {seed})");
        Ok(Self::build(clock, state))
    }

    fn build(clock: C, state: GameState) -> Self {
        Self {
            clock,
            state,
            fx_rng: Pcg32::seed_from_u64(rand::random()),
            last_frame: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.state.input
    }

    /// Advance one tick of `dt_ms` at the clock's current time
    pub fn update(&mut self, dt_ms: f32) {
        let now = self.clock.now_ms();
        tick(&mut self.state, now, dt_ms);
    }

    pub fn draw(&mut self) -> Frame {
        renderer::draw(&self.state, self.clock.now_ms(), &mut self.fx_rng)
    }

    /// Update and draw for a host frame stamped `timestamp_ms`
    ///
    /// The first frame (and any frame whose timestamp went backwards) uses the
    /// default frame length.
    pub fn frame(&mut self, timestamp_ms: f64) -> Frame {
        let dt = match self.last_frame {
            Some(last) if timestamp_ms >= last => (timestamp_ms - last) as f32,
            _ => DEFAULT_FRAME_MS,
        };
        self.last_frame = Some(timestamp_ms);
        self.update(dt);
        self.draw()
    }

    pub fn hit_test_replay_control(&self, x: f32, y: f32) -> bool {
        renderer::hit_test_replay_control(&self.state, x, y)
    }

    /// Forward a click; returns true if it restarted the session
    pub fn click(&mut self, x: f32, y: f32) -> bool {
        if !self.hit_test_replay_control(x, y) {
            return false;
        }
        self.restart();
        true
    }

    /// Replace the state wholesale with a fresh session
    pub fn restart(&mut self) {
        let seed = self.state.rng.random();
        let tuning = self.state.tuning;
        log::info!("Restarting session (seed {seed})");
        let now = self.clock.now_ms();
        self.state = GameState::with_tuning(now, seed, tuning).unwrap_or_else(|e| {
            log::warn!("Tuning went bad mid-session, restarting with defaults: {e}");
            GameState::new(now, seed)
        });
        self.last_frame = None;
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::capture(&self.state)
    }

    /// Shake the screen for the default glitch length (host events)
    pub fn glitch(&mut self) {
        let now = self.clock.now_ms();
        self.state.glitch(now);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.state.paused != paused {
            log::info!("{}", if paused { "Paused" } else { "Resumed" });
        }
        self.state.paused = paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualClock;
    use crate::sim::state::{Door, Level};
    use crate::sim::{Autopilot, Direction};

    const START: u64 = 1_000_000;

    fn manual_session(seed: u64) -> (ManualClock, Session<ManualClock>) {
        let clock = ManualClock::new(START);
        let session = Session::with_clock(clock.clone(), seed, Tuning::default()).unwrap();
        (clock, session)
    }

    /// Run the autopilot until the results screen, recording each level entered
    fn play_through(door: Door) -> (ManualClock, Session<ManualClock>, Vec<Level>) {
        let (clock, mut session) = manual_session(7);
        let mut pilot = Autopilot::with_door(door);
        let mut levels = vec![Level::Wall];

        for _ in 0..20_000 {
            pilot.drive(session.state_mut());
            clock.advance(16);
            session.update(16.0);

            let level = session.state().current_level();
            if levels.last() != Some(&level) {
                levels.push(level);
            }
            if session.state().show_results() {
                break;
            }
        }
        (clock, session, levels)
    }

    #[test]
    fn test_autopilot_plays_through_to_results() {
        let (clock, mut session, levels) = play_through(Door::Red);

        let state = session.state();
        assert!(state.show_results());
        assert_eq!(
            levels,
            vec![Level::Wall, Level::Coin, Level::Doors, Level::Maze, Level::Crash]
        );
        assert_eq!(state.player_choice, Some(Door::Red));
        assert_eq!(state.death_count, 0);
        assert_eq!(state.time_played, (clock.now_ms() - START) / 1000);

        let hud = session.hud();
        assert!(hud.show_results);
        assert_eq!(hud.level, 5);

        // Results are frozen
        let played = state.time_played;
        clock.advance(30_000);
        session.update(16.0);
        assert_eq!(session.state().time_played, played);
    }

    #[test]
    fn test_blue_door_run_records_blue() {
        let (clock, mut session, levels) = play_through(Door::Blue);

        let state = session.state();
        assert!(state.show_results());
        assert_eq!(levels.len(), 5);
        assert_eq!(state.player_choice, Some(Door::Blue));
        assert_eq!(state.time_played, (clock.now_ms() - START) / 1000);
        assert!(session.draw().contains_text("Blue Door to be safe"));
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let clock = ManualClock::new(START);
        let stalled_fade = Tuning {
            fade_step: 0.0,
            ..Tuning::default()
        };
        assert!(matches!(
            Session::with_clock(clock, 1, stalled_fade),
            Err(TuningError::NonPositive { field: "fade_step", .. })
        ));
    }

    #[test]
    fn test_restart_falls_back_when_tuning_was_broken() {
        let (_clock, mut session) = manual_session(1);
        session.state_mut().tuning.fade_step = f32::NAN;
        session.restart();
        assert_eq!(session.state().tuning, Tuning::default());
        assert_eq!(session.state().current_level(), Level::Wall);
    }

    #[test]
    fn test_first_frame_uses_default_dt() {
        let (_clock, mut session) = manual_session(1);
        session.frame(5_000.0);
        assert_eq!(session.state().level_time, DEFAULT_FRAME_MS);
        session.frame(5_033.0);
        assert_eq!(session.state().level_time, DEFAULT_FRAME_MS + 33.0);
    }

    #[test]
    fn test_pause_holds_counters() {
        let (clock, mut session) = manual_session(1);
        session.input_mut().keys.set_direction(Direction::Left, true);
        session.set_paused(true);
        for _ in 0..5 {
            clock.advance(16);
            session.update(16.0);
        }
        assert_eq!(session.state().level_time, 0.0);
        assert_eq!(session.state().player.pos.x, 60.0);

        session.set_paused(false);
        clock.advance(16);
        session.update(16.0);
        assert_eq!(session.state().player.pos.x, 56.5);
    }

    #[test]
    fn test_click_restarts_only_from_results() {
        let (clock, mut session) = manual_session(1);
        assert!(!session.click(400.0, 420.0));

        session.state_mut().init_level(Level::Crash, clock.now_ms());
        session.state_mut().player_choice = Some(Door::Blue);
        for _ in 0..700 {
            clock.advance(16);
            session.update(16.0);
        }
        assert!(session.state().show_results());
        assert!(!session.click(10.0, 10.0));
        assert!(session.click(400.0, 420.0));

        let state = session.state();
        assert_eq!(state.current_level(), Level::Wall);
        assert_eq!(state.player_choice, None);
        assert_eq!(state.session_started, clock.now_ms());
        assert_eq!(state.time_played, 0);
    }

    #[test]
    fn test_draw_reflects_current_level() {
        let (_clock, mut session) = manual_session(1);
        assert!(session.draw().contains_text("Reach the green zone"));
        let now = START;
        session.state_mut().init_level(Level::Doors, now);
        let frame = session.draw();
        assert!(frame.contains_text("DANGER"));
        assert!(frame.contains_text("SAFE"));
    }
}
