//! Timed effects: banners, glitches, fades and deferred actions
//!
//! Nothing here schedules real timers. Every effect stores a timestamp (or a
//! per-tick ramp) and the tick compares it against "now" once per frame, so a
//! stalled driver delays them all uniformly.

use crate::{Color, Millis};

use super::state::Level;

/// Fade completion tolerance; keeps 25 steps of 0.04 at exactly 25 ticks
const FADE_EPSILON: f32 = 1e-4;

/// Action carried by a fade or a deferred timer, applied by the tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    EnterLevel(Level),
}

/// A single on-screen banner (last write wins)
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub text: String,
    pub color: Color,
    pub ends_at: Millis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadeDirection {
    #[default]
    Idle,
    /// Toward full black
    Out,
    /// Back toward transparent
    In,
}

/// What a fade step means for the rest of the tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeStep {
    /// No fade, or fading in: gameplay continues
    Continue,
    /// Fading out: skip gameplay this tick
    Hold,
    /// Reached full black this tick; gameplay is skipped and the action runs
    Completed(Option<PendingAction>),
}

/// Linear opacity ramp with an optional one-shot completion action
#[derive(Debug, Clone, Default)]
pub struct Fade {
    pub alpha: f32,
    pub direction: FadeDirection,
    pub on_complete: Option<PendingAction>,
}

impl Fade {
    /// Begin a ramp; replaces any fade (and pending action) in progress
    pub fn start(&mut self, direction: FadeDirection, on_complete: Option<PendingAction>) {
        self.direction = direction;
        self.alpha = match direction {
            FadeDirection::Out => 0.0,
            FadeDirection::In => 1.0,
            FadeDirection::Idle => 0.0,
        };
        self.on_complete = on_complete;
    }

    pub fn is_idle(&self) -> bool {
        self.direction == FadeDirection::Idle
    }

    /// Advance one tick
    pub fn step(&mut self, rate: f32) -> FadeStep {
        match self.direction {
            FadeDirection::Out => {
                self.alpha = (self.alpha + rate).min(1.0);
                if self.alpha >= 1.0 - FADE_EPSILON {
                    self.alpha = 1.0;
                    self.direction = FadeDirection::In;
                    FadeStep::Completed(self.on_complete.take())
                } else {
                    FadeStep::Hold
                }
            }
            FadeDirection::In => {
                self.alpha = (self.alpha - rate).max(0.0);
                if self.alpha <= FADE_EPSILON {
                    self.alpha = 0.0;
                    self.direction = FadeDirection::Idle;
                }
                FadeStep::Continue
            }
            FadeDirection::Idle => FadeStep::Continue,
        }
    }
}

/// Why a deferred timer was armed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPurpose {
    /// Level 2 banner hold before fading to level 3
    CoinChaseExit,
    /// Level 4 banner hold before fading to level 5
    MazeExit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub purpose: TimerPurpose,
    pub due_at: Millis,
    pub action: PendingAction,
}

/// One-shot timers keyed by purpose
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
}

impl TimerQueue {
    /// Arm a timer, replacing any existing one with the same purpose
    pub fn arm(&mut self, purpose: TimerPurpose, due_at: Millis, action: PendingAction) {
        self.timers.retain(|t| t.purpose != purpose);
        self.timers.push(Timer {
            purpose,
            due_at,
            action,
        });
        log::debug!("Armed {purpose:?} for t={due_at}");
    }

    pub fn is_armed(&self, purpose: TimerPurpose) -> bool {
        self.timers.iter().any(|t| t.purpose == purpose)
    }

    /// Remove and return the earliest timer whose deadline has been reached
    pub fn pop_due(&mut self, now: Millis) -> Option<Timer> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| now >= t.due_at)
            .min_by_key(|(_, t)| t.due_at)
            .map(|(i, _)| i)?;
        Some(self.timers.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

/// A banner plus an optional glitch, fired together on a level event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub text: &'static str,
    pub color: Color,
    pub banner_ms: Millis,
    pub glitch_ms: Option<Millis>,
}

/// All transient presentation state owned by the tick
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub overlay: Option<Overlay>,
    pub glitch_until: Option<Millis>,
    pub fade: Fade,
    pub timers: TimerQueue,
}

impl Effects {
    /// Show a banner until `now + duration_ms`, replacing the current one
    pub fn show_overlay(
        &mut self,
        text: impl Into<String>,
        duration_ms: Millis,
        color: Color,
        now: Millis,
    ) {
        let text = text.into();
        log::debug!("Overlay \"{text}\" for {duration_ms}ms");
        self.overlay = Some(Overlay {
            text,
            color,
            ends_at: now + duration_ms,
        });
    }

    /// Show a cue's banner and start its glitch, if any
    pub fn play(&mut self, cue: &Cue, now: Millis) {
        self.show_overlay(cue.text, cue.banner_ms, cue.color, now);
        if let Some(glitch_ms) = cue.glitch_ms {
            self.trigger_glitch(glitch_ms, now);
        }
    }

    pub fn trigger_glitch(&mut self, duration_ms: Millis, now: Millis) {
        self.glitch_until = Some(now + duration_ms);
    }

    pub fn start_fade(&mut self, direction: FadeDirection, on_complete: Option<PendingAction>) {
        log::debug!("Fade {direction:?} -> {on_complete:?}");
        self.fade.start(direction, on_complete);
    }

    pub fn glitch_active(&self) -> bool {
        self.glitch_until.is_some()
    }

    pub fn overlay_text(&self) -> Option<&str> {
        self.overlay.as_ref().map(|o| o.text.as_str())
    }

    /// Drop the banner and glitch once `now` has passed their end
    pub fn expire(&mut self, now: Millis) {
        if self.glitch_until.is_some_and(|end| now > end) {
            self.glitch_until = None;
        }
        if self.overlay.as_ref().is_some_and(|o| now > o.ends_at) {
            self.overlay = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette;

    #[test]
    fn test_fade_out_completes_once_then_fades_in() {
        let mut fade = Fade::default();
        fade.start(FadeDirection::Out, Some(PendingAction::EnterLevel(Level::Coin)));

        let mut completions = Vec::new();
        for tick in 1..=60 {
            if let FadeStep::Completed(action) = fade.step(0.04) {
                completions.push((tick, action));
            }
        }
        assert_eq!(
            completions,
            vec![(25, Some(PendingAction::EnterLevel(Level::Coin)))]
        );
        // 25 ticks back down after completion
        assert_eq!(fade.direction, FadeDirection::Idle);
        assert_eq!(fade.alpha, 0.0);
        assert!(fade.on_complete.is_none());
    }

    #[test]
    fn test_fade_out_holds_gameplay() {
        let mut fade = Fade::default();
        fade.start(FadeDirection::Out, None);
        assert_eq!(fade.step(0.04), FadeStep::Hold);
        assert!(fade.alpha > 0.0 && fade.alpha < 0.05);

        let mut fade_in = Fade::default();
        fade_in.start(FadeDirection::In, None);
        assert_eq!(fade_in.alpha, 1.0);
        assert_eq!(fade_in.step(0.04), FadeStep::Continue);
    }

    #[test]
    fn test_fade_without_action_still_flips() {
        let mut fade = Fade::default();
        fade.start(FadeDirection::Out, None);
        let last = (0..25).map(|_| fade.step(0.04)).last();
        assert_eq!(last, Some(FadeStep::Completed(None)));
        assert_eq!(fade.direction, FadeDirection::In);
    }

    #[test]
    fn test_overlay_last_write_wins_and_expires() {
        let mut fx = Effects::default();
        fx.show_overlay("first", 1000, palette::TEXT, 0);
        fx.show_overlay("second", 500, palette::ALERT, 100);
        assert_eq!(fx.overlay_text(), Some("second"));
        assert_eq!(fx.overlay.as_ref().map(|o| o.ends_at), Some(600));

        fx.expire(600);
        assert_eq!(fx.overlay_text(), Some("second"));
        fx.expire(601);
        assert_eq!(fx.overlay_text(), None);
    }

    #[test]
    fn test_glitch_window() {
        let mut fx = Effects::default();
        fx.trigger_glitch(400, 1_000);
        assert!(fx.glitch_active());
        fx.expire(1_400);
        assert!(fx.glitch_active());
        fx.expire(1_401);
        assert!(!fx.glitch_active());
    }

    #[test]
    fn test_cue_sets_banner_and_optional_glitch() {
        let loud = Cue {
            text: "loud",
            color: palette::ALERT,
            banner_ms: 2_000,
            glitch_ms: Some(300),
        };
        let quiet = Cue {
            text: "quiet",
            glitch_ms: None,
            ..loud
        };

        let mut fx = Effects::default();
        fx.play(&quiet, 100);
        assert_eq!(fx.overlay_text(), Some("quiet"));
        assert!(!fx.glitch_active());

        fx.play(&loud, 200);
        assert_eq!(fx.overlay.as_ref().map(|o| o.ends_at), Some(2_200));
        assert_eq!(fx.glitch_until, Some(500));
    }

    #[test]
    fn test_timer_queue_keyed_by_purpose() {
        let mut timers = TimerQueue::default();
        let to3 = PendingAction::EnterLevel(Level::Doors);
        let to5 = PendingAction::EnterLevel(Level::Crash);

        timers.arm(TimerPurpose::CoinChaseExit, 3_000, to3);
        timers.arm(TimerPurpose::CoinChaseExit, 4_000, to3);
        timers.arm(TimerPurpose::MazeExit, 3_500, to5);
        assert_eq!(timers.len(), 2);

        assert_eq!(timers.pop_due(3_499), None);
        let first = timers.pop_due(10_000).unwrap();
        assert_eq!(first.purpose, TimerPurpose::MazeExit);
        let second = timers.pop_due(10_000).unwrap();
        assert_eq!(second.due_at, 4_000);
        assert!(timers.is_empty());
    }
}
