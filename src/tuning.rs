//! Game balance and timing
//!
//! Every value has a default; a JSON tuning file only needs the fields it
//! overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Millis;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning value `{field}` must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("tuning value `{field}` must be finite (got {value})")]
    NotFinite { field: &'static str, value: f32 },
    #[error("fade step must not exceed 1.0 (got {0})")]
    FadeStepTooLarge(f32),
    #[error("jump impulse must point upward (got {0})")]
    JumpNotUpward(f32),
}

/// Tunable gameplay values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Movement ===
    /// Pixels per tick along each held axis
    pub player_speed: f32,
    /// Added to vertical velocity every platformer tick
    pub gravity: f32,
    /// Vertical velocity set on jump (negative is up)
    pub jump_impulse: f32,

    // === Effects ===
    /// Alpha change per tick while fading
    pub fade_step: f32,
    /// Radians added to the panic spin per tick
    pub panic_spin: f32,
    /// Glitch length when no explicit duration is given
    pub glitch_default_ms: Millis,

    // === Level 2 ===
    /// Coin starts fleeing once the player is closer than this
    pub coin_flee_radius: f32,
    /// Coin speed as a multiple of player speed
    pub coin_speed_factor: f32,
    /// Chase length before the level gives up on the player
    pub coin_chase_ms: Millis,
    /// Banner time before fading to level 3
    pub coin_exit_delay_ms: Millis,

    // === Level 4 ===
    pub inversion_start_ms: Millis,
    pub inversion_interval_ms: Millis,
    /// Banner time before fading to level 5
    pub maze_exit_delay_ms: Millis,

    // === Level 5 ===
    pub crash_duration_ms: Millis,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 3.5,
            gravity: 0.6,
            jump_impulse: -12.0,

            fade_step: 0.04,
            panic_spin: 0.3,
            glitch_default_ms: 400,

            coin_flee_radius: 120.0,
            coin_speed_factor: 1.1,
            coin_chase_ms: 15_000,
            coin_exit_delay_ms: 3_000,

            inversion_start_ms: 3_000,
            inversion_interval_ms: 4_000,
            maze_exit_delay_ms: 2_500,

            crash_duration_ms: 10_000,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a JSON tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("player_speed", self.player_speed),
            ("gravity", self.gravity),
            ("fade_step", self.fade_step),
            ("coin_speed_factor", self.coin_speed_factor),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::NonPositive { field, value });
            }
        }
        let finite = [
            ("coin_flee_radius", self.coin_flee_radius),
            ("panic_spin", self.panic_spin),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::NotFinite { field, value });
            }
        }
        if self.fade_step > 1.0 {
            return Err(TuningError::FadeStepTooLarge(self.fade_step));
        }
        if !self.jump_impulse.is_finite() || self.jump_impulse >= 0.0 {
            return Err(TuningError::JumpNotUpward(self.jump_impulse));
        }
        Ok(())
    }

    /// Coin escape speed in pixels per tick
    pub fn coin_speed(&self) -> f32 {
        self.player_speed * self.coin_speed_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert!((Tuning::default().coin_speed() - 3.85).abs() < 1e-5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning =
            Tuning::from_json(r#"{ "player_speed": 5.0, "coin_chase_ms": 1000 }"#).unwrap();
        assert_eq!(tuning.player_speed, 5.0);
        assert_eq!(tuning.coin_chase_ms, 1000);
        assert_eq!(tuning.gravity, Tuning::default().gravity);
        assert_eq!(tuning.crash_duration_ms, 10_000);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "gravity": 0.0 }"#),
            Err(TuningError::NonPositive { field: "gravity", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "jump_impulse": 4.0 }"#),
            Err(TuningError::JumpNotUpward(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "fade_step": 1.5 }"#),
            Err(TuningError::FadeStepTooLarge(_))
        ));
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let nan_fade = Tuning {
            fade_step: f32::NAN,
            ..Tuning::default()
        };
        assert!(matches!(
            nan_fade.validate(),
            Err(TuningError::NonPositive { field: "fade_step", .. })
        ));

        let wild_spin = Tuning {
            panic_spin: f32::INFINITY,
            ..Tuning::default()
        };
        assert!(matches!(
            wild_spin.validate(),
            Err(TuningError::NotFinite { field: "panic_spin", .. })
        ));

        let nan_jump = Tuning {
            jump_impulse: f32::NAN,
            ..Tuning::default()
        };
        assert!(matches!(nan_jump.validate(), Err(TuningError::JumpNotUpward(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
        assert!(err.to_string().contains("not/here.json"));
    }
}
