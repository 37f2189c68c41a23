//! Reality Shift - a five-level 2D vignette that does not play fair
//!
//! Core modules:
//! - `sim`: Simulation (collision, physics, input, timed effects, level rules)
//! - `renderer`: Abstract draw commands built from a state snapshot
//! - `platform`: Clock sources
//! - `session`: Frame driver binding clock, RNGs and state
//! - `tuning`: Data-driven game balance
//! - `hud`: Read-only snapshot for the surrounding shell UI

pub mod hud;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use hud::HudSnapshot;
pub use session::Session;
pub use tuning::{Tuning, TuningError};

/// Wall-clock timestamp in milliseconds
pub type Millis = u64;

/// Straight RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (logical coordinates)
    pub const FIELD_W: f32 = 800.0;
    pub const FIELD_H: f32 = 600.0;

    /// Side of the square player footprint
    pub const PLAYER_SIZE: f32 = 24.0;

    /// Side of the coin chased in level 2
    pub const COIN_SIZE: f32 = 20.0;

    /// Frame length assumed when the host has no previous timestamp
    pub const DEFAULT_FRAME_MS: f32 = 16.0;
}

/// Color palette
pub mod palette {
    use crate::Color;

    const fn hex(rgb: u32) -> Color {
        [
            ((rgb >> 16) & 0xFF) as f32 / 255.0,
            ((rgb >> 8) & 0xFF) as f32 / 255.0,
            (rgb & 0xFF) as f32 / 255.0,
            1.0,
        ]
    }

    const fn with_alpha(color: Color, alpha: f32) -> Color {
        [color[0], color[1], color[2], alpha]
    }

    pub const BACKGROUND: Color = hex(0x121212);
    pub const BLACK: Color = hex(0x000000);
    pub const PLAYER: Color = hex(0x00E5FF);
    pub const GOAL: Color = hex(0x39FF14);
    pub const TRAP: Color = hex(0xFF003C);
    pub const TEXT: Color = hex(0xFFFFFF);
    pub const ALERT: Color = hex(0xFFEA00);
    pub const WALL: Color = hex(0x333333);
    pub const DOOR_RED: Color = hex(0xFF003C);
    pub const DOOR_BLUE: Color = hex(0x4488FF);
    pub const COIN: Color = hex(0xFFEA00);
    pub const MUTED: Color = hex(0xAAAAAA);

    /// Translucent strip behind banners
    pub const BANNER_STRIP: Color = with_alpha(BLACK, 0.7);
    /// Glitch bar tints
    pub const GLITCH_CYAN: Color = with_alpha(PLAYER, 0.15);
    pub const GLITCH_RED: Color = with_alpha(TRAP, 0.15);
}
