//! Rendering module
//!
//! Produces backend-agnostic draw commands; the host owns the actual surface.

pub mod commands;
pub mod scene;

pub use commands::{DrawCmd, Frame, TextAlign, TextStyle};
pub use scene::{draw, hit_test_replay_control};
