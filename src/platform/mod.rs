//! Platform abstraction layer
//!
//! The simulation never reads the wall clock itself; the session asks a
//! `Clock` for the current time once per tick and hands it down.

pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};
