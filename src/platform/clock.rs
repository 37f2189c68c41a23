//! Time sources

use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::Millis;

/// Source of wall-clock timestamps
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

/// Real time, as milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as Millis)
            .unwrap_or(0)
    }
}

/// Manually advanced clock
///
/// Clones share the same time, so a test (or the headless runner) can keep a
/// handle and advance it while a `Session` owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, ms: Millis) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}
