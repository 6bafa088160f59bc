//! Simulation Clock
//!
//! Day/hour/minute clock advanced in fixed 15 minute steps.
//!
//! # Example
//!
//! ```
//! use llama_events::SimClock;
//!
//! let mut clock = SimClock::start();
//! clock.advance();
//! assert_eq!(clock.to_string(), "Day 1 • 08:15");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulated minutes that pass on every tick.
pub const MINUTES_PER_TICK: u32 = 15;

/// Hour of day a fresh habitat starts at.
pub const START_HOUR: u32 = 8;

/// A point in simulated time.
///
/// Fields are kept flat so the persisted snapshot carries `day`, `hour`
/// and `minute` at its top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimClock {
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::start()
    }
}

impl SimClock {
    pub fn new(day: u32, hour: u32, minute: u32) -> Self {
        Self { day, hour, minute }
    }

    /// Day 1, 08:00.
    pub fn start() -> Self {
        Self {
            day: 1,
            hour: START_HOUR,
            minute: 0,
        }
    }

    /// Advances by one tick, rolling minutes into hours and hours into days.
    ///
    /// A minute overflow resets to zero rather than carrying the remainder,
    /// so an odd persisted minute value snaps back onto the quarter hour.
    pub fn advance(&mut self) {
        self.minute += MINUTES_PER_TICK;
        if self.minute >= 60 {
            self.minute = 0;
            self.hour += 1;
        }
        if self.hour >= 24 {
            self.hour = 0;
            self.day = self.day.saturating_add(1);
        }
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day {} • {:02}:{:02}", self.day, self.hour, self.minute)
    }
}
