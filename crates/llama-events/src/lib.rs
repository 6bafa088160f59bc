//! Shared clock and event types for the llama habitat simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! Renderers, audio players and loggers depend on it without pulling in the core.

pub mod event;
pub mod timestamp;

pub use timestamp::{SimClock, MINUTES_PER_TICK, START_HOUR};

pub use event::{Cue, HerdEvent, LoggedEvent};
