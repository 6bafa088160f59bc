//! Llama Habitat Simulation Core
//!
//! Tick-driven artificial life: llamas with inherited traits and a tiny
//! evolvable neural core wander a rectangle, satisfy their drives with items
//! and each other, breed, and die from sustained neglect.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod audio;
pub mod commands;
pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod genetics;
pub mod output;
pub mod random;
pub mod selection;
pub mod setup;
pub mod sim;
pub mod systems;

pub use components::*;
pub use error::{CommandError, ConfigError, SinkError, StorageError};
pub use output::Snapshot;
pub use selection::Selection;
pub use sim::Simulation;

pub use llama_events::{Cue, HerdEvent, LoggedEvent, SimClock};

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
