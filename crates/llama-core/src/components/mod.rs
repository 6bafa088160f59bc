//! Plain data held by the simulation: llamas, their DNA, items and the world
//! resources that own them.

pub mod dna;
pub mod item;
pub mod llama;
pub mod world;

pub use dna::{Dna, NeuralCore, Rgb, Traits, NEURAL_INPUTS};
pub use item::{Item, ItemId, ItemKind, ItemRegistry};
pub use llama::{Drives, Llama, LlamaId, Mood, Position, MAX_DRIVE};
pub use world::{Habitat, Herd, Soundtrack, TickEvents, WorldClock};
