//! Herd Setup
//!
//! Llama creation, founder seeding and name allocation.

pub mod names;
pub mod spawn;

pub use names::*;
pub use spawn::*;
