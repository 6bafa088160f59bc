//! Simulation Systems
//!
//! Per-llama update steps and the ECS systems that run them each tick.

pub mod action;
pub mod clock;
pub mod drives;
pub mod herd;
pub mod movement;
pub mod neglect;
pub mod neural;
pub mod soundtrack;

pub use clock::advance_clock;
pub use herd::{update_herd, update_llama};
pub use soundtrack::update_soundtrack;
