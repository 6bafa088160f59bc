//! Action System
//!
//! Picks the most urgent need, resolves what the llama does about it this
//! tick, and reports the target it should walk toward.
//!
//! Target seeking and acting use separate searches on purpose: seeking has
//! no distance limit, acting is gated by a hard radius, so a llama can walk
//! toward an item it cannot use yet.

pub mod priority;
pub mod resolve;

pub use priority::{priority_need, Need, NeedTarget, PRIORITY_NEEDS};
pub use resolve::{resolve_action, Action};
