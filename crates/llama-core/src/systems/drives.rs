//! Drive & Mood Engine
//!
//! Advances the six drives each tick, lets the neural core pull distressed
//! drives back toward equilibrium, and classifies mood.

use crate::components::dna::Traits;
use crate::components::llama::{shift_drive, Drives, Llama, Mood};

/// Per-tick drive deltas
pub mod rates {
    pub const HUNGER: f32 = 1.2;
    /// Multiplied by the sleepiness trait
    pub const SLEEP: f32 = 1.1;
    pub const BOREDOM: f32 = 0.8;
    pub const CURIOSITY: f32 = 0.4;
    /// Social and love erode by these, then regain the matching trait
    pub const SOCIAL_EROSION: f32 = 0.3;
    pub const LOVE_EROSION: f32 = 0.2;
}

/// Neural self-regulation constants
pub mod regulation {
    /// No regulation at or below this stability
    pub const MIN_STABILITY: f32 = 0.05;
    pub const GAIN: f32 = 1.6;
    pub const HUNGER_ABOVE: f32 = 50.0;
    pub const SLEEP_ABOVE: f32 = 50.0;
    pub const BOREDOM_ABOVE: f32 = 45.0;
    pub const CURIOSITY_ABOVE: f32 = 50.0;
    pub const SOCIAL_BELOW: f32 = 35.0;
    pub const LOVE_BELOW: f32 = 35.0;
    pub const HUNGER_PULL: f32 = 0.7;
    pub const SLEEP_PULL: f32 = 0.7;
    pub const BOREDOM_PULL: f32 = 0.5;
    pub const CURIOSITY_PULL: f32 = 0.4;
    pub const SOCIAL_PULL: f32 = 0.4;
    pub const LOVE_PULL: f32 = 0.3;
}

/// Frolic requires these four drives below `FROLIC_CEILING`...
pub const FROLIC_CEILING: f32 = 25.0;
/// ...and social and love above `FROLIC_FLOOR`.
pub const FROLIC_FLOOR: f32 = 40.0;

/// Applies one tick of growth and erosion, modulated by personality.
pub fn advance_drives(drives: &mut Drives, traits: &Traits) {
    shift_drive(&mut drives.hunger, rates::HUNGER);
    shift_drive(&mut drives.sleep, rates::SLEEP * traits.sleepiness);
    shift_drive(&mut drives.boredom, rates::BOREDOM);
    shift_drive(&mut drives.curiosity, rates::CURIOSITY);
    shift_drive(&mut drives.social, traits.sociability - rates::SOCIAL_EROSION);
    shift_drive(&mut drives.love, traits.affection - rates::LOVE_EROSION);
}

/// Pulls distressed drives toward equilibrium in proportion to stability.
///
/// Stability is read once, before any drive moves.
pub fn regulate(llama: &mut Llama) {
    let stability = llama.stability();
    if stability <= regulation::MIN_STABILITY {
        return;
    }
    let stabilizer = stability * regulation::GAIN;
    let drives = &mut llama.drives;

    if drives.hunger > regulation::HUNGER_ABOVE {
        shift_drive(&mut drives.hunger, -stabilizer * regulation::HUNGER_PULL);
    }
    if drives.sleep > regulation::SLEEP_ABOVE {
        shift_drive(&mut drives.sleep, -stabilizer * regulation::SLEEP_PULL);
    }
    if drives.boredom > regulation::BOREDOM_ABOVE {
        shift_drive(&mut drives.boredom, -stabilizer * regulation::BOREDOM_PULL);
    }
    if drives.curiosity > regulation::CURIOSITY_ABOVE {
        shift_drive(&mut drives.curiosity, -stabilizer * regulation::CURIOSITY_PULL);
    }
    if drives.social < regulation::SOCIAL_BELOW {
        shift_drive(&mut drives.social, stabilizer * regulation::SOCIAL_PULL);
    }
    if drives.love < regulation::LOVE_BELOW {
        shift_drive(&mut drives.love, stabilizer * regulation::LOVE_PULL);
    }
}

/// Drive step for one tick: growth, then self-regulation.
pub fn update_drives(llama: &mut Llama) {
    let traits = llama.dna.traits;
    advance_drives(&mut llama.drives, &traits);
    regulate(llama);
}

/// Whether every need is comfortably met.
pub fn needs_met(drives: &Drives) -> bool {
    drives.hunger < FROLIC_CEILING
        && drives.sleep < FROLIC_CEILING
        && drives.boredom < FROLIC_CEILING
        && drives.curiosity < FROLIC_CEILING
        && drives.social > FROLIC_FLOOR
        && drives.love > FROLIC_FLOOR
}

pub fn determine_mood(llama: &Llama) -> Mood {
    if llama.manual_frolic || needs_met(&llama.drives) {
        Mood::Frolic
    } else {
        Mood::Content
    }
}

pub fn update_mood(llama: &mut Llama) {
    llama.mood = determine_mood(llama);
}
