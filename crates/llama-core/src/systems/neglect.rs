//! Neglect and mortality.
//!
//! Every tick a living llama either accrues neglect for its unmet needs or
//! recovers a little; its stability then buys some of it back. Reaching
//! `NEGLECT_LIMIT` is fatal and permanent.

use crate::components::llama::Llama;

pub const NEGLECT_LIMIT: u32 = 20;
/// Rising drives above this count as unmet.
pub const CRITICAL_DRIVE: f32 = 85.0;
/// Social and love below this count as unmet.
pub const CRITICAL_BOND: f32 = 15.0;
pub const RECOVERY: u32 = 2;
/// Stability is scaled by this and rounded to get the per-tick relief.
pub const STABILITY_RELIEF: f32 = 2.0;
pub const DEATH_BUBBLE: &str = "...";

pub fn unmet_needs(llama: &Llama) -> u32 {
    let d = &llama.drives;
    [
        d.hunger > CRITICAL_DRIVE,
        d.sleep > CRITICAL_DRIVE,
        d.boredom > CRITICAL_DRIVE,
        d.curiosity > CRITICAL_DRIVE,
        d.social < CRITICAL_BOND,
        d.love < CRITICAL_BOND,
    ]
    .iter()
    .filter(|unmet| **unmet)
    .count() as u32
}

/// Updates the neglect counter. Returns true when this call killed the llama.
pub fn check_neglect(llama: &mut Llama) -> bool {
    if llama.is_dead {
        return false;
    }
    let unmet = unmet_needs(llama);
    llama.neglect = if unmet > 0 {
        (llama.neglect + unmet.div_ceil(2)).min(NEGLECT_LIMIT)
    } else {
        llama.neglect.saturating_sub(RECOVERY)
    };

    let relief = (llama.stability() * STABILITY_RELIEF).round() as u32;
    llama.neglect = llama.neglect.saturating_sub(relief);

    if llama.neglect >= NEGLECT_LIMIT {
        llama.is_dead = true;
        llama.bubble = DEATH_BUBBLE.to_string();
        tracing::info!(llama = %llama.name, "died of neglect");
        return true;
    }
    false
}
