//! Seek-and-clamp movement.

use rand::Rng;

use crate::components::llama::{Llama, Mood, Position};
use crate::components::world::{Habitat, Herd};
use crate::components::item::ItemRegistry;
use crate::random::rand_range;
use crate::systems::action::{priority_need, NeedTarget};

pub const BASE_SPEED: f32 = 12.0;
/// Extra speed per point of the curiosity trait.
pub const CURIOSITY_SPEED: f32 = 8.0;
pub const FROLIC_BOOST: f32 = 10.0;
/// Step jitter is drawn from `[-JITTER, JITTER)`.
pub const JITTER: f32 = 2.0;
/// How far a llama will look for a companion to walk toward.
pub const COMPANION_SEARCH_RANGE: f32 = 120.0;

pub fn speed(llama: &Llama) -> f32 {
    let boost = if llama.mood == Mood::Frolic {
        FROLIC_BOOST
    } else {
        0.0
    };
    BASE_SPEED + llama.dna.traits.curiosity * CURIOSITY_SPEED + boost
}

/// Where the llama at `index` is heading this tick, if anywhere.
///
/// Frolicking llamas and llamas with no pressing need have no target.
pub fn target_for(herd: &Herd, index: usize, items: &ItemRegistry) -> Option<Position> {
    let llama = herd.llamas().get(index)?;
    if llama.mood == Mood::Frolic {
        return None;
    }
    match priority_need(&llama.drives)?.target {
        NeedTarget::Item(kind) => items
            .nearest_of_kind(&llama.position, kind)
            .map(|(item, _)| item.position),
        NeedTarget::Companion => herd
            .nearest_living_neighbor(index, COMPANION_SEARCH_RANGE)
            .map(|(other, _)| herd.llamas()[other].position),
    }
}

/// Steps a llama toward `target`, or wanders when there is none.
pub fn step<R: Rng + ?Sized>(
    llama: &mut Llama,
    target: Option<Position>,
    habitat: &Habitat,
    rng: &mut R,
) {
    let speed = speed(llama);
    let from = llama.position;
    let next = match target {
        Some(target) => {
            let dx = target.x - from.x;
            let dy = target.y - from.y;
            let mut distance = (dx * dx + dy * dy).sqrt();
            if distance == 0.0 {
                distance = 1.0;
            }
            let stride = speed.min(distance) + rand_range(rng, -JITTER, JITTER);
            Position::new(
                from.x + dx / distance * stride,
                from.y + dy / distance * stride,
            )
        }
        None => {
            let x = from.x + rand_range(rng, -speed, speed);
            let y = from.y + rand_range(rng, -speed, speed);
            Position::new(x, y)
        }
    };
    llama.position = habitat.clamp_llama(next);
}

/// Moves the llama at `index` using the positions as they stand right now.
pub fn move_llama<R: Rng + ?Sized>(
    herd: &mut Herd,
    index: usize,
    items: &ItemRegistry,
    habitat: &Habitat,
    rng: &mut R,
) {
    let target = target_for(herd, index, items);
    if let Some(llama) = herd.llamas_mut().get_mut(index) {
        step(llama, target, habitat, rng);
    }
}
