//! Llama creation: founders and offspring.

use rand::Rng;

use crate::components::llama::{Drives, Llama, LlamaId, Mood};
use crate::components::world::{Habitat, Herd};
use crate::genetics::create_dna;
use crate::random::rand_range;
use crate::setup::names::allocate_name;

/// Initial drive ranges for a newly created llama
pub mod founder_ranges {
    pub const HUNGER: (f32, f32) = (10.0, 40.0);
    pub const SLEEP: (f32, f32) = (10.0, 40.0);
    pub const SOCIAL: (f32, f32) = (50.0, 80.0);
    pub const BOREDOM: (f32, f32) = (20.0, 50.0);
    pub const CURIOSITY: (f32, f32) = (30.0, 70.0);
    pub const LOVE: (f32, f32) = (40.0, 70.0);
}

pub fn founder_drives<R: Rng + ?Sized>(rng: &mut R) -> Drives {
    use founder_ranges::*;
    Drives {
        hunger: rand_range(rng, HUNGER.0, HUNGER.1),
        sleep: rand_range(rng, SLEEP.0, SLEEP.1),
        social: rand_range(rng, SOCIAL.0, SOCIAL.1),
        boredom: rand_range(rng, BOREDOM.0, BOREDOM.1),
        curiosity: rand_range(rng, CURIOSITY.0, CURIOSITY.1),
        love: rand_range(rng, LOVE.0, LOVE.1),
    }
}

/// Builds a new llama. With `parents` it is their offspring, otherwise a
/// founder. The llama is not added to the herd.
pub fn create_llama<R: Rng + ?Sized>(
    parents: Option<(&Llama, &Llama)>,
    herd: &Herd,
    habitat: &Habitat,
    rng: &mut R,
) -> Llama {
    let dna = match parents {
        Some((a, b)) => create_dna(Some(&a.dna), Some(&b.dna), rng),
        None => create_dna(None, None, rng),
    };
    let (generation, parent_ids) = match parents {
        Some((a, b)) => (
            a.generation.max(b.generation) + 1,
            vec![a.id.clone(), b.id.clone()],
        ),
        None => (1, Vec::new()),
    };

    Llama {
        id: LlamaId::random(rng),
        name: allocate_name(herd, rng),
        generation,
        parents: parent_ids,
        dna,
        drives: founder_drives(rng),
        mood: Mood::Content,
        manual_frolic: false,
        position: habitat.random_spawn_point(rng),
        bubble: String::new(),
        neglect: 0,
        is_dead: false,
    }
}

/// Adds `count` founders to the herd and returns their ids.
pub fn spawn_founders<R: Rng + ?Sized>(
    herd: &mut Herd,
    habitat: &Habitat,
    count: usize,
    rng: &mut R,
) -> Vec<LlamaId> {
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let llama = create_llama(None, herd, habitat, rng);
        tracing::debug!(name = %llama.name, "founder spawned");
        ids.push(llama.id.clone());
        herd.push(llama);
    }
    ids
}
