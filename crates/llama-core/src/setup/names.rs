//! Name allocation. Names are unique case-insensitively across the roster,
//! dead llamas included.

use std::collections::HashSet;

use rand::Rng;

use crate::components::world::Herd;
use crate::random::pick;

pub const FIRST_NAMES: [&str; 10] = [
    "Neo", "Pixel", "Byte", "Nova", "Echo", "Flux", "Aria", "Zara", "Vivi", "Rex",
];
pub const SECOND_NAMES: [&str; 9] = [
    "Llama", "Wool", "Circuit", "Glow", "Nimbus", "Quark", "Pulse", "Drift", "Fuzz",
];

pub fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = pick(rng, &FIRST_NAMES);
    let second = pick(rng, &SECOND_NAMES);
    format!("{first} {second}")
}

/// A random name not in `taken` (lowercased), suffixed " 2", " 3", ... on
/// collision.
pub fn unique_name<R: Rng + ?Sized>(rng: &mut R, taken: &HashSet<String>) -> String {
    disambiguate(&random_name(rng), taken)
}

/// `base` itself if free, otherwise the first free `base N` for N >= 2.
pub fn disambiguate(base: &str, taken: &HashSet<String>) -> String {
    let mut candidate = base.to_string();
    let mut counter = 2;
    while taken.contains(&candidate.to_lowercase()) {
        candidate = format!("{base} {counter}");
        counter += 1;
    }
    candidate
}

pub fn allocate_name<R: Rng + ?Sized>(herd: &Herd, rng: &mut R) -> String {
    unique_name(rng, &herd.taken_names(None))
}
