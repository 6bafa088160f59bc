//! Random helpers shared by genetics, movement and chatter.
//!
//! Everything takes the generator by reference so callers decide where the
//! randomness comes from (the seeded `SimRng` in a running habitat).

use rand::Rng;

/// Uniform value in `[min, max)`. Never panics on an empty or inverted range.
pub fn rand_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}

/// Uniformly picks one entry of a non-empty list.
pub fn pick<'a, R: Rng + ?Sized>(rng: &mut R, options: &[&'a str]) -> &'a str {
    options[rng.gen_range(0..options.len())]
}
