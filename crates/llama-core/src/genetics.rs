//! Genetics Engine
//!
//! Builds DNA for founders (fully random) and offspring (parental average
//! plus a small symmetric mutation, clamped to each gene's legal range).
//! A gene missing on one side of the cross falls back to a fresh random
//! value for that gene only.

use rand::Rng;

use crate::components::dna::{Dna, NeuralCore, Rgb, Traits, BIAS_LIMIT, NEURAL_INPUTS, WEIGHT_LIMIT};
use crate::random::rand_range;

/// Gene ranges and mutation widths
pub mod ranges {
    /// Founder color channels are drawn from `[COLOR_MIN, COLOR_MAX)`
    pub const COLOR_MIN: f32 = 60.0;
    pub const COLOR_MAX: f32 = 220.0;
    /// Post-blend mutation for the red, green and blue channels
    pub const RED_MUTATION: f32 = 12.0;
    pub const GREEN_MUTATION: f32 = 18.0;
    pub const BLUE_MUTATION: f32 = 24.0;
    pub const TRAIT_MUTATION: f32 = 0.1;
    /// Founder weights are drawn from `[-FOUNDER_WEIGHT, FOUNDER_WEIGHT)`
    pub const FOUNDER_WEIGHT: f32 = 1.0;
    pub const FOUNDER_BIAS: f32 = 0.6;
    pub const WEIGHT_MUTATION: f32 = 0.25;
    pub const BIAS_MUTATION: f32 = 0.2;
}

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb::new(
        Rgb::channel(rand_range(rng, ranges::COLOR_MIN, ranges::COLOR_MAX)),
        Rgb::channel(rand_range(rng, ranges::COLOR_MIN, ranges::COLOR_MAX)),
        Rgb::channel(rand_range(rng, ranges::COLOR_MIN, ranges::COLOR_MAX)),
    )
}

pub fn random_traits<R: Rng + ?Sized>(rng: &mut R) -> Traits {
    Traits {
        sleepiness: rng.gen(),
        sociability: rng.gen(),
        curiosity: rng.gen(),
        playfulness: rng.gen(),
        affection: rng.gen(),
        resilience: rng.gen(),
    }
}

pub fn random_weight<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rand_range(rng, -ranges::FOUNDER_WEIGHT, ranges::FOUNDER_WEIGHT)
}

pub fn random_bias<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rand_range(rng, -ranges::FOUNDER_BIAS, ranges::FOUNDER_BIAS)
}

pub fn random_neural_core<R: Rng + ?Sized>(rng: &mut R) -> NeuralCore {
    let mut weights = [0.0; NEURAL_INPUTS];
    for weight in weights.iter_mut() {
        *weight = random_weight(rng);
    }
    NeuralCore {
        weights,
        bias: random_bias(rng),
    }
}

/// Founder DNA: every gene drawn independently.
pub fn random_dna<R: Rng + ?Sized>(rng: &mut R) -> Dna {
    Dna {
        color: random_color(rng),
        hat_color: random_color(rng),
        traits: random_traits(rng),
        neural: random_neural_core(rng),
    }
}

/// Channel-wise rounded average of two colors.
pub fn average_colors(a: Rgb, b: Rgb) -> Rgb {
    let mid = |x: u8, y: u8| Rgb::channel((x as f32 + y as f32) / 2.0);
    Rgb::new(mid(a.r, b.r), mid(a.g, b.g), mid(a.b, b.b))
}

/// Independent per-channel mutation applied after averaging.
pub fn mutate_color<R: Rng + ?Sized>(color: Rgb, rng: &mut R) -> Rgb {
    let shift = |channel: u8, width: f32, rng: &mut R| {
        Rgb::channel(channel as f32 + rand_range(rng, -width, width))
    };
    Rgb::new(
        shift(color.r, ranges::RED_MUTATION, rng),
        shift(color.g, ranges::GREEN_MUTATION, rng),
        shift(color.b, ranges::BLUE_MUTATION, rng),
    )
}

fn blend_color<R: Rng + ?Sized>(a: Option<Rgb>, b: Option<Rgb>, rng: &mut R) -> Rgb {
    let a = a.unwrap_or_else(|| random_color(rng));
    let b = b.unwrap_or_else(|| random_color(rng));
    mutate_color(average_colors(a, b), rng)
}

/// Midpoint of two trait values nudged by up to ±0.1.
pub fn blend_trait<R: Rng + ?Sized>(a: Option<f32>, b: Option<f32>, rng: &mut R) -> f32 {
    let a = a.unwrap_or_else(|| rng.gen());
    let b = b.unwrap_or_else(|| rng.gen());
    ((a + b) / 2.0 + rand_range(rng, -ranges::TRAIT_MUTATION, ranges::TRAIT_MUTATION)).clamp(0.0, 1.0)
}

fn blend_traits<R: Rng + ?Sized>(a: Option<&Traits>, b: Option<&Traits>, rng: &mut R) -> Traits {
    Traits {
        sleepiness: blend_trait(a.map(|t| t.sleepiness), b.map(|t| t.sleepiness), rng),
        sociability: blend_trait(a.map(|t| t.sociability), b.map(|t| t.sociability), rng),
        curiosity: blend_trait(a.map(|t| t.curiosity), b.map(|t| t.curiosity), rng),
        playfulness: blend_trait(a.map(|t| t.playfulness), b.map(|t| t.playfulness), rng),
        affection: blend_trait(a.map(|t| t.affection), b.map(|t| t.affection), rng),
        resilience: blend_trait(a.map(|t| t.resilience), b.map(|t| t.resilience), rng),
    }
}

/// Element-wise average of the parental cores with a fresh perturbation.
///
/// The child is centered on the parental mean rather than copied from either
/// parent, so lineages drift back toward the population average.
pub fn blend_neural<R: Rng + ?Sized>(
    a: Option<&NeuralCore>,
    b: Option<&NeuralCore>,
    rng: &mut R,
) -> NeuralCore {
    let mut weights = [0.0; NEURAL_INPUTS];
    for (index, weight) in weights.iter_mut().enumerate() {
        let wa = a.map(|core| core.weights[index]).unwrap_or_else(|| random_weight(rng));
        let wb = b.map(|core| core.weights[index]).unwrap_or_else(|| random_weight(rng));
        let mutation = rand_range(rng, -ranges::WEIGHT_MUTATION, ranges::WEIGHT_MUTATION);
        *weight = ((wa + wb) / 2.0 + mutation).clamp(-WEIGHT_LIMIT, WEIGHT_LIMIT);
    }
    let ba = a.map(|core| core.bias).unwrap_or_else(|| random_bias(rng));
    let bb = b.map(|core| core.bias).unwrap_or_else(|| random_bias(rng));
    let mutation = rand_range(rng, -ranges::BIAS_MUTATION, ranges::BIAS_MUTATION);
    NeuralCore {
        weights,
        bias: ((ba + bb) / 2.0 + mutation).clamp(-BIAS_LIMIT, BIAS_LIMIT),
    }
}

/// DNA for a new llama.
///
/// With no parents every gene is random. With one or two parents each gene is
/// blended, a missing parent contributing a fresh random value per gene.
pub fn create_dna<R: Rng + ?Sized>(a: Option<&Dna>, b: Option<&Dna>, rng: &mut R) -> Dna {
    if a.is_none() && b.is_none() {
        return random_dna(rng);
    }
    Dna {
        color: blend_color(a.map(|d| d.color), b.map(|d| d.color), rng),
        hat_color: blend_color(a.map(|d| d.hat_color), b.map(|d| d.hat_color), rng),
        traits: blend_traits(a.map(|d| &d.traits), b.map(|d| &d.traits), rng),
        neural: blend_neural(a.map(|d| &d.neural), b.map(|d| &d.neural), rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn fixed_dna(channel: u8, trait_value: f32, weight: f32, bias: f32) -> Dna {
        Dna {
            color: Rgb::new(channel, channel, channel),
            hat_color: Rgb::new(channel, channel, channel),
            traits: Traits {
                sleepiness: trait_value,
                sociability: trait_value,
                curiosity: trait_value,
                playfulness: trait_value,
                affection: trait_value,
                resilience: trait_value,
            },
            neural: NeuralCore {
                weights: [weight; NEURAL_INPUTS],
                bias,
            },
        }
    }

    #[test]
    fn test_founder_genes_in_founder_ranges() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..200 {
            let dna = create_dna(None, None, &mut rng);
            for channel in [dna.color.r, dna.color.g, dna.color.b, dna.hat_color.r] {
                assert!((60..=220).contains(&channel));
            }
            assert!(dna.traits.values().iter().all(|v| (0.0..=1.0).contains(v)));
            assert!(dna.neural.weights.iter().all(|w| (-1.0..=1.0).contains(w)));
            assert!((-0.6..=0.6).contains(&dna.neural.bias));
        }
    }

    #[test]
    fn test_offspring_centered_on_parents() {
        let mut rng = SmallRng::seed_from_u64(12);
        let a = fixed_dna(100, 0.2, 0.4, 0.2);
        let b = fixed_dna(200, 0.6, -0.2, -0.6);
        for _ in 0..200 {
            let child = create_dna(Some(&a), Some(&b), &mut rng);
            assert!((138..=162).contains(&child.color.r));
            assert!((132..=168).contains(&child.color.g));
            assert!((126..=174).contains(&child.color.b));
            for value in child.traits.values() {
                assert!((0.29..=0.51).contains(&value), "trait {}", value);
            }
            for weight in child.neural.weights {
                assert!((-0.16..=0.36).contains(&weight), "weight {}", weight);
            }
            assert!((-0.41..=0.01).contains(&child.neural.bias));
        }
    }

    #[test]
    fn test_blend_clamps_to_legal_ranges() {
        let mut rng = SmallRng::seed_from_u64(13);
        let extreme = fixed_dna(255, 1.0, 1.4, 1.2);
        for _ in 0..200 {
            let child = create_dna(Some(&extreme), Some(&extreme), &mut rng);
            assert!(child.traits.values().iter().all(|v| *v <= 1.0));
            assert!(child.neural.weights.iter().all(|w| *w <= 1.4));
            assert!(child.neural.bias <= 1.2);
        }
    }

    #[test]
    fn test_single_parent_blends_with_random() {
        let mut rng = SmallRng::seed_from_u64(14);
        let parent = fixed_dna(0, 0.0, -1.4, -1.2);
        for _ in 0..100 {
            let child = create_dna(Some(&parent), None, &mut rng);
            assert!(child.traits.sleepiness <= 0.6);
            assert!(child.neural.bias <= 0.1);
        }
    }

    #[test]
    fn test_average_colors_rounds() {
        let avg = average_colors(Rgb::new(10, 11, 0), Rgb::new(20, 20, 255));
        assert_eq!(avg, Rgb::new(15, 16, 128));
    }

    #[test]
    fn test_create_dna_deterministic_under_seed() {
        let a = fixed_dna(90, 0.3, 0.1, 0.0);
        let b = fixed_dna(180, 0.7, -0.1, 0.5);
        let mut r1 = SmallRng::seed_from_u64(77);
        let mut r2 = SmallRng::seed_from_u64(77);
        assert_eq!(
            create_dna(Some(&a), Some(&b), &mut r1),
            create_dna(Some(&a), Some(&b), &mut r2)
        );
    }
}
