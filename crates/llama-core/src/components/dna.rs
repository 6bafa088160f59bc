//! DNA Components
//!
//! The genetic payload fixed at birth: coat and hat colors, six personality
//! traits and the weights of the single-neuron stability core.

use serde::{Deserialize, Serialize};

/// Number of inputs the neural core reads from the drives.
pub const NEURAL_INPUTS: usize = 4;

/// Absolute bound for every neural weight.
pub const WEIGHT_LIMIT: f32 = 1.4;

/// Absolute bound for the neural bias.
pub const BIAS_LIMIT: f32 = 1.2;

/// An RGB color gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Rounds and clamps a floating channel value into a byte.
    pub fn channel(value: f32) -> u8 {
        value.round().clamp(0.0, 255.0) as u8
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Personality traits - fixed at birth.
/// All values are 0.0 to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    /// Scales how fast the sleep drive climbs
    pub sleepiness: f32,
    /// Replenishes the social drive every tick
    pub sociability: f32,
    /// Adds to walking speed
    pub curiosity: f32,
    pub playfulness: f32,
    /// Replenishes the love drive every tick
    pub affection: f32,
    /// Scales the output of the neural core
    pub resilience: f32,
}

impl Default for Traits {
    fn default() -> Self {
        Self {
            sleepiness: 0.5,
            sociability: 0.5,
            curiosity: 0.5,
            playfulness: 0.5,
            affection: 0.5,
            resilience: 0.5,
        }
    }
}

impl Traits {
    /// Trait values in declaration order.
    pub fn values(&self) -> [f32; 6] {
        [
            self.sleepiness,
            self.sociability,
            self.curiosity,
            self.playfulness,
            self.affection,
            self.resilience,
        ]
    }

    pub fn clamped(self) -> Self {
        Self {
            sleepiness: self.sleepiness.clamp(0.0, 1.0),
            sociability: self.sociability.clamp(0.0, 1.0),
            curiosity: self.curiosity.clamp(0.0, 1.0),
            playfulness: self.playfulness.clamp(0.0, 1.0),
            affection: self.affection.clamp(0.0, 1.0),
            resilience: self.resilience.clamp(0.0, 1.0),
        }
    }

    /// Compact `slee 42 • soci 80 ...` summary used by roster views.
    pub fn summary(&self) -> String {
        const LABELS: [&str; 6] = ["slee", "soci", "curi", "play", "affe", "resi"];
        LABELS
            .iter()
            .zip(self.values())
            .map(|(label, value)| format!("{} {}", label, (value * 100.0).round() as i32))
            .collect::<Vec<_>>()
            .join(" • ")
    }
}

/// Weights and bias of the single-neuron stability core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeuralCore {
    pub weights: [f32; NEURAL_INPUTS],
    pub bias: f32,
}

impl NeuralCore {
    pub fn clamped(self) -> Self {
        Self {
            weights: self.weights.map(|w| w.clamp(-WEIGHT_LIMIT, WEIGHT_LIMIT)),
            bias: self.bias.clamp(-BIAS_LIMIT, BIAS_LIMIT),
        }
    }
}

/// Complete genetic payload. Never mutated after birth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dna {
    pub color: Rgb,
    pub hat_color: Rgb,
    pub traits: Traits,
    pub neural: NeuralCore,
}
