//! Neural Stability Model
//!
//! A fixed four-input, single-neuron perceptron per llama. Its output is a
//! derived signal in [0, 1]; it is never stored and the weights never learn.

use crate::components::dna::{Dna, NEURAL_INPUTS};
use crate::components::llama::{Drives, MAX_DRIVE};

/// Output scale at zero resilience; full resilience adds `RESILIENCE_GAIN`.
pub const BASE_GAIN: f32 = 0.7;
pub const RESILIENCE_GAIN: f32 = 0.6;

/// Inputs in weight order: fed, rested, socially topped up, entertained.
pub fn inputs(drives: &Drives) -> [f32; NEURAL_INPUTS] {
    [
        1.0 - drives.hunger / MAX_DRIVE,
        1.0 - drives.sleep / MAX_DRIVE,
        drives.social / MAX_DRIVE,
        1.0 - drives.boredom / MAX_DRIVE,
    ]
}

pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Logistic activation of the weighted drive inputs, scaled by resilience.
pub fn stability(dna: &Dna, drives: &Drives) -> f32 {
    let sum = inputs(drives)
        .iter()
        .zip(dna.neural.weights.iter())
        .fold(dna.neural.bias, |acc, (input, weight)| acc + input * weight);
    let gain = BASE_GAIN + dna.traits.resilience * RESILIENCE_GAIN;
    (sigmoid(sum) * gain).clamp(0.0, 1.0)
}
