//! Llama Components
//!
//! The agent record: identity, lineage, DNA, drives, mood and position.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::dna::Dna;
use crate::systems::neural;

/// Upper bound of every drive.
pub const MAX_DRIVE: f32 = 100.0;

/// Unique identifier for a llama
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LlamaId(pub String);

impl LlamaId {
    /// A UUIDv4 drawn from the given generator, so seeded runs repeat exactly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(random_uuid(rng))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LlamaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LlamaId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

pub(crate) fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> String {
    let bytes: [u8; 16] = rng.gen();
    uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .to_string()
}

/// The six needs. All values are 0.0 to 100.0
///
/// Hunger, sleep, boredom and curiosity climb toward distress; social and
/// love erode toward distress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drives {
    pub hunger: f32,
    pub sleep: f32,
    pub social: f32,
    pub boredom: f32,
    pub curiosity: f32,
    pub love: f32,
}

impl Default for Drives {
    fn default() -> Self {
        Self {
            hunger: 25.0,
            sleep: 25.0,
            social: 65.0,
            boredom: 35.0,
            curiosity: 50.0,
            love: 55.0,
        }
    }
}

impl Drives {
    pub fn values(&self) -> [f32; 6] {
        [
            self.hunger,
            self.sleep,
            self.social,
            self.boredom,
            self.curiosity,
            self.love,
        ]
    }

    pub fn clamped(self) -> Self {
        Self {
            hunger: self.hunger.clamp(0.0, MAX_DRIVE),
            sleep: self.sleep.clamp(0.0, MAX_DRIVE),
            social: self.social.clamp(0.0, MAX_DRIVE),
            boredom: self.boredom.clamp(0.0, MAX_DRIVE),
            curiosity: self.curiosity.clamp(0.0, MAX_DRIVE),
            love: self.love.clamp(0.0, MAX_DRIVE),
        }
    }
}

/// Adds `delta` to a drive and keeps it inside `[0, MAX_DRIVE]`.
pub fn shift_drive(value: &mut f32, delta: f32) {
    *value = (*value + delta).clamp(0.0, MAX_DRIVE);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Content,
    Frolic,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Content => write!(f, "content"),
            Mood::Frolic => write!(f, "frolic"),
        }
    }
}

/// Continuous position inside the habitat rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A llama. Dead llamas stay on the roster for history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Llama {
    pub id: LlamaId,
    pub name: String,
    /// Founders are generation 1
    pub generation: u32,
    /// Empty for founders, `[a, b]` for offspring
    pub parents: Vec<LlamaId>,
    pub dna: Dna,
    pub drives: Drives,
    pub mood: Mood,
    /// Keeper override pinning the mood to frolic
    pub manual_frolic: bool,
    pub position: Position,
    /// What the llama last said or did, for display
    pub bubble: String,
    pub neglect: u32,
    pub is_dead: bool,
}

impl Llama {
    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    pub fn is_founder(&self) -> bool {
        self.parents.is_empty()
    }

    /// Current output of the llama's neural core. Recomputed on every call.
    pub fn stability(&self) -> f32 {
        neural::stability(&self.dna, &self.drives)
    }

    /// Status line used by roster views: `dead`, `frolic (manual)`, ...
    pub fn status(&self) -> String {
        if self.is_dead {
            "dead".to_string()
        } else if self.manual_frolic {
            format!("{} (manual)", self.mood)
        } else {
            self.mood.to_string()
        }
    }
}
