//! Priority Need Selection
//!
//! Scores each candidate need by how distressed it is and keeps the
//! strictly highest scorer among those past their threshold.

use crate::components::item::ItemKind;
use crate::components::llama::{Drives, MAX_DRIVE};

/// What a need sends the llama looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeedTarget {
    Item(ItemKind),
    Companion,
}

/// Which drive a candidate need reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveKey {
    Hunger,
    Sleep,
    Boredom,
    Curiosity,
    Social,
}

impl DriveKey {
    pub fn read(self, drives: &Drives) -> f32 {
        match self {
            DriveKey::Hunger => drives.hunger,
            DriveKey::Sleep => drives.sleep,
            DriveKey::Boredom => drives.boredom,
            DriveKey::Curiosity => drives.curiosity,
            DriveKey::Social => drives.social,
        }
    }
}

/// A candidate need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Need {
    pub drive: DriveKey,
    pub target: NeedTarget,
    /// True when distress means a high value, false when it means a low one
    pub high: bool,
    pub threshold: f32,
}

impl Need {
    /// Distress in [0, 1].
    pub fn score(&self, drives: &Drives) -> f32 {
        let value = self.drive.read(drives).clamp(0.0, MAX_DRIVE);
        if self.high {
            value / MAX_DRIVE
        } else {
            (MAX_DRIVE - value) / MAX_DRIVE
        }
    }

    /// Whether the drive has crossed its threshold in the distress direction.
    pub fn is_pressing(&self, drives: &Drives) -> bool {
        let value = self.drive.read(drives).clamp(0.0, MAX_DRIVE);
        if self.high {
            value >= self.threshold
        } else {
            value <= self.threshold
        }
    }
}

/// Candidates in declaration order; earlier entries win ties.
pub static PRIORITY_NEEDS: [Need; 5] = [
    Need {
        drive: DriveKey::Hunger,
        target: NeedTarget::Item(ItemKind::Food),
        high: true,
        threshold: 65.0,
    },
    Need {
        drive: DriveKey::Sleep,
        target: NeedTarget::Item(ItemKind::Bed),
        high: true,
        threshold: 65.0,
    },
    Need {
        drive: DriveKey::Boredom,
        target: NeedTarget::Item(ItemKind::Toy),
        high: true,
        threshold: 65.0,
    },
    Need {
        drive: DriveKey::Curiosity,
        target: NeedTarget::Item(ItemKind::Mirror),
        high: true,
        threshold: 55.0,
    },
    Need {
        drive: DriveKey::Social,
        target: NeedTarget::Companion,
        high: false,
        threshold: 35.0,
    },
];

/// The most urgent pressing need, or `None` when the llama should wander.
pub fn priority_need(drives: &Drives) -> Option<&'static Need> {
    let mut best = None;
    let mut best_score = 0.0;
    for need in PRIORITY_NEEDS.iter() {
        let score = need.score(drives);
        if need.is_pressing(drives) && score > best_score {
            best_score = score;
            best = Some(need);
        }
    }
    best
}
