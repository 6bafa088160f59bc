//! Event Types
//!
//! Everything that happens in the habitat, as seen by renderers, the audio
//! collaborator and the JSONL event log.

use serde::{Deserialize, Serialize};

use crate::timestamp::SimClock;

/// Short sound effects a player may attach to events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    Eat,
    Sleep,
    Toy,
    Mirror,
    Breed,
    Spawn,
    Select,
    Reset,
}

impl Cue {
    /// Square-wave pitch for this cue.
    pub fn frequency_hz(self) -> f32 {
        match self {
            Cue::Eat => 220.0,
            Cue::Sleep => 160.0,
            Cue::Toy => 440.0,
            Cue::Mirror => 520.0,
            Cue::Breed => 320.0,
            Cue::Spawn => 280.0,
            Cue::Select => 360.0,
            Cue::Reset => 180.0,
        }
    }

    pub fn all() -> &'static [Cue] {
        &[
            Cue::Eat,
            Cue::Sleep,
            Cue::Toy,
            Cue::Mirror,
            Cue::Breed,
            Cue::Spawn,
            Cue::Select,
            Cue::Reset,
        ]
    }
}

/// A single thing that happened in the habitat.
///
/// Ids are the string form of the llama/item ids held by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HerdEvent {
    /// A llama ate a food item off the floor
    Ate { llama_id: String, item_id: String },
    /// A llama napped on a bed
    Slept { llama_id: String, item_id: String },
    /// A llama played with a toy
    Played { llama_id: String, item_id: String },
    /// A llama inspected itself in a mirror
    Inspected { llama_id: String, item_id: String },
    /// A llama greeted a nearby companion
    Greeted { llama_id: String, partner_id: String },
    /// Neglect reached its limit
    Died { llama_id: String, name: String },
    /// Offspring of two living llamas
    Born {
        llama_id: String,
        name: String,
        parents: Vec<String>,
        generation: u32,
    },
    /// A founder appeared
    Spawned { llama_id: String, name: String },
    /// Hand-fed by the keeper
    Fed { llama_id: String },
    ItemPlaced { item_id: String, kind: String },
    ItemRemoved { item_id: String },
    Renamed {
        llama_id: String,
        from: String,
        to: String,
    },
    FrolicToggled { llama_ids: Vec<String>, enabled: bool },
    /// The habitat was wiped and reseeded
    Reset,
}

impl HerdEvent {
    /// The sound effect a player should attach to this event, if any.
    pub fn cue(&self) -> Option<Cue> {
        match self {
            HerdEvent::Ate { .. } | HerdEvent::Fed { .. } => Some(Cue::Eat),
            HerdEvent::Slept { .. } => Some(Cue::Sleep),
            HerdEvent::Played { .. } => Some(Cue::Toy),
            HerdEvent::Inspected { .. } => Some(Cue::Mirror),
            HerdEvent::Born { .. } => Some(Cue::Breed),
            HerdEvent::Spawned { .. } => Some(Cue::Spawn),
            HerdEvent::ItemPlaced { .. } | HerdEvent::FrolicToggled { .. } => Some(Cue::Select),
            HerdEvent::Reset => Some(Cue::Reset),
            HerdEvent::Greeted { .. }
            | HerdEvent::Died { .. }
            | HerdEvent::ItemRemoved { .. }
            | HerdEvent::Renamed { .. } => None,
        }
    }

    /// The llama this event is primarily about.
    pub fn llama_id(&self) -> Option<&str> {
        match self {
            HerdEvent::Ate { llama_id, .. }
            | HerdEvent::Slept { llama_id, .. }
            | HerdEvent::Played { llama_id, .. }
            | HerdEvent::Inspected { llama_id, .. }
            | HerdEvent::Greeted { llama_id, .. }
            | HerdEvent::Died { llama_id, .. }
            | HerdEvent::Born { llama_id, .. }
            | HerdEvent::Spawned { llama_id, .. }
            | HerdEvent::Fed { llama_id }
            | HerdEvent::Renamed { llama_id, .. } => Some(llama_id),
            HerdEvent::ItemPlaced { .. }
            | HerdEvent::ItemRemoved { .. }
            | HerdEvent::FrolicToggled { .. }
            | HerdEvent::Reset => None,
        }
    }
}

/// An event stamped with when it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub tick: u64,
    pub time: SimClock,
    #[serde(flatten)]
    pub event: HerdEvent,
}

impl LoggedEvent {
    pub fn new(tick: u64, time: SimClock, event: HerdEvent) -> Self {
        Self { tick, time, event }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = HerdEvent::Ate {
            llama_id: "l1".to_string(),
            item_id: "i1".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"ate\""));
        assert!(json.contains("\"item_id\":\"i1\""));
    }

    #[test]
    fn test_logged_event_flattens() {
        let logged = LoggedEvent::new(
            7,
            SimClock::new(1, 9, 45),
            HerdEvent::Died {
                llama_id: "l1".to_string(),
                name: "Nova Fuzz".to_string(),
            },
        );
        let json = serde_json::to_string(&logged).unwrap();
        assert!(json.contains("\"tick\":7"));
        assert!(json.contains("\"type\":\"died\""));

        let parsed: LoggedEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, logged);
    }

    #[test]
    fn test_cues() {
        assert_eq!(HerdEvent::Reset.cue(), Some(Cue::Reset));
        assert_eq!(
            HerdEvent::Fed {
                llama_id: "l1".to_string()
            }
            .cue(),
            Some(Cue::Eat)
        );
        assert_eq!(
            HerdEvent::Greeted {
                llama_id: "a".to_string(),
                partner_id: "b".to_string()
            }
            .cue(),
            None
        );
        assert!(Cue::all().iter().all(|c| c.frequency_hz() > 0.0));
    }
}
