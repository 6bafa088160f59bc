//! Habitat Snapshots
//!
//! The persisted shape of the habitat and the defensive loader that repairs
//! incomplete or legacy saves field by field instead of rejecting them.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::components::dna::{Dna, NeuralCore, Rgb, Traits, NEURAL_INPUTS};
use crate::components::item::{Item, ItemId, ItemKind, ItemRegistry};
use crate::components::llama::{Drives, Llama, LlamaId, Mood, Position};
use crate::components::world::{Habitat, Herd};
use crate::genetics::{random_bias, random_color, random_weight};
use crate::random::rand_range;
use crate::setup::names::{disambiguate, unique_name};
use crate::setup::spawn::founder_ranges;
use crate::systems::neglect::NEGLECT_LIMIT;
use llama_events::SimClock;

/// The full persisted habitat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub llamas: Vec<Llama>,
    pub items: Vec<Item>,
}

impl Default for Snapshot {
    /// Day 1, 08:00, nobody home
    fn default() -> Self {
        Self::capture(&SimClock::start(), &Herd::new(), &ItemRegistry::new())
    }
}

impl Snapshot {
    pub fn capture(clock: &SimClock, herd: &Herd, items: &ItemRegistry) -> Self {
        Self {
            day: clock.day,
            hour: clock.hour,
            minute: clock.minute,
            llamas: herd.llamas().to_vec(),
            items: items.items().to_vec(),
        }
    }

    pub fn clock(&self) -> SimClock {
        SimClock::new(self.day, self.hour, self.minute)
    }
}

fn number(object: &Map<String, Value>, key: &str) -> Option<f32> {
    object.get(key).and_then(Value::as_f64).map(|v| v as f32)
}

fn text<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn flag(object: &Map<String, Value>, key: &str) -> Option<bool> {
    object.get(key).and_then(Value::as_bool)
}

fn clock_field(object: &Map<String, Value>, key: &str, min: u32, max: u32, default: u32) -> u32 {
    object
        .get(key)
        .and_then(Value::as_f64)
        .map(|v| (v.max(min as f64).min(max as f64)) as u32)
        .unwrap_or(default)
}

fn color<R: Rng + ?Sized>(value: Option<&Value>, rng: &mut R) -> Rgb {
    let channels = value.and_then(Value::as_object).and_then(|rgb| {
        Some((number(rgb, "r")?, number(rgb, "g")?, number(rgb, "b")?))
    });
    match channels {
        Some((r, g, b)) => Rgb::new(Rgb::channel(r), Rgb::channel(g), Rgb::channel(b)),
        None => random_color(rng),
    }
}

fn traits<R: Rng + ?Sized>(value: Option<&Value>, rng: &mut R) -> Traits {
    let empty = Map::new();
    let object = value.and_then(Value::as_object).unwrap_or(&empty);
    let mut trait_value = |key: &str| {
        number(object, key).unwrap_or_else(|| rng.gen::<f32>())
    };
    Traits {
        sleepiness: trait_value("sleepiness"),
        sociability: trait_value("sociability"),
        curiosity: trait_value("curiosity"),
        playfulness: trait_value("playfulness"),
        affection: trait_value("affection"),
        resilience: trait_value("resilience"),
    }
    .clamped()
}

fn neural<R: Rng + ?Sized>(value: Option<&Value>, rng: &mut R) -> NeuralCore {
    let object = value.and_then(Value::as_object);
    let saved = object
        .and_then(|core| core.get("weights"))
        .and_then(Value::as_array);
    let mut weights = [0.0; NEURAL_INPUTS];
    for (index, weight) in weights.iter_mut().enumerate() {
        *weight = saved
            .and_then(|saved| saved.get(index))
            .and_then(Value::as_f64)
            .map(|w| w as f32)
            .unwrap_or_else(|| random_weight(rng));
    }
    let bias = object
        .and_then(|core| number(core, "bias"))
        .unwrap_or_else(|| random_bias(rng));
    NeuralCore { weights, bias }.clamped()
}

fn dna<R: Rng + ?Sized>(value: Option<&Value>, rng: &mut R) -> Dna {
    let object = value.and_then(Value::as_object);
    let field = |key: &str| object.and_then(|dna| dna.get(key));
    Dna {
        color: color(field("color"), rng),
        hat_color: color(field("hatColor"), rng),
        traits: traits(field("traits"), rng),
        neural: neural(field("neural"), rng),
    }
}

fn drives<R: Rng + ?Sized>(value: Option<&Value>, rng: &mut R) -> Drives {
    let empty = Map::new();
    let object = value.and_then(Value::as_object).unwrap_or(&empty);
    let mut drive = |key: &str, (min, max): (f32, f32)| {
        number(object, key).unwrap_or_else(|| rand_range(rng, min, max))
    };
    Drives {
        hunger: drive("hunger", founder_ranges::HUNGER),
        sleep: drive("sleep", founder_ranges::SLEEP),
        social: drive("social", founder_ranges::SOCIAL),
        boredom: drive("boredom", founder_ranges::BOREDOM),
        curiosity: drive("curiosity", founder_ranges::CURIOSITY),
        love: drive("love", founder_ranges::LOVE),
    }
    .clamped()
}

fn position<R: Rng + ?Sized>(value: Option<&Value>, habitat: &Habitat, rng: &mut R) -> Position {
    let saved = value
        .and_then(Value::as_object)
        .and_then(|p| Some(Position::new(number(p, "x")?, number(p, "y")?)));
    match saved {
        Some(saved) => habitat.clamp_llama(saved),
        None => habitat.random_spawn_point(rng),
    }
}

/// Repairs one saved llama. `taken` holds the lowercased names of llamas
/// already loaded and is updated with this llama's final name.
pub fn normalize_llama<R: Rng + ?Sized>(
    object: &Map<String, Value>,
    taken: &mut HashSet<String>,
    habitat: &Habitat,
    rng: &mut R,
) -> Llama {
    let id = text(object, "id")
        .map(LlamaId::from)
        .unwrap_or_else(|| LlamaId::random(rng));
    let name = match text(object, "name") {
        Some(saved) => disambiguate(saved, taken),
        None => unique_name(rng, taken),
    };
    taken.insert(name.to_lowercase());

    let generation = number(object, "generation")
        .map(|g| g.max(1.0) as u32)
        .unwrap_or(1);
    let parents = object
        .get("parents")
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(Value::as_str).map(LlamaId::from).collect())
        .unwrap_or_default();
    let neglect = number(object, "neglect")
        .map(|n| n.round().clamp(0.0, NEGLECT_LIMIT as f32) as u32)
        .unwrap_or(0);
    let is_dead = flag(object, "isDead").unwrap_or(false) || neglect >= NEGLECT_LIMIT;
    let mood = match object.get("mood").and_then(Value::as_str) {
        Some("frolic") => Mood::Frolic,
        _ => Mood::Content,
    };

    Llama {
        id,
        name,
        generation,
        parents,
        dna: dna(object.get("dna"), rng),
        drives: drives(object.get("drives"), rng),
        mood,
        manual_frolic: flag(object, "manualFrolic").unwrap_or(false),
        position: position(object.get("position"), habitat, rng),
        bubble: object
            .get("bubble")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        neglect,
        is_dead,
    }
}

/// Repairs one saved item, or `None` when its type is unknown.
pub fn normalize_item<R: Rng + ?Sized>(
    object: &Map<String, Value>,
    habitat: &Habitat,
    rng: &mut R,
) -> Option<Item> {
    let raw_kind = object.get("type").and_then(Value::as_str).unwrap_or_default();
    let kind = match raw_kind.parse::<ItemKind>() {
        Ok(kind) => kind,
        Err(err) => {
            tracing::warn!(%err, "dropping saved item");
            return None;
        }
    };
    let (x, y) = match (number(object, "x"), number(object, "y")) {
        (Some(x), Some(y)) => (x, y),
        (x, y) => {
            let fallback = habitat.random_spawn_point(rng);
            (x.unwrap_or(fallback.x), y.unwrap_or(fallback.y))
        }
    };
    let id = text(object, "id")
        .map(|id| ItemId(id.to_string()))
        .unwrap_or_else(|| ItemId::random(rng));
    Some(Item::new(id, kind, habitat.clamp_item(Position::new(x, y))))
}

/// Builds a snapshot from arbitrary saved JSON. Never fails: anything that
/// is not a JSON object yields the default habitat.
pub fn normalize_snapshot<R: Rng + ?Sized>(value: &Value, habitat: &Habitat, rng: &mut R) -> Snapshot {
    let Some(root) = value.as_object() else {
        tracing::warn!("saved habitat is not an object, starting fresh");
        return Snapshot::default();
    };
    let start = SimClock::start();

    let mut taken = HashSet::new();
    let llamas = root
        .get("llamas")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .filter_map(|entry| match entry.as_object() {
            Some(object) => Some(normalize_llama(object, &mut taken, habitat, rng)),
            None => {
                tracing::warn!("skipping saved llama that is not an object");
                None
            }
        })
        .collect();

    let items = root
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|object| normalize_item(object, habitat, rng))
        .collect();

    Snapshot {
        day: clock_field(root, "day", 1, u32::MAX, start.day),
        hour: clock_field(root, "hour", 0, 23, start.hour),
        minute: clock_field(root, "minute", 0, 59, start.minute),
        llamas,
        items,
    }
}

/// Parses saved text, falling back to the default habitat on bad JSON.
pub fn parse_snapshot<R: Rng + ?Sized>(text: &str, habitat: &Habitat, rng: &mut R) -> Snapshot {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => normalize_snapshot(&value, habitat, rng),
        Err(err) => {
            tracing::warn!(%err, "saved habitat is not valid JSON, starting fresh");
            Snapshot::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::spawn_founders;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(31)
    }

    #[test]
    fn test_default_snapshot() {
        let snapshot = Snapshot::default();
        assert_eq!((snapshot.day, snapshot.hour, snapshot.minute), (1, 8, 0));
        assert!(snapshot.llamas.is_empty());
        assert!(snapshot.items.is_empty());
    }

    #[test]
    fn test_saved_shape() {
        let mut rng = rng();
        let mut herd = Herd::new();
        spawn_founders(&mut herd, &Habitat::default(), 1, &mut rng);
        let mut items = ItemRegistry::new();
        items.push(Item::new(ItemId("i1".into()), ItemKind::Food, Position::new(40.0, 50.0)));

        let snapshot = Snapshot::capture(&SimClock::start(), &herd, &items);
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["items"][0], json!({"id": "i1", "type": "food", "x": 40.0, "y": 50.0}));
        let llama = &value["llamas"][0];
        assert!(llama["dna"]["hatColor"].is_object());
        assert_eq!(llama["manualFrolic"], json!(false));
        assert_eq!(llama["isDead"], json!(false));
        assert_eq!(llama["mood"], json!("content"));
    }

    #[test]
    fn test_saved_snapshot_loads_unchanged() {
        let mut rng = rng();
        let mut herd = Herd::new();
        spawn_founders(&mut herd, &Habitat::default(), 3, &mut rng);
        let snapshot = Snapshot::capture(&SimClock::new(4, 13, 45), &herd, &ItemRegistry::new());

        let value = serde_json::to_value(&snapshot).unwrap();
        let loaded = normalize_snapshot(&value, &Habitat::default(), &mut rng);
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_non_object_payload_yields_default() {
        let mut rng = rng();
        let habitat = Habitat::default();
        assert_eq!(normalize_snapshot(&json!([1, 2]), &habitat, &mut rng), Snapshot::default());
        assert_eq!(normalize_snapshot(&json!("hi"), &habitat, &mut rng), Snapshot::default());
        assert_eq!(parse_snapshot("{not json", &habitat, &mut rng), Snapshot::default());
    }

    #[test]
    fn test_bare_llama_is_repaired() {
        let mut rng = rng();
        let value = json!({"day": 3, "llamas": [{}], "items": []});
        let snapshot = normalize_snapshot(&value, &Habitat::default(), &mut rng);

        assert_eq!(snapshot.day, 3);
        assert_eq!((snapshot.hour, snapshot.minute), (8, 0));
        let llama = &snapshot.llamas[0];
        assert!(!llama.id.as_str().is_empty());
        assert!(!llama.name.is_empty());
        assert_eq!(llama.generation, 1);
        assert!(llama.parents.is_empty());
        assert_eq!(llama.neglect, 0);
        assert!(!llama.is_dead);
        assert_eq!(llama.mood, Mood::Content);
        assert!(!llama.manual_frolic);
        assert!((10.0..=40.0).contains(&llama.drives.hunger));
        assert!((40.0..=70.0).contains(&llama.drives.love));
    }

    #[test]
    fn test_wrong_types_fall_back() {
        let mut rng = rng();
        let value = json!({"llamas": [{
            "id": "abc",
            "name": "Pixel Glow",
            "generation": "two",
            "parents": "nope",
            "neglect": 99,
            "mood": "grumpy",
            "dna": {
                "color": {"r": 300, "g": -4, "b": 12.6},
                "traits": {"resilience": 3.0},
                "neural": {"weights": [5.0, -0.5], "bias": -9.0}
            },
            "drives": {"hunger": 140, "sleep": -3}
        }]});
        let snapshot = normalize_snapshot(&value, &Habitat::default(), &mut rng);
        let llama = &snapshot.llamas[0];

        assert_eq!(llama.id, LlamaId::from("abc"));
        assert_eq!(llama.generation, 1);
        assert!(llama.parents.is_empty());
        assert_eq!(llama.neglect, 20);
        assert!(llama.is_dead);
        assert_eq!(llama.mood, Mood::Content);
        assert_eq!(llama.dna.color, Rgb::new(255, 0, 13));
        assert_eq!(llama.dna.traits.resilience, 1.0);
        assert_eq!(llama.dna.neural.weights[0], 1.4);
        assert_eq!(llama.dna.neural.weights[1], -0.5);
        assert!(llama.dna.neural.weights[2].abs() <= 1.0);
        assert_eq!(llama.dna.neural.bias, -1.2);
        assert_eq!(llama.drives.hunger, 100.0);
        assert_eq!(llama.drives.sleep, 0.0);
    }

    #[test]
    fn test_duplicate_saved_names_are_disambiguated() {
        let mut rng = rng();
        let value = json!({"llamas": [{"name": "Rex Fuzz"}, {"name": "rex fuzz"}]});
        let snapshot = normalize_snapshot(&value, &Habitat::default(), &mut rng);
        assert_eq!(snapshot.llamas[0].name, "Rex Fuzz");
        assert_eq!(snapshot.llamas[1].name, "rex fuzz 2");
    }

    #[test]
    fn test_items_are_repaired() {
        let mut rng = rng();
        let value = json!({"items": [
            {"type": "snack", "x": 100, "y": 100},
            {"id": "t", "type": "toy", "x": 9000, "y": 5},
            {"id": "u", "type": "anvil", "x": 1, "y": 1},
            {"id": "v", "type": "bed"}
        ]});
        let snapshot = normalize_snapshot(&value, &Habitat::default(), &mut rng);

        assert_eq!(snapshot.items.len(), 3);
        assert_eq!(snapshot.items[0].kind, ItemKind::Food);
        assert!(!snapshot.items[0].id.as_str().is_empty());
        assert_eq!(snapshot.items[1].position, Position::new(760.0, 20.0));
        assert_eq!(snapshot.items[2].id, ItemId("v".to_string()));
        assert_eq!(snapshot.items[2].kind, ItemKind::Bed);
    }

    #[test]
    fn test_item_without_position_is_placed_in_bounds() {
        let mut rng = rng();
        let habitat = Habitat::new(300.0, 200.0);
        let value = json!({"items": [{"type": "food"}, {"type": "toy", "x": "left", "y": 70}]});
        let snapshot = normalize_snapshot(&value, &habitat, &mut rng);

        assert_eq!(snapshot.items.len(), 2);
        let food = &snapshot.items[0];
        assert_eq!(food.kind, ItemKind::Food);
        assert!(!food.id.as_str().is_empty());
        assert_ne!(food.id, snapshot.items[1].id);
        for item in &snapshot.items {
            assert!((20.0..=260.0).contains(&item.position.x));
            assert!((20.0..=160.0).contains(&item.position.y));
        }
        assert_eq!(snapshot.items[1].position.y, 70.0);
    }
}
