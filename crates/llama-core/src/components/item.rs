//! Item Components
//!
//! Things the keeper places in the habitat. Food is eaten; everything else
//! stays until the keeper removes it.

use bevy_ecs::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::llama::{random_uuid, Position};

/// Unique identifier for an item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(random_uuid(rng))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Toy,
    Bed,
    Food,
    Mirror,
}

impl ItemKind {
    /// Whether using the item removes it from the habitat.
    pub fn is_consumable(self) -> bool {
        matches!(self, ItemKind::Food)
    }

    pub fn all() -> &'static [ItemKind] {
        &[ItemKind::Toy, ItemKind::Bed, ItemKind::Food, ItemKind::Mirror]
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Toy => write!(f, "toy"),
            ItemKind::Bed => write!(f, "bed"),
            ItemKind::Food => write!(f, "food"),
            ItemKind::Mirror => write!(f, "mirror"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownItemKind(pub String);

impl fmt::Display for UnknownItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown item type: '{}'", self.0)
    }
}

impl std::error::Error for UnknownItemKind {}

impl FromStr for ItemKind {
    type Err = UnknownItemKind;

    /// Accepts the legacy `snack` spelling for food.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "snack" {
            return Ok(ItemKind::Food);
        }
        ItemKind::all()
            .iter()
            .copied()
            .find(|kind| kind.to_string() == wanted)
            .ok_or_else(|| UnknownItemKind(s.to_string()))
    }
}

/// A placed item. Serializes as `{id, type, x, y}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(flatten)]
    pub position: Position,
}

impl Item {
    pub fn new(id: ItemId, kind: ItemKind, position: Position) -> Self {
        Self { id, kind, position }
    }
}

/// Resource: every item currently in the habitat, in placement order
#[derive(Resource, Debug, Clone, Default)]
pub struct ItemRegistry {
    items: Vec<Item>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn remove(&mut self, id: &ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Nearest item of `kind` to `from`, with its distance. No range limit.
    ///
    /// On equal distances the earlier-placed item wins.
    pub fn nearest_of_kind(&self, from: &Position, kind: ItemKind) -> Option<(&Item, f32)> {
        self.items
            .iter()
            .filter(|item| item.kind == kind)
            .map(|item| (item, from.distance_to(&item.position)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }

    pub fn count_of_kind(&self, kind: ItemKind) -> usize {
        self.items.iter().filter(|item| item.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, kind: ItemKind, x: f32, y: f32) -> Item {
        Item::new(ItemId(id.to_string()), kind, Position::new(x, y))
    }

    #[test]
    fn test_item_serializes_flat() {
        let json = serde_json::to_string(&item("i1", ItemKind::Food, 10.0, 20.0)).unwrap();
        assert_eq!(json, r#"{"id":"i1","type":"food","x":10.0,"y":20.0}"#);
    }

    #[test]
    fn test_snack_alias() {
        assert_eq!("snack".parse::<ItemKind>(), Ok(ItemKind::Food));
        assert_eq!("Mirror".parse::<ItemKind>(), Ok(ItemKind::Mirror));
        assert!("hat".parse::<ItemKind>().is_err());
    }

    #[test]
    fn test_nearest_of_kind() {
        let mut registry = ItemRegistry::new();
        registry.push(item("far_food", ItemKind::Food, 500.0, 500.0));
        registry.push(item("near_toy", ItemKind::Toy, 1.0, 1.0));
        registry.push(item("near_food", ItemKind::Food, 10.0, 0.0));

        let origin = Position::new(0.0, 0.0);
        let (nearest, distance) = registry.nearest_of_kind(&origin, ItemKind::Food).unwrap();
        assert_eq!(nearest.id.as_str(), "near_food");
        assert_eq!(distance, 10.0);
        assert!(registry.nearest_of_kind(&origin, ItemKind::Bed).is_none());
    }

    #[test]
    fn test_nearest_tie_prefers_first_placed() {
        let mut registry = ItemRegistry::new();
        registry.push(item("first", ItemKind::Bed, 5.0, 0.0));
        registry.push(item("second", ItemKind::Bed, -5.0, 0.0));
        let (nearest, _) = registry
            .nearest_of_kind(&Position::new(0.0, 0.0), ItemKind::Bed)
            .unwrap();
        assert_eq!(nearest.id.as_str(), "first");
    }

    #[test]
    fn test_remove() {
        let mut registry = ItemRegistry::new();
        registry.push(item("a", ItemKind::Toy, 0.0, 0.0));
        assert!(registry.remove(&ItemId("missing".to_string())).is_none());
        assert!(registry.remove(&ItemId("a".to_string())).is_some());
        assert!(registry.is_empty());
    }
}
