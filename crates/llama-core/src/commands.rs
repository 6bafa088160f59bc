//! Keeper Commands
//!
//! Everything a collaborator can do to the habitat between ticks. Each
//! command validates first and only then mutates, so a rejected command
//! leaves the world exactly as it was.

use bevy_ecs::prelude::*;
use llama_events::{HerdEvent, SimClock};

use crate::components::item::{Item, ItemId, ItemKind, ItemRegistry};
use crate::components::llama::{shift_drive, LlamaId, Mood, Position};
use crate::components::world::{Habitat, Herd, TickEvents, WorldClock};
use crate::error::CommandError;
use crate::setup::{create_llama, spawn_founders};
use crate::SimRng;

pub const FEED_RELIEF: f32 = 35.0;
pub const FEED_BUBBLE: &str = "nom";
pub const FROLIC_BUBBLE: &str = "whee!";

fn record(world: &mut World, event: HerdEvent) {
    let clock = *world.resource::<WorldClock>();
    world.resource_mut::<TickEvents>().record(&clock, event);
}

fn unknown(id: &LlamaId) -> CommandError {
    CommandError::UnknownLlama(id.to_string())
}

/// Adds a founder at a random point. Returns its id.
pub fn spawn_llama(world: &mut World) -> LlamaId {
    let habitat = *world.resource::<Habitat>();
    let llama = world.resource_scope(|world, mut rng: Mut<SimRng>| {
        create_llama(None, world.resource::<Herd>(), &habitat, &mut rng.0)
    });
    let (id, name) = (llama.id.clone(), llama.name.clone());
    world.resource_mut::<Herd>().push(llama);
    tracing::info!(%name, "llama spawned");
    record(
        world,
        HerdEvent::Spawned {
            llama_id: id.to_string(),
            name,
        },
    );
    id
}

/// Breeds two distinct living llamas. Returns the offspring's id.
pub fn breed_llamas(world: &mut World, a: &LlamaId, b: &LlamaId) -> Result<LlamaId, CommandError> {
    {
        let herd = world.resource::<Herd>();
        let parent_a = herd.get(a).ok_or_else(|| unknown(a))?;
        let parent_b = herd.get(b).ok_or_else(|| unknown(b))?;
        if a == b {
            return Err(CommandError::SelfBreeding);
        }
        for parent in [parent_a, parent_b] {
            if parent.is_dead {
                return Err(CommandError::Deceased {
                    name: parent.name.clone(),
                });
            }
        }
    }

    let habitat = *world.resource::<Habitat>();
    let child = world.resource_scope(|world, mut rng: Mut<SimRng>| {
        let herd = world.resource::<Herd>();
        let parents = herd.get(a).zip(herd.get(b));
        create_llama(parents, herd, &habitat, &mut rng.0)
    });
    let event = HerdEvent::Born {
        llama_id: child.id.to_string(),
        name: child.name.clone(),
        parents: child.parents.iter().map(ToString::to_string).collect(),
        generation: child.generation,
    };
    tracing::info!(name = %child.name, generation = child.generation, "llama born");
    let id = child.id.clone();
    world.resource_mut::<Herd>().push(child);
    record(world, event);
    Ok(id)
}

/// Hand-feeds a living llama.
pub fn feed_llama(world: &mut World, id: &LlamaId) -> Result<(), CommandError> {
    let mut herd = world.resource_mut::<Herd>();
    let llama = herd.get_mut(id).ok_or_else(|| unknown(id))?;
    if llama.is_dead {
        return Err(CommandError::Deceased {
            name: llama.name.clone(),
        });
    }
    shift_drive(&mut llama.drives.hunger, -FEED_RELIEF);
    llama.bubble = FEED_BUBBLE.to_string();
    record(
        world,
        HerdEvent::Fed {
            llama_id: id.to_string(),
        },
    );
    Ok(())
}

/// Pins the living llamas among `ids` to frolic, or releases them if they
/// are all pinned already. Returns whether frolic was enabled.
pub fn toggle_manual_frolic(world: &mut World, ids: &[LlamaId]) -> Result<bool, CommandError> {
    let mut herd = world.resource_mut::<Herd>();
    let targets: Vec<usize> = herd
        .llamas()
        .iter()
        .enumerate()
        .filter(|(_, llama)| llama.is_alive() && ids.contains(&llama.id))
        .map(|(index, _)| index)
        .collect();
    if targets.is_empty() {
        return Err(CommandError::NoLivingTargets);
    }

    let enable = targets
        .iter()
        .any(|&index| !herd.llamas()[index].manual_frolic);
    let mut toggled = Vec::with_capacity(targets.len());
    for index in targets {
        let llama = &mut herd.llamas_mut()[index];
        llama.manual_frolic = enable;
        if enable {
            llama.mood = Mood::Frolic;
            llama.bubble = FROLIC_BUBBLE.to_string();
        }
        toggled.push(llama.id.to_string());
    }
    record(
        world,
        HerdEvent::FrolicToggled {
            llama_ids: toggled,
            enabled: enable,
        },
    );
    Ok(enable)
}

/// Drops an item, clamped inside the habitat. Returns its id.
pub fn place_item(world: &mut World, x: f32, y: f32, kind: ItemKind) -> ItemId {
    let position = world
        .resource::<Habitat>()
        .clamp_item(Position::new(x, y));
    let id = world.resource_scope(|_, mut rng: Mut<SimRng>| ItemId::random(&mut rng.0));
    world
        .resource_mut::<ItemRegistry>()
        .push(Item::new(id.clone(), kind, position));
    record(
        world,
        HerdEvent::ItemPlaced {
            item_id: id.to_string(),
            kind: kind.to_string(),
        },
    );
    id
}

pub fn remove_item(world: &mut World, id: &ItemId) -> Option<Item> {
    let removed = world.resource_mut::<ItemRegistry>().remove(id)?;
    record(
        world,
        HerdEvent::ItemRemoved {
            item_id: id.to_string(),
        },
    );
    Some(removed)
}

/// Renames a llama, living or dead. The name is trimmed and must stay
/// unique ignoring case.
pub fn rename_llama(world: &mut World, id: &LlamaId, name: &str) -> Result<(), CommandError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CommandError::EmptyName);
    }
    let mut herd = world.resource_mut::<Herd>();
    if herd.get(id).is_none() {
        return Err(unknown(id));
    }
    if herd.taken_names(Some(id)).contains(&trimmed.to_lowercase()) {
        return Err(CommandError::NameTaken(trimmed.to_string()));
    }
    let llama = herd.get_mut(id).ok_or_else(|| unknown(id))?;
    let from = std::mem::replace(&mut llama.name, trimmed.to_string());
    record(
        world,
        HerdEvent::Renamed {
            llama_id: id.to_string(),
            from,
            to: trimmed.to_string(),
        },
    );
    Ok(())
}

/// Clears the habitat back to Day 1 08:00 and seeds `founders` new llamas.
pub fn reset(world: &mut World, founders: usize) -> Vec<LlamaId> {
    world.resource_mut::<Herd>().clear();
    world.resource_mut::<ItemRegistry>().clear();
    *world.resource_mut::<WorldClock>() = WorldClock::new(SimClock::start());

    let habitat = *world.resource::<Habitat>();
    let ids = world.resource_scope(|world, mut rng: Mut<SimRng>| {
        let mut herd = world.resource_mut::<Herd>();
        spawn_founders(&mut herd, &habitat, founders, &mut rng.0)
    });
    tracing::info!(founders, "habitat reset");
    record(world, HerdEvent::Reset);
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn world_with(founders: usize) -> (World, Vec<LlamaId>) {
        let mut world = World::new();
        world.insert_resource(SimRng(SmallRng::seed_from_u64(17)));
        world.insert_resource(Herd::new());
        world.insert_resource(ItemRegistry::new());
        world.insert_resource(Habitat::default());
        world.insert_resource(WorldClock::new(SimClock::start()));
        world.insert_resource(TickEvents::new());
        let ids = (0..founders).map(|_| spawn_llama(&mut world)).collect();
        (world, ids)
    }

    fn kill(world: &mut World, id: &LlamaId) {
        world.resource_mut::<Herd>().get_mut(id).unwrap().is_dead = true;
    }

    #[test]
    fn test_breed_links_parents() {
        let (mut world, ids) = world_with(2);
        let child = breed_llamas(&mut world, &ids[0], &ids[1]).unwrap();
        let herd = world.resource::<Herd>();
        let child = herd.get(&child).unwrap();
        assert_eq!(child.parents, vec![ids[0].clone(), ids[1].clone()]);
        assert_eq!(child.generation, 2);
        assert_eq!(herd.len(), 3);
    }

    #[test]
    fn test_breed_rejections_leave_world_unchanged() {
        let (mut world, ids) = world_with(2);
        assert_eq!(
            breed_llamas(&mut world, &ids[0], &ids[0]),
            Err(CommandError::SelfBreeding)
        );
        assert!(matches!(
            breed_llamas(&mut world, &ids[0], &LlamaId::from("ghost")),
            Err(CommandError::UnknownLlama(_))
        ));
        kill(&mut world, &ids[0]);
        kill(&mut world, &ids[1]);
        assert!(matches!(
            breed_llamas(&mut world, &ids[0], &ids[1]),
            Err(CommandError::Deceased { .. })
        ));
        assert_eq!(world.resource::<Herd>().len(), 2);
    }

    #[test]
    fn test_feed() {
        let (mut world, ids) = world_with(1);
        world.resource_mut::<Herd>().get_mut(&ids[0]).unwrap().drives.hunger = 30.0;
        feed_llama(&mut world, &ids[0]).unwrap();
        let herd = world.resource::<Herd>();
        assert_eq!(herd.get(&ids[0]).unwrap().drives.hunger, 0.0);
        assert_eq!(herd.get(&ids[0]).unwrap().bubble, "nom");

        kill(&mut world, &ids[0]);
        assert!(matches!(
            feed_llama(&mut world, &ids[0]),
            Err(CommandError::Deceased { .. })
        ));
    }

    #[test]
    fn test_toggle_frolic_enables_then_disables() {
        let (mut world, ids) = world_with(2);
        assert_eq!(toggle_manual_frolic(&mut world, &ids), Ok(true));
        for llama in world.resource::<Herd>().iter() {
            assert!(llama.manual_frolic);
            assert_eq!(llama.mood, Mood::Frolic);
            assert_eq!(llama.bubble, "whee!");
        }
        assert_eq!(toggle_manual_frolic(&mut world, &ids), Ok(false));
        assert!(world.resource::<Herd>().iter().all(|llama| !llama.manual_frolic));
    }

    #[test]
    fn test_toggle_frolic_mixed_enables_all() {
        let (mut world, ids) = world_with(2);
        toggle_manual_frolic(&mut world, &ids[..1]).unwrap();
        assert_eq!(toggle_manual_frolic(&mut world, &ids), Ok(true));
        assert!(world.resource::<Herd>().iter().all(|llama| llama.manual_frolic));
    }

    #[test]
    fn test_toggle_frolic_needs_living_targets() {
        let (mut world, ids) = world_with(1);
        kill(&mut world, &ids[0]);
        assert_eq!(
            toggle_manual_frolic(&mut world, &ids),
            Err(CommandError::NoLivingTargets)
        );
    }

    #[test]
    fn test_place_item_is_clamped() {
        let (mut world, _) = world_with(0);
        let id = place_item(&mut world, 5000.0, -10.0, ItemKind::Toy);
        let items = world.resource::<ItemRegistry>();
        let item = items.get(&id).unwrap();
        assert_eq!(item.position, Position::new(760.0, 20.0));

        let removed = remove_item(&mut world, &id).unwrap();
        assert_eq!(removed.kind, ItemKind::Toy);
        assert!(remove_item(&mut world, &id).is_none());
    }

    #[test]
    fn test_rename_rules() {
        let (mut world, ids) = world_with(2);
        let other = world.resource::<Herd>().get(&ids[1]).unwrap().name.clone();

        assert_eq!(rename_llama(&mut world, &ids[0], "   "), Err(CommandError::EmptyName));
        assert!(matches!(
            rename_llama(&mut world, &ids[0], &other.to_uppercase()),
            Err(CommandError::NameTaken(_))
        ));
        rename_llama(&mut world, &ids[0], "  Sir Fluff ").unwrap();
        assert_eq!(world.resource::<Herd>().get(&ids[0]).unwrap().name, "Sir Fluff");

        // renaming to its own name with different case is fine
        rename_llama(&mut world, &ids[0], "sir fluff").unwrap();

        kill(&mut world, &ids[1]);
        rename_llama(&mut world, &ids[1], "Ghost").unwrap();
    }

    #[test]
    fn test_reset_reseeds() {
        let (mut world, _) = world_with(5);
        place_item(&mut world, 100.0, 100.0, ItemKind::Food);
        world.resource_mut::<WorldClock>().advance();

        let ids = reset(&mut world, 3);
        assert_eq!(ids.len(), 3);
        assert_eq!(world.resource::<Herd>().len(), 3);
        assert!(world.resource::<ItemRegistry>().is_empty());
        assert_eq!(world.resource::<WorldClock>().time, SimClock::start());
        assert_eq!(world.resource::<WorldClock>().tick, 0);
    }

    #[test]
    fn test_commands_record_events() {
        let (mut world, ids) = world_with(1);
        feed_llama(&mut world, &ids[0]).unwrap();
        let events = world.resource_mut::<TickEvents>().drain();
        assert!(matches!(events[0].event, HerdEvent::Spawned { .. }));
        assert!(matches!(events[1].event, HerdEvent::Fed { .. }));
    }
}
