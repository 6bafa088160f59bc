//! Simulation Context
//!
//! `Simulation` owns the whole habitat: an ECS world holding the herd, the
//! items, the clock and the seeded RNG, plus the tick schedule. Collaborators
//! go through it for every command and query.

use std::path::Path;

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use llama_events::{LoggedEvent, SimClock};

use crate::commands;
use crate::components::item::{Item, ItemId, ItemKind, ItemRegistry};
use crate::components::llama::{Llama, LlamaId};
use crate::components::world::{Habitat, Herd, Soundtrack, TickEvents, WorldClock};
use crate::error::CommandError;
use crate::output::{storage, Snapshot};
use crate::selection::Selection;
use crate::setup::spawn_founders;
use crate::systems::{advance_clock, update_herd, update_soundtrack};
use crate::SimRng;

pub const DEFAULT_FOUNDERS: usize = 3;

pub struct Simulation {
    world: World,
    schedule: Schedule,
    selection: Selection,
    founders: usize,
}

fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((advance_clock, update_herd, update_soundtrack).chain());
    schedule
}

impl Simulation {
    /// An empty habitat at Day 1, 08:00.
    pub fn new(seed: u64, habitat: Habitat) -> Self {
        Self::from_snapshot(Snapshot::default(), seed, habitat)
    }

    /// A fresh habitat seeded with `founders` llamas.
    pub fn with_founders(seed: u64, habitat: Habitat, founders: usize) -> Self {
        let mut sim = Self::new(seed, habitat);
        sim.founders = founders;
        sim.seed_founders();
        sim
    }

    /// Restores a normalized snapshot.
    pub fn from_snapshot(snapshot: Snapshot, seed: u64, habitat: Habitat) -> Self {
        Self::assemble(snapshot, SmallRng::seed_from_u64(seed), habitat)
    }

    /// Restores the habitat saved at `path`, or an empty one when there is
    /// no usable save.
    pub fn load_or_default(path: impl AsRef<Path>, seed: u64, habitat: Habitat) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let snapshot = storage::load_or_default(path, &habitat, &mut rng);
        Self::assemble(snapshot, rng, habitat)
    }

    fn assemble(snapshot: Snapshot, rng: SmallRng, habitat: Habitat) -> Self {
        let mut world = World::new();
        world.insert_resource(SimRng(rng));
        world.insert_resource(habitat);
        world.insert_resource(WorldClock::new(snapshot.clock()));
        world.insert_resource(Herd::from_llamas(snapshot.llamas));
        world.insert_resource(ItemRegistry::from_items(snapshot.items));
        world.insert_resource(TickEvents::new());
        world.insert_resource(Soundtrack::default());

        Self {
            world,
            schedule: build_schedule(),
            selection: Selection::new(),
            founders: DEFAULT_FOUNDERS,
        }
    }

    /// How many founders `reset` and `seed_founders` create.
    pub fn set_founders(&mut self, founders: usize) {
        self.founders = founders;
    }

    /// Adds the configured founders without emitting events. Used to
    /// populate an empty habitat at startup.
    pub fn seed_founders(&mut self) -> Vec<LlamaId> {
        let habitat = *self.world.resource::<Habitat>();
        let founders = self.founders;
        self.world.resource_scope(|world, mut rng: Mut<SimRng>| {
            let mut herd = world.resource_mut::<Herd>();
            spawn_founders(&mut herd, &habitat, founders, &mut rng.0)
        })
    }

    /// Advance one tick: clock, herd, soundtrack. Dead llamas leave the
    /// selection.
    pub fn tick(&mut self) {
        self.schedule.run(&mut self.world);
        self.selection.prune(self.world.resource::<Herd>());
    }

    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    // Commands

    pub fn spawn_llama(&mut self) -> LlamaId {
        commands::spawn_llama(&mut self.world)
    }

    pub fn breed_llamas(&mut self, a: &LlamaId, b: &LlamaId) -> Result<LlamaId, CommandError> {
        commands::breed_llamas(&mut self.world, a, b)
    }

    /// Breeds the two selected llamas and clears the selection.
    pub fn breed_selected(&mut self) -> Result<LlamaId, CommandError> {
        let (a, b) = self.selection.breeding_pair()?;
        let child = commands::breed_llamas(&mut self.world, &a, &b)?;
        self.selection.clear();
        Ok(child)
    }

    pub fn feed_llama(&mut self, id: &LlamaId) -> Result<(), CommandError> {
        commands::feed_llama(&mut self.world, id)
    }

    /// Feeds whichever selected llama comes first in the roster.
    pub fn feed_selected(&mut self) -> Result<(), CommandError> {
        let id = self.selection.first(self.herd())?.clone();
        commands::feed_llama(&mut self.world, &id)
    }

    pub fn toggle_manual_frolic(&mut self, ids: &[LlamaId]) -> Result<bool, CommandError> {
        commands::toggle_manual_frolic(&mut self.world, ids)
    }

    pub fn toggle_frolic_selected(&mut self) -> Result<bool, CommandError> {
        let ids = self.selection.ids().to_vec();
        commands::toggle_manual_frolic(&mut self.world, &ids)
    }

    pub fn place_item(&mut self, x: f32, y: f32, kind: ItemKind) -> ItemId {
        commands::place_item(&mut self.world, x, y, kind)
    }

    pub fn remove_item(&mut self, id: &ItemId) -> Option<Item> {
        commands::remove_item(&mut self.world, id)
    }

    pub fn rename_llama(&mut self, id: &LlamaId, name: &str) -> Result<(), CommandError> {
        commands::rename_llama(&mut self.world, id, name)
    }

    pub fn reset(&mut self) -> Vec<LlamaId> {
        self.selection.clear();
        commands::reset(&mut self.world, self.founders)
    }

    /// Toggles a llama in the keeper's selection.
    pub fn select(&mut self, id: &LlamaId) {
        self.selection.toggle(id, self.world.resource::<Herd>());
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // Queries

    /// Events since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<LoggedEvent> {
        self.world.resource_mut::<TickEvents>().drain()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.clock(), self.herd(), self.items())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), crate::error::StorageError> {
        storage::save(&self.snapshot(), path)
    }

    pub fn stability(&self, id: &LlamaId) -> Option<f32> {
        self.herd().get(id).map(Llama::stability)
    }

    /// Called by the renderer whenever the habitat is resized.
    pub fn set_habitat_size(&mut self, width: f32, height: f32) {
        *self.world.resource_mut::<Habitat>() = Habitat::new(width, height);
    }

    pub fn habitat(&self) -> Habitat {
        *self.world.resource::<Habitat>()
    }

    pub fn herd(&self) -> &Herd {
        self.world.resource::<Herd>()
    }

    pub fn llama(&self, id: &LlamaId) -> Option<&Llama> {
        self.herd().get(id)
    }

    pub fn items(&self) -> &ItemRegistry {
        self.world.resource::<ItemRegistry>()
    }

    pub fn clock(&self) -> SimClock {
        self.world.resource::<WorldClock>().time
    }

    pub fn tick_count(&self) -> u64 {
        self.world.resource::<WorldClock>().tick
    }

    /// Whether any living llama is frolicking, as of the last tick.
    pub fn music_playing(&self) -> bool {
        self.world.resource::<Soundtrack>().frolic_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_advances_clock() {
        let mut sim = Simulation::with_founders(1, Habitat::default(), 3);
        assert_eq!(sim.clock(), SimClock::start());
        sim.run(4);
        assert_eq!(sim.tick_count(), 4);
        assert_eq!(sim.clock(), SimClock::new(1, 9, 0));
    }

    #[test]
    fn test_breed_selected_clears_selection() {
        let mut sim = Simulation::with_founders(2, Habitat::default(), 2);
        let ids: Vec<LlamaId> = sim.herd().iter().map(|l| l.id.clone()).collect();

        assert_eq!(
            sim.breed_selected(),
            Err(CommandError::BreedingNeedsTwo { selected: 0 })
        );
        sim.select(&ids[0]);
        sim.select(&ids[1]);
        let child = sim.breed_selected().unwrap();
        assert!(sim.selection().is_empty());
        assert_eq!(sim.llama(&child).unwrap().generation, 2);
    }

    #[test]
    fn test_feed_selected_uses_roster_order() {
        let mut sim = Simulation::with_founders(7, Habitat::default(), 2);
        let ids: Vec<LlamaId> = sim.herd().iter().map(|l| l.id.clone()).collect();
        for id in &ids {
            sim.world.resource_mut::<Herd>().get_mut(id).unwrap().drives.hunger = 80.0;
        }
        sim.select(&ids[1]);
        sim.select(&ids[0]);

        sim.feed_selected().unwrap();
        assert_eq!(sim.llama(&ids[0]).unwrap().drives.hunger, 45.0);
        assert_eq!(sim.llama(&ids[1]).unwrap().drives.hunger, 80.0);
    }

    #[test]
    fn test_dead_llamas_leave_selection_after_tick() {
        let mut sim = Simulation::with_founders(3, Habitat::default(), 2);
        let ids: Vec<LlamaId> = sim.herd().iter().map(|l| l.id.clone()).collect();
        sim.select(&ids[0]);
        sim.world.resource_mut::<Herd>().get_mut(&ids[0]).unwrap().is_dead = true;
        sim.tick();
        assert!(sim.selection().is_empty());
    }

    #[test]
    fn test_snapshot_restores() {
        let mut sim = Simulation::with_founders(4, Habitat::default(), 3);
        sim.place_item(100.0, 100.0, ItemKind::Bed);
        sim.run(3);
        let snapshot = sim.snapshot();

        let restored = Simulation::from_snapshot(snapshot.clone(), 99, Habitat::default());
        assert_eq!(restored.snapshot(), snapshot);
        assert_eq!(restored.clock(), sim.clock());
    }

    #[test]
    fn test_reset_restores_founders() {
        let mut sim = Simulation::with_founders(5, Habitat::default(), 3);
        sim.spawn_llama();
        sim.run(2);
        sim.set_founders(2);
        sim.reset();
        assert_eq!(sim.herd().len(), 2);
        assert_eq!(sim.clock(), SimClock::start());
    }

    #[test]
    fn test_resize_bounds_movement() {
        let mut sim = Simulation::with_founders(6, Habitat::default(), 3);
        sim.set_habitat_size(200.0, 150.0);
        sim.run(5);
        for llama in sim.herd().iter() {
            assert!(llama.position.x <= 140.0 && llama.position.y <= 90.0);
        }
    }
}
