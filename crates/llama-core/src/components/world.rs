//! World Resources
//!
//! The herd roster, the habitat rectangle, the clock and the per-tick event
//! buffer. All of them live in the simulation's ECS world as resources.

use bevy_ecs::prelude::*;
use llama_events::{HerdEvent, LoggedEvent, SimClock};
use rand::Rng;
use std::collections::HashSet;

use super::llama::{Llama, LlamaId, Position};
use crate::random::rand_range;

/// Resource: every llama ever created in this habitat, in creation order.
///
/// Roster order is update order within a tick.
#[derive(Resource, Debug, Clone, Default)]
pub struct Herd {
    llamas: Vec<Llama>,
}

impl Herd {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_llamas(llamas: Vec<Llama>) -> Self {
        Self { llamas }
    }

    pub fn push(&mut self, llama: Llama) {
        self.llamas.push(llama);
    }

    pub fn get(&self, id: &LlamaId) -> Option<&Llama> {
        self.llamas.iter().find(|llama| &llama.id == id)
    }

    pub fn get_mut(&mut self, id: &LlamaId) -> Option<&mut Llama> {
        self.llamas.iter_mut().find(|llama| &llama.id == id)
    }

    pub fn index_of(&self, id: &LlamaId) -> Option<usize> {
        self.llamas.iter().position(|llama| &llama.id == id)
    }

    pub fn llamas(&self) -> &[Llama] {
        &self.llamas
    }

    pub fn llamas_mut(&mut self) -> &mut [Llama] {
        &mut self.llamas
    }

    pub fn iter(&self) -> impl Iterator<Item = &Llama> {
        self.llamas.iter()
    }

    pub fn living(&self) -> impl Iterator<Item = &Llama> {
        self.llamas.iter().filter(|llama| llama.is_alive())
    }

    pub fn len(&self) -> usize {
        self.llamas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.llamas.is_empty()
    }

    pub fn clear(&mut self) {
        self.llamas.clear();
    }

    /// Lowercased names of every llama except `exclude`.
    pub fn taken_names(&self, exclude: Option<&LlamaId>) -> HashSet<String> {
        self.llamas
            .iter()
            .filter(|llama| Some(&llama.id) != exclude)
            .map(|llama| llama.name.to_lowercase())
            .collect()
    }

    /// Nearest living llama other than the one at `index`, strictly closer
    /// than `range`.
    pub fn nearest_living_neighbor(&self, index: usize, range: f32) -> Option<(usize, f32)> {
        let origin = self.llamas.get(index)?.position;
        self.llamas
            .iter()
            .enumerate()
            .filter(|(other, llama)| *other != index && llama.is_alive())
            .map(|(other, llama)| (other, origin.distance_to(&llama.position)))
            .filter(|(_, distance)| *distance < range)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }
}

/// Inner margin kept between a llama and the top/left walls.
pub const WALL_MARGIN: f32 = 20.0;
/// Margin kept from the bottom/right walls, covering the llama sprite.
pub const LLAMA_TRAILING_MARGIN: f32 = 60.0;
/// Margin kept from the bottom/right walls when placing items.
pub const ITEM_TRAILING_MARGIN: f32 = 40.0;
/// Founders appear at least this far from the top/left walls.
pub const SPAWN_MARGIN: f32 = 50.0;
/// Founders appear at least this far from the bottom/right walls.
pub const SPAWN_TRAILING_MARGIN: f32 = 70.0;

/// Clamps without panicking when the rectangle is too small for its margins;
/// the upper bound wins in that case.
pub fn bounded(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Resource: the habitat rectangle, as reported by whoever draws it
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Habitat {
    pub width: f32,
    pub height: f32,
}

impl Default for Habitat {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Habitat {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Keeps a llama fully inside the rectangle.
    pub fn clamp_llama(&self, position: Position) -> Position {
        Position::new(
            bounded(position.x, WALL_MARGIN, self.width - LLAMA_TRAILING_MARGIN),
            bounded(position.y, WALL_MARGIN, self.height - LLAMA_TRAILING_MARGIN),
        )
    }

    /// Keeps a placed item fully inside the rectangle.
    pub fn clamp_item(&self, position: Position) -> Position {
        Position::new(
            bounded(position.x, WALL_MARGIN, self.width - ITEM_TRAILING_MARGIN),
            bounded(position.y, WALL_MARGIN, self.height - ITEM_TRAILING_MARGIN),
        )
    }

    /// Random point where a new llama may appear, always within the llama clamp.
    pub fn random_spawn_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        self.clamp_llama(Position::new(
            rand_range(rng, SPAWN_MARGIN, self.width - SPAWN_TRAILING_MARGIN),
            rand_range(rng, SPAWN_MARGIN, self.height - SPAWN_TRAILING_MARGIN),
        ))
    }
}

/// Resource: simulated time plus the number of ticks run so far
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct WorldClock {
    pub tick: u64,
    pub time: SimClock,
}

impl WorldClock {
    pub fn new(time: SimClock) -> Self {
        Self { tick: 0, time }
    }

    pub fn advance(&mut self) {
        self.tick += 1;
        self.time.advance();
    }
}

/// Resource: events produced by ticks and commands since the last drain
#[derive(Resource, Debug, Default)]
pub struct TickEvents {
    pub events: Vec<LoggedEvent>,
}

impl TickEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, clock: &WorldClock, event: HerdEvent) {
        self.events
            .push(LoggedEvent::new(clock.tick, clock.time, event));
    }

    pub fn drain(&mut self) -> Vec<LoggedEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Resource: whether background music should play (any living llama frolics)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Soundtrack {
    pub frolic_active: bool,
}
