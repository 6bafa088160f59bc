//! Herd Update System
//!
//! Runs the per-llama pipeline for every living llama in roster order:
//! drives, mood, action, movement, neglect. Each llama sees its neighbours as
//! already updated earlier in the same pass.

use bevy_ecs::prelude::*;
use llama_events::HerdEvent;
use rand::Rng;

use crate::components::item::ItemRegistry;
use crate::components::world::{Habitat, Herd, TickEvents, WorldClock};
use crate::systems::action::resolve_action;
use crate::systems::drives::{update_drives, update_mood};
use crate::systems::movement::move_llama;
use crate::systems::neglect::check_neglect;
use crate::SimRng;

/// One tick for the llama at `index`. Dead or missing llamas are skipped.
pub fn update_llama<R: Rng + ?Sized>(
    herd: &mut Herd,
    index: usize,
    items: &mut ItemRegistry,
    habitat: &Habitat,
    rng: &mut R,
) -> Vec<HerdEvent> {
    let mut events = Vec::new();
    match herd.llamas_mut().get_mut(index) {
        Some(llama) if llama.is_alive() => {
            update_drives(llama);
            update_mood(llama);
        }
        _ => return events,
    }

    if let Some(action) = resolve_action(herd, index, items, rng) {
        let id = &herd.llamas()[index].id;
        if let Some(event) = action.event(id) {
            events.push(event);
        }
    }

    move_llama(herd, index, items, habitat, rng);

    let llama = &mut herd.llamas_mut()[index];
    if check_neglect(llama) {
        events.push(HerdEvent::Died {
            llama_id: llama.id.to_string(),
            name: llama.name.clone(),
        });
    }
    events
}

/// System: advance every living llama by one tick
pub fn update_herd(
    clock: Res<WorldClock>,
    habitat: Res<Habitat>,
    mut herd: ResMut<Herd>,
    mut items: ResMut<ItemRegistry>,
    mut rng: ResMut<SimRng>,
    mut tick_events: ResMut<TickEvents>,
) {
    for index in 0..herd.len() {
        let events = update_llama(&mut herd, index, &mut items, &habitat, &mut rng.0);
        for event in events {
            tracing::debug!(tick = clock.tick, ?event, "herd event");
            tick_events.record(&clock, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::item::{Item, ItemId, ItemKind};
    use crate::components::llama::{Drives, Llama, LlamaId, Mood, Position};
    use crate::genetics::random_dna;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn llama(id: &str, x: f32, y: f32, drives: Drives) -> Llama {
        let mut rng = SmallRng::seed_from_u64(5);
        Llama {
            id: LlamaId::from(id),
            name: id.to_string(),
            generation: 1,
            parents: Vec::new(),
            dna: random_dna(&mut rng),
            drives,
            mood: Mood::Content,
            manual_frolic: false,
            position: Position::new(x, y),
            bubble: String::new(),
            neglect: 0,
            is_dead: false,
        }
    }

    #[test]
    fn test_hungry_llama_on_food_eats() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut herd = Herd::from_llamas(vec![llama(
            "a",
            200.0,
            200.0,
            Drives {
                hunger: 90.0,
                ..Drives::default()
            },
        )]);
        let mut items = ItemRegistry::new();
        items.push(Item::new(
            ItemId("food".into()),
            ItemKind::Food,
            Position::new(200.0, 200.0),
        ));

        let events = update_llama(&mut herd, 0, &mut items, &Habitat::default(), &mut rng);

        assert!(items.is_empty());
        assert_eq!(herd.llamas()[0].bubble, "nom nom");
        // +1.2 growth, at most -1.12 regulation, then -30
        let hunger = herd.llamas()[0].drives.hunger;
        assert!(hunger > 60.0 && hunger <= 61.2, "hunger {hunger}");
        assert!(matches!(events[0], HerdEvent::Ate { .. }));
    }

    #[test]
    fn test_dead_llama_is_frozen() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut dead = llama("a", 200.0, 200.0, Drives::default());
        dead.is_dead = true;
        dead.bubble = "...".into();
        let before = dead.clone();
        let mut herd = Herd::from_llamas(vec![dead]);
        let mut items = ItemRegistry::new();

        for _ in 0..10 {
            let events = update_llama(&mut herd, 0, &mut items, &Habitat::default(), &mut rng);
            assert!(events.is_empty());
        }
        assert_eq!(herd.llamas()[0], before);
    }

    #[test]
    fn test_neglect_death_emits_event() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut dying = llama(
            "a",
            200.0,
            200.0,
            Drives {
                hunger: 100.0,
                sleep: 100.0,
                social: 0.0,
                boredom: 100.0,
                curiosity: 100.0,
                love: 0.0,
            },
        );
        dying.neglect = 19;
        dying.dna.neural.bias = -1.2;
        dying.dna.neural.weights = [0.0; 4];
        dying.dna.traits.resilience = 0.0;
        let mut herd = Herd::from_llamas(vec![dying]);

        let events = update_llama(
            &mut herd,
            0,
            &mut ItemRegistry::new(),
            &Habitat::default(),
            &mut rng,
        );
        assert!(herd.llamas()[0].is_dead);
        assert_eq!(herd.llamas()[0].bubble, "...");
        assert!(events.iter().any(|event| matches!(event, HerdEvent::Died { .. })));
    }

    #[test]
    fn test_manual_frolic_llama_frolics() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut pinned = llama(
            "a",
            200.0,
            200.0,
            Drives {
                hunger: 90.0,
                ..Drives::default()
            },
        );
        pinned.manual_frolic = true;
        let mut herd = Herd::from_llamas(vec![pinned]);
        let mut items = ItemRegistry::new();
        items.push(Item::new(
            ItemId("food".into()),
            ItemKind::Food,
            Position::new(200.0, 200.0),
        ));

        update_llama(&mut herd, 0, &mut items, &Habitat::default(), &mut rng);
        assert_eq!(herd.llamas()[0].mood, Mood::Frolic);
        assert_eq!(items.len(), 1);
    }
}
