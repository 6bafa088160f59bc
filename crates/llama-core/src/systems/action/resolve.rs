//! Action Resolution
//!
//! Proximity-gated effects: a llama only uses an item or greets a companion
//! that is already within reach. Checked in a fixed order; the first that
//! applies is the llama's action for the tick.

use llama_events::HerdEvent;
use rand::Rng;

use crate::components::item::{ItemId, ItemKind, ItemRegistry};
use crate::components::llama::{shift_drive, Drives, Llama, LlamaId, Mood, Position};
use crate::components::world::Herd;
use crate::random::pick;

/// A drive must be past these before the llama acts on it
pub mod urges {
    pub const HUNGER: f32 = 70.0;
    pub const SLEEP: f32 = 70.0;
    pub const BOREDOM: f32 = 70.0;
    pub const CURIOSITY: f32 = 60.0;
    /// Social must be below this to greet
    pub const LONELY: f32 = 40.0;
}

/// Maximum distance (exclusive) at which each target can be used
pub mod reach {
    pub const FOOD: f32 = 40.0;
    pub const BED: f32 = 45.0;
    pub const TOY: f32 = 45.0;
    pub const MIRROR: f32 = 45.0;
    pub const COMPANION: f32 = 90.0;
}

/// How much each action moves the drives
pub mod relief {
    pub const EAT: f32 = 30.0;
    pub const SLEEP: f32 = 40.0;
    pub const PLAY: f32 = 35.0;
    pub const INSPECT: f32 = 25.0;
    pub const GREET_SOCIAL: f32 = 20.0;
    pub const GREET_LOVE: f32 = 10.0;
}

/// Idle llamas below this stability babble in confusion.
pub const CONFUSED_BELOW: f32 = 0.35;

pub const FROLIC_CHATTER: [&str; 4] = ["whee!", "hop!", "yay!", "frolic"];
pub const CONFUSED_CHATTER: [&str; 3] = ["reboot", "static", "sync?"];
pub const IDLE_CHATTER: [&str; 5] = ["...", "hmm", "brr", "blep", "loom"];

/// What a llama did this tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Frolic,
    Eat { item: ItemId },
    Sleep { item: ItemId },
    Play { item: ItemId },
    Inspect { item: ItemId },
    Greet { partner: LlamaId },
    Idle { confused: bool },
}

impl Action {
    /// Fixed speech bubble, for actions that have one.
    pub fn bubble(&self) -> Option<&'static str> {
        match self {
            Action::Eat { .. } => Some("nom nom"),
            Action::Sleep { .. } => Some("zzz"),
            Action::Play { .. } => Some("play!"),
            Action::Inspect { .. } => Some("ooh"),
            Action::Greet { .. } => Some("hiya"),
            Action::Frolic | Action::Idle { .. } => None,
        }
    }

    /// The item used, if the action used one.
    pub fn item(&self) -> Option<&ItemId> {
        match self {
            Action::Eat { item }
            | Action::Sleep { item }
            | Action::Play { item }
            | Action::Inspect { item } => Some(item),
            Action::Frolic | Action::Greet { .. } | Action::Idle { .. } => None,
        }
    }

    pub fn event(&self, llama_id: &LlamaId) -> Option<HerdEvent> {
        let llama_id = llama_id.to_string();
        match self {
            Action::Eat { item } => Some(HerdEvent::Ate {
                llama_id,
                item_id: item.to_string(),
            }),
            Action::Sleep { item } => Some(HerdEvent::Slept {
                llama_id,
                item_id: item.to_string(),
            }),
            Action::Play { item } => Some(HerdEvent::Played {
                llama_id,
                item_id: item.to_string(),
            }),
            Action::Inspect { item } => Some(HerdEvent::Inspected {
                llama_id,
                item_id: item.to_string(),
            }),
            Action::Greet { partner } => Some(HerdEvent::Greeted {
                llama_id,
                partner_id: partner.to_string(),
            }),
            Action::Frolic | Action::Idle { .. } => None,
        }
    }
}

fn within(items: &ItemRegistry, at: &Position, kind: ItemKind, reach: f32) -> Option<ItemId> {
    items
        .nearest_of_kind(at, kind)
        .filter(|(_, distance)| *distance < reach)
        .map(|(item, _)| item.id.clone())
}

/// First applicable effect in priority order, if any.
fn choose_effect(
    drives: &Drives,
    at: &Position,
    companion: Option<LlamaId>,
    items: &ItemRegistry,
) -> Option<Action> {
    if drives.hunger > urges::HUNGER {
        if let Some(item) = within(items, at, ItemKind::Food, reach::FOOD) {
            return Some(Action::Eat { item });
        }
    }
    if drives.sleep > urges::SLEEP {
        if let Some(item) = within(items, at, ItemKind::Bed, reach::BED) {
            return Some(Action::Sleep { item });
        }
    }
    if drives.boredom > urges::BOREDOM {
        if let Some(item) = within(items, at, ItemKind::Toy, reach::TOY) {
            return Some(Action::Play { item });
        }
    }
    if drives.curiosity > urges::CURIOSITY {
        if let Some(item) = within(items, at, ItemKind::Mirror, reach::MIRROR) {
            return Some(Action::Inspect { item });
        }
    }
    if drives.social < urges::LONELY {
        if let Some(partner) = companion {
            return Some(Action::Greet { partner });
        }
    }
    None
}

fn apply_effect(action: &Action, llama: &mut Llama, items: &mut ItemRegistry) {
    let drives = &mut llama.drives;
    match action {
        Action::Eat { .. } => shift_drive(&mut drives.hunger, -relief::EAT),
        Action::Sleep { .. } => shift_drive(&mut drives.sleep, -relief::SLEEP),
        Action::Play { .. } => shift_drive(&mut drives.boredom, -relief::PLAY),
        Action::Inspect { .. } => shift_drive(&mut drives.curiosity, -relief::INSPECT),
        Action::Greet { .. } => {
            shift_drive(&mut drives.social, relief::GREET_SOCIAL);
            shift_drive(&mut drives.love, relief::GREET_LOVE);
        }
        Action::Frolic | Action::Idle { .. } => {}
    }

    if let Some(id) = action.item() {
        if items.get(id).is_some_and(|item| item.kind.is_consumable()) {
            items.remove(id);
        }
    }
}

/// Decides and applies one llama's action, updating its bubble.
///
/// `companion` is the nearest living llama within greeting reach, if any.
pub fn act<R: Rng + ?Sized>(
    llama: &mut Llama,
    companion: Option<LlamaId>,
    items: &mut ItemRegistry,
    rng: &mut R,
) -> Action {
    if llama.mood == Mood::Frolic {
        llama.bubble = pick(rng, &FROLIC_CHATTER).to_string();
        return Action::Frolic;
    }

    let stability = llama.stability();
    let action = choose_effect(&llama.drives, &llama.position, companion, items);
    match action {
        Some(action) => {
            apply_effect(&action, llama, items);
            if let Some(bubble) = action.bubble() {
                llama.bubble = bubble.to_string();
            }
            action
        }
        None => {
            let confused = stability < CONFUSED_BELOW;
            let chatter: &[&str] = if confused {
                &CONFUSED_CHATTER
            } else {
                &IDLE_CHATTER
            };
            llama.bubble = pick(rng, chatter).to_string();
            Action::Idle { confused }
        }
    }
}

/// Resolves the action of the llama at `index`, reading its neighbours as
/// they stand right now in the pass.
pub fn resolve_action<R: Rng + ?Sized>(
    herd: &mut Herd,
    index: usize,
    items: &mut ItemRegistry,
    rng: &mut R,
) -> Option<Action> {
    let companion = herd
        .nearest_living_neighbor(index, reach::COMPANION)
        .map(|(other, _)| herd.llamas()[other].id.clone());
    let llama = herd.llamas_mut().get_mut(index)?;
    Some(act(llama, companion, items, rng))
}
