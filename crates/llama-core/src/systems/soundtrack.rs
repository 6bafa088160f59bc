//! Background music flag.

use bevy_ecs::prelude::*;

use crate::components::llama::Mood;
use crate::components::world::{Herd, Soundtrack};

pub fn any_frolicking(herd: &Herd) -> bool {
    herd.living().any(|llama| llama.mood == Mood::Frolic)
}

/// System: music plays while any living llama frolics
pub fn update_soundtrack(herd: Res<Herd>, mut soundtrack: ResMut<Soundtrack>) {
    let active = any_frolicking(&herd);
    if soundtrack.frolic_active != active {
        tracing::debug!(active, "soundtrack changed");
    }
    soundtrack.frolic_active = active;
}
