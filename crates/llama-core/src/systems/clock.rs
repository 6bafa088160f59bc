use bevy_ecs::prelude::*;

use crate::components::world::WorldClock;

/// System: advance simulated time by one tick. Runs before the herd update.
pub fn advance_clock(mut clock: ResMut<WorldClock>) {
    clock.advance();
}
