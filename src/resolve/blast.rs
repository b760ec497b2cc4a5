//! Shrapnel and concussion resolution helpers

use crate::core::dice::DieRoller;
use crate::tables::autofire::{roll_hits, swarm_cell, HitCell};

/// Shrapnel (or pellet) hits on one target from a base hit chance at
/// its distance from the burst.
pub fn shrapnel_hit_count(base_hit_chance: u32, size_alm: i32, dice: &mut dyn DieRoller) -> u32 {
    roll_hits(swarm_cell(base_hit_chance, size_alm), dice)
}

/// The swarm cell without rolling, for previews.
pub fn shrapnel_cell(base_hit_chance: u32, size_alm: i32) -> HitCell {
    swarm_cell(base_hit_chance, size_alm)
}

/// Concussion damage: the base value at range scaled by the product of
/// every applicable blast modifier (enclosure, cover, prone, ...).
pub fn concussion_damage(base: f64, modifiers: &[f64]) -> u32 {
    let product: f64 = modifiers.iter().product();
    (base * product).round() as u32
}
