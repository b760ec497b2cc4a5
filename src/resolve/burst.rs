//! Burst setup and hit redistribution
//!
//! Sustained-fire penalties, the effective arc a burst is actually
//! swept over, and the proportional redistribution that conserves
//! round and pellet totals across simultaneous targets.

use crate::core::error::{EngineError, Result};
use crate::model::character::Character;
use crate::model::equipment::{FullAuto, Weapon};
use crate::model::shot::ShotParameters;
use crate::tables::min_arc::effective_minimum_arc;

/// EAL penalty for keeping the trigger down: impulses of continuous
/// fire beyond the first burst, times the weapon's per-impulse penalty.
pub fn sustained_burst_penalty(continuous_impulses: u32, full_auto: FullAuto) -> i32 {
    continuous_impulses as i32 * full_auto.sab_penalty
}

/// The arc a burst is actually swept over: the weapon's minimum arc
/// adjusted for the shooter, unless a wider sweep was asked for.
pub fn burst_arc(
    weapon: &Weapon,
    shooter: &Character,
    params: &ShotParameters,
    custom_arc: Option<f64>,
) -> Result<f64> {
    let band = weapon.ballistics()?.at(params.range)?;
    let effective = effective_minimum_arc(
        band.minimum_arc,
        weapon.family,
        params.stance,
        shooter.strength,
        weapon.one_handed,
        params.shooter_speed > 0,
    );
    Ok(match custom_arc {
        Some(wanted) if wanted > effective => wanted,
        _ => effective,
    })
}

/// Rescale per-target allocations so they sum to `capacity`.
///
/// Allocations already within capacity come back untouched. Otherwise
/// each entry gets its proportional share of the summed weights
/// (truncated), every entry that had any allocation keeps at least one,
/// and the last entry processed absorbs the rounding remainder so the
/// output total is exact.
pub fn redistribute(allocations: &[u32], weights: &[i32], capacity: u32) -> Result<Vec<u32>> {
    if allocations.len() != weights.len() {
        return Err(EngineError::MismatchedInputs {
            targets: allocations.len(),
            actual: weights.len(),
            what: "redistribution weights",
        });
    }
    let total: u32 = allocations.iter().sum();
    if total <= capacity {
        return Ok(allocations.to_vec());
    }

    let positives: Vec<usize> = (0..allocations.len())
        .filter(|&i| allocations[i] > 0)
        .collect();
    debug_assert!(
        capacity as usize >= positives.len(),
        "capacity cannot cover one round per engaged target"
    );
    let weight_sum: i64 = positives.iter().map(|&i| weights[i].max(1) as i64).sum();

    let mut out = vec![0u32; allocations.len()];
    let mut spent = 0u32;
    for (k, &i) in positives.iter().enumerate() {
        let remaining_entries = (positives.len() - 1 - k) as u32;
        let share = if k == positives.len() - 1 {
            // Last entry processed absorbs the remainder.
            capacity - spent
        } else {
            let w = weights[i].max(1) as i64;
            let proportional = (capacity as i64 * w / weight_sum) as u32;
            // Keep at least one, but leave room for those still to come.
            proportional.max(1).min(capacity - spent - remaining_entries)
        };
        out[i] = share;
        spent += share;
    }
    Ok(out)
}
