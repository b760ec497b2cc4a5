//! Effective accuracy level
//!
//! One deterministic integer summarizing every accuracy factor of a
//! shot. No randomness here; the preview layer depends on this being
//! bit-identical across calls with the same inputs.

use crate::core::error::Result;
use crate::model::character::Character;
use crate::model::equipment::Weapon;
use crate::model::shot::ShotParameters;
use crate::tables::accuracy::{
    self, movement_alm, odds_of_hitting, range_alm, target_size_alm, ShotKind, SizeKind,
};

/// Reflexive-duck penalties.
const SHOOTER_DUCK_ALM: i32 = -10;
const TARGET_DUCK_ALM: i32 = -5;

/// EAL and the odds it buys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccuracyBreakdown {
    pub eal: i32,
    pub odds: u32,
}

/// EAL with the exposure-derived size modifier replaced by an explicit
/// value; shotgun patterns substitute the pattern modifier here.
pub fn accuracy_with_size(
    shooter: &Character,
    weapon: &Weapon,
    params: &ShotParameters,
    target: &Character,
    size_alm: i32,
    kind: ShotKind,
) -> Result<AccuracyBreakdown> {
    accuracy_sum(shooter, weapon, params, target.defense_alm()?, size_alm, kind)
}

/// EAL against a map point (area, window, doorway): no defender, so no
/// defensive modifier applies.
pub fn point_accuracy(
    shooter: &Character,
    weapon: &Weapon,
    params: &ShotParameters,
    size_alm: i32,
    kind: ShotKind,
) -> Result<AccuracyBreakdown> {
    accuracy_sum(shooter, weapon, params, 0, size_alm, kind)
}

fn accuracy_sum(
    shooter: &Character,
    weapon: &Weapon,
    params: &ShotParameters,
    defense_alm: i32,
    size_alm: i32,
    kind: ShotKind,
) -> Result<AccuracyBreakdown> {
    // The movement table's size proxy always uses the standard modifier.
    let size_proxy = target_size_alm(params.exposure, SizeKind::Standard)?;

    // Either party moving limits how long an aim can be held.
    let mut aim_time = params.aim_time;
    if let Some(cap) = accuracy::max_aim_time(params.shooter_speed, size_proxy) {
        aim_time = aim_time.min(cap);
    }
    if let Some(cap) = accuracy::max_aim_time(params.target_speed, size_proxy) {
        aim_time = aim_time.min(cap);
    }

    let mut eal = weapon.aim_alm(aim_time) + shooter.skill_accuracy_level()?;
    eal += range_alm(params.range)?;
    eal += params.situation_alm();
    eal += params.visibility_alm();
    eal += movement_alm(params.shooter_speed, size_proxy);
    eal += movement_alm(params.target_speed, size_proxy);
    if params.shooter_ducked {
        eal += SHOOTER_DUCK_ALM;
    }
    if params.target_ducked {
        eal += TARGET_DUCK_ALM;
    }
    eal += defense_alm;

    // The barrel is only mechanically capable of so much at this range.
    let ceiling = weapon.ballistics()?.at(params.range)?.accuracy;
    eal = eal.min(ceiling);

    // Size is a property of the target, not of the shot; it lands after
    // the ballistic clamp.
    eal += size_alm;

    Ok(AccuracyBreakdown {
        eal,
        odds: odds_of_hitting(eal, kind),
    })
}

/// EAL and odds for a shot, with the size modifier taken from the
/// target's exposure.
pub fn shot_accuracy(
    shooter: &Character,
    weapon: &Weapon,
    params: &ShotParameters,
    target: &Character,
    size_kind: SizeKind,
    kind: ShotKind,
) -> Result<AccuracyBreakdown> {
    let size = target_size_alm(params.exposure, size_kind)?;
    accuracy_with_size(shooter, weapon, params, target, size, kind)
}
