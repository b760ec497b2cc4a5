//! Probability preview
//!
//! Mirrors each weapon mode's pre-roll computation - EAL, odds, derived
//! arc and pattern cells - without drawing a single random value. For
//! identical inputs these numbers are bit-identical to what the
//! corresponding resolution computes before its first roll.

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::model::character::Character;
use crate::model::equipment::{AmmoType, Grenade, Weapon};
use crate::model::shot::{ExplosiveTarget, ShotParameters};
use crate::resolve::burst::{burst_arc, sustained_burst_penalty};
use crate::resolve::eal::{accuracy_with_size, point_accuracy, shot_accuracy, AccuracyBreakdown};
use crate::tables::accuracy::{odds_of_hitting, range_alm, target_size_alm, ShotKind, SizeKind};
use crate::tables::autofire::{autofire_cell, swarm_cell, HitCell};
use crate::tables::burst3::three_round_burst_odds;

fn check_ammo(weapon: &Weapon, ammo: &AmmoType) -> Result<()> {
    if weapon.accepts(ammo) {
        Ok(())
    } else {
        Err(EngineError::MissingCapability {
            item: weapon.name.clone(),
            capability: "compatible ammunition",
        })
    }
}

/// Pre-roll numbers for a single aimed shot.
pub fn single_shot(
    shooter: &Character,
    weapon: &Weapon,
    ammo: &AmmoType,
    target: &Character,
    params: &ShotParameters,
) -> Result<AccuracyBreakdown> {
    check_ammo(weapon, ammo)?;
    ammo.ballistic_at(params.range)?;
    shot_accuracy(shooter, weapon, params, target, SizeKind::Standard, ShotKind::SingleShot)
}

/// Pre-roll numbers for a three-round burst: EAL and the cumulative
/// (>=1, >=2, 3) hit chances.
pub fn three_round_burst(
    shooter: &Character,
    weapon: &Weapon,
    ammo: &AmmoType,
    target: &Character,
    params: &ShotParameters,
) -> Result<(i32, (u32, u32, u32))> {
    check_ammo(weapon, ammo)?;
    let trb = weapon.three_round_burst_at(params.range)?;
    ammo.ballistic_at(params.range)?;
    let acc = shot_accuracy(shooter, weapon, params, target, SizeKind::Standard,
        ShotKind::SingleShot)?;
    Ok((acc.eal, three_round_burst_odds(trb, acc.eal)))
}

/// Pre-roll view of one burst-fire target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurstTargetPreview {
    pub eal: i32,
    pub odds: u32,
    /// The auto-fire cell an elevation success would resolve.
    pub cell: HitCell,
}

/// Pre-roll view of a full burst.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurstFirePreview {
    /// Arc the burst would be swept over.
    pub arc: f64,
    pub per_target: Vec<BurstTargetPreview>,
}

/// Pre-roll numbers for automatic fire across parallel target and
/// parameter arrays.
pub fn burst_fire(
    shooter: &Character,
    weapon: &Weapon,
    ammo: &AmmoType,
    targets: &[&Character],
    params: &[ShotParameters],
    custom_arc: Option<f64>,
    continuous_impulses: u32,
) -> Result<BurstFirePreview> {
    check_ammo(weapon, ammo)?;
    if targets.is_empty() || targets.len() != params.len() {
        return Err(EngineError::MismatchedInputs {
            targets: targets.len(),
            actual: params.len(),
            what: "shot parameter sets",
        });
    }
    let full_auto = weapon.full_auto()?;
    let sab = sustained_burst_penalty(continuous_impulses, full_auto);
    let arc = burst_arc(weapon, shooter, &params[0], custom_arc)?;

    let mut per_target = Vec::with_capacity(targets.len());
    for (target, p) in targets.iter().zip(params) {
        let acc = shot_accuracy(shooter, weapon, p, target, SizeKind::Elevation,
            ShotKind::BurstElevation)?;
        let eal = acc.eal + sab;
        let width = target_size_alm(p.exposure, SizeKind::Width)?;
        per_target.push(BurstTargetPreview {
            eal,
            odds: odds_of_hitting(eal, ShotKind::BurstElevation),
            cell: autofire_cell(arc, full_auto.rate_of_fire, width),
        });
    }
    Ok(BurstFirePreview { arc, per_target })
}

/// Pre-roll view of a shotgun pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotgunPreview {
    pub eal: i32,
    pub odds: u32,
    /// The pellet cell the primary target would draw on a pattern hit.
    pub pellet_cell: HitCell,
}

/// Pre-roll numbers for a shotgun shot at its primary target.
pub fn shotgun_shot(
    shooter: &Character,
    weapon: &Weapon,
    ammo: &AmmoType,
    primary: &Character,
    params: &ShotParameters,
) -> Result<ShotgunPreview> {
    check_ammo(weapon, ammo)?;
    ammo.pellet_count()?;
    let entry = ammo.ballistic_at(params.range)?;
    let pattern_alm = entry.shotgun_alm.ok_or_else(|| EngineError::MissingCapability {
        item: ammo.name.clone(),
        capability: "shotgun pattern",
    })?;
    let chance = entry
        .pellet_hit_chance
        .ok_or_else(|| EngineError::MissingCapability {
            item: ammo.name.clone(),
            capability: "pellet hit chance",
        })?;

    let exposure_alm = target_size_alm(params.exposure, SizeKind::Standard)?;
    let size = exposure_alm.max(pattern_alm);
    let acc = accuracy_with_size(shooter, weapon, params, primary, size, ShotKind::SingleShot)?;
    let width = target_size_alm(params.exposure, SizeKind::Width)?;
    Ok(ShotgunPreview {
        eal: acc.eal,
        odds: acc.odds,
        pellet_cell: swarm_cell(chance, width),
    })
}

/// Pre-roll numbers for an automatic shotgun burst: the pattern check
/// on burst-elevation odds with the sustained-fire penalty applied.
pub fn shotgun_burst_fire(
    shooter: &Character,
    weapon: &Weapon,
    ammo: &AmmoType,
    primary: &Character,
    params: &ShotParameters,
    continuous_impulses: u32,
) -> Result<ShotgunPreview> {
    check_ammo(weapon, ammo)?;
    ammo.pellet_count()?;
    let full_auto = weapon.full_auto()?;
    let sab = sustained_burst_penalty(continuous_impulses, full_auto);
    let entry = ammo.ballistic_at(params.range)?;
    let pattern_alm = entry.shotgun_alm.ok_or_else(|| EngineError::MissingCapability {
        item: ammo.name.clone(),
        capability: "shotgun pattern",
    })?;
    let chance = entry
        .pellet_hit_chance
        .ok_or_else(|| EngineError::MissingCapability {
            item: ammo.name.clone(),
            capability: "pellet hit chance",
        })?;

    let exposure_alm = target_size_alm(params.exposure, SizeKind::Standard)?;
    let size = exposure_alm.max(pattern_alm);
    let acc =
        accuracy_with_size(shooter, weapon, params, primary, size, ShotKind::BurstElevation)?;
    let eal = acc.eal + sab;
    let width = target_size_alm(params.exposure, SizeKind::Width)?;
    Ok(ShotgunPreview {
        eal,
        odds: odds_of_hitting(eal, ShotKind::BurstElevation),
        pellet_cell: swarm_cell(chance, width),
    })
}

/// Pre-roll numbers for an explosive weapon shot at a map point.
pub fn explosive_weapon_shot(
    shooter: &Character,
    weapon: &Weapon,
    ammo: &AmmoType,
    aim: ExplosiveTarget,
    params: &ShotParameters,
) -> Result<AccuracyBreakdown> {
    check_ammo(weapon, ammo)?;
    if ammo.explosive.is_empty() {
        return Err(EngineError::MissingCapability {
            item: ammo.name.clone(),
            capability: "explosive table",
        });
    }
    point_accuracy(shooter, weapon, params, aim.alm(), ShotKind::SingleShot)
}

/// Pre-roll numbers for a thrown grenade.
pub fn grenade_throw(
    thrower: &Character,
    grenade: &Grenade,
    aim: ExplosiveTarget,
    params: &ShotParameters,
) -> Result<AccuracyBreakdown> {
    if grenade.explosive.is_empty() {
        return Err(EngineError::MissingCapability {
            item: grenade.name.clone(),
            capability: "explosive table",
        });
    }
    if params.range > grenade.throw_range {
        return Err(EngineError::RangeBeyondTable {
            range: params.range,
            max: grenade.throw_range,
        });
    }
    let mut eal = thrower.skill_accuracy_level()?;
    eal += range_alm(params.range)?;
    eal += params.situation_alm();
    eal += params.visibility_alm();
    if params.shooter_ducked {
        eal -= 10;
    }
    eal += aim.alm();
    Ok(AccuracyBreakdown {
        eal,
        odds: odds_of_hitting(eal, ShotKind::SingleShot),
    })
}

/// Pre-roll view of a launcher burst: the elevation check and the
/// per-round landing odds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherBurstPreview {
    pub eal: i32,
    pub elevation_odds: u32,
    pub round_odds: u32,
    pub rounds: u32,
}

pub fn launcher_burst(
    shooter: &Character,
    weapon: &Weapon,
    ammo: &AmmoType,
    aim: ExplosiveTarget,
    params: &ShotParameters,
    continuous_impulses: u32,
) -> Result<LauncherBurstPreview> {
    check_ammo(weapon, ammo)?;
    if ammo.explosive.is_empty() {
        return Err(EngineError::MissingCapability {
            item: ammo.name.clone(),
            capability: "explosive table",
        });
    }
    let full_auto = weapon.full_auto()?;
    let sab = sustained_burst_penalty(continuous_impulses, full_auto);
    let acc = point_accuracy(shooter, weapon, params, aim.alm(), ShotKind::BurstElevation)?;
    let eal = acc.eal + sab;
    Ok(LauncherBurstPreview {
        eal,
        elevation_odds: odds_of_hitting(eal, ShotKind::BurstElevation),
        round_odds: odds_of_hitting(eal, ShotKind::SingleShot),
        rounds: full_auto.rate_of_fire,
    })
}
