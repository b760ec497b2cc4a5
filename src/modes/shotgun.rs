//! Shotgun weapon modes
//!
//! One pattern-level hit roll decides whether the cloud arrives at all;
//! every target caught inside the pattern then resolves its own pellet
//! count, capped by what the shell actually carried.

use serde::{Deserialize, Serialize};

use crate::core::dice::DieRoller;
use crate::core::error::{EngineError, Result};
use crate::core::log::CombatLog;
use crate::model::character::Character;
use crate::model::equipment::{AmmoType, Weapon};
use crate::model::shot::ShotParameters;
use crate::resolve::burst::{redistribute, sustained_burst_penalty};
use crate::resolve::eal::accuracy_with_size;
use crate::resolve::hit::{resolve_hit, HitOutcome};
use crate::tables::accuracy::{odds_of_hitting, target_size_alm, ShotKind, SizeKind};
use crate::tables::autofire::{roll_hits, swarm_cell};

/// A secondary target that may be caught in the pattern.
pub struct PatternTarget<'a> {
    pub character: &'a mut Character,
    pub params: ShotParameters,
    /// Hexes from the pattern center.
    pub offset: f64,
}

/// Pellets into one target and what they did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotgunTargetOutcome {
    pub target: String,
    pub pellets: u32,
    pub wounds: Vec<HitOutcome>,
}

/// Outcome of one shotgun pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotgunResult {
    pub hit: bool,
    pub eal: i32,
    pub odds: u32,
    pub roll: u32,
    /// Primary target first, then secondaries in input order.
    pub per_target: Vec<ShotgunTargetOutcome>,
    pub log: String,
}

fn pattern_capability(ammo: &AmmoType, range: u32) -> Result<(i32, f64)> {
    let entry = ammo.ballistic_at(range)?;
    let alm = entry.shotgun_alm.ok_or_else(|| EngineError::MissingCapability {
        item: ammo.name.clone(),
        capability: "shotgun pattern",
    })?;
    let radius = entry
        .pattern_radius
        .ok_or_else(|| EngineError::MissingCapability {
            item: ammo.name.clone(),
            capability: "pattern radius",
        })?;
    Ok((alm, radius))
}

#[allow(clippy::too_many_arguments)]
fn shotgun_pattern(
    shooter: &Character,
    weapon: &Weapon,
    ammo: &AmmoType,
    primary: &mut Character,
    params: &ShotParameters,
    secondaries: &mut [PatternTarget<'_>],
    pellet_capacity: u32,
    kind: ShotKind,
    sab: i32,
    dice: &mut dyn DieRoller,
) -> Result<ShotgunResult> {
    if !weapon.accepts(ammo) {
        return Err(EngineError::MissingCapability {
            item: weapon.name.clone(),
            capability: "compatible ammunition",
        });
    }
    let (pattern_alm, radius) = pattern_capability(ammo, params.range)?;

    // The pattern aims at the bigger of the target and the spread.
    let exposure_alm = target_size_alm(params.exposure, SizeKind::Standard)?;
    let size = exposure_alm.max(pattern_alm);
    let acc = accuracy_with_size(shooter, weapon, params, primary, size, kind)?;
    let eal = acc.eal + sab;
    let odds = odds_of_hitting(eal, kind);

    let mut log = CombatLog::new();
    let roll = dice.percentile();
    let hit = roll < odds;
    log.line(format!(
        "{} patterns {} at {}: EAL {}, odds {}%, rolled {} - {}",
        shooter.name,
        weapon.name,
        primary.name,
        eal,
        odds,
        roll,
        if hit { "pattern on" } else { "pattern wide" }
    ));

    let mut per_target = Vec::new();
    if hit {
        // Raw pellet counts for everyone the pattern caught.
        let mut counts = Vec::new();
        let mut caught = Vec::new();
        {
            let entry = ammo.ballistic_at(params.range)?;
            let chance = entry
                .pellet_hit_chance
                .ok_or_else(|| EngineError::MissingCapability {
                    item: ammo.name.clone(),
                    capability: "pellet hit chance",
                })?;
            let width = target_size_alm(params.exposure, SizeKind::Width)?;
            counts.push(roll_hits(swarm_cell(chance, width), dice));
            caught.push(true);
        }
        for s in secondaries.iter() {
            let inside = s.offset <= radius;
            caught.push(inside);
            if !inside {
                counts.push(0);
                continue;
            }
            let entry = ammo.ballistic_at(s.params.range)?;
            let chance = entry
                .pellet_hit_chance
                .ok_or_else(|| EngineError::MissingCapability {
                    item: ammo.name.clone(),
                    capability: "pellet hit chance",
                })?;
            let width = target_size_alm(s.params.exposure, SizeKind::Width)?;
            counts.push(roll_hits(swarm_cell(chance, width), dice));
        }

        // The shell only carried so many pellets.
        let weights: Vec<i32> = counts.iter().map(|&c| c as i32).collect();
        let allocated = redistribute(&counts, &weights, pellet_capacity)?;

        let pellets = allocated[0];
        let mut wounds = Vec::with_capacity(pellets as usize);
        let entry = ammo.ballistic_at(params.range)?;
        for _ in 0..pellets {
            wounds.push(resolve_hit(
                primary,
                ammo.damage_class,
                entry.penetration,
                params.orientation,
                params.exposure,
                dice,
                &mut log,
            )?);
        }
        per_target.push(ShotgunTargetOutcome {
            target: primary.name.clone(),
            pellets,
            wounds,
        });

        for (i, s) in secondaries.iter_mut().enumerate() {
            let pellets = allocated[i + 1];
            let mut wounds = Vec::with_capacity(pellets as usize);
            let entry = ammo.ballistic_at(s.params.range)?;
            for _ in 0..pellets {
                wounds.push(resolve_hit(
                    s.character,
                    ammo.damage_class,
                    entry.penetration,
                    s.params.orientation,
                    s.params.exposure,
                    dice,
                    &mut log,
                )?);
            }
            log.line(format!(
                "  {}: {} pellet(s){}",
                s.character.name,
                pellets,
                if caught[i + 1] { "" } else { " (outside pattern)" }
            ));
            per_target.push(ShotgunTargetOutcome {
                target: s.character.name.clone(),
                pellets,
                wounds,
            });
        }
    }

    Ok(ShotgunResult {
        hit,
        eal,
        odds,
        roll,
        per_target,
        log: log.render(),
    })
}

/// One shell at a primary target, with anyone else inside the pattern
/// radius catching pellets too.
pub fn shotgun_shot(
    shooter: &Character,
    weapon: &Weapon,
    ammo: &AmmoType,
    primary: &mut Character,
    params: &ShotParameters,
    secondaries: &mut [PatternTarget<'_>],
    dice: &mut dyn DieRoller,
) -> Result<ShotgunResult> {
    let capacity = ammo.pellet_count()?;
    shotgun_pattern(
        shooter,
        weapon,
        ammo,
        primary,
        params,
        secondaries,
        capacity,
        ShotKind::SingleShot,
        0,
        dice,
    )
}

/// Automatic shotgun fire: the pattern check rides the burst-elevation
/// odds with any sustained-fire penalty, and the pellet cap covers the
/// whole burst.
#[allow(clippy::too_many_arguments)]
pub fn shotgun_burst_fire(
    shooter: &Character,
    weapon: &Weapon,
    ammo: &AmmoType,
    primary: &mut Character,
    params: &ShotParameters,
    secondaries: &mut [PatternTarget<'_>],
    continuous_impulses: u32,
    dice: &mut dyn DieRoller,
) -> Result<ShotgunResult> {
    let full_auto = weapon.full_auto()?;
    let capacity = ammo.pellet_count()? * full_auto.rate_of_fire;
    let sab = sustained_burst_penalty(continuous_impulses, full_auto);
    shotgun_pattern(
        shooter,
        weapon,
        ammo,
        primary,
        params,
        secondaries,
        capacity,
        ShotKind::BurstElevation,
        sab,
        dice,
    )
}
