//! Rifle-fire weapon modes: single shot, three-round burst, burst fire
//!
//! Each operation is a pure orchestration: validate capabilities,
//! compute EAL and odds, roll, and hand every scored hit to the
//! single-hit resolver. Nothing is retained between calls.

use serde::{Deserialize, Serialize};

use crate::core::dice::DieRoller;
use crate::core::error::{EngineError, Result};
use crate::core::log::CombatLog;
use crate::model::character::Character;
use crate::model::equipment::{AmmoType, Weapon};
use crate::model::results::{BurstElevationResult, ShotResult};
use crate::model::shot::ShotParameters;
use crate::resolve::burst::{burst_arc, redistribute, sustained_burst_penalty};
use crate::resolve::eal::shot_accuracy;
use crate::resolve::hit::{resolve_hit, HitOutcome};
use crate::tables::accuracy::{odds_of_hitting, target_size_alm, ShotKind, SizeKind};
use crate::tables::autofire::{autofire_cell, roll_hits};
use crate::tables::burst3::{hits_from_roll, three_round_burst_odds};

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

/// One aimed round at one target.
pub fn single_shot(
    shooter: &Character,
    weapon: &Weapon,
    ammo: &AmmoType,
    target: &mut Character,
    params: &ShotParameters,
    dice: &mut dyn DieRoller,
) -> Result<ShotResult> {
    check_ammo(weapon, ammo)?;
    let penetration = ammo.ballistic_at(params.range)?.penetration;
    let acc = shot_accuracy(shooter, weapon, params, target, SizeKind::Standard,
        ShotKind::SingleShot)?;

    let mut log = CombatLog::new();
    let roll = dice.percentile();
    log.line(format!(
        "{} fires {} at {} ({} hexes): EAL {}, odds {}%, rolled {}",
        shooter.name, weapon.name, target.name, params.range, acc.eal, acc.odds, roll
    ));

    let hit = roll < acc.odds;
    let (damage, incapacitation, recovery) = if hit {
        let outcome = resolve_hit(
            target,
            ammo.damage_class,
            penetration,
            params.orientation,
            params.exposure,
            dice,
            &mut log,
        )?;
        (
            Some(outcome.damage),
            outcome.incapacitation,
            Some(outcome.recovery),
        )
    } else {
        log.line("miss".to_string());
        (None, None, None)
    };

    Ok(ShotResult {
        hit,
        eal: acc.eal,
        odds: acc.odds,
        roll,
        target: target.name.clone(),
        damage,
        incapacitation,
        recovery: recovery.map(|r| {
            // Shot results carry the unattended tier; the full profile
            // stays available through the wound pipeline.
            crate::tables::recovery::Recovery {
                healing_days: r.healing_days,
                critical_period_hours: r.tiers[0].1,
                recovery_chance: r.tiers[0].2,
            }
        }),
        log: log.render(),
    })
}

/// Result of a three-round burst against one target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreeRoundBurstResult {
    pub eal: i32,
    /// Cumulative (>=1, >=2, 3) hit chances.
    pub odds: (u32, u32, u32),
    pub roll: u32,
    pub hits: u32,
    pub wounds: Vec<HitOutcome>,
    pub log: String,
}

/// Three rounds on one trigger pull, one roll against the cumulative
/// burst table, every scored hit damaged independently.
pub fn three_round_burst(
    shooter: &Character,
    weapon: &Weapon,
    ammo: &AmmoType,
    target: &mut Character,
    params: &ShotParameters,
    dice: &mut dyn DieRoller,
) -> Result<ThreeRoundBurstResult> {
    check_ammo(weapon, ammo)?;
    let trb = weapon.three_round_burst_at(params.range)?;
    let penetration = ammo.ballistic_at(params.range)?.penetration;
    let acc = shot_accuracy(shooter, weapon, params, target, SizeKind::Standard,
        ShotKind::SingleShot)?;
    let odds = three_round_burst_odds(trb, acc.eal);

    let mut log = CombatLog::new();
    let roll = dice.percentile();
    let hits = hits_from_roll(odds, roll);
    log.line(format!(
        "{} fires a three-round burst from {} at {}: EAL {}, rolled {}, {} hit(s)",
        shooter.name, weapon.name, target.name, acc.eal, roll, hits
    ));

    let mut wounds = Vec::with_capacity(hits as usize);
    for _ in 0..hits {
        wounds.push(resolve_hit(
            target,
            ammo.damage_class,
            penetration,
            params.orientation,
            params.exposure,
            dice,
            &mut log,
        )?);
    }

    Ok(ThreeRoundBurstResult {
        eal: acc.eal,
        odds,
        roll,
        hits,
        wounds,
        log: log.render(),
    })
}

/// Outcome of an automatic burst swept across one or more targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurstFireResult {
    /// Arc the burst was actually swept over, in hexes.
    pub arc: f64,
    pub per_target: Vec<BurstElevationResult>,
    /// Wounds per target, parallel to `per_target`.
    pub wounds: Vec<Vec<HitOutcome>>,
    pub log: String,
}

/// Automatic fire across parallel target/parameter arrays.
///
/// One elevation roll per target; hit counts from the auto-fire table;
/// proportional redistribution when the total would exceed the
/// weapon's rate of fire.
pub fn burst_fire(
    shooter: &Character,
    weapon: &Weapon,
    ammo: &AmmoType,
    targets: &mut [&mut Character],
    params: &[ShotParameters],
    custom_arc: Option<f64>,
    continuous_impulses: u32,
    dice: &mut dyn DieRoller,
) -> Result<BurstFireResult> {
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

    let mut log = CombatLog::new();
    log.line(format!(
        "{} sweeps {} over {:.2} hexes, {} rounds",
        shooter.name, weapon.name, arc, full_auto.rate_of_fire
    ));

    // Elevation check and raw hit count per target.
    let mut per_target = Vec::with_capacity(targets.len());
    let mut allocations = Vec::with_capacity(targets.len());
    let mut weights = Vec::with_capacity(targets.len());
    for (target, p) in targets.iter().zip(params) {
        let acc = shot_accuracy(shooter, weapon, p, target, SizeKind::Elevation,
            ShotKind::BurstElevation)?;
        let eal = acc.eal + sab;
        let odds = odds_of_hitting(eal, ShotKind::BurstElevation);
        let roll = dice.percentile();
        let on_elevation = roll < odds;
        let hits = if on_elevation {
            let width = target_size_alm(p.exposure, SizeKind::Width)?;
            roll_hits(autofire_cell(arc, full_auto.rate_of_fire, width), dice)
        } else {
            0
        };
        log.line(format!(
            "  {}: elevation EAL {}, odds {}%, rolled {} -> {} hit(s)",
            target.name, eal, odds, roll, hits
        ));
        per_target.push(BurstElevationResult {
            hit: on_elevation,
            eal,
            odds,
            roll,
            hit_count: hits,
        });
        allocations.push(hits);
        weights.push(eal);
    }

    // A burst cannot land more rounds than it fired.
    let rolled: u32 = allocations.iter().sum();
    if rolled > full_auto.rate_of_fire {
        log.line(format!(
            "  {} hits rolled but the burst only carries {} rounds",
            rolled, full_auto.rate_of_fire
        ));
    }
    let allocated = redistribute(&allocations, &weights, full_auto.rate_of_fire)?;
    for (result, &hits) in per_target.iter_mut().zip(&allocated) {
        result.hit_count = hits;
    }

    let mut wounds = Vec::with_capacity(targets.len());
    for ((target, p), result) in targets.iter_mut().zip(params).zip(&per_target) {
        let penetration = ammo.ballistic_at(p.range)?.penetration;
        let mut target_wounds = Vec::with_capacity(result.hit_count as usize);
        for _ in 0..result.hit_count {
            target_wounds.push(resolve_hit(
                target,
                ammo.damage_class,
                penetration,
                p.orientation,
                p.exposure,
                dice,
                &mut log,
            )?);
        }
        wounds.push(target_wounds);
    }

    Ok(BurstFireResult {
        arc,
        per_target,
        wounds,
        log: log.render(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::{Dice, ScriptedDice};

    fn setup() -> (Character, Weapon, AmmoType, Character) {
        (
            Character::test_rifleman(),
            Weapon::assault_rifle(),
            AmmoType::rifle_ball(),
            Character::test_conscript(),
        )
    }

    #[test]
    fn test_single_shot_miss_is_normal_outcome() {
        let (shooter, weapon, ammo, mut target) = setup();
        let params = ShotParameters::aimed(100, 3);
        // EAL 3 -> 54%; a roll of 90 misses.
        let mut dice = ScriptedDice::new(&[90]);
        let result =
            single_shot(&shooter, &weapon, &ammo, &mut target, &params, &mut dice).unwrap();
        assert!(!result.hit);
        assert_eq!(result.eal, 3);
        assert_eq!(result.odds, 54);
        assert!(result.damage.is_none());
        assert_eq!(target.damage_total(), 0);
        assert!(result.log.contains("miss"));
    }

    #[test]
    fn test_single_shot_hit_wounds_target() {
        let (shooter, weapon, ammo, mut target) = setup();
        let params = ShotParameters::aimed(100, 3);
        // Hit roll 10, chest location, no incapacitation.
        let mut dice = ScriptedDice::new(&[10, 30, 99, 0]);
        let result =
            single_shot(&shooter, &weapon, &ammo, &mut target, &params, &mut dice).unwrap();
        assert!(result.hit);
        let damage = result.damage.unwrap();
        assert!(damage.damage > 0);
        assert_eq!(target.damage_total(), damage.damage);
        assert!(result.recovery.is_some());
    }

    #[test]
    fn test_single_shot_rejects_wrong_ammo() {
        let (shooter, weapon, _, mut target) = setup();
        let params = ShotParameters::aimed(100, 3);
        let mut dice = Dice::seeded(1);
        let err = single_shot(
            &shooter,
            &weapon,
            &AmmoType::buckshot(),
            &mut target,
            &params,
            &mut dice,
        );
        assert!(matches!(err, Err(EngineError::MissingCapability { .. })));
    }

    #[test]
    fn test_three_round_burst_counts_hits() {
        let (shooter, weapon, ammo, mut target) = setup();
        let params = ShotParameters::aimed(50, 3);
        // Low roll lands all three; then 3 x (location, incap) rolls.
        let mut dice = ScriptedDice::new(&[0, 30, 99, 30, 99, 30, 99]);
        let result =
            three_round_burst(&shooter, &weapon, &ammo, &mut target, &params, &mut dice).unwrap();
        assert_eq!(result.hits, 3);
        assert_eq!(result.wounds.len(), 3);
        assert!(target.damage_total() > 0);
    }

    #[test]
    fn test_three_round_burst_needs_burst_selector() {
        let shooter = Character::test_rifleman();
        let weapon = Weapon::machine_gun();
        let ammo = AmmoType::mg_ball();
        let mut target = Character::test_conscript();
        let params = ShotParameters::aimed(100, 3);
        let mut dice = Dice::seeded(1);
        assert!(matches!(
            three_round_burst(&shooter, &weapon, &ammo, &mut target, &params, &mut dice),
            Err(EngineError::MissingCapability { .. })
        ));
    }

    #[test]
    fn test_burst_fire_respects_rate_of_fire() {
        let (shooter, weapon, ammo, _) = setup();
        let mut a = Character::test_conscript();
        let mut b = Character::test_conscript();
        b.name = "Second".into();
        let mut c = Character::test_conscript();
        c.name = "Third".into();
        let params = vec![
            ShotParameters::aimed(50, 2),
            ShotParameters::aimed(50, 2),
            ShotParameters::aimed(50, 2),
        ];
        let mut dice = Dice::seeded(99);
        let mut targets: Vec<&mut Character> = vec![&mut a, &mut b, &mut c];
        let result = burst_fire(
            &shooter,
            &weapon,
            &ammo,
            &mut targets,
            &params,
            None,
            0,
            &mut dice,
        )
        .unwrap();
        let total: u32 = result.per_target.iter().map(|t| t.hit_count).sum();
        assert!(total <= weapon.full_auto().unwrap().rate_of_fire);
        assert_eq!(result.wounds.len(), 3);
        for (t, w) in result.per_target.iter().zip(&result.wounds) {
            assert_eq!(t.hit_count as usize, w.len());
        }
    }

    #[test]
    fn test_burst_fire_mismatched_arrays_error() {
        let (shooter, weapon, ammo, _) = setup();
        let mut a = Character::test_conscript();
        let params = vec![ShotParameters::aimed(50, 2), ShotParameters::aimed(50, 2)];
        let mut dice = Dice::seeded(1);
        let mut targets: Vec<&mut Character> = vec![&mut a];
        assert!(matches!(
            burst_fire(&shooter, &weapon, &ammo, &mut targets, &params, None, 0, &mut dice),
            Err(EngineError::MismatchedInputs { .. })
        ));
    }

    #[test]
    fn test_burst_fire_needs_full_auto() {
        let shooter = Character::test_rifleman();
        let weapon = Weapon::shotgun();
        let ammo = AmmoType::buckshot();
        let mut a = Character::test_conscript();
        let params = vec![ShotParameters::aimed(20, 2)];
        let mut dice = Dice::seeded(1);
        let mut targets: Vec<&mut Character> = vec![&mut a];
        assert!(matches!(
            burst_fire(&shooter, &weapon, &ammo, &mut targets, &params, None, 0, &mut dice),
            Err(EngineError::MissingCapability { .. })
        ));
    }

    #[test]
    fn test_sustained_fire_lowers_elevation_odds() {
        let (shooter, weapon, ammo, _) = setup();
        let params = vec![ShotParameters::aimed(50, 2)];
        let mut fresh_target = Character::test_conscript();
        let mut dice = Dice::seeded(7);
        let mut targets: Vec<&mut Character> = vec![&mut fresh_target];
        let fresh = burst_fire(
            &shooter, &weapon, &ammo, &mut targets, &params, None, 0, &mut dice,
        )
        .unwrap();
        let mut worn_target = Character::test_conscript();
        let mut dice = Dice::seeded(7);
        let mut targets: Vec<&mut Character> = vec![&mut worn_target];
        let sustained = burst_fire(
            &shooter, &weapon, &ammo, &mut targets, &params, None, 4, &mut dice,
        )
        .unwrap();
        assert_eq!(
            sustained.per_target[0].eal,
            fresh.per_target[0].eal - 8
        );
        assert!(sustained.per_target[0].odds <= fresh.per_target[0].odds);
    }
}
