//! Explosive weapon modes: launched rounds, thrown grenades, launcher bursts
//!
//! These resolve against a map point rather than a silhouette. A miss
//! is never a non-event: the round lands somewhere, and the scatter
//! table says where.

use serde::{Deserialize, Serialize};

use crate::core::dice::DieRoller;
use crate::core::error::{EngineError, Result};
use crate::core::log::CombatLog;
use crate::model::character::Character;
use crate::model::equipment::{AmmoType, Grenade, Weapon};
use crate::model::results::{BurstElevationResult, ExplosiveShotResult, LongShort};
use crate::model::shot::{ExplosiveTarget, ShotParameters};
use crate::resolve::burst::sustained_burst_penalty;
use crate::resolve::eal::point_accuracy;
use crate::tables::accuracy::{odds_of_hitting, range_alm, ShotKind};
use crate::tables::scatter::scatter_distance;

/// Long or short, decided by an independent coin-flip roll.
fn long_short(dice: &mut dyn DieRoller) -> LongShort {
    if dice.percentile() < 50 {
        LongShort::Short
    } else {
        LongShort::Long
    }
}

/// Hit-or-scatter resolution for one round, given its pre-roll numbers.
fn land_round(
    eal: i32,
    odds: u32,
    elevation_failed: bool,
    dice: &mut dyn DieRoller,
    log: &mut CombatLog,
) -> ExplosiveShotResult {
    let roll = dice.percentile();
    if !elevation_failed && roll < odds {
        log.line(format!("round on target (rolled {roll} vs {odds}%)"));
        return ExplosiveShotResult {
            hit: true,
            eal,
            odds,
            roll,
            scatter_hexes: 0,
            long_short: None,
            elevation_failed: false,
        };
    }
    let shortfall = roll.saturating_sub(odds) as i32;
    let scatter = scatter_distance(shortfall);
    let direction = long_short(dice);
    log.line(format!(
        "round scatters {scatter} hexes {}",
        match direction {
            LongShort::Long => "long",
            LongShort::Short => "short",
        }
    ));
    ExplosiveShotResult {
        hit: false,
        eal,
        odds,
        roll,
        scatter_hexes: scatter,
        long_short: Some(direction),
        elevation_failed,
    }
}

fn require_explosive(ammo: &AmmoType) -> Result<()> {
    if ammo.explosive.is_empty() {
        return Err(EngineError::MissingCapability {
            item: ammo.name.clone(),
            capability: "explosive table",
        });
    }
    Ok(())
}

/// One explosive round from a launcher-type weapon at a map point.
pub fn explosive_weapon_shot(
    shooter: &Character,
    weapon: &Weapon,
    ammo: &AmmoType,
    aim: ExplosiveTarget,
    params: &ShotParameters,
    dice: &mut dyn DieRoller,
) -> Result<(ExplosiveShotResult, String)> {
    if !weapon.accepts(ammo) {
        return Err(EngineError::MissingCapability {
            item: weapon.name.clone(),
            capability: "compatible ammunition",
        });
    }
    require_explosive(ammo)?;
    let acc = point_accuracy(shooter, weapon, params, aim.alm(), ShotKind::SingleShot)?;

    let mut log = CombatLog::new();
    log.line(format!(
        "{} fires {} at {:?} ({} hexes): EAL {}, odds {}%",
        shooter.name, weapon.name, aim, params.range, acc.eal, acc.odds
    ));
    let result = land_round(acc.eal, acc.odds, false, dice, &mut log);
    Ok((result, log.render()))
}

/// A thrown grenade. The throw uses the thrower's arm, not a barrel:
/// skill, range, conditions and the aim-point class, with no ballistic
/// ceiling to clamp against.
pub fn grenade_throw(
    thrower: &Character,
    grenade: &Grenade,
    aim: ExplosiveTarget,
    params: &ShotParameters,
    dice: &mut dyn DieRoller,
) -> Result<(ExplosiveShotResult, String)> {
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
    let odds = odds_of_hitting(eal, ShotKind::SingleShot);

    let mut log = CombatLog::new();
    log.line(format!(
        "{} throws {} at {:?} ({} hexes): EAL {}, odds {}%",
        thrower.name, grenade.name, aim, params.range, eal, odds
    ));
    let result = land_round(eal, odds, false, dice, &mut log);
    Ok((result, log.render()))
}

/// Outcome of an automatic grenade-launcher burst.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherBurstResult {
    pub elevation: BurstElevationResult,
    /// One entry per round in the burst.
    pub rounds: Vec<ExplosiveShotResult>,
    pub log: String,
}

/// A burst of explosive rounds. One elevation check walks the burst
/// onto the aim point; each round then lands or scatters on its own.
#[allow(clippy::too_many_arguments)]
pub fn launcher_burst(
    shooter: &Character,
    weapon: &Weapon,
    ammo: &AmmoType,
    aim: ExplosiveTarget,
    params: &ShotParameters,
    continuous_impulses: u32,
    dice: &mut dyn DieRoller,
) -> Result<LauncherBurstResult> {
    if !weapon.accepts(ammo) {
        return Err(EngineError::MissingCapability {
            item: weapon.name.clone(),
            capability: "compatible ammunition",
        });
    }
    require_explosive(ammo)?;
    let full_auto = weapon.full_auto()?;
    let sab = sustained_burst_penalty(continuous_impulses, full_auto);

    let acc = point_accuracy(shooter, weapon, params, aim.alm(), ShotKind::BurstElevation)?;
    let eal = acc.eal + sab;
    let elevation_odds = odds_of_hitting(eal, ShotKind::BurstElevation);

    let mut log = CombatLog::new();
    let elevation_roll = dice.percentile();
    let on_elevation = elevation_roll < elevation_odds;
    log.line(format!(
        "{} bursts {} at {:?}: elevation EAL {}, odds {}%, rolled {} - {}",
        shooter.name,
        weapon.name,
        aim,
        eal,
        elevation_odds,
        elevation_roll,
        if on_elevation { "on" } else { "off" }
    ));

    let round_odds = odds_of_hitting(eal, ShotKind::SingleShot);
    let mut rounds = Vec::with_capacity(full_auto.rate_of_fire as usize);
    for _ in 0..full_auto.rate_of_fire {
        rounds.push(land_round(eal, round_odds, !on_elevation, dice, &mut log));
    }

    Ok(LauncherBurstResult {
        elevation: BurstElevationResult {
            hit: on_elevation,
            eal,
            odds: elevation_odds,
            roll: elevation_roll,
            hit_count: rounds.iter().filter(|r| r.hit).count() as u32,
        },
        rounds,
        log: log.render(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::{Dice, ScriptedDice};

    #[test]
    fn test_miss_always_scatters_from_the_table() {
        let shooter = Character::test_rifleman();
        let weapon = Weapon::grenade_launcher();
        let ammo = AmmoType::he_40mm();
        let params = ShotParameters::aimed(150, 3);
        // Roll 95 misses; shortfall drives scatter; 10 flips short.
        let mut dice = ScriptedDice::new(&[95, 10]);
        let (result, log) =
            explosive_weapon_shot(&shooter, &weapon, &ammo, ExplosiveTarget::Area, &params,
                &mut dice).unwrap();
        assert!(!result.hit);
        let shortfall = (result.roll - result.odds) as i32;
        assert_eq!(result.scatter_hexes, scatter_distance(shortfall));
        assert_eq!(result.long_short, Some(LongShort::Short));
        assert!(log.contains("scatters"));
    }

    #[test]
    fn test_hit_has_no_scatter() {
        let shooter = Character::test_rifleman();
        let weapon = Weapon::grenade_launcher();
        let ammo = AmmoType::he_40mm();
        let params = ShotParameters::aimed(50, 4);
        let mut dice = ScriptedDice::new(&[0]);
        let (result, _) =
            explosive_weapon_shot(&shooter, &weapon, &ammo, ExplosiveTarget::Area, &params,
                &mut dice).unwrap();
        assert!(result.hit);
        assert_eq!(result.scatter_hexes, 0);
        assert_eq!(result.long_short, None);
    }

    #[test]
    fn test_window_is_harder_than_area() {
        let shooter = Character::test_rifleman();
        let weapon = Weapon::grenade_launcher();
        let ammo = AmmoType::he_40mm();
        let params = ShotParameters::aimed(150, 3);
        let mut dice = ScriptedDice::new(&[99, 0]);
        let (area, _) = explosive_weapon_shot(&shooter, &weapon, &ammo, ExplosiveTarget::Area,
            &params, &mut dice).unwrap();
        let mut dice = ScriptedDice::new(&[99, 0]);
        let (window, _) = explosive_weapon_shot(&shooter, &weapon, &ammo,
            ExplosiveTarget::Window, &params, &mut dice).unwrap();
        assert_eq!(window.eal, area.eal - 6);
    }

    #[test]
    fn test_ball_ammo_cannot_be_fired_as_explosive() {
        let shooter = Character::test_rifleman();
        let weapon = Weapon::grenade_launcher();
        let mut ammo = AmmoType::rifle_ball();
        ammo.name = "40mm HE".into();
        let params = ShotParameters::aimed(100, 3);
        let mut dice = Dice::seeded(1);
        assert!(matches!(
            explosive_weapon_shot(&shooter, &weapon, &ammo, ExplosiveTarget::Area, &params,
                &mut dice),
            Err(EngineError::MissingCapability { .. })
        ));
    }

    #[test]
    fn test_grenade_throw_beyond_arm_errors() {
        let thrower = Character::test_rifleman();
        let grenade = Grenade::fragmentation();
        let params = ShotParameters::aimed(40, 2);
        let mut dice = Dice::seeded(1);
        assert!(matches!(
            grenade_throw(&thrower, &grenade, ExplosiveTarget::Area, &params, &mut dice),
            Err(EngineError::RangeBeyondTable { range: 40, max: 35 })
        ));
    }

    #[test]
    fn test_grenade_throw_lands_or_scatters() {
        let thrower = Character::test_rifleman();
        let grenade = Grenade::fragmentation();
        let params = ShotParameters::aimed(10, 2);
        let mut dice = ScriptedDice::new(&[0]);
        let (result, _) =
            grenade_throw(&thrower, &grenade, ExplosiveTarget::Area, &params, &mut dice).unwrap();
        // SAL 8 + range 13 + area 0 = 21 -> 96%.
        assert_eq!(result.eal, 21);
        assert!(result.hit);
    }

    #[test]
    fn test_launcher_burst_rounds_land_independently() {
        let shooter = Character::test_rifleman();
        let weapon = Weapon::grenade_launcher();
        let ammo = AmmoType::he_40mm();
        let params = ShotParameters::aimed(150, 4);
        let mut dice = Dice::seeded(11);
        let result = launcher_burst(
            &shooter, &weapon, &ammo, ExplosiveTarget::Area, &params, 0, &mut dice,
        )
        .unwrap();
        assert_eq!(result.rounds.len(), 6);
        if result.elevation.hit {
            assert_eq!(
                result.elevation.hit_count,
                result.rounds.iter().filter(|r| r.hit).count() as u32
            );
        } else {
            assert!(result.rounds.iter().all(|r| r.elevation_failed && !r.hit));
        }
    }
}
