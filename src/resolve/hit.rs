//! Single-hit resolution
//!
//! Every weapon mode funnels each resolved hit through here: location
//! draw, layered armor, penetrating or blunt damage, incapacitation,
//! and recovery. The only mutations are the target's damage total and
//! the struck armor layers' condition.

use serde::{Deserialize, Serialize};

use crate::core::dice::DieRoller;
use crate::core::error::Result;
use crate::core::log::CombatLog;
use crate::model::character::Character;
use crate::model::results::{DamageResult, Incapacitation};
use crate::tables::accuracy::TargetExposure;
use crate::tables::ballistic_damage::penetration_wound;
use crate::tables::blunt::blunt_damage;
use crate::tables::hit_location::{sample_location, HitLocation, Orientation};
use crate::tables::recovery::{
    incapacitation_chance, incapacitation_duration, incapacitation_effect, recovery_profile,
    RecoveryProfile,
};

/// Everything a single resolved hit did to the target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitOutcome {
    pub damage: DamageResult,
    pub incapacitation: Option<Incapacitation>,
    pub recovery: RecoveryProfile,
}

/// Roughness of the strike: a 0-9 roll scales a layer's protection
/// between a glancing 55% and a square 100%.
fn roughness_factor(roll: u32) -> f64 {
    0.55 + 0.05 * roll as f64
}

/// Resolve one hit that has already been rolled as such.
pub fn resolve_hit(
    target: &mut Character,
    damage_class: u8,
    penetration: f64,
    orientation: Orientation,
    exposure: TargetExposure,
    dice: &mut dyn DieRoller,
    log: &mut CombatLog,
) -> Result<HitOutcome> {
    let facing = orientation.facing();
    let location = sample_location(orientation, exposure, dice)?;

    // Effective protection per worn layer, outermost first.
    let layers = target.armor_at(location, facing);
    let effective: Vec<(f64, f64)> = layers
        .iter()
        .map(|(_, _, layer)| {
            let eff = layer.ballistic_factor * layer.condition * roughness_factor(dice.d10());
            (eff, layer.blunt_factor)
        })
        .collect();
    let total_protection: f64 = effective.iter().map(|(e, _)| e).sum();
    let effective_pen = penetration - total_protection;

    let damage = if !effective.is_empty() && effective_pen <= 0.0 {
        // Stopped. Find the layer the round died in; everything above
        // it was holed on the way.
        let mut remaining = penetration;
        let mut stop = effective.len() - 1;
        for (i, (eff, _)) in effective.iter().enumerate() {
            if *eff >= remaining {
                stop = i;
                break;
            }
            remaining -= eff;
        }
        for (i, (id, idx, _)) in layers.iter().enumerate().take(stop + 1) {
            target.degrade_armor_layer(*id, location, facing, *idx, i < stop)?;
        }
        let pf = effective[stop].1;
        let blunt = blunt_damage(location, penetration, pf);
        tracing::debug!(?location, blunt, "round stopped by armor");
        log.line(format!(
            "{}: stopped by armor at {:?}, {} blunt damage",
            target.name, location, blunt
        ));
        DamageResult {
            location,
            damage: blunt,
            shock: 0,
            excess_penetration_tenths: 0,
            disabled: false,
            pierced_organs: Vec::new(),
        }
    } else {
        // Through. Armor that bled off most of the energy also tumbles
        // the round down to the lowest damage class.
        let class = if total_protection > effective_pen {
            1
        } else {
            damage_class
        };
        for (id, idx, _) in &layers {
            target.degrade_armor_layer(*id, location, facing, *idx, true)?;
        }
        let wound = penetration_wound(location, class, effective_pen, facing)?;
        tracing::debug!(?location, damage = wound.damage, shock = wound.shock, "penetrating hit");
        log.line(format!(
            "{}: {:?} hit, {} damage, {} shock{}",
            target.name,
            location,
            wound.damage,
            wound.shock,
            if wound.pierced_organs.is_empty() {
                String::new()
            } else {
                format!(" ({})", wound.pierced_organs.join(", "))
            }
        ));
        DamageResult {
            location,
            damage: wound.damage,
            shock: wound.shock,
            excess_penetration_tenths: wound.excess_tenths,
            disabled: wound.disabled,
            pierced_organs: wound.pierced_organs,
        }
    };

    target.apply_damage(damage.damage);

    let incapacitation = check_incapacitation(target, damage.shock, dice, log);
    let recovery = recovery_profile(target.damage_total(), target.health);

    Ok(HitOutcome {
        damage,
        incapacitation,
        recovery,
    })
}

/// Two rolls: does the accumulated trauma drop the character, and if so
/// what it looks like and for how long.
fn check_incapacitation(
    target: &Character,
    shock: u32,
    dice: &mut dyn DieRoller,
    log: &mut CombatLog,
) -> Option<Incapacitation> {
    let total = target.damage_total() + shock;
    let chance = incapacitation_chance(total, target.knockout_value());
    let roll = dice.percentile();
    if roll >= chance {
        return None;
    }
    let effect_roll = dice.percentile();
    let effect = incapacitation_effect(effect_roll);
    let duration_turns = incapacitation_duration(target.damage_total(), effect_roll);
    log.line(format!(
        "{}: incapacitated, {:?} for {} turns",
        target.name, effect, duration_turns
    ));
    Some(Incapacitation {
        effect,
        duration_turns,
    })
}

/// Blunt concussion from a nearby detonation: flat, unlocated damage
/// through the same incapacitation and recovery path.
pub fn resolve_concussion(
    target: &mut Character,
    damage: u32,
    dice: &mut dyn DieRoller,
    log: &mut CombatLog,
) -> HitOutcome {
    target.apply_damage(damage);
    log.line(format!("{}: {} concussion damage", target.name, damage));
    let incapacitation = check_incapacitation(target, 0, dice, log);
    let recovery = recovery_profile(target.damage_total(), target.health);
    HitOutcome {
        damage: DamageResult {
            location: HitLocation::UpperChest,
            damage,
            shock: 0,
            excess_penetration_tenths: 0,
            disabled: false,
            pierced_organs: Vec::new(),
        },
        incapacitation,
        recovery,
    }
}
