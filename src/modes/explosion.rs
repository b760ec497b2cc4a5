//! Explosion damage at a fixed burst point
//!
//! No to-hit roll: the round is already on the ground. Every supplied
//! target independently takes shrapnel and concussion for its own
//! distance, exposure, and blast modifiers. Targets past the last
//! tabulated band are simply out of effect.

use serde::{Deserialize, Serialize};

use crate::core::dice::DieRoller;
use crate::core::error::Result;
use crate::core::log::CombatLog;
use crate::model::character::Character;
use crate::model::equipment::{explosive_entry_at, ExplosiveEntry};
use crate::model::shot::{Orientation, TargetExposure};
use crate::resolve::blast::{concussion_damage, shrapnel_hit_count};
use crate::resolve::hit::{resolve_concussion, resolve_hit, HitOutcome};
use crate::tables::accuracy::{target_size_alm, SizeKind};

/// One character caught near a detonation.
pub struct ExplosionTarget<'a> {
    pub character: &'a mut Character,
    /// Hexes from the burst point.
    pub range: u32,
    pub orientation: Orientation,
    pub exposure: TargetExposure,
    /// Multiplicative blast modifiers: enclosure, cover, prone, ...
    pub blast_modifiers: Vec<f64>,
}

/// What the burst did to one target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionTargetResult {
    pub target: String,
    pub shrapnel_hits: u32,
    pub wounds: Vec<HitOutcome>,
    pub concussion_damage: u32,
    pub concussion: Option<HitOutcome>,
}

/// Outcome of one detonation across every supplied target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionResult {
    pub per_target: Vec<ExplosionTargetResult>,
    pub log: String,
}

/// Resolve a detonation for every target near it.
pub fn explosion_damage(
    explosive: &[ExplosiveEntry],
    targets: &mut [ExplosionTarget<'_>],
    dice: &mut dyn DieRoller,
) -> Result<ExplosionResult> {
    let mut log = CombatLog::new();
    let max_range = explosive.last().map(|e| e.range).unwrap_or(0);

    let mut per_target = Vec::with_capacity(targets.len());
    for t in targets.iter_mut() {
        if explosive.is_empty() || t.range > max_range {
            log.line(format!("{}: out of blast effect", t.character.name));
            per_target.push(ExplosionTargetResult {
                target: t.character.name.clone(),
                shrapnel_hits: 0,
                wounds: Vec::new(),
                concussion_damage: 0,
                concussion: None,
            });
            continue;
        }
        let entry = explosive_entry_at(explosive, t.range)?;

        // Shrapnel: same swarm lookup as pellets, each hit through the
        // full armor and wound path.
        let size = target_size_alm(t.exposure, SizeKind::Standard)?;
        let hits = shrapnel_hit_count(entry.shrapnel_hit_chance, size, dice);
        log.line(format!(
            "{}: {} shrapnel hit(s) at {} hexes",
            t.character.name, hits, t.range
        ));
        let mut wounds = Vec::with_capacity(hits as usize);
        for _ in 0..hits {
            wounds.push(resolve_hit(
                t.character,
                entry.shrapnel_damage_class,
                entry.shrapnel_penetration,
                t.orientation,
                t.exposure,
                dice,
                &mut log,
            )?);
        }

        // Concussion lands once, flat.
        let concussion = concussion_damage(entry.concussion, &t.blast_modifiers);
        let concussion_outcome = if concussion > 0 {
            Some(resolve_concussion(t.character, concussion, dice, &mut log))
        } else {
            None
        };

        per_target.push(ExplosionTargetResult {
            target: t.character.name.clone(),
            shrapnel_hits: hits,
            wounds,
            concussion_damage: concussion,
            concussion: concussion_outcome,
        });
    }

    Ok(ExplosionResult {
        per_target,
        log: log.render(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::Dice;
    use crate::model::equipment::Grenade;

    fn target(c: &mut Character, range: u32) -> ExplosionTarget<'_> {
        ExplosionTarget {
            character: c,
            range,
            orientation: Orientation::Front,
            exposure: TargetExposure::Standing,
            blast_modifiers: Vec::new(),
        }
    }

    #[test]
    fn test_close_target_takes_shrapnel_and_concussion() {
        let grenade = Grenade::fragmentation();
        let mut victim = Character::test_conscript();
        let mut dice = Dice::seeded(5);
        let mut targets = [target(&mut victim, 0)];
        let result = explosion_damage(&grenade.explosive, &mut targets, &mut dice).unwrap();
        let r = &result.per_target[0];
        // 120 base chance is a guaranteed three hits at point blank.
        assert_eq!(r.shrapnel_hits, 3);
        assert_eq!(r.wounds.len(), 3);
        assert_eq!(r.concussion_damage, 600);
        assert!(victim.damage_total() >= 600);
    }

    #[test]
    fn test_distant_target_is_out_of_effect() {
        let grenade = Grenade::fragmentation();
        let mut bystander = Character::test_conscript();
        let mut dice = Dice::seeded(5);
        let mut targets = [target(&mut bystander, 40)];
        let result = explosion_damage(&grenade.explosive, &mut targets, &mut dice).unwrap();
        let r = &result.per_target[0];
        assert_eq!(r.shrapnel_hits, 0);
        assert_eq!(r.concussion_damage, 0);
        assert_eq!(bystander.damage_total(), 0);
    }

    #[test]
    fn test_blast_modifiers_scale_concussion() {
        let grenade = Grenade::fragmentation();
        let mut inside = Character::test_conscript();
        let mut dice = Dice::seeded(5);
        let mut targets = [ExplosionTarget {
            character: &mut inside,
            range: 5,
            orientation: Orientation::Front,
            exposure: TargetExposure::Prone,
            blast_modifiers: vec![2.0, 1.5],
        }];
        let result = explosion_damage(&grenade.explosive, &mut targets, &mut dice).unwrap();
        // 80 base concussion at 5 hexes, x3 enclosed.
        assert_eq!(result.per_target[0].concussion_damage, 240);
    }

    #[test]
    fn test_each_target_resolved_independently() {
        let grenade = Grenade::fragmentation();
        let mut near = Character::test_conscript();
        let mut far = Character::test_conscript();
        far.name = "Far".into();
        let mut dice = Dice::seeded(9);
        let mut targets = [target(&mut near, 1), target(&mut far, 10)];
        let result = explosion_damage(&grenade.explosive, &mut targets, &mut dice).unwrap();
        assert_eq!(result.per_target.len(), 2);
        assert!(result.per_target[0].concussion_damage > result.per_target[1].concussion_damage);
    }
}
