//! End-to-end gunfire resolution tests
//!
//! Full shot pipelines driven through seeded or scripted dice, checking
//! the documented conservation and reproducibility behavior.

use fusillade::core::dice::{Dice, ScriptedDice};
use fusillade::model::character::Character;
use fusillade::model::equipment::{AmmoType, Equipment, Weapon};
use fusillade::model::shot::{ShotParameters, TargetExposure};
use fusillade::modes;
use fusillade::preview;
use fusillade::resolve::redistribute;
use fusillade::tables::hit_location::{Facing, HitLocation};

#[test]
fn test_same_seed_replays_the_same_fight() {
    let shooter = Character::test_rifleman();
    let weapon = Weapon::assault_rifle();
    let ammo = AmmoType::rifle_ball();
    let params = ShotParameters::aimed(100, 3);

    let mut first_target = Character::test_conscript();
    let mut dice = Dice::seeded(1234);
    let first = modes::single_shot(
        &shooter, &weapon, &ammo, &mut first_target, &params, &mut dice,
    )
    .unwrap();

    let mut second_target = Character::test_conscript();
    let mut dice = Dice::seeded(1234);
    let second = modes::single_shot(
        &shooter, &weapon, &ammo, &mut second_target, &params, &mut dice,
    )
    .unwrap();

    assert_eq!(first.hit, second.hit);
    assert_eq!(first.roll, second.roll);
    assert_eq!(first.log, second.log);
    assert_eq!(first_target.damage_total(), second_target.damage_total());
}

#[test]
fn test_burst_redistribution_reference_scenario() {
    // Three targets wanting [5, 4, 3] rounds from an 8-round burst:
    // proportional shares with the remainder absorbed by the last.
    let allocated = redistribute(&[5, 4, 3], &[10, 8, 6], 8).unwrap();
    assert_eq!(allocated.iter().sum::<u32>(), 8);
    assert_eq!(allocated, vec![3, 2, 3]);
    for (before, after) in [5u32, 4, 3].iter().zip(&allocated) {
        assert!(*before == 0 || *after >= 1);
    }
}

#[test]
fn test_burst_fire_total_never_exceeds_rate_of_fire() {
    let shooter = Character::test_rifleman();
    let weapon = Weapon::machine_gun();
    let ammo = AmmoType::mg_ball();
    let rof = weapon.full_auto().unwrap().rate_of_fire;

    for seed in 0..20 {
        let mut a = Character::test_conscript();
        let mut b = Character::test_conscript();
        b.name = "B".into();
        let mut c = Character::test_conscript();
        c.name = "C".into();
        let params = vec![
            ShotParameters::aimed(100, 2),
            ShotParameters::aimed(100, 2),
            ShotParameters::aimed(100, 2),
        ];
        let mut targets: Vec<&mut Character> = vec![&mut a, &mut b, &mut c];
        let mut dice = Dice::seeded(seed);
        let result = modes::burst_fire(
            &shooter, &weapon, &ammo, &mut targets, &params, Some(2.0), 0, &mut dice,
        )
        .unwrap();
        let total: u32 = result.per_target.iter().map(|t| t.hit_count).sum();
        assert!(total <= rof, "seed {seed} landed {total} of {rof} rounds");
        for (t, w) in result.per_target.iter().zip(&result.wounds) {
            assert_eq!(t.hit_count as usize, w.len());
        }
    }
}

#[test]
fn test_armor_condition_monotone_under_sustained_fire() {
    let shooter = Character::test_rifleman();
    let weapon = Weapon::assault_rifle();
    let ammo = AmmoType::rifle_ball();
    let mut target = Character::test_rifleman();
    target.name = "Armored".into();
    let params = ShotParameters::aimed(10, 3);

    let mut last_conditions: Vec<f64> = Vec::new();
    let mut dice = Dice::seeded(77);
    for _ in 0..40 {
        let _ = modes::single_shot(&shooter, &weapon, &ammo, &mut target, &params, &mut dice)
            .unwrap();
        let conditions: Vec<f64> = target
            .armor_at(HitLocation::UpperChest, Facing::Front)
            .iter()
            .map(|(_, _, l)| l.condition)
            .collect();
        if !last_conditions.is_empty() {
            for (now, before) in conditions.iter().zip(&last_conditions) {
                assert!(now <= before, "armor condition rose");
                assert!(*now >= 0.0);
            }
        }
        last_conditions = conditions;
    }
}

#[test]
fn test_damage_total_monotone_across_modes() {
    let shooter = Character::test_rifleman();
    let weapon = Weapon::assault_rifle();
    let ammo = AmmoType::rifle_ball();
    let mut target = Character::test_conscript();
    let params = ShotParameters::aimed(50, 3);

    let mut dice = Dice::seeded(5);
    let mut last = 0;
    for _ in 0..10 {
        let _ = modes::single_shot(&shooter, &weapon, &ammo, &mut target, &params, &mut dice)
            .unwrap();
        assert!(target.damage_total() >= last);
        last = target.damage_total();
        let _ =
            modes::three_round_burst(&shooter, &weapon, &ammo, &mut target, &params, &mut dice)
                .unwrap();
        assert!(target.damage_total() >= last);
        last = target.damage_total();
    }
}

#[test]
fn test_preview_agrees_for_every_rifle_mode() {
    let shooter = Character::test_rifleman();
    let weapon = Weapon::assault_rifle();
    let ammo = AmmoType::rifle_ball();
    let target = Character::test_conscript();

    for range in [10, 50, 100, 200, 400] {
        for aim in [0, 2, 5] {
            let mut params = ShotParameters::aimed(range, aim);
            params.exposure = TargetExposure::Kneeling;

            let single = preview::single_shot(&shooter, &weapon, &ammo, &target, &params).unwrap();
            let mut live = Character::test_conscript();
            let mut dice = Dice::seeded(range as u64);
            let resolved =
                modes::single_shot(&shooter, &weapon, &ammo, &mut live, &params, &mut dice)
                    .unwrap();
            assert_eq!(single.eal, resolved.eal, "range {range} aim {aim}");
            assert_eq!(single.odds, resolved.odds);

            let (trb_eal, trb_odds) =
                preview::three_round_burst(&shooter, &weapon, &ammo, &target, &params).unwrap();
            let mut live = Character::test_conscript();
            let mut dice = Dice::seeded(range as u64);
            let burst =
                modes::three_round_burst(&shooter, &weapon, &ammo, &mut live, &params, &mut dice)
                    .unwrap();
            assert_eq!(trb_eal, burst.eal);
            assert_eq!(trb_odds, burst.odds);
        }
    }
}

#[test]
fn test_unarmored_reference_wound_is_reproducible() {
    // Fixed location, front facing, damage class 10, penetration 1.0:
    // the wound triple never varies because no roll touches it.
    let mut expected = None;
    for _ in 0..5 {
        let mut target = Character::test_conscript();
        let mut log = fusillade::core::log::CombatLog::new();
        let mut dice = ScriptedDice::new(&[30, 99, 0]);
        let outcome = fusillade::resolve::resolve_hit(
            &mut target,
            10,
            1.0,
            fusillade::model::shot::Orientation::Front,
            TargetExposure::Standing,
            &mut dice,
            &mut log,
        )
        .unwrap();
        let triple = (
            outcome.damage.damage,
            outcome.damage.shock,
            outcome.damage.pierced_organs.clone(),
        );
        if let Some(prev) = &expected {
            assert_eq!(*prev, triple);
        }
        expected = Some(triple);
    }
    let (damage, shock, organs) = expected.unwrap();
    assert_eq!(damage, 6000);
    assert_eq!(shock, 40_000);
    assert_eq!(organs, vec!["ribs".to_string()]);
}

#[test]
fn test_shot_result_round_trips_through_json() {
    let shooter = Character::test_rifleman();
    let weapon = Weapon::assault_rifle();
    let ammo = AmmoType::rifle_ball();
    let mut target = Character::test_conscript();
    let params = ShotParameters::aimed(50, 3);
    let mut dice = Dice::seeded(8);
    let result =
        modes::single_shot(&shooter, &weapon, &ammo, &mut target, &params, &mut dice).unwrap();

    let json = serde_json::to_string(&result).unwrap();
    let back: fusillade::model::results::ShotResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.hit, result.hit);
    assert_eq!(back.eal, result.eal);
    assert_eq!(back.damage, result.damage);
}

#[test]
fn test_dropping_the_rifle_lightens_the_load() {
    let mut c = Character::test_rifleman();
    let before = c.encumbrance();
    let rifle_id = c
        .inventory()
        .iter()
        .find(|(_, item)| matches!(item, Equipment::Weapon(_)))
        .map(|(id, _)| id)
        .unwrap();
    c.inventory_mut().remove(rifle_id).unwrap();
    assert!(c.encumbrance() < before);
    // Less weight can only help the derived movement chain.
    assert!(c.base_speed().unwrap() >= 2);
}
