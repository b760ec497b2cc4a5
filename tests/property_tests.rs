//! Property tests for the table and redistribution invariants

use proptest::prelude::*;

use fusillade::core::dice::ScriptedDice;
use fusillade::resolve::redistribute;
use fusillade::tables::accuracy::{odds_of_hitting, ShotKind};
use fusillade::tables::autofire::{roll_hits, swarm_cell, HitCell};
use fusillade::tables::blunt::blunt_damage;
use fusillade::tables::hit_location::HitLocation;
use fusillade::tables::scatter::{scatter_distance, MAX_SCATTER};

proptest! {
    #[test]
    fn odds_never_decrease_with_eal(eal in -60i32..60) {
        for kind in [ShotKind::SingleShot, ShotKind::BurstElevation] {
            let here = odds_of_hitting(eal, kind);
            let above = odds_of_hitting(eal + 1, kind);
            prop_assert!(above >= here);
            prop_assert!(here <= 99);
        }
    }

    #[test]
    fn odds_saturate_outside_the_table(eal in -200i32..200) {
        let odds = odds_of_hitting(eal, ShotKind::SingleShot);
        if eal < -22 {
            prop_assert_eq!(odds, 0);
        } else if eal > 28 {
            prop_assert_eq!(odds, 99);
        }
    }

    #[test]
    fn redistribution_conserves_totals(
        allocations in prop::collection::vec(0u32..12, 1..6),
        weights_seed in prop::collection::vec(-5i32..40, 1..6),
        capacity in 8u32..40,
    ) {
        let n = allocations.len().min(weights_seed.len());
        let allocations = &allocations[..n];
        let weights = &weights_seed[..n];
        // The ruleset assumes the burst can cover one round per target.
        prop_assume!(capacity as usize >= n);

        let out = redistribute(allocations, weights, capacity).unwrap();
        let total_in: u32 = allocations.iter().sum();
        let total_out: u32 = out.iter().sum();
        prop_assert_eq!(total_out, total_in.min(capacity));
        for (i, &a) in allocations.iter().enumerate() {
            if a > 0 && total_in > capacity {
                prop_assert!(out[i] >= 1, "engaged target lost all rounds");
            }
            if a == 0 {
                prop_assert_eq!(out[i], 0);
            }
        }
    }

    #[test]
    fn blunt_damage_falls_with_protection(
        pen in 0.1f64..40.0,
        pf in 1i32..10,
    ) {
        for loc in [HitLocation::Head, HitLocation::Abdomen, HitLocation::Calf] {
            let worse = blunt_damage(loc, pen, pf as f64);
            let better = blunt_damage(loc, pen, (pf + 1) as f64);
            prop_assert!(better <= worse);
        }
        prop_assert_eq!(blunt_damage(HitLocation::Head, pen, 11.0), 0);
    }

    #[test]
    fn blunt_damage_rises_with_penetration(
        pen in 0.5f64..30.0,
        pf in 1i32..=10,
    ) {
        let shallow = blunt_damage(HitLocation::Thigh, pen, pf as f64);
        let deep = blunt_damage(HitLocation::Thigh, pen + 2.0, pf as f64);
        prop_assert!(deep >= shallow);
    }

    #[test]
    fn scatter_is_monotone_and_capped(shortfall in -10i32..200) {
        let here = scatter_distance(shortfall);
        let further = scatter_distance(shortfall + 1);
        prop_assert!(further >= here);
        prop_assert!(here >= 1);
        prop_assert!(here <= MAX_SCATTER);
    }

    #[test]
    fn guaranteed_swarm_cells_ignore_the_roll(
        chance in 0u32..200,
        size_alm in -12i32..=0,
        roll in 0u32..100,
    ) {
        let cell = swarm_cell(chance, size_alm);
        if let HitCell::Hits(g) = cell {
            let mut dice = ScriptedDice::new(&[roll]);
            prop_assert_eq!(roll_hits(cell, &mut dice), g);
            prop_assert!(g >= 1);
        }
    }

    #[test]
    fn probabilistic_swarm_cells_follow_the_roll(
        chance in 0u32..100,
        roll in 0u32..100,
    ) {
        let cell = swarm_cell(chance, 0);
        if let HitCell::Chance(pct) = cell {
            let mut dice = ScriptedDice::new(&[roll]);
            let hits = roll_hits(cell, &mut dice);
            prop_assert_eq!(hits, u32::from(roll < pct));
        }
    }
}
