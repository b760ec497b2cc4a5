//! Blunt damage behind armor
//!
//! When a round is stopped, the struck location maps to one of three
//! body-region tables indexed by (penetration row, protection-factor
//! column). Penetration interpolates linearly between adjacent rows and
//! clamps at the extremes.

use crate::tables::hit_location::HitLocation;

/// Penetration rows shared by all three region tables.
const PEN_KEYS: [f64; 7] = [0.5, 1.0, 2.0, 4.0, 8.0, 16.0, 32.0];

/// Head, neck, and heart: thin cover over things that stop working.
const VITAL: [[u32; 10]; 7] = [
    [10, 8, 6, 5, 4, 3, 2, 2, 1, 1],
    [25, 20, 16, 12, 10, 8, 6, 5, 4, 3],
    [60, 48, 38, 30, 24, 18, 14, 10, 8, 6],
    [150, 120, 95, 75, 60, 45, 35, 26, 20, 15],
    [400, 320, 250, 200, 160, 120, 90, 70, 50, 40],
    [1000, 800, 640, 500, 400, 300, 230, 180, 130, 100],
    [2500, 2000, 1600, 1250, 1000, 750, 580, 450, 330, 250],
];

/// Torso, organs, spine, pelvis.
const TORSO: [[u32; 10]; 7] = [
    [4, 3, 3, 2, 2, 1, 1, 1, 0, 0],
    [10, 8, 6, 5, 4, 3, 2, 2, 1, 1],
    [25, 20, 16, 12, 10, 8, 6, 4, 3, 2],
    [60, 48, 38, 30, 24, 18, 14, 10, 8, 6],
    [150, 120, 95, 75, 60, 45, 35, 26, 20, 15],
    [380, 300, 240, 190, 150, 115, 90, 68, 50, 38],
    [950, 760, 600, 480, 380, 290, 220, 170, 125, 95],
];

/// Limbs.
const LIMB: [[u32; 10]; 7] = [
    [2, 2, 1, 1, 1, 1, 0, 0, 0, 0],
    [5, 4, 3, 3, 2, 2, 1, 1, 1, 0],
    [12, 10, 8, 6, 5, 4, 3, 2, 2, 1],
    [30, 24, 19, 15, 12, 9, 7, 5, 4, 3],
    [75, 60, 48, 38, 30, 23, 18, 14, 10, 8],
    [190, 150, 120, 95, 75, 58, 45, 34, 25, 19],
    [470, 380, 300, 240, 190, 145, 110, 85, 62, 47],
];

fn region_table(location: HitLocation) -> &'static [[u32; 10]; 7] {
    use HitLocation::*;
    match location {
        Head | Eyes | Neck | UpperChest => &VITAL,
        Shoulder | LowerChest | Abdomen | Pelvis => &TORSO,
        UpperArm | Forearm | Hand | Thigh | Knee | Calf | Foot => &LIMB,
    }
}

/// Blunt damage through armor that stopped the round.
///
/// A protection factor above 10 always absorbs the blow completely; a
/// factor at or below zero counts as 1.
pub fn blunt_damage(location: HitLocation, penetration: f64, protection_factor: f64) -> u32 {
    if protection_factor > 10.0 {
        return 0;
    }
    let pf = if protection_factor <= 0.0 {
        1
    } else {
        (protection_factor.round() as i32).clamp(1, 10)
    };
    let col = (pf - 1) as usize;
    let table = region_table(location);

    if penetration <= PEN_KEYS[0] {
        return table[0][col];
    }
    let last = PEN_KEYS.len() - 1;
    if penetration >= PEN_KEYS[last] {
        return table[last][col];
    }
    for i in 0..last {
        if penetration >= PEN_KEYS[i] && penetration <= PEN_KEYS[i + 1] {
            let lo = table[i][col] as f64;
            let hi = table[i + 1][col] as f64;
            let t = (penetration - PEN_KEYS[i]) / (PEN_KEYS[i + 1] - PEN_KEYS[i]);
            return (lo + (hi - lo) * t).round() as u32;
        }
    }
    table[last][col]
}
