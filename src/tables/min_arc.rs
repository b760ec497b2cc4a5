//! Effective minimum arc of automatic fire
//!
//! A burst cannot be swept tighter than the weapon and shooter allow.
//! The weapon's tabulated minimum arc is pushed through a pipeline of
//! factors - weapon family, stance, strength, grip, movement - each of
//! which nearest-matches the running value and replaces it with its own
//! column entry.

use serde::{Deserialize, Serialize};

use crate::tables::band::{band_index, Band};

/// Broad weapon handling class for arc control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponFamily {
    /// Shoulder-fired rifles, carbines, submachine guns.
    Rifle,
    /// Bipod and tripod machine guns, launchers.
    Support,
}

/// Shooter stance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stance {
    Standing,
    Kneeling,
    Prone,
}

/// Arc steps, in hexes, that every pipeline factor nearest-matches on.
const ARC_KEYS: [f64; 8] = [0.1, 0.2, 0.4, 0.7, 1.0, 1.5, 2.5, 4.0];

const FAMILY_RIFLE: [f64; 8] = [0.1, 0.2, 0.4, 0.7, 1.0, 1.5, 2.5, 4.0];
const FAMILY_SUPPORT: [f64; 8] = [0.2, 0.3, 0.5, 0.8, 1.2, 1.8, 3.0, 5.0];

const STANCE_STANDING: [f64; 8] = [0.2, 0.3, 0.5, 0.8, 1.2, 1.8, 3.0, 5.0];
const STANCE_KNEELING: [f64; 8] = [0.1, 0.2, 0.4, 0.7, 1.1, 1.6, 2.6, 4.2];
const STANCE_PRONE: [f64; 8] = [0.1, 0.15, 0.3, 0.5, 0.8, 1.2, 2.0, 3.2];

/// Strength bands (floor).
const STRENGTH_KEYS: [i32; 5] = [3, 6, 9, 12, 15];
const STRENGTH_ARCS: [[f64; 8]; 5] = [
    [0.2, 0.35, 0.6, 1.0, 1.5, 2.2, 3.6, 5.5],
    [0.15, 0.25, 0.5, 0.8, 1.2, 1.8, 3.0, 4.5],
    [0.1, 0.2, 0.4, 0.7, 1.0, 1.5, 2.5, 4.0],
    [0.1, 0.18, 0.35, 0.6, 0.9, 1.3, 2.2, 3.5],
    [0.1, 0.15, 0.3, 0.5, 0.8, 1.2, 2.0, 3.0],
];

const ONE_HANDED: [f64; 8] = [0.2, 0.35, 0.6, 1.0, 1.5, 2.2, 3.5, 5.5];
const MOVING: [f64; 8] = [0.25, 0.4, 0.7, 1.1, 1.6, 2.4, 4.0, 6.0];

fn apply(running: f64, column: &[f64; 8]) -> f64 {
    let idx = band_index(&ARC_KEYS, running, Band::Nearest).unwrap_or(0);
    column[idx]
}

/// Run the weapon's minimum arc through every applicable factor.
pub fn effective_minimum_arc(
    weapon_min_arc: f64,
    family: WeaponFamily,
    stance: Stance,
    strength: i32,
    one_handed: bool,
    moving: bool,
) -> f64 {
    let mut arc = weapon_min_arc;
    arc = apply(
        arc,
        match family {
            WeaponFamily::Rifle => &FAMILY_RIFLE,
            WeaponFamily::Support => &FAMILY_SUPPORT,
        },
    );
    arc = apply(
        arc,
        match stance {
            Stance::Standing => &STANCE_STANDING,
            Stance::Kneeling => &STANCE_KNEELING,
            Stance::Prone => &STANCE_PRONE,
        },
    );
    let strength_row = band_index(&STRENGTH_KEYS, strength, Band::Floor).unwrap_or(0);
    arc = apply(arc, &STRENGTH_ARCS[strength_row]);
    if one_handed {
        arc = apply(arc, &ONE_HANDED);
    }
    if moving {
        arc = apply(arc, &MOVING);
    }
    arc
}
