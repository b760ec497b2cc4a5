//! Character-generation derived-stat tables
//!
//! Base/max speed, skill accuracy, combat actions, impulse allocation,
//! knockout value and the defensive accuracy step. All pure lookups; the
//! Character type recomputes these on demand and never stores them.

use crate::core::error::{EngineError, Result};
use crate::tables::band::{band_index, Band};

/// Strength bands for base speed (floor).
const STRENGTH_KEYS: [i32; 6] = [1, 3, 6, 9, 12, 15];

/// Encumbrance bands in pounds carried (ceiling).
const ENCUMBRANCE_KEYS: [f64; 6] = [5.0, 10.0, 20.0, 35.0, 50.0, 80.0];

/// Base speed in hexes per turn by (strength row, encumbrance column).
const BASE_SPEED: [[i32; 6]; 6] = [
    [2, 1, 1, 1, 1, 1],
    [2, 2, 1, 1, 1, 1],
    [3, 2, 2, 2, 1, 1],
    [3, 3, 2, 2, 2, 1],
    [4, 3, 3, 2, 2, 2],
    [4, 4, 3, 3, 2, 2],
];

/// Base speed from strength (floor band) and carried weight (ceiling band).
///
/// Carrying more than the last encumbrance band is a table-domain error:
/// such a character cannot maneuver at all and the caller must shed load.
pub fn base_speed(strength: i32, encumbrance: f64) -> Result<i32> {
    let row = band_index(&STRENGTH_KEYS, strength, Band::Floor).ok_or_else(|| {
        EngineError::TableDomain {
            table: "base speed",
            detail: format!("strength {strength} below minimum"),
        }
    })?;
    let col = band_index(&ENCUMBRANCE_KEYS, encumbrance, Band::Ceiling).ok_or_else(|| {
        EngineError::TableDomain {
            table: "base speed",
            detail: format!("encumbrance {encumbrance:.1} lbs over maximum load"),
        }
    })?;
    Ok(BASE_SPEED[row][col])
}

/// Max speed by exact (agility 1-15, base speed 1-5) pair; 0 when the
/// pair is not tabulated.
const MAX_SPEED: [[i32; 5]; 15] = [
    [2, 3, 4, 5, 6],
    [2, 3, 4, 5, 6],
    [2, 3, 4, 5, 6],
    [3, 4, 5, 6, 7],
    [3, 4, 5, 6, 7],
    [3, 4, 5, 6, 7],
    [3, 4, 5, 6, 7],
    [4, 5, 6, 7, 8],
    [4, 5, 6, 7, 8],
    [4, 5, 6, 7, 8],
    [4, 5, 6, 7, 8],
    [5, 6, 7, 8, 9],
    [5, 6, 7, 8, 9],
    [5, 6, 7, 8, 9],
    [5, 6, 7, 8, 9],
];

pub fn max_speed(agility: i32, base_speed: i32) -> i32 {
    if !(1..=15).contains(&agility) || !(1..=5).contains(&base_speed) {
        return 0;
    }
    MAX_SPEED[(agility - 1) as usize][(base_speed - 1) as usize]
}

/// Skill accuracy level by exact gun-combat skill level 0-20.
const SKILL_ACCURACY: [i32; 21] = [
    -6, -3, -1, 1, 3, 4, 6, 7, 8, 9, 10, 11, 12, 12, 13, 13, 14, 14, 15, 15, 16,
];

pub fn skill_accuracy_level(skill_level: i32) -> Result<i32> {
    if !(0..=20).contains(&skill_level) {
        return Err(EngineError::TableDomain {
            table: "skill accuracy level",
            detail: format!("skill level {skill_level} outside 0-20"),
        });
    }
    Ok(SKILL_ACCURACY[skill_level as usize])
}

/// Intelligence-skill-factor columns; an ISF between columns snaps up.
const ISF_KEYS: [i32; 7] = [4, 8, 12, 16, 20, 24, 28];

/// Combat actions per turn by (max speed row 1-9, ISF column).
const COMBAT_ACTIONS: [[i32; 7]; 9] = [
    [1, 1, 2, 2, 3, 3, 4],
    [2, 2, 3, 3, 4, 4, 5],
    [2, 3, 4, 4, 5, 5, 6],
    [3, 4, 5, 5, 6, 7, 8],
    [3, 4, 5, 6, 7, 8, 9],
    [4, 5, 6, 7, 8, 9, 10],
    [4, 5, 7, 8, 9, 10, 12],
    [5, 6, 8, 9, 10, 12, 14],
    [5, 7, 9, 10, 12, 14, 16],
];

/// Combat actions from an exact max-speed row and the intelligence-skill
/// factor (intelligence + skill level) snapped up to its column. Factors
/// above the last column clamp to it.
pub fn combat_actions(max_speed: i32, intelligence_skill_factor: i32) -> Result<i32> {
    if !(1..=9).contains(&max_speed) {
        return Err(EngineError::TableDomain {
            table: "combat actions",
            detail: format!("max speed {max_speed} outside 1-9"),
        });
    }
    let col = band_index(&ISF_KEYS, intelligence_skill_factor, Band::Ceiling)
        .unwrap_or(ISF_KEYS.len() - 1);
    Ok(COMBAT_ACTIONS[(max_speed - 1) as usize][col])
}

/// Per-impulse action allocation for combat actions 1-24.
///
/// Spare actions land on impulses in 1, 3, 2, 4 order so a slow character
/// still acts early in the turn.
const IMPULSE_SPLIT: [[u8; 4]; 24] = [
    [1, 0, 0, 0],
    [1, 0, 1, 0],
    [1, 1, 1, 0],
    [1, 1, 1, 1],
    [2, 1, 1, 1],
    [2, 1, 2, 1],
    [2, 2, 2, 1],
    [2, 2, 2, 2],
    [3, 2, 2, 2],
    [3, 2, 3, 2],
    [3, 3, 3, 2],
    [3, 3, 3, 3],
    [4, 3, 3, 3],
    [4, 3, 4, 3],
    [4, 4, 4, 3],
    [4, 4, 4, 4],
    [5, 4, 4, 4],
    [5, 4, 5, 4],
    [5, 5, 5, 4],
    [5, 5, 5, 5],
    [6, 5, 5, 5],
    [6, 5, 6, 5],
    [6, 6, 6, 5],
    [6, 6, 6, 6],
];

pub fn impulses_per_turn(combat_actions: i32) -> Result<[u8; 4]> {
    if !(1..=24).contains(&combat_actions) {
        return Err(EngineError::TableDomain {
            table: "impulse allocation",
            detail: format!("combat actions {combat_actions} outside 1-24"),
        });
    }
    Ok(IMPULSE_SPLIT[(combat_actions - 1) as usize])
}

/// Knockout value: the damage-plus-shock threshold driving incapacitation.
pub fn knockout_value(will: i32, health: i32) -> i32 {
    (will * health) / 10 + (will + health) / 2
}

/// Defensive accuracy step: quick characters are harder to hit.
const DEFENSE_CA_KEYS: [i32; 6] = [1, 3, 5, 7, 9, 12];
const DEFENSE_ALM: [i32; 6] = [0, -1, -2, -3, -4, -6];

pub fn defense_alm(combat_actions: i32) -> i32 {
    match band_index(&DEFENSE_CA_KEYS, combat_actions, Band::Floor) {
        Some(i) => DEFENSE_ALM[i],
        None => 0,
    }
}
